// WHY: Both detectors share one conflict rule so their labels stay comparable

use serde::{Deserialize, Serialize};

/// Register classification of a single sentence
///
/// Never both `is_t` and `is_v`: values are only produced by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RegisterLabel {
    is_t: bool,
    is_v: bool,
}

impl RegisterLabel {
    pub const NEUTRAL: RegisterLabel = RegisterLabel { is_t: false, is_v: false };
    pub const T: RegisterLabel = RegisterLabel { is_t: true, is_v: false };
    pub const V: RegisterLabel = RegisterLabel { is_t: false, is_v: true };

    pub fn is_t(&self) -> bool {
        self.is_t
    }

    pub fn is_v(&self) -> bool {
        self.is_v
    }

    pub fn is_neutral(&self) -> bool {
        !self.is_t && !self.is_v
    }

    pub fn as_tuple(&self) -> (bool, bool) {
        (self.is_t, self.is_v)
    }
}

impl From<RegisterLabel> for (bool, bool) {
    fn from(label: RegisterLabel) -> Self {
        label.as_tuple()
    }
}

/// Turn raw T/V signals into a label; conflicting signals are neutral
pub fn resolve(t_hit: bool, v_hit: bool) -> RegisterLabel {
    RegisterLabel {
        is_t: t_hit && !v_hit,
        is_v: v_hit && !t_hit,
    }
}
