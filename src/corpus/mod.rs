// WHY: Dataset preparation around the detectors: deixis test set reformatting
// and register-balanced subcorpus extraction

use std::path::{Path, PathBuf};

pub mod deixis;
pub mod subcorpus;

pub use deixis::{extract_pairs, reformat_deixis_files, DeixisConfig};
pub use subcorpus::{create_tv_subcorpus, SubcorpusConfig, SubcorpusStats};

/// `path` with `suffix` appended to the full file name
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix_keeps_extension() {
        assert_eq!(with_suffix(Path::new("out/base.ru"), ".conll"), PathBuf::from("out/base.ru.conll"));
        assert_eq!(with_suffix(Path::new("base_model"), ".bleurt"), PathBuf::from("base_model.bleurt"));
    }
}
