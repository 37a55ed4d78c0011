use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tvdetect::corpus::{self, DeixisConfig, SubcorpusConfig};
use tvdetect::{DetectorKind, LabelOptions, PairingPolicy, RegisterLabel};

#[derive(Parser, Debug)]
#[command(name = "tvdetect")]
#[command(about = "T/V register detection and evaluation for Russian translations")]
#[command(version)]
struct Args {
    /// Fail when paired corpora differ in length instead of truncating
    #[arg(long, global = true)]
    strict_lengths: bool,

    /// Suppress console progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Label sentences as T, V or neutral and print the counts
    Detect {
        #[arg(long, value_enum, default_value = "token")]
        detector: DetectorKind,

        /// Corpus file (raw text for token, CoNLL-U for conll)
        #[arg(long)]
        file: Option<PathBuf>,

        /// In-memory sentence; repeat for several
        #[arg(long = "line")]
        lines: Vec<String>,

        /// Write one JSON label per line
        #[arg(long)]
        labels_out: Option<PathBuf>,
    },
    /// Compare token-based detection on SOURCE with grammar-based detection on SOURCE.conll
    Compare { source: PathBuf },
    /// Prefix SOURCE lines with <T>/<V> based on labels detected in TARGET
    Mark {
        #[arg(long, value_enum, default_value = "token")]
        detector: DetectorKind,
        source: PathBuf,
        target: PathBuf,
    },
    /// Prefix every line of SOURCE with LABEL
    Prepend {
        source: PathBuf,
        label: String,
        target: PathBuf,
    },
    /// Report T/V counts, BLEU and BLEURT for a translation
    Metrics {
        translations: Vec<PathBuf>,
        #[arg(long)]
        reference: PathBuf,
        /// Write reports as a JSON array
        #[arg(long)]
        report_out: Option<PathBuf>,
    },
    /// Build a register-balanced parallel subcorpus
    Subcorpus {
        source_ru: PathBuf,
        source_en: PathBuf,
        target_ru: PathBuf,
        target_en: PathBuf,
        #[arg(long, default_value_t = 22_000)]
        v_limit: usize,
        #[arg(long, default_value_t = 100_000)]
        neutral_limit: usize,
        #[arg(long, default_value_t = 100)]
        max_line_chars: usize,
    },
    /// Merge the deixis test/dev sets into one sentence pair per line
    Deixis {
        dir: PathBuf,
        #[arg(long, default_value = "deixis_test_en")]
        en_out: PathBuf,
        #[arg(long, default_value = "deixis_test_ru")]
        ru_out: PathBuf,
    },
}

async fn write_labels(path: &Path, labels: &[RegisterLabel]) -> Result<()> {
    let mut out = Vec::new();
    for label in labels {
        serde_json::to_writer(&mut out, label)?;
        out.push(b'\n');
    }
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Cannot create {}", path.display()))?;
    file.write_all(&out).await?;
    file.flush().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logs go to stderr so stdout carries only the reports
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let pairing = if args.strict_lengths {
        PairingPolicy::Strict
    } else {
        PairingPolicy::Truncate
    };

    match args.command {
        Command::Detect {
            detector,
            file,
            lines,
            labels_out,
        } => {
            let lines = (!lines.is_empty()).then_some(lines);
            let detector = detector.build();
            let labels = tokio::task::spawn_blocking(move || {
                detector.detect_t_v_labels(lines.as_deref(), file.as_deref())
            })
            .await??;

            if let Some(path) = labels_out {
                write_labels(&path, &labels).await?;
                info!("Wrote {} labels to {}", labels.len(), path.display());
            }
        }
        Command::Compare { source } => {
            if !source.is_file() {
                anyhow::bail!("Source corpus does not exist: {}", source.display());
            }
            tokio::task::spawn_blocking(move || tvdetect::compare_detectors(&source)).await??;
        }
        Command::Mark {
            detector,
            source,
            target,
        } => {
            let options = LabelOptions {
                pairing,
                no_progress: args.no_progress,
            };
            let output = tvdetect::mark_tv_sentences(detector.build(), &source, &target, &options).await?;
            println!("Wrote sentences with T/V labels to {}", output.display());
        }
        Command::Prepend {
            source,
            label,
            target,
        } => {
            tvdetect::prepend_label_to_all_lines(&source, &label, &target).await?;
        }
        Command::Metrics {
            translations,
            reference,
            report_out,
        } => {
            if translations.is_empty() {
                anyhow::bail!("At least one translation file is required");
            }
            let mut reports = Vec::with_capacity(translations.len());
            for translation in &translations {
                reports.push(tvdetect::report_metrics(translation, &reference, pairing).await?);
                println!();
            }
            if let Some(path) = report_out {
                let json = serde_json::to_string_pretty(&reports)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Cannot write report to {}", path.display()))?;
            }
        }
        Command::Subcorpus {
            source_ru,
            source_en,
            target_ru,
            target_en,
            v_limit,
            neutral_limit,
            max_line_chars,
        } => {
            let config = SubcorpusConfig {
                v_limit,
                neutral_limit,
                max_line_chars,
                pairing,
            };
            let stats = corpus::create_tv_subcorpus(&source_ru, &source_en, &target_ru, &target_en, &config).await?;
            println!(
                "Subcorpus: kept {} pairs (T seen: {}, V seen: {}, neutral seen: {})",
                stats.kept, stats.t_seen, stats.v_seen, stats.neutral_seen
            );
        }
        Command::Deixis { dir, en_out, ru_out } => {
            if !dir.is_dir() {
                anyhow::bail!("Deixis directory does not exist: {}", dir.display());
            }
            let config = DeixisConfig {
                en_output: en_out,
                ru_output: ru_out,
                pairing,
                ..Default::default()
            };
            let written = corpus::reformat_deixis_files(&dir, &config).await?;
            println!("Wrote {written} deixis sentence pairs");
        }
    }

    Ok(())
}
