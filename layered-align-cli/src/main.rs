use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

use layered_annotations::{
    document_to_stp, load_dump, load_json, load_sentences, reconstruct_document,
};
use layered_sentence_align::{group_sentence_alignments, load_correspondences, AlignPrepConfig};

#[derive(Parser, Debug)]
#[command(name = "layered-align", author, version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short = 'c', long, global = true, default_value = "layered-align.toml")]
    config: PathBuf,
    /// Log to stderr; repeat for debug output
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render JSON annotations as text dumps (`<stem>.out`)
    Json2txt {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short = 'o', long)]
        out_dir: Option<PathBuf>,
    },
    /// Write one flattened parse tree per sentence (`<name>.stp`)
    Json2stp {
        input: PathBuf,
        #[arg(short = 'o', long)]
        out_dir: Option<PathBuf>,
    },
    /// Parse a text dump and print it as JSON
    Parse { input: PathBuf },
    /// Group sentences by their correspondences and print the groups as JSON
    Group {
        source: PathBuf,
        target: PathBuf,
        source_json: PathBuf,
        target_json: PathBuf,
        /// `source<TAB>target` index pairs; 1-to-1 pairing when absent
        #[arg(short = 'a', long)]
        aligns: Option<PathBuf>,
    },
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

/// `out_dir/file_name`, or next to `input` when no directory is given.
fn output_path(input: &Path, out_dir: Option<&Path>, file_name: String) -> PathBuf {
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(file_name)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = AlignPrepConfig::load(&args.config)?;

    match args.command {
        Command::Json2txt { inputs, out_dir } => {
            for input in &inputs {
                let document = load_json(input)?;
                let stem = input.file_stem().unwrap_or(input.as_os_str());
                let out = output_path(
                    input,
                    out_dir.as_deref(),
                    format!("{}.out", stem.to_string_lossy()),
                );
                fs::write(&out, reconstruct_document(&document, &config.reconstruct))?;
                log::info!("{} -> {}", input.display(), out.display());
            }
        }
        Command::Json2stp { input, out_dir } => {
            let document = load_json(&input)?;
            // keeps the extension: `doc.json` -> `doc.json.stp`
            let name = input.file_name().unwrap_or(input.as_os_str());
            let out = output_path(
                &input,
                out_dir.as_deref(),
                format!("{}.stp", name.to_string_lossy()),
            );
            fs::write(&out, document_to_stp(&document))?;
            log::info!("{} -> {}", input.display(), out.display());
        }
        Command::Parse { input } => {
            let document = load_dump(&input)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::Group {
            source,
            target,
            source_json,
            target_json,
            aligns,
        } => {
            let source = load_sentences(&source)?;
            let target = load_sentences(&target)?;
            let source_parses = load_json(&source_json)?.sentences;
            let target_parses = load_json(&target_json)?.sentences;

            let given = match aligns {
                Some(path) => Some(load_correspondences(&path)?),
                None => None,
            };
            let correspondences =
                config.resolve_correspondences(given, source.len(), target.len())?;

            let groups = group_sentence_alignments(
                &source,
                &source_parses,
                &target,
                &target_parses,
                &correspondences,
            )?;
            log::info!(
                "{} correspondences -> {} groups",
                correspondences.len(),
                groups.len()
            );

            let summary: Vec<serde_json::Value> = groups
                .iter()
                .map(|group| {
                    serde_json::json!({
                        "kind": group.kind(),
                        "source_indices": group.source_indices,
                        "target_indices": group.target_indices,
                        "source": group.source,
                        "target": group.target,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(5), LevelFilter::Debug);
    }

    #[test]
    fn verbose_flag_counts_repeats() {
        let args = Args::try_parse_from(["layered-align", "-vv", "parse", "doc.out"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Command::Parse { .. }));
    }

    #[test]
    fn outputs_land_next_to_input_by_default() {
        let out = output_path(Path::new("data/doc.json"), None, "doc.out".into());
        assert_eq!(out, Path::new("data/doc.out"));

        let out = output_path(
            Path::new("data/doc.json"),
            Some(Path::new("build")),
            "doc.json.stp".into(),
        );
        assert_eq!(out, Path::new("build/doc.json.stp"));
    }
}
