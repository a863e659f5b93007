use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use md_merge::config::{MergeConfig, DEFAULT_FILTER};

/// Merge per-sample taxonomic count tables into one filtered CSV.
#[derive(Parser, Debug)]
#[command(name = "md-merge", version, about)]
struct Cli {
    /// Directory containing the per-sample count files
    #[arg(short = 'i', long = "in")]
    input: PathBuf,

    /// Pre-existing merged reference CSV to seed the accumulation from
    #[arg(short = 'm', long = "md-ref")]
    md_ref: Option<PathBuf>,

    /// Label prepended to the output filename
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Keep contig counts strictly above this value
    #[arg(short = 'n', long = "nfilt", default_value_t = DEFAULT_FILTER)]
    nfilt: u64,

    /// Keep read counts strictly above this value
    #[arg(short = 'r', long = "rfilt", default_value_t = DEFAULT_FILTER)]
    rfilt: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = MergeConfig {
        input_dir: cli.input,
        reference: cli.md_ref,
        project: cli.project,
        contig_min: cli.nfilt,
        read_min: cli.rfilt,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message(format!(
        "Merging count tables from {}...",
        config.input_dir.display()
    ));

    match md_merge::run(&config) {
        Ok(output) => {
            spinner.finish_with_message(format!("Merged table written to {}", output.display()));
        }
        Err(e) => {
            spinner.finish_and_clear();
            log::error!("{e}");
            eprintln!("md-merge: {e}");
            process::exit(1);
        }
    }
}
