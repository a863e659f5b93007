// src/lib.rs
pub mod config;
pub mod count_file;
pub mod discover;
pub mod error;
pub mod table;
pub mod types;

use std::path::PathBuf;

use crate::config::MergeConfig;
use crate::count_file::{filter_and_tag, load_optional};
use crate::discover::{discover_inputs, CONTIG_SUFFIX, READ_SUFFIX};
use crate::error::MergeError;
use crate::table::MergedTable;
use crate::types::{CountRecord, SourceType};

/// Run the whole merge pipeline: discover inputs, seed the accumulation,
/// fold every sample in, write the merged CSV. Returns the output path.
pub fn run(config: &MergeConfig) -> Result<PathBuf, MergeError> {
    // 1. Enumerate the two input sets
    let inputs = discover_inputs(&config.input_dir)?;

    // 2. Seed the accumulation, from the reference when one is supplied
    let mut table = match &config.reference {
        Some(reference) => MergedTable::from_reference(reference)?,
        None => {
            let first = inputs
                .contig_files
                .first()
                .ok_or_else(|| MergeError::MissingInput {
                    dir: config.input_dir.clone(),
                })?;
            MergedTable::seed_from_contig_file(first)?
        }
    };

    // 3. Fold each sample's contribution into the table
    for sample in inputs.samples() {
        let contribution = load_sample(config, &sample)?;
        table = table.merge_sample(&sample, contribution);
    }

    // 4. Serialize
    let output = config.output_path();
    table.write_csv(&output)?;
    log::info!(
        "wrote {} row(s) x {} sample column(s) to {}",
        table.len(),
        table.samples().len(),
        output.display()
    );
    Ok(output)
}

/// Load, filter and tag one sample's contig and read counts.
///
/// Either file may be absent; that source then contributes nothing. Each
/// source is filtered against its own threshold before tagging, so a taxon
/// can pass one filter and fail the other independently.
pub fn load_sample(config: &MergeConfig, sample: &str) -> Result<Vec<CountRecord>, MergeError> {
    let contig_path = config.input_dir.join(format!("{sample}{CONTIG_SUFFIX}"));
    let mut records = match load_optional(&contig_path)? {
        Some(rows) => filter_and_tag(rows, config.contig_min, SourceType::ContigCount),
        None => Vec::new(),
    };

    let read_path = config.input_dir.join(format!("{sample}{READ_SUFFIX}"));
    if let Some(rows) = load_optional(&read_path)? {
        records.extend(filter_and_tag(rows, config.read_min, SourceType::ReadCount));
    }
    Ok(records)
}
