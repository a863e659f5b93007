//src/discover.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename suffix of contig-derived count files. Sample names are the
/// basename with this suffix stripped.
pub const CONTIG_SUFFIX: &str = "_metaspades_contigs_blastx_daa_summary_count.tsv";

/// Suffix matched when listing read-derived count files. Broader than
/// [`READ_SUFFIX`] on purpose: the historical glob was `*_reads_...` while
/// per-sample loads use the exact `_short_reads_` name.
pub const READ_LIST_SUFFIX: &str = "_reads_blastx_daa_summary_count.tsv";

/// Exact suffix used when loading one sample's read counts.
pub const READ_SUFFIX: &str = "_short_reads_blastx_daa_summary_count.tsv";

/// Count files found in the input directory, split by source.
#[derive(Debug, Default)]
pub struct DiscoveredInputs {
    pub contig_files: Vec<PathBuf>,
    pub read_files: Vec<PathBuf>,
}

impl DiscoveredInputs {
    /// Sample names, one per contig count file, in listing order.
    pub fn samples(&self) -> Vec<String> {
        self.contig_files
            .iter()
            .filter_map(|path| sample_name(path))
            .collect()
    }
}

/// List `dir` and split matching files into the contig and read sets.
///
/// Empty matches yield empty vectors, not errors. Order is whatever the
/// directory listing yields; callers must not rely on it for correctness.
pub fn discover_inputs(dir: &Path) -> io::Result<DiscoveredInputs> {
    let mut found = DiscoveredInputs::default();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if name.ends_with(CONTIG_SUFFIX) {
            found.contig_files.push(path);
        } else if name.ends_with(READ_LIST_SUFFIX) {
            found.read_files.push(path);
        }
    }
    log::info!(
        "discovered {} contig count file(s) and {} read count file(s) in {}",
        found.contig_files.len(),
        found.read_files.len(),
        dir.display()
    );
    Ok(found)
}

/// Derive a sample name by stripping the contig suffix from the basename.
/// `None` for paths that do not carry the suffix.
pub fn sample_name(contig_file: &Path) -> Option<String> {
    let name = contig_file.file_name()?.to_str()?;
    name.strip_suffix(CONTIG_SUFFIX).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn splits_files_by_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), &format!("sampleA{CONTIG_SUFFIX}"));
        touch(dir.path(), &format!("sampleB{CONTIG_SUFFIX}"));
        touch(dir.path(), &format!("sampleA{READ_SUFFIX}"));
        touch(dir.path(), "sampleA_blastx.daa");
        touch(dir.path(), "notes.txt");

        let found = discover_inputs(dir.path()).unwrap();
        assert_eq!(found.contig_files.len(), 2);
        assert_eq!(found.read_files.len(), 1);

        let mut samples = found.samples();
        samples.sort();
        assert_eq!(samples, vec!["sampleA", "sampleB"]);
    }

    #[test]
    fn short_reads_files_match_the_read_listing() {
        // The listing suffix is a tail of the short-reads name.
        let name = format!("s1{READ_SUFFIX}");
        assert!(name.ends_with(READ_LIST_SUFFIX));
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let found = discover_inputs(dir.path()).unwrap();
        assert!(found.contig_files.is_empty());
        assert!(found.read_files.is_empty());
        assert!(found.samples().is_empty());
    }

    #[test]
    fn sample_name_requires_the_suffix() {
        let path = Path::new("/data/run1/s1_metaspades_contigs_blastx_daa_summary_count.tsv");
        assert_eq!(sample_name(path), Some("s1".to_string()));
        assert_eq!(sample_name(Path::new("/data/run1/s1.tsv")), None);
    }
}
