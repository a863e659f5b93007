//src/config.rs

use std::path::PathBuf;

/// Default count threshold for both contig and read counts.
pub const DEFAULT_FILTER: u64 = 100;

/// Argument-derived settings for one merge run.
///
/// Passed explicitly into [`run`](crate::run) so the merge logic can be
/// exercised in tests without a CLI or module-level state.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Directory holding the per-sample count files.
    pub input_dir: PathBuf,
    /// Optional pre-merged reference CSV to seed the accumulation from.
    pub reference: Option<PathBuf>,
    /// Optional label prepended to the output filename.
    pub project: Option<String>,
    /// Contig counts must be strictly above this to survive filtering.
    pub contig_min: u64,
    /// Read counts must be strictly above this to survive filtering.
    pub read_min: u64,
}

impl MergeConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        MergeConfig {
            input_dir: input_dir.into(),
            reference: None,
            project: None,
            contig_min: DEFAULT_FILTER,
            read_min: DEFAULT_FILTER,
        }
    }

    /// Where the merged table is written: `MD_counts_merged.csv` inside the
    /// input directory, with the project label prepended when one is set.
    pub fn output_path(&self) -> PathBuf {
        match &self.project {
            Some(project) => self
                .input_dir
                .join(format!("{project}_MD_counts_merged.csv")),
            None => self.input_dir.join("MD_counts_merged.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_without_project() {
        let config = MergeConfig::new("/data/run1");
        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/run1/MD_counts_merged.csv")
        );
    }

    #[test]
    fn output_path_with_project() {
        let mut config = MergeConfig::new("/data/run1");
        config.project = Some("mock_md".to_string());
        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/run1/mock_md_MD_counts_merged.csv")
        );
    }
}
