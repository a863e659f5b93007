//src/count_file.rs

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::MergeError;
use crate::types::{CountRecord, SourceType};

/// Rows of a per-sample count file before filtering: TaxonID, TaxonName,
/// count.
pub type RawCounts = Vec<(String, String, u64)>;

/// Parse a headerless 3-column TSV of taxon counts:
/// ```text
/// <taxid>\t<taxname>\t<count>
/// ```
/// Any other shape is malformed and fails the whole run; there is no
/// partial-row recovery.
pub fn load_counts(path: &Path) -> Result<RawCounts, MergeError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 3 {
            return Err(MergeError::MalformedFile {
                path: path.to_path_buf(),
                line: idx + 1,
                reason: format!("expected 3 tab-separated fields, got {}", parts.len()),
            });
        }
        let count: u64 = parts[2].trim().parse().map_err(|_| MergeError::MalformedFile {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: format!("count column is not an unsigned integer: {:?}", parts[2]),
        })?;
        rows.push((parts[0].trim().to_string(), parts[1].trim().to_string(), count));
    }
    Ok(rows)
}

/// Load a count file that may legitimately be absent.
///
/// File-not-found becomes `Ok(None)` with a console notice and the sample's
/// contribution from that source is treated as empty. Every other failure
/// propagates.
pub fn load_optional(path: &Path) -> Result<Option<RawCounts>, MergeError> {
    match load_counts(path) {
        Ok(rows) => Ok(Some(rows)),
        Err(MergeError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            log::warn!("File Not Found: {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Keep rows with count strictly above `min` and tag survivors with `source`.
/// The comparison is exclusive: a count equal to `min` is dropped.
pub fn filter_and_tag(rows: RawCounts, min: u64, source: SourceType) -> Vec<CountRecord> {
    rows.into_iter()
        .filter(|(_, _, count)| *count > min)
        .map(|(tax_id, taxon, count)| CountRecord {
            tax_id,
            taxon,
            count,
            source,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tsv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_three_column_rows() {
        let file = write_tsv("562\tEscherichia coli\t150\n1280\tStaphylococcus aureus\t42\n");
        let rows = load_counts(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("562".to_string(), "Escherichia coli".to_string(), 150));
        assert_eq!(rows[1].2, 42);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let file = write_tsv("562\tEscherichia coli\t150\n\n");
        assert_eq!(load_counts(file.path()).unwrap().len(), 1);
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let file = write_tsv("562\tEscherichia coli\n");
        match load_counts(file.path()) {
            Err(MergeError::MalformedFile { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedFile, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_count_is_fatal() {
        let file = write_tsv("562\tEscherichia coli\tmany\n");
        assert!(matches!(
            load_counts(file.path()),
            Err(MergeError::MalformedFile { .. })
        ));
    }

    #[test]
    fn load_optional_tolerates_missing_file() {
        let result = load_optional(Path::new("/nonexistent/s1_counts.tsv")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn threshold_is_exclusive() {
        let rows = vec![
            ("1".to_string(), "at threshold".to_string(), 100),
            ("2".to_string(), "above threshold".to_string(), 101),
        ];
        let kept = filter_and_tag(rows, 100, SourceType::ContigCount);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tax_id, "2");
        assert_eq!(kept[0].source, SourceType::ContigCount);
    }

    #[test]
    fn tagging_follows_the_requested_source() {
        let rows = vec![("1".to_string(), "x".to_string(), 200)];
        let kept = filter_and_tag(rows, 100, SourceType::ReadCount);
        assert_eq!(kept[0].source, SourceType::ReadCount);
    }
}
