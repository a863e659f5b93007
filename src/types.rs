//src/types.rs

/// Where a count row came from: assembled contigs or raw sequencing reads.
///
/// Serialized with the legacy labels the downstream tooling expects:
/// `"NT_count"` for contig-derived rows, `"Read_count"` for read-derived
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    ContigCount,
    ReadCount,
}

impl SourceType {
    /// The label written to (and read from) the `variable` column.
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::ContigCount => "NT_count",
            SourceType::ReadCount => "Read_count",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NT_count" => Some(SourceType::ContigCount),
            "Read_count" => Some(SourceType::ReadCount),
            _ => None,
        }
    }
}

/// One taxon count from one sample file, filtered and tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    pub tax_id: String,
    pub taxon: String,
    pub count: u64,
    pub source: SourceType,
}

impl CountRecord {
    pub fn key(&self) -> RowKey {
        RowKey {
            tax_id: self.tax_id.clone(),
            taxon: self.taxon.clone(),
            source: self.source,
        }
    }
}

/// Composite key addressing one row-slot in the merged table. TaxonIDs are
/// opaque identifiers here; they are never parsed numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub tax_id: String,
    pub taxon: String,
    pub source: SourceType,
}

impl RowKey {
    pub fn new(tax_id: &str, taxon: &str, source: SourceType) -> Self {
        RowKey {
            tax_id: tax_id.to_string(),
            taxon: taxon.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels_round_trip() {
        for source in [SourceType::ContigCount, SourceType::ReadCount] {
            assert_eq!(SourceType::from_label(source.label()), Some(source));
        }
        assert_eq!(SourceType::from_label("kmer_count"), None);
    }

    #[test]
    fn key_distinguishes_source() {
        let contig = RowKey::new("562", "Escherichia coli", SourceType::ContigCount);
        let read = RowKey::new("562", "Escherichia coli", SourceType::ReadCount);
        assert_ne!(contig, read);
    }
}
