//src/table.rs

use std::path::Path;

use ahash::AHashMap;

use crate::count_file::load_counts;
use crate::error::MergeError;
use crate::types::{CountRecord, RowKey, SourceType};

// Fixed column names of the merged schema. Legacy names, kept verbatim for
// downstream compatibility.
const TAXID_COL: &str = "TaxID";
const TAXON_COL: &str = "Taxa";
const SOURCE_COL: &str = "variable";

#[derive(Debug, Clone)]
struct Row {
    key: RowKey,
    /// One cell per sample column, `None` where the sample contributed
    /// nothing for this key.
    cells: Vec<Option<u64>>,
}

/// The running accumulation table.
///
/// One row per (TaxonID, TaxonName, SourceType) key, one column per merged
/// sample. Rows keep insertion order so serialization is deterministic for a
/// given merge history; `index` is only a lookup into `rows`. A key, once
/// present, persists through every later merge.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    samples: Vec<String>,
    rows: Vec<Row>,
    index: AHashMap<RowKey, usize>,
}

impl MergedTable {
    /// Seed the accumulation from the first discovered contig count file.
    ///
    /// Only the first two columns are kept (the count column is ignored in
    /// this path); every row is tagged ContigCount and no sample column
    /// exists yet. The file is unfiltered here: thresholds apply to
    /// per-sample contributions, not the seed.
    pub fn seed_from_contig_file(path: &Path) -> Result<Self, MergeError> {
        let rows = load_counts(path)?;
        let mut table = MergedTable::default();
        for (tax_id, taxon, _count) in rows {
            let key = RowKey {
                tax_id,
                taxon,
                source: SourceType::ContigCount,
            };
            table.insert_row(key, Vec::new());
        }
        log::info!("seeded {} row(s) from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load a pre-merged reference CSV as the starting accumulation.
    ///
    /// Expected header: `TaxID,Taxa,<sample...>,variable`. References written
    /// by older pandas tooling carry an unnamed leading index column; that is
    /// tolerated and dropped. Numeric cells may be rendered as integers or as
    /// whole-valued floats (`150.0`); empty cells are missing values.
    pub fn from_reference(path: &Path) -> Result<Self, MergeError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        let headers = reader.headers()?.clone();

        let skip = usize::from(headers.get(0).is_some_and(|h| h.is_empty()));
        let fields: Vec<&str> = headers.iter().skip(skip).collect();
        if fields.len() < 3
            || fields[0] != TAXID_COL
            || fields[1] != TAXON_COL
            || fields[fields.len() - 1] != SOURCE_COL
        {
            return Err(MergeError::MalformedFile {
                path: path.to_path_buf(),
                line: 1,
                reason: format!(
                    "reference header must be {TAXID_COL},{TAXON_COL},<samples...>,{SOURCE_COL}"
                ),
            });
        }

        let mut table = MergedTable::default();
        table.samples = fields[2..fields.len() - 1]
            .iter()
            .map(|s| s.to_string())
            .collect();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = idx + 2;
            let cols: Vec<&str> = record.iter().skip(skip).collect();
            if cols.len() != fields.len() {
                return Err(MergeError::MalformedFile {
                    path: path.to_path_buf(),
                    line,
                    reason: format!(
                        "expected {} fields, got {}",
                        fields.len(),
                        cols.len()
                    ),
                });
            }
            let label = cols[cols.len() - 1].trim();
            let source =
                SourceType::from_label(label).ok_or_else(|| MergeError::MalformedFile {
                    path: path.to_path_buf(),
                    line,
                    reason: format!("unknown source label in {SOURCE_COL} column: {label:?}"),
                })?;
            let mut cells = Vec::with_capacity(table.samples.len());
            for field in &cols[2..cols.len() - 1] {
                cells.push(parse_cell(field, path, line)?);
            }
            let key = RowKey::new(cols[0].trim(), cols[1].trim(), source);
            table.insert_row(key, cells);
        }
        log::info!(
            "loaded reference table with {} row(s), {} sample column(s) from {}",
            table.len(),
            table.samples.len(),
            path.display()
        );
        Ok(table)
    }

    /// Outer-join one sample's filtered, tagged contribution into the table.
    ///
    /// Pure fold step: consumes the accumulator and returns the next one.
    /// An empty contribution leaves the table untouched and adds no column.
    /// Otherwise: existing keys gain a value in the new column, new keys
    /// append as rows with missing values for all prior columns, and keys
    /// absent from this contribution read as missing in the new column.
    pub fn merge_sample(mut self, sample: &str, contribution: Vec<CountRecord>) -> Self {
        if contribution.is_empty() {
            log::info!("sample {sample}: nothing passed the filters, no column added");
            return self;
        }

        self.samples.push(sample.to_string());
        for row in &mut self.rows {
            row.cells.push(None);
        }
        let col = self.samples.len() - 1;

        for record in contribution {
            let key = record.key();
            match self.index.get(&key) {
                Some(&i) => self.rows[i].cells[col] = Some(record.count),
                None => {
                    let mut cells = vec![None; self.samples.len()];
                    cells[col] = Some(record.count);
                    self.insert_row(key, cells);
                }
            }
        }
        self
    }

    /// Serialize to CSV: header `TaxID,Taxa,<sample...>,variable`, one row
    /// per key in insertion order, missing values as empty cells.
    pub fn write_csv(&self, path: &Path) -> Result<(), MergeError> {
        let mut writer = csv::WriterBuilder::new().from_path(path)?;

        let mut header = Vec::with_capacity(self.samples.len() + 3);
        header.push(TAXID_COL.to_string());
        header.push(TAXON_COL.to_string());
        header.extend(self.samples.iter().cloned());
        header.push(SOURCE_COL.to_string());
        writer.write_record(&header)?;

        let mut record = Vec::with_capacity(header.len());
        for row in &self.rows {
            record.clear();
            record.push(row.key.tax_id.clone());
            record.push(row.key.taxon.clone());
            for cell in &row.cells {
                record.push(cell.map(|n| n.to_string()).unwrap_or_default());
            }
            record.push(row.key.source.label().to_string());
            writer.write_record(&record)?;
        }
        writer.flush().map_err(MergeError::Io)?;
        Ok(())
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the row addressed by `key`, aligned with [`samples`].
    pub fn cells(&self, key: &RowKey) -> Option<&[Option<u64>]> {
        self.index.get(key).map(|&i| self.rows[i].cells.as_slice())
    }

    /// Value for `key` in the column of `sample`, if both exist.
    pub fn value(&self, key: &RowKey, sample: &str) -> Option<u64> {
        let col = self.samples.iter().position(|s| s == sample)?;
        self.cells(key).and_then(|cells| cells[col])
    }

    fn insert_row(&mut self, key: RowKey, mut cells: Vec<Option<u64>>) {
        cells.resize(self.samples.len(), None);
        if let Some(&i) = self.index.get(&key) {
            // Duplicate key inside a single file: last value wins.
            self.rows[i].cells = cells;
            return;
        }
        self.index.insert(key.clone(), self.rows.len());
        self.rows.push(Row { key, cells });
    }
}

fn parse_cell(field: &str, path: &Path, line: usize) -> Result<Option<u64>, MergeError> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = field.parse::<u64>() {
        return Ok(Some(n));
    }
    // pandas renders counts as whole-valued floats once a merge has
    // introduced missing values into the column.
    match field.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u64)),
        _ => Err(MergeError::MalformedFile {
            path: path.to_path_buf(),
            line,
            reason: format!("cell is not a count: {field:?}"),
        }),
    }
}
