use csv::Reader;
use std::io::Read;
use std::path::Path;

use crate::batch::BatchEntry;
use crate::error::Result;
use crate::record::{StudentRecord, StudentRecordInput};

/// Reads named student records from CSV with a header row.
///
/// Columns are matched by header; an optional `name` column labels each row,
/// and unnamed rows become `Student <n>`. Unknown columns are ignored.
pub fn read_entries<R: Read>(source: R) -> Result<Vec<BatchEntry>> {
    let mut rdr = Reader::from_reader(source);
    let headers = rdr.headers()?.clone();
    let name_column = headers.iter().position(|h| h == "name");

    let mut entries = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let name = name_column
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Student {}", row + 1));

        let input: StudentRecordInput = record.deserialize(Some(&headers))?;
        let record = StudentRecord::try_from(input).map_err(|e| e.in_batch(&name))?;
        entries.push(BatchEntry::new(name, record));
    }

    Ok(entries)
}

pub fn load_entries(path: &Path) -> Result<Vec<BatchEntry>> {
    let file = std::fs::File::open(path)?;
    let entries = read_entries(file)?;
    tracing::info!(path = %path.display(), count = entries.len(), "loaded student records");
    Ok(entries)
}
