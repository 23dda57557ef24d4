use crate::models::OutputRecord;
use anyhow::Context;
use std::path::Path;
use tracing::info;

pub const HEADER: [&str; 5] = ["Filename", "Title", "Keywords", "Category", "Releases"];

/// Writes `records` in order, replacing any existing file. The header row is
/// written even when there are no records.
pub fn write_records(records: &[OutputRecord], path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("CSV file saved to: {}", path.display());
    Ok(())
}
