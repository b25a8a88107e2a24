//! CSV persistence for batch outcomes: the summary report and the separate
//! error file. Successes and failures are never merged into one file.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use bwl_util_core::contract::{FailureRecord, SummaryRecord};

const SUMMARY_HEADER: [&str; 5] = ["ID", "Name", "Space", "LMD", "Age in Days"];

pub fn write_summary_csv(path: &Path, records: &[SummaryRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if !records.is_empty() {
        writer.write_record(SUMMARY_HEADER)?;
    }
    for record in records {
        writer.write_record([
            record.id.as_str(),
            record.name.as_str(),
            record.space.as_str(),
            record.last_modified.as_str(),
            record.age_days.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "Wrote summary report");
    Ok(())
}

pub fn write_error_csv(path: &Path, failures: &[FailureRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if !failures.is_empty() {
        writer.write_record(["ID"])?;
    }
    for failure in failures {
        writer.write_record([failure.id.as_str()])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = failures.len(), "Wrote error report");
    Ok(())
}
