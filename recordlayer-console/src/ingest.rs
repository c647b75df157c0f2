//! Loads delimited user records into a store.

use eyre::{Context, Result};
use std::io::BufRead;
use tracing::{debug, info, warn};

use recordlayer::prelude::*;

use crate::user::User;

/// Counts from one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Non-empty lines read from the source
    pub read: usize,
    /// Lines skipped because they had too few fields
    pub malformed: usize,
    /// Rows admitted by the store
    pub admitted: usize,
}

/// Reads `firstname<d>lastname<d>email<d>username` lines and offers one `User` per line.
///
/// Each user is numbered `row_count() + 1` at the time it is read, so rejected rows do not
/// consume a number.
pub async fn ingest<R: BufRead>(
    reader: R,
    delimiter: char,
    store: &RecordStore<User>,
) -> Result<IngestReport> {
    let mut report = IngestReport::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        report.read += 1;

        let fields = line.split(delimiter).map(str::trim).collect::<Vec<_>>();
        let [firstname, lastname, email, username, ..] = fields.as_slice() else {
            warn!(line = line_no + 1, fields = fields.len(), "skipping malformed line");
            report.malformed += 1;
            continue;
        };

        let num = u32::try_from(store.row_count().await + 1).context("Row number overflow")?;
        let user = User::new(*username, *firstname, *lastname, num, *email);

        match store.try_add_row(user).await {
            Admission::Accepted => report.admitted += 1,
            Admission::Rejected { description, .. } => {
                debug!(line = line_no + 1, %description, "line rejected");
            }
        }
    }

    info!(
        read = report.read,
        admitted = report.admitted,
        malformed = report.malformed,
        "ingestion finished"
    );
    Ok(report)
}
