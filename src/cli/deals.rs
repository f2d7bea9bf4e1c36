//! Deal commands: capture, ingest, list, clear.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::hub::DealHub;
use crate::model::RawCapture;
use crate::storage::DealBackend;

use super::format::format_record;

pub(super) fn cmd_capture<B: DealBackend>(
    hub: &mut DealHub<B>,
    raw: RawCapture,
) -> Result<(), String> {
    let record = hub.ingest(raw).map_err(|e| e.to_string())?;
    println!("{}", format_record(&record));
    Ok(())
}

pub(super) fn cmd_ingest<B: DealBackend>(
    hub: &mut DealHub<B>,
    file: Option<&Path>,
) -> Result<(), String> {
    let report = match file {
        Some(path) => {
            let f = File::open(path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            ingest_lines(hub, BufReader::new(f))?
        }
        None => ingest_lines(hub, io::stdin().lock())?,
    };

    eprintln!(
        "Ingested {} capture(s), skipped {}; {} deal(s) stored, {} ready",
        report.ingested,
        report.skipped,
        hub.store().len(),
        hub.store().ready_count()
    );
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct IngestReport {
    pub ingested: usize,
    pub skipped: usize,
}

/// Merges one JSON capture per line. Blank lines are ignored; bad lines are
/// reported on stderr and counted as skipped.
pub(super) fn ingest_lines<B: DealBackend>(
    hub: &mut DealHub<B>,
    reader: impl BufRead,
) -> Result<IngestReport, String> {
    let mut report = IngestReport::default();
    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = serde_json::from_str::<RawCapture>(&line)
            .map_err(|e| e.to_string())
            .and_then(|raw| hub.ingest(raw).map_err(|e| e.to_string()));
        match outcome {
            Ok(_) => report.ingested += 1,
            Err(e) => {
                eprintln!("line {}: {e}", n + 1);
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}

pub(super) fn cmd_list<B: DealBackend>(hub: &DealHub<B>, ready_only: bool) {
    let records: Vec<_> = hub
        .deals()
        .iter()
        .filter(|r| !ready_only || r.is_ready())
        .collect();

    if records.is_empty() {
        println!("No deals");
        return;
    }
    for record in records {
        println!("{}", format_record(record));
    }
}

pub(super) fn cmd_clear<B: DealBackend>(hub: &mut DealHub<B>) {
    if hub.store().is_empty() {
        eprintln!("No deals to clear");
        return;
    }
    let count = hub.store().len();
    hub.clear_all();
    eprintln!("Cleared {count} deal(s)");
}
