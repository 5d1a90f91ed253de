// Snapshot history for replaying a run

use crate::memory::heap::Heap;
use crate::parser::ast::SourceLocation;

/// One dump report, tagged with the script location that produced it
#[derive(Debug, Clone)]
pub struct Report {
    pub text: String,
    pub location: SourceLocation,
}

/// Collects dump reports as the script executes
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    reports: Vec<Report>,
}

impl OutputLog {
    pub fn new() -> Self {
        OutputLog {
            reports: Vec::new(),
        }
    }

    pub fn push(&mut self, text: String, location: SourceLocation) {
        self.reports.push(Report { text, location });
    }

    /// Number of reports emitted so far
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Individual display lines for the first `count` reports
    pub fn display_lines(&self, count: usize) -> Vec<String> {
        self.reports
            .iter()
            .take(count)
            .flat_map(|report| {
                let mut lines: Vec<String> =
                    report.text.split('\n').map(|s| s.to_string()).collect();
                // Drop the trailing empty string from the final newline
                if lines.last().is_some_and(|s| s.is_empty()) {
                    lines.pop();
                }
                lines
            })
            .collect()
    }
}

/// Heap state captured after one executed statement.
///
/// The output log is append-only, so a snapshot records only how many
/// reports existed at capture time; replaying a prefix of the log
/// reconstructs the output exactly.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub heap: Heap,
    pub output_len: usize,
    pub location: SourceLocation,
    pub summary: String,
}

/// Execution history, one snapshot per executed statement
#[derive(Debug, Default)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
}

impl SnapshotManager {
    pub fn new() -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
