// Execution engine for the allocator simulator

use crate::memory::heap::Heap;
use crate::parser::ast::{Command, SourceLocation};
use crate::parser::parser::{ParseError, Parser};
use crate::snapshot::{OutputLog, Snapshot, SnapshotManager};

/// Parses and executes an allocator script against one owned heap.
///
/// Execution is interleaved with parsing: each statement runs as soon as
/// it is recognized, so a dump mid-script is observable even when a later
/// statement turns out to be malformed. A snapshot of the heap and output
/// state is recorded after every statement for replay in the UI.
pub struct Interpreter {
    parser: Parser,

    /// The simulated heap, exclusively owned for the run
    heap: Heap,

    /// Dump reports produced so far
    output: OutputLog,

    /// Execution history for replay
    snapshots: SnapshotManager,

    /// Current position in history (for stepping through the UI)
    history_position: usize,

    /// Whether the script ran to completion without a syntax error
    finished: bool,
}

impl Interpreter {
    /// Create an interpreter for the given script and heap size.
    pub fn new(source: &str, heap_size: u64) -> Self {
        let mut interpreter = Interpreter {
            parser: Parser::new(source),
            heap: Heap::new(heap_size),
            output: OutputLog::new(),
            snapshots: SnapshotManager::new(),
            history_position: 0,
            finished: false,
        };
        interpreter.take_snapshot(SourceLocation::new(1, 1), "start".to_string());
        interpreter
    }

    /// Run the script from start to finish.
    ///
    /// A syntax error aborts the run; statements already executed stay
    /// executed and their snapshots remain in history.
    pub fn run(&mut self) -> Result<(), ParseError> {
        while let Some(command) = self.parser.next_command()? {
            let summary = self.execute(&command);
            self.take_snapshot(command.location(), summary);
        }
        self.finished = true;
        Ok(())
    }

    /// Execute one statement, returning its step summary.
    fn execute(&mut self, command: &Command) -> String {
        match command {
            Command::Alloc { var, size, .. } => {
                let applied = self.heap.allocate(var, *size);
                Self::summarize(command, applied)
            }
            Command::CopyVar { dst, src, .. } => {
                let applied = self.heap.copy(dst, src);
                Self::summarize(command, applied)
            }
            Command::Release { var, .. } => {
                let applied = self.heap.free(var);
                Self::summarize(command, applied)
            }
            Command::Dump { location } => {
                let report = self.heap.dump();
                self.output.push(report, *location);
                command.summary()
            }
            Command::Compress { .. } => {
                self.heap.compress();
                command.summary()
            }
            Command::Nop { .. } => command.summary(),
        }
    }

    /// Silent failures leave the heap untouched; the step summary is the
    /// only place they show up at all.
    fn summarize(command: &Command, applied: bool) -> String {
        if applied {
            command.summary()
        } else {
            format!("{} (no effect)", command.summary())
        }
    }

    fn take_snapshot(&mut self, location: SourceLocation, summary: String) {
        self.snapshots.push(Snapshot {
            heap: self.heap.clone(),
            output_len: self.output.len(),
            location,
            summary,
        });
        self.history_position = self.snapshots.len() - 1;
    }

    // === Replay API (consumed by the UI) ===

    /// Step forward one snapshot. Returns false at the end of history.
    pub fn step_forward(&mut self) -> bool {
        if self.history_position + 1 < self.snapshots.len() {
            self.history_position += 1;
            true
        } else {
            false
        }
    }

    /// Step backward one snapshot. Returns false at the start of history.
    pub fn step_backward(&mut self) -> bool {
        if self.history_position > 0 {
            self.history_position -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to the initial state.
    pub fn rewind_to_start(&mut self) {
        self.history_position = 0;
    }

    /// Jump to the last recorded state.
    pub fn jump_to_end(&mut self) {
        self.history_position = self.snapshots.len().saturating_sub(1);
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshots.len()
    }

    /// The snapshot at the current history position.
    pub fn current_snapshot(&self) -> &Snapshot {
        self.snapshots
            .get(self.history_position)
            .expect("history always contains the initial snapshot")
    }

    /// Dump output visible at the current history position.
    pub fn visible_output(&self) -> Vec<String> {
        self.output.display_lines(self.current_snapshot().output_len)
    }

    /// The full output log for the run.
    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// The heap in its final (most recently executed) state.
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Whether the script ran to completion.
    pub fn finished(&self) -> bool {
        self.finished
    }
}
