//! # Introduction
//!
//! heaptty simulates a heap allocator driven by a tiny script language:
//! a fixed-size address space, named variables bound to allocated
//! regions, first-fit allocation, reference-counted release, and
//! coalescing compaction. A snapshot of the heap is captured after every
//! statement, and the run can be replayed in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Script → Lexer → Parser → Command → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`parser`] — pulls tokens from the script text and resolves each
//!    statement into a [`parser::ast::Command`].
//! 2. [`interpreter`] — executes commands against the heap as they are
//!    parsed, capturing a [`snapshot::Snapshot`] per statement.
//! 3. [`memory`] — the free-list heap model: sorted free blocks, the
//!    variable table, and the deterministic dump report.
//! 4. [`snapshot`] — run history plus the collected dump output.
//! 5. [`ui`] — ratatui-based replay TUI; not part of the stable library
//!    API.
//!
//! ## Script language
//!
//! ```text
//! a = m(30);      allocate 30 units to a
//! b = a;          alias b to a's block
//! free(a);        release the reference held by a
//! compress();     merge adjacent free blocks
//! dump();         print the state report
//! ```
//!
//! Allocation failure and operations on unbound names are silent no-ops
//! by design; a malformed statement aborts the run.

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
