//! Script execution
//!
//! [`engine::Interpreter`] wires the parser to the heap: it pulls one
//! statement at a time, executes it immediately, and records a snapshot
//! after each. Syntax errors are produced by the parsing layer
//! ([`crate::parser::parser::ParseError`]); the heap operations
//! themselves never fail: unsatisfiable requests are defined as silent
//! no-ops by the script language.

pub mod engine;
