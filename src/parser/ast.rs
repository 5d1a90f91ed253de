// Command definitions for the allocator script language

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single executable statement, fully resolved at parse time.
///
/// Keyword recognition (`free`, `dump`, `compress`) happens once in the
/// parser; execution dispatches on the variant tag, never on identifier
/// text. A call statement whose keyword is not recognized parses to
/// [`Command::Nop`] and executes as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `var = name(size);` — allocate `size` units and bind them to `var`
    Alloc {
        var: String,
        size: u64,
        location: SourceLocation,
    },

    /// `dst = src;` — alias `dst` to the block `src` is bound to
    CopyVar {
        dst: String,
        src: String,
        location: SourceLocation,
    },

    /// `free(var);` — release one reference held by `var`
    Release {
        var: String,
        location: SourceLocation,
    },

    /// `dump();` — emit the state report
    Dump { location: SourceLocation },

    /// `compress();` — merge adjacent free blocks
    Compress { location: SourceLocation },

    /// A structurally valid call whose keyword means nothing
    Nop { location: SourceLocation },
}

impl Command {
    /// Returns the source location of the statement's leading token.
    pub fn location(&self) -> SourceLocation {
        match self {
            Command::Alloc { location, .. }
            | Command::CopyVar { location, .. }
            | Command::Release { location, .. }
            | Command::Dump { location }
            | Command::Compress { location }
            | Command::Nop { location } => *location,
        }
    }

    /// Short human-readable form, used for step summaries in the UI.
    pub fn summary(&self) -> String {
        match self {
            Command::Alloc { var, size, .. } => format!("{} = alloc({})", var, size),
            Command::CopyVar { dst, src, .. } => format!("{} = {}", dst, src),
            Command::Release { var, .. } => format!("free({})", var),
            Command::Dump { .. } => "dump()".to_string(),
            Command::Compress { .. } => "compress()".to_string(),
            Command::Nop { .. } => "(no-op)".to_string(),
        }
    }
}
