use std::fmt::Display;

/// One step of the shift-reduce run, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceRecord {
    Shift {
        token: String,
        stack: String,
    },
    Reduce {
        production: &'static str,
        stack: String,
        window: String,
    },
    Accept,
    Reject,
}

impl Display for TraceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceRecord::Shift { token, stack } => write!(f, "SHIFT {} -> {}", token, stack),
            TraceRecord::Reduce { stack, window, .. } => write!(f, "REDUCE TO {} <- {}", stack, window),
            TraceRecord::Accept => write!(f, "ACCEPT"),
            TraceRecord::Reject => write!(f, "REJECT"),
        }
    }
}
