use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse, // Default: move through entries, capture, copy, clear
    Dialog, // Blocking confirmation; every key is consumed until dismissed
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Browse => write!(f, "BROWSE"),
            Mode::Dialog => write!(f, "CONFIRM"),
        }
    }
}
