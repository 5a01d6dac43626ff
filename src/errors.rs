use thiserror::Error;

/// The result type for the `convex_automata` crate.
pub type Result<T> = std::result::Result<T, ConvexError>;

/// The error type for the `convex_automata` crate.
#[derive(Error, Debug)]
pub struct ConvexError {
    /// The source of the error.
    pub source: Box<ConvexErrorKind>,
}

impl ConvexError {
    /// Create a new `ConvexError`.
    pub fn new(kind: ConvexErrorKind) -> Self {
        ConvexError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &ConvexErrorKind {
        &self.source
    }
}

impl std::fmt::Display for ConvexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl From<ConvexErrorKind> for ConvexError {
    fn from(kind: ConvexErrorKind) -> Self {
        ConvexError::new(kind)
    }
}

/// The error kind type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvexErrorKind {
    /// The automaton's sizes, transition table or flag arrays are inconsistent.
    #[error("Malformed automaton: {0}")]
    MalformedAutomaton(String),

    /// A state index outside of the automaton's states was used.
    #[error("Invalid state {state} - the automaton has {state_count} states")]
    StateOutOfRange {
        /// The offending state index.
        state: usize,
        /// The number of states of the automaton.
        state_count: usize,
    },

    /// A symbol index outside of the automaton's alphabet was used.
    #[error("Invalid symbol {symbol} - the alphabet has {alphabet_size} symbols")]
    SymbolOutOfRange {
        /// The offending symbol index.
        symbol: usize,
        /// The size of the alphabet.
        alphabet_size: usize,
    },

    /// Two operands can't be combined, e.g. because their alphabets differ.
    #[error("Incompatible operands: {0}")]
    IncompatibleOperands(String),

    /// The subclass tag is not one of the known tags.
    #[error("Undefined subclass '{0}'")]
    UnknownSubclass(String),

    /// The serial code of an automaton could not be parsed.
    #[error("Invalid automaton code: {0}")]
    InvalidCode(String),
}

macro_rules! malformed {
    ($($arg:tt)*) => {
        $crate::ConvexError::new($crate::ConvexErrorKind::MalformedAutomaton(format!($($arg)*)))
    };
}
pub(crate) use malformed;

macro_rules! incompatible {
    ($($arg:tt)*) => {
        $crate::ConvexError::new($crate::ConvexErrorKind::IncompatibleOperands(format!($($arg)*)))
    };
}
pub(crate) use incompatible;
