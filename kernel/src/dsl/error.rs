//! Typed DSL errors.

/// Opaque error produced by an evaluator capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure while building a DSL or evaluating a program through it.
#[derive(Debug, thiserror::Error)]
pub enum DslError {
    /// Two productions share a symbol.
    #[error("duplicate production symbol {symbol:?}")]
    DuplicateSymbol { symbol: String },
    /// The program uses a symbol the DSL does not define.
    #[error("unknown production symbol {symbol:?}")]
    UnknownSymbol { symbol: String },
    /// The program still contains an unfilled hole.
    #[error("program contains hole {symbol:?}")]
    HoleInProgram { symbol: String },
    /// A production was applied to the wrong number of inputs.
    #[error("production {symbol:?} expects {expected} inputs, got {actual}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },
    /// A production received state of the other kind.
    #[error("production {symbol:?} received state it did not initialize")]
    StateMismatch { symbol: String },
    /// The evaluator capability failed; `source` is its error, unchanged.
    #[error("computing {symbol:?} failed")]
    Compute {
        symbol: String,
        #[source]
        source: BoxError,
    },
}
