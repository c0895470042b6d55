use thiserror::Error;

/// Errors raised constructing or indexing a single [`crate::clause::ClauseValue`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClauseError {
    #[error("literals must be nonzero")]
    ZeroLiteral,

    #[error("literal magnitude exceeds the supported 32-bit range")]
    LiteralOutOfRange,

    #[error("index {index} out of range for a clause of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}

/// Errors raised by [`crate::list::ClauseList`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClauseListError {
    #[error(transparent)]
    Clause(#[from] ClauseError),

    #[error("clause contains a zero literal")]
    InteriorZero,

    #[error("flat encoding ends with a clause that has no terminating zero")]
    TrailingNonTerminated,

    #[error("nvars override {declared} is smaller than the observed maximum variable {observed}")]
    NvarsTooSmall { declared: u32, observed: u32 },

    #[error("index {index} out of range for a list of length {len}")]
    OutOfRange { index: isize, len: usize },

    #[error("clause not found in list")]
    NotFound,

    #[error("mapping must map variable 0 to 0 and cover every variable up to nvars")]
    InvalidMapping,

    #[error("cannot mutate a clause list while it is aliased by the operand")]
    Aliased,
}

/// Errors raised by the XOR construction factories.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XorError {
    #[error("create_xor requires at least one group")]
    NoGroups,

    #[error("xor groups must have width at least 1")]
    EmptyGroup,

    #[error("all xor groups must have the same width")]
    WidthMismatch,

    #[error(transparent)]
    Clause(#[from] ClauseError),

    #[error(transparent)]
    List(#[from] ClauseListError),
}

/// Errors raised parsing the DIMACS/XOR-CNF text format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DimacsError {
    #[error("missing DIMACS header")]
    MissingHeader,

    #[error("duplicate DIMACS header")]
    DuplicateHeader,

    #[error("malformed DIMACS token near: {0}")]
    MalformedToken(String),

    #[error("xor clauses are not representable in a plain CNF")]
    UnexpectedXorClause,

    #[error(transparent)]
    List(#[from] ClauseListError),
}
