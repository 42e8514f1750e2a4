use thiserror::Error;

/// Error taxonomy of the whole engine. Every fallible operation of the crate
/// returns this enum; nothing panics on user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemEngineError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Structural error: {0}")]
    Structural(String),
    #[error("Equation cannot be balanced: only the zero vector satisfies the element balance")]
    Unbalanceable,
    #[error(
        "Ambiguous balance: the stoichiometric null space has dimension {dim}, the equation admits infinitely many independent balances"
    )]
    AmbiguousBalance { dim: usize },
    #[error("Species '{0}' not found in the balanced equation")]
    NotFound(String),
    #[error("Domain error: {0}")]
    Domain(String),
}
