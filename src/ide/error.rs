use thiserror::Error;

use crate::base::Position;
use crate::semantic::BuildError;
use crate::syntax::ParseError;

/// Negative outcomes of IDE queries.
///
/// The not-found variants are ordinary results; the request layer turns them
/// into fallback text instead of surfacing them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("no type information at {0}")]
    NoTypeInfo(Position),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
