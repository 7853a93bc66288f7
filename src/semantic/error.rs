use thiserror::Error;

use crate::base::SpanError;

/// Failures while turning a parsed file into symbols and scopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The parsed model carried a position that cannot be converted.
    #[error("invalid position for `{name}` in {uri}")]
    InvalidSpan {
        uri: String,
        name: String,
        #[source]
        source: SpanError,
    },
}

pub type BuildResult<T> = Result<T, BuildError>;
