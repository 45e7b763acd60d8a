use thiserror::Error;

/// Errors that stop a presentation from being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The metadata block is not YAML, or `title`/`author` are not strings.
    #[error("invalid metadata{}: {reason}", line.map(|line| format!(" (line {line})")).unwrap_or_default())]
    InvalidMetadata {
        /// 1-based line within the metadata block, when the decoder knows it
        line: Option<usize>,
        /// What the YAML decoder reported
        reason: String,
    },

    /// Nothing was left to present after splitting and trimming.
    #[error("no slides found in document")]
    EmptyDocument,
}
