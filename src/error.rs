use thiserror::Error;

/// Errors raised while building expansion records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// A macro expansion always yields at least one token
    #[error("expansion of macro `{name}` has no definition tokens")]
    EmptyDefinition { name: String },
}
