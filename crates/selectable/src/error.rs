use thiserror::Error;

pub type Result<T, E = SelectableError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SelectableError {
    /// A namespace member broke the `selectable_for` contract.
    #[error("{message}")]
    Configuration { candidate: String, message: String },

    #[error("{0} is unselectable")]
    Unselectable(String),

    #[error("invalid namespace manifest: {0}")]
    Manifest(String),

    #[error("failed to parse json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectableError {
    pub(crate) fn not_an_array(candidate: &str) -> Self {
        Self::Configuration {
            candidate: candidate.to_string(),
            message: format!("selectable_for must be an array in {candidate}"),
        }
    }

    /// Name of the offending candidate for configuration errors.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Configuration { candidate, .. } => Some(candidate.as_str()),
            _ => None,
        }
    }
}
