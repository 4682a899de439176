use thiserror::Error;

use crate::domain::FeedbackStatus;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: FeedbackStatus,
        to: FeedbackStatus,
    },

    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    /// Message shown to the acting user. Collaborator failures stay opaque.
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidTransition { from, .. } if from.is_terminal() => format!(
                "This feedback is already {} and can no longer be changed.",
                from.as_str().replace('_', " ")
            ),
            AppError::InvalidTransition { from, to } => format!(
                "Feedback cannot move from {} to {}.",
                from.as_str().replace('_', " "),
                to.as_str().replace('_', " ")
            ),
            AppError::Collaborator(_) => "Something went wrong. Please try again.".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Forbidden(_) => "You do not have permission to do that.".to_string(),
        }
    }

    pub fn is_terminal_violation(&self) -> bool {
        matches!(self, AppError::InvalidTransition { from, .. } if from.is_terminal())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Backend request failed: {}", err);
        AppError::Collaborator(err.to_string())
    }
}
