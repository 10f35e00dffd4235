//! Error types for the verification harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("backend not ready after {attempts} probe(s) against {url}")]
    BackendUnavailable { url: String, attempts: u32 },

    #[error("Playwright not found. Install with: npx playwright install")]
    DriverNotFound,

    #[error("browser session failed: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl VerifyError {
    /// Whether the failure is an environment problem (backend never came
    /// up, driver missing, unreadable files) rather than a regression in
    /// the application under test. The CLI exits with a distinct status
    /// for environment problems.
    pub fn is_environment(&self) -> bool {
        !matches!(self, VerifyError::Session(_))
    }
}

pub type VerifyResult<T> = Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_failures_are_not_environment_errors() {
        assert!(!VerifyError::Session("timeout".to_string()).is_environment());
        assert!(VerifyError::DriverNotFound.is_environment());
        assert!(VerifyError::BackendUnavailable {
            url: "http://localhost:3001/api/health".to_string(),
            attempts: 15,
        }
        .is_environment());
    }
}
