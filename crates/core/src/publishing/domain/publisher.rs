use std::path::Path;

use thiserror::Error;

use crate::shared::constants::DEFAULT_BRANCH;

/// Failures reported by a publish collaborator. The pipeline surfaces them
/// unchanged.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PublishError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("cannot access repository '{repository}': {message}")]
    RepoAccess { repository: String, message: String },
    #[error("branch '{branch}' rejected: {message}")]
    Branch { branch: String, message: String },
}

/// A file to place in a repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishRequest {
    pub content: String,
    /// `owner/repo`.
    pub repository: String,
    /// Destination path inside the repository.
    pub filename: String,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
}

impl PublishRequest {
    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// The given message, or `Add transcript: <file name>`.
    pub fn commit_message(&self) -> String {
        match &self.commit_message {
            Some(message) => message.clone(),
            None => {
                let name = Path::new(&self.filename)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.filename.clone());
                format!("Add transcript: {name}")
            }
        }
    }
}

/// Checks the `owner/repo` form: exactly one `/`, both parts non-empty and
/// made of ASCII letters, digits, `-`, `_` or `.`.
pub fn validate_repository(repository: &str) -> Result<(), PublishError> {
    let mut parts = repository.split('/');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if is_name(owner) && is_name(name)
    );
    if valid {
        Ok(())
    } else {
        Err(PublishError::RepoAccess {
            repository: repository.to_string(),
            message: "expected the form 'owner/repo'".to_string(),
        })
    }
}

fn is_name(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Domain interface for pushing rendered content to a remote repository.
///
/// Returns a locator for the published file.
pub trait Publisher: Send {
    fn publish(&self, request: &PublishRequest) -> Result<String, PublishError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PublishRequest {
        PublishRequest {
            content: "# Notes\n".to_string(),
            repository: "acme/notes".to_string(),
            filename: "transcripts/2024-01-15-standup.md".to_string(),
            branch: None,
            commit_message: None,
        }
    }

    #[test]
    fn test_defaults() {
        let req = request();
        assert_eq!(req.branch(), "main");
        assert_eq!(req.commit_message(), "Add transcript: 2024-01-15-standup.md");
    }

    #[test]
    fn test_explicit_values() {
        let req = PublishRequest {
            branch: Some("archive".to_string()),
            commit_message: Some("Add standup notes".to_string()),
            ..request()
        };
        assert_eq!(req.branch(), "archive");
        assert_eq!(req.commit_message(), "Add standup notes");
    }

    #[test]
    fn test_validate_repository() {
        assert!(validate_repository("acme/notes").is_ok());
        assert!(validate_repository("my-org/notes.v2_x").is_ok());
        for bad in ["acme", "acme/", "/notes", "acme/notes/extra", "ac me/notes", ""] {
            assert!(
                matches!(validate_repository(bad), Err(PublishError::RepoAccess { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = PublishError::Branch {
            branch: "nope".to_string(),
            message: "Branch nope not found".to_string(),
        };
        assert_eq!(err.to_string(), "branch 'nope' rejected: Branch nope not found");
    }
}
