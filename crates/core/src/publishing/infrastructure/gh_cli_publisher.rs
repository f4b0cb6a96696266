use std::io;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;

use crate::publishing::domain::publisher::{
    validate_repository, PublishError, PublishRequest, Publisher,
};

use super::command_runner::{CommandOutput, CommandRunner, SystemCommandRunner};

const GH_PROGRAM: &str = "gh";

/// Publishes files through the GitHub contents API using the `gh` CLI.
///
/// Authentication is whatever `gh auth login` has stored; no token handling
/// happens here. The request body goes to `gh` on stdin, so the content size
/// is not bounded by the argument length limit.
pub struct GhCliPublisher {
    runner: Box<dyn CommandRunner>,
    timeout: Duration,
}

impl GhCliPublisher {
    pub fn new(runner: Box<dyn CommandRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(Box::new(SystemCommandRunner), timeout)
    }

    fn gh(&self, args: Vec<String>, stdin: Option<&[u8]>) -> io::Result<CommandOutput> {
        self.runner.run(GH_PROGRAM, &args, stdin, self.timeout)
    }

    fn check_auth(&self) -> Result<(), PublishError> {
        match self.gh(vec!["auth".to_string(), "status".to_string()], None) {
            Ok(output) if output.success => Ok(()),
            Ok(output) => Err(PublishError::Auth(format!(
                "gh is not logged in; run 'gh auth login' ({})",
                output.stderr.trim()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PublishError::Auth(
                "gh CLI not found; install it from https://cli.github.com/ and run 'gh auth login'"
                    .to_string(),
            )),
            Err(e) => Err(PublishError::Auth(e.to_string())),
        }
    }

    /// Blob SHA of the file currently at `path`, if any.
    fn existing_sha(&self, repository: &str, path: &str, branch: &str) -> Option<String> {
        let endpoint = format!(
            "repos/{repository}/contents/{}?ref={}",
            encode_path(path),
            urlencoding::encode(branch)
        );
        let output = self
            .gh(
                vec![
                    "api".to_string(),
                    endpoint,
                    "--jq".to_string(),
                    ".sha".to_string(),
                ],
                None,
            )
            .ok()?;
        let sha = output.stdout.trim();
        (output.success && !sha.is_empty() && sha != "null").then(|| sha.to_string())
    }
}

impl Publisher for GhCliPublisher {
    fn publish(&self, request: &PublishRequest) -> Result<String, PublishError> {
        let repository = request.repository.trim();
        validate_repository(repository)?;
        let path = request.filename.trim().trim_start_matches('/');
        if path.is_empty() {
            return Err(PublishError::RepoAccess {
                repository: repository.to_string(),
                message: "destination path is empty".to_string(),
            });
        }

        self.check_auth()?;

        let branch = request.branch();
        let sha = self.existing_sha(repository, path, branch);
        log::debug!(
            "{} {path} on {repository}@{branch}",
            if sha.is_some() { "Updating" } else { "Creating" }
        );

        let mut body = json!({
            "message": request.commit_message(),
            "content": STANDARD.encode(request.content.as_bytes()),
            "branch": branch,
        });
        if let Some(sha) = sha {
            body["sha"] = json!(sha);
        }

        let args = vec![
            "api".to_string(),
            "--method".to_string(),
            "PUT".to_string(),
            format!("repos/{repository}/contents/{}", encode_path(path)),
            "--input".to_string(),
            "-".to_string(),
        ];
        match self.gh(args, Some(body.to_string().as_bytes())) {
            Ok(output) if output.success => Ok(format!(
                "https://github.com/{repository}/blob/{branch}/{path}"
            )),
            Ok(output) => Err(classify_failure(&output.stderr, repository, branch)),
            Err(e) => Err(PublishError::RepoAccess {
                repository: repository.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

/// Maps `gh api` error output to a publish failure.
fn classify_failure(stderr: &str, repository: &str, branch: &str) -> PublishError {
    let message = stderr.trim().to_string();
    let lower = message.to_lowercase();
    if lower.contains("http 401") || lower.contains("bad credentials") || lower.contains("gh auth login")
    {
        PublishError::Auth(message)
    } else if lower.contains("branch") || lower.contains("no commit found for the ref") {
        PublishError::Branch {
            branch: branch.to_string(),
            message,
        }
    } else {
        PublishError::RepoAccess {
            repository: repository.to_string(),
            message,
        }
    }
}

/// Percent-encodes each `/`-separated segment of a repository path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}
