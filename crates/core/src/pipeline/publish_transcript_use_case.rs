use crate::publishing::domain::publisher::{PublishError, PublishRequest, Publisher};

/// Where a rendered transcript should be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishTarget {
    /// `owner/repo`.
    pub repository: String,
    pub filename: String,
    pub branch: Option<String>,
    pub commit_message: Option<String>,
}

/// Hands rendered markdown to a [`Publisher`]. Errors pass through unchanged.
pub struct PublishTranscriptUseCase {
    publisher: Box<dyn Publisher>,
}

impl PublishTranscriptUseCase {
    pub fn new(publisher: Box<dyn Publisher>) -> Self {
        Self { publisher }
    }

    pub fn execute(&self, markdown: &str, target: &PublishTarget) -> Result<String, PublishError> {
        let request = PublishRequest {
            content: markdown.to_string(),
            repository: target.repository.clone(),
            filename: target.filename.clone(),
            branch: target.branch.clone(),
            commit_message: target.commit_message.clone(),
        };
        let locator = self.publisher.publish(&request)?;
        log::info!("Published {} to {}", target.filename, target.repository);
        Ok(locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct StubPublisher {
        result: Result<String, PublishError>,
        received: Arc<Mutex<Vec<PublishRequest>>>,
    }

    impl Publisher for StubPublisher {
        fn publish(&self, request: &PublishRequest) -> Result<String, PublishError> {
            self.received.lock().unwrap().push(request.clone());
            self.result.clone()
        }
    }

    fn target() -> PublishTarget {
        PublishTarget {
            repository: "acme/notes".to_string(),
            filename: "transcripts/standup.md".to_string(),
            branch: Some("archive".to_string()),
            commit_message: None,
        }
    }

    fn use_case(
        result: Result<String, PublishError>,
    ) -> (PublishTranscriptUseCase, Arc<Mutex<Vec<PublishRequest>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let publisher = StubPublisher {
            result,
            received: Arc::clone(&received),
        };
        (PublishTranscriptUseCase::new(Box::new(publisher)), received)
    }

    #[test]
    fn test_forwards_request_and_returns_locator() {
        let (use_case, received) = use_case(Ok("https://example.test/standup.md".to_string()));

        let locator = use_case.execute("# Standup\n", &target()).unwrap();

        assert_eq!(locator, "https://example.test/standup.md");
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].content, "# Standup\n");
        assert_eq!(received[0].repository, "acme/notes");
        assert_eq!(received[0].filename, "transcripts/standup.md");
        assert_eq!(received[0].branch(), "archive");
        assert!(received[0].commit_message.is_none());
    }

    #[test]
    fn test_errors_pass_through_unchanged() {
        let error = PublishError::Auth("gh is not logged in".to_string());
        let (use_case, _) = use_case(Err(error.clone()));

        assert_eq!(use_case.execute("# x\n", &target()).unwrap_err(), error);
    }
}
