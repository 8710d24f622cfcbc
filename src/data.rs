use std::sync::{Arc, Mutex};

use crate::endpoint::{self, Submission, SubmitError};

pub trait SubmissionService: Send + Sync {
    fn submit(&self, submission: Submission) -> Result<(), SubmitError>;
}

pub struct EndpointSubmissionService {
    client: Arc<endpoint::Client>,
}

impl EndpointSubmissionService {
    pub fn new(client: Arc<endpoint::Client>) -> Self {
        Self { client }
    }
}

impl SubmissionService for EndpointSubmissionService {
    fn submit(&self, submission: Submission) -> Result<(), SubmitError> {
        self.client.submit(&submission)
    }
}

// Records submissions instead of sending them anywhere.
#[derive(Default)]
pub struct MockSubmissionService {
    reject_status: Option<u16>,
    sent: Mutex<Vec<Submission>>,
}

impl MockSubmissionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_status: Some(status),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap().clone()
    }
}

impl SubmissionService for MockSubmissionService {
    fn submit(&self, submission: Submission) -> Result<(), SubmitError> {
        self.sent.lock().unwrap().push(submission);
        match self.reject_status {
            Some(status) => Err(SubmitError::Rejected { status }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_submissions() {
        let service = MockSubmissionService::new();
        service
            .submit(Submission::Subscription {
                email: "viewer@example.com".into(),
            })
            .unwrap();
        let sent = service.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Submission::Subscription {
                email: "viewer@example.com".into()
            }
        );
    }

    #[test]
    fn rejecting_mock_still_records_the_attempt() {
        let service = MockSubmissionService::rejecting(503);
        let err = service
            .submit(Submission::Contact {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: String::new(),
                message: "Hello".into(),
            })
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 503 }));
        assert_eq!(service.sent().len(), 1);
    }
}
