use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use serde::Serialize;

// both shapes post to the same submit URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Submission {
    Subscription {
        email: String,
    },
    Contact {
        name: String,
        email: String,
        phone: String,
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("endpoint rejected submission: status {status}")]
    Rejected { status: u16 },
    #[error("submission request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("submission interrupted before completion")]
    Interrupted,
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub submit_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub http_client: Option<HttpClient>,
}

pub struct Client {
    http: HttpClient,
    user_agent: String,
    submit_url: String,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.submit_url.trim().is_empty() {
            bail!("endpoint submit url required");
        }
        if config.user_agent.trim().is_empty() {
            bail!("endpoint client user agent required");
        }
        let http = match config.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .timeout(config.timeout.unwrap_or(Duration::from_secs(10)))
                .build()?,
        };

        Ok(Client {
            http,
            user_agent: config.user_agent,
            submit_url: config.submit_url,
        })
    }

    // Success is judged by the status code alone; no retry.
    pub fn submit(&self, submission: &Submission) -> Result<(), SubmitError> {
        let resp = self
            .http
            .post(&self.submit_url)
            .header(USER_AGENT, self.user_agent.clone())
            .json(submission)
            .send()?;
        let status = resp.status();
        let _ = resp.text();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn serve_once(status: u16) -> (String, thread::JoinHandle<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
        let url = format!("http://{}/submit", server.server_addr());
        let handle = thread::spawn(move || {
            let mut request = server.recv().expect("receive request");
            let mut body = String::new();
            request
                .as_reader()
                .read_to_string(&mut body)
                .expect("read request body");
            let _ = request.respond(tiny_http::Response::from_string("{}").with_status_code(status));
            body
        });
        (url, handle)
    }

    fn client_for(url: String) -> Client {
        Client::new(ClientConfig {
            submit_url: url,
            user_agent: "reel-tui-test/0.1".into(),
            timeout: Some(Duration::from_secs(5)),
            http_client: None,
        })
        .unwrap()
    }

    #[test]
    fn subscription_posts_tagged_json() {
        let (url, handle) = serve_once(200);
        let client = client_for(url);
        client
            .submit(&Submission::Subscription {
                email: "viewer@example.com".into(),
            })
            .unwrap();
        let body = handle.join().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["type"], "subscription");
        assert_eq!(value["email"], "viewer@example.com");
    }

    #[test]
    fn contact_posts_all_fields() {
        let (url, handle) = serve_once(200);
        let client = client_for(url);
        client
            .submit(&Submission::Contact {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                phone: "555-0102".into(),
                message: "Need a launch cut.".into(),
            })
            .unwrap();
        let body = handle.join().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["type"], "contact");
        assert_eq!(value["name"], "Asha");
        assert_eq!(value["email"], "asha@example.com");
        assert_eq!(value["phone"], "555-0102");
        assert_eq!(value["message"], "Need a launch cut.");
    }

    #[test]
    fn non_success_status_maps_to_rejected() {
        let (url, handle) = serve_once(500);
        let client = client_for(url);
        let err = client
            .submit(&Submission::Subscription {
                email: "viewer@example.com".into(),
            })
            .unwrap_err();
        match err {
            SubmitError::Rejected { status } => assert_eq!(status, 500),
            other => panic!("expected rejection, got {other}"),
        }
        handle.join().unwrap();
    }

    #[test]
    fn unreachable_endpoint_maps_to_transport() {
        // Bind then drop a listener so the port is known-closed.
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = client_for(format!("http://{closed}/submit"));
        let err = client
            .submit(&Submission::Subscription {
                email: "viewer@example.com".into(),
            })
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[test]
    fn blank_url_is_refused() {
        let result = Client::new(ClientConfig {
            submit_url: "  ".into(),
            user_agent: "reel-tui-test/0.1".into(),
            timeout: None,
            http_client: None,
        });
        assert!(result.is_err());
    }
}
