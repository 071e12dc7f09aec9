//! HTTP transport shared by the remote collaborators.
//!
//! The services only see [`HttpTransport`]; the production implementation is a
//! blocking `ureq` agent, tests substitute canned responses.

use std::io::Read;
use std::time::Duration;

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("failed to read response: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => TransportError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => TransportError::Network(transport.to_string()),
        }
    }
}

/// Blocking HTTP operations used by the service clients
pub trait HttpTransport: Send + Sync {
    /// GET with query parameters, returning the body
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError>;

    /// POST a JSON body, returning the response body
    fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<String, TransportError>;

    /// POST a JSON body and hand back the response as a stream
    fn post_json_stream(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Box<dyn Read + Send>, TransportError>;
}

/// `ureq` implementation
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(read_timeout)
            .user_agent(concat!("farmhand/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }

    fn post(&self, url: &str, bearer: Option<&str>) -> ureq::Request {
        let request = self
            .agent
            .post(url)
            .set("Content-Type", "application/json");
        match bearer {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(30))
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let response = request.call()?;
        Ok(response.into_string()?)
    }

    fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<String, TransportError> {
        let response = self.post(url, bearer).send_json(body.clone())?;
        Ok(response.into_string()?)
    }

    fn post_json_stream(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Box<dyn Read + Send>, TransportError> {
        let response = self
            .post(url, bearer)
            .set("Accept", "text/event-stream")
            .send_json(body.clone())?;
        Ok(Box::new(response.into_reader()))
    }
}
