//! Shared test utilities: a canned HTTP transport

#![allow(dead_code)]

use std::io::{self, Cursor, Read};
use std::sync::Mutex;

use serde_json::Value;

use farmhand::transport::{HttpTransport, TransportError};

/// What a route answers with
#[derive(Debug, Clone)]
pub enum Canned {
    Body(String),
    Status(u16, String),
    Network,
    /// Stream that delivers the prefix, then fails
    BrokenStream(String),
}

/// One request seen by the transport
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Routes requests by URL substring, first match wins. Unrouted URLs fail
/// with a network error.
#[derive(Default)]
pub struct FakeTransport {
    routes: Vec<(String, Canned)>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url_part: &str, body: impl Into<String>) -> Self {
        self.routes.push((url_part.to_string(), Canned::Body(body.into())));
        self
    }

    pub fn respond_json(self, url_part: &str, body: Value) -> Self {
        self.respond(url_part, body.to_string())
    }

    pub fn canned(mut self, url_part: &str, canned: Canned) -> Self {
        self.routes.push((url_part.to_string(), canned));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url_part: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.contains(url_part))
            .collect()
    }

    fn lookup(&self, recorded: Recorded) -> Canned {
        let canned = self
            .routes
            .iter()
            .find(|(part, _)| recorded.url.contains(part.as_str()))
            .map(|(_, canned)| canned.clone())
            .unwrap_or(Canned::Network);
        self.requests.lock().unwrap().push(recorded);
        canned
    }
}

struct BrokenReader {
    inner: Cursor<Vec<u8>>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
            n => Ok(n),
        }
    }
}

fn into_body(canned: Canned) -> Result<String, TransportError> {
    match canned {
        Canned::Body(body) | Canned::BrokenStream(body) => Ok(body),
        Canned::Status(status, body) => Err(TransportError::Status { status, body }),
        Canned::Network => Err(TransportError::Network("no route to host".to_string())),
    }
}

impl HttpTransport for FakeTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        into_body(self.lookup(Recorded {
            method: "GET",
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            bearer: None,
            body: None,
        }))
    }

    fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> Result<String, TransportError> {
        into_body(self.lookup(Recorded {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            bearer: bearer.map(str::to_string),
            body: Some(body.clone()),
        }))
    }

    fn post_json_stream(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Box<dyn Read + Send>, TransportError> {
        let canned = self.lookup(Recorded {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            bearer: bearer.map(str::to_string),
            body: Some(body.clone()),
        });
        match canned {
            Canned::BrokenStream(prefix) => Ok(Box::new(BrokenReader {
                inner: Cursor::new(prefix.into_bytes()),
            })),
            other => Ok(Box::new(Cursor::new(into_body(other)?.into_bytes()))),
        }
    }
}

/// ip-api.com style success body
pub fn ip_location(region: &str, city: &str, lat: f64, lon: f64) -> Value {
    serde_json::json!({
        "status": "success",
        "country": "India",
        "countryCode": "IN",
        "region": "XX",
        "regionName": region,
        "city": city,
        "lat": lat,
        "lon": lon
    })
}
