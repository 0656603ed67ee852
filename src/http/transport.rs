use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::args::HttpMethod;
use crate::error::{AppResult, HttpError};
use crate::instruction::Instruction;

use super::client::{ClientSettings, build_client};

/// Placeholder logged instead of an `octet-stream` body.
pub const BINARY_BODY: &str = "...binary...";

/// Everything needed to issue one request for an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl From<&Instruction> for RequestSpec {
    fn from(instruction: &Instruction) -> Self {
        Self {
            method: instruction.method,
            url: instruction.url.clone(),
            headers: instruction.headers.clone(),
            body: instruction
                .method
                .accepts_body()
                .then(|| instruction.payload.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(String),
    Binary { bytes: usize },
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Text(text) => f.write_str(text),
            ResponseBody::Binary { .. } => f.write_str(BINARY_BODY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
}

/// Issues requests on behalf of the executor; shared by all request tasks.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    async fn call(&self, request: &RequestSpec) -> Result<HttpResponse, HttpError>;
}

/// [`HttpTransport`] backed by one pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error when the underlying client cannot be built.
    pub fn new(settings: &ClientSettings) -> AppResult<Self> {
        Ok(Self {
            client: build_client(settings)?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn call(&self, request: &RequestSpec) -> Result<HttpResponse, HttpError> {
        let url = Url::parse(&request.url).map_err(|err| HttpError::InvalidUrl {
            url: request.url.clone(),
            source: err,
        })?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .headers(build_headers(&request.headers)?);
        if let Some(body) = request.body.as_ref() {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| HttpError::RequestFailed { source: err })?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let binary = is_binary(response.headers());

        let body = if binary {
            let bytes = response
                .bytes()
                .await
                .map_err(|err| HttpError::ReadBody { source: err })?;
            ResponseBody::Binary { bytes: bytes.len() }
        } else {
            let text = response
                .text()
                .await
                .map_err(|err| HttpError::ReadBody { source: err })?;
            ResponseBody::Text(text)
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

fn build_headers(headers: &BTreeMap<String, String>) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_err| HttpError::InvalidHeader { name: key.clone() })?;
        let val = HeaderValue::from_str(value)
            .map_err(|_err| HttpError::InvalidHeader { name: key.clone() })?;
        if let Some(previous) = map.insert(name, val) {
            debug!(
                "Header '{}' replaces an earlier value {:?} with the same name",
                key, previous
            );
        }
    }
    Ok(map)
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn is_binary(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("octet-stream"))
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn body_only_for_put_and_post() {
        let mut instruction = Instruction::new(HttpMethod::Get, "http://h");
        instruction.payload = "x".to_owned();
        assert_eq!(RequestSpec::from(&instruction).body, None);

        instruction.method = HttpMethod::Post;
        assert_eq!(RequestSpec::from(&instruction).body.as_deref(), Some("x"));

        instruction.method = HttpMethod::Put;
        assert_eq!(RequestSpec::from(&instruction).body.as_deref(), Some("x"));
    }

    #[test]
    fn octet_stream_is_binary() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/Octet-Stream"),
        );
        assert!(is_binary(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_binary(&headers));
    }

    #[test]
    fn headers_differing_in_case_collapse_to_the_later_key() -> Result<(), String> {
        let headers: BTreeMap<String, String> = [
            ("Accept".to_owned(), "text/html".to_owned()),
            ("accept".to_owned(), "application/json".to_owned()),
        ]
        .into();
        let map = build_headers(&headers).map_err(|err| err.to_string())?;
        if map.len() != 1 {
            return Err(format!("Expected one header, got {:?}", map));
        }
        let value = map.get("accept").and_then(|value| value.to_str().ok());
        if value != Some("application/json") {
            return Err(format!("Unexpected accept value: {:?}", value));
        }
        Ok(())
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let headers: BTreeMap<String, String> = [("bad header".to_owned(), "v".to_owned())].into();
        assert!(matches!(
            build_headers(&headers),
            Err(HttpError::InvalidHeader { .. })
        ));
    }
}
