//! HTTP transport: one request in, one status and parsed body out.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace, warn};

use schedule_core::error::{Error, HttpError, InvalidInputError, TransportError};
use schedule_core::message::{error_message, validation_message};
use schedule_core::{AccessToken, ApiUrl, Method, RequestDescriptor, Result};

use crate::config::ClientConfig;

fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Request { message }
    };
    Error::Transport(err)
}

fn invalid_header(reason: impl std::fmt::Display) -> Error {
    InvalidInputError::Other {
        message: format!("invalid header: {}", reason),
    }
    .into()
}

/// A response whose body has already been read.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RawResponse {
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Success body, or an HTTP error with the top-level message.
    pub fn into_outcome(self) -> Result<Value> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            let status = self.status.as_u16();
            Err(Error::Http(HttpError::new(
                status,
                error_message(status, &self.body),
            )))
        }
    }

    /// Like [`RawResponse::into_outcome`], but for endpoints that report
    /// field-scoped validation errors.
    pub fn into_validated_outcome(self) -> Result<Value> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            let status = self.status.as_u16();
            Err(Error::Http(HttpError::new(
                status,
                validation_message(status, &self.body),
            )))
        }
    }
}

/// HTTP client bound to an API root.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    base: ApiUrl,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            base: config.base_url.clone(),
        })
    }

    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send a request, attaching the bearer token when one is given.
    #[instrument(skip(self, request, token), fields(method = %request.method, path = %request.path))]
    pub async fn send(
        &self,
        request: &RequestDescriptor,
        token: Option<&AccessToken>,
    ) -> Result<RawResponse> {
        let url = self.base.endpoint(&request.path);
        debug!(authenticated = token.is_some(), "API request");

        let mut builder = self
            .client
            .request(reqwest_method(request.method), &url)
            .headers(Self::headers(request, token)?);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(transport_error)?;
        Ok(Self::read_response(response).await)
    }

    /// POST a JSON body without any credentials.
    #[instrument(skip(self, body))]
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base.endpoint(path);
        debug!("Unauthenticated API request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Ok(Self::read_response(response).await)
    }

    /// Build request headers.
    ///
    /// JSON content type unless the caller overrides it; the bearer token,
    /// when held, replaces any caller-supplied `Authorization`.
    fn headers(request: &RequestDescriptor, token: Option<&AccessToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(invalid_header)?;
            let value = HeaderValue::from_str(value).map_err(invalid_header)?;
            headers.insert(name, value);
        }

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| invalid_header("access token contains invalid characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Read status and body. Empty, unreadable or non-JSON bodies become an
    /// empty object.
    async fn read_response(response: reqwest::Response) -> RawResponse {
        let status = response.status();
        trace!(status = %status, "API response");

        let body = match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => Value::Object(Map::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                debug!(error = %e, "Response body is not JSON, using empty object");
                Value::Object(Map::new())
            }),
            Err(e) => {
                warn!(error = %e, "Failed to read response body");
                Value::Object(Map::new())
            }
        };

        RawResponse { status, body }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
