//! Request descriptor passed to [`Api::call`](crate::traits::Api::call).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::form_urlencoded;

use crate::error::{Error, InvalidInputError};

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(InvalidInputError::Other {
                message: format!("unsupported method '{}'", other),
            }
            .into()),
        }
    }
}

/// One logical request against the API.
///
/// `path` is relative to the API root and may include a query string.
///
/// # Example
///
/// ```
/// use schedule_core::{Method, RequestDescriptor};
///
/// let request = RequestDescriptor::get("/lessons/by_group/")
///     .query(&[("group_id", "3"), ("week", "12")]);
/// assert_eq!(request.method, Method::Get);
/// assert_eq!(request.path, "/lessons/by_group/?group_id=3&week=12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Set a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(body).map_err(|e| InvalidInputError::Body {
            reason: e.to_string(),
        })?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Set a raw body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a request header, replacing any previous value for the name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append url-encoded query parameters to the path.
    pub fn query<K, V>(mut self, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if params.is_empty() {
            return self;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        let encoded = serializer.finish();

        let separator = if self.path.contains('?') { '&' } else { '?' };
        self.path = format!("{}{}{}", self.path, separator, encoded);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("put".parse::<Method>().unwrap(), Method::Put);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn query_encodes_values() {
        let request = RequestDescriptor::get("/rooms/free/").query(&[
            ("start", "2024-09-02T08:30:00+03:00"),
            ("type", "lab"),
        ]);
        assert_eq!(
            request.path,
            "/rooms/free/?start=2024-09-02T08%3A30%3A00%2B03%3A00&type=lab"
        );
    }

    #[test]
    fn query_appends_to_existing_query() {
        let request = RequestDescriptor::get("/lessons/by_room/?room_id=1").query(&[("week", "2")]);
        assert_eq!(request.path, "/lessons/by_room/?room_id=1&week=2");
    }

    #[test]
    fn json_body_is_encoded() {
        let request = RequestDescriptor::post("/departments/")
            .json(&json!({"name": "Applied Mathematics"}))
            .unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"name":"Applied Mathematics"}"#.as_slice())
        );
    }
}
