use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
    Binary(Bytes),
}

/// A successful (2xx) response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub payload: Payload,
}

impl ApiResponse {
    /// The JSON body, if this response was decoded as JSON.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Raw bytes, if this response was decoded as binary.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.payload {
            Payload::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Value of a response header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Deserialize a JSON body into a caller-owned type.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let value = match self.payload {
            Payload::Json(value) => value,
            Payload::Text(text) => {
                return serde_json::from_str(&text).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: text,
                });
            }
            Payload::Binary(bytes) => {
                return serde_json::from_slice(&bytes).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
        };
        T::deserialize(&value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(payload: Payload) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            payload,
        }
    }

    #[test]
    fn accessors_match_payload_kind() {
        let resp = response(Payload::Binary(Bytes::from_static(b"\x89PNG")));
        assert!(resp.json().is_none());
        assert_eq!(resp.bytes().map(|b| b.len()), Some(4));
    }

    #[test]
    fn into_json_reports_shape_mismatch() {
        let resp = response(Payload::Json(json!({"value": "hot"})));
        let result: Result<Vec<u32>, _> = resp.into_json();
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }
}
