use serde::{Deserialize, Serialize};

use crate::parse::operation::HttpMethod;

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// A name/value pair: header, query entry, cookie or form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarItem {
    pub name: String,
    pub value: String,
}

impl HarItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPostData {
    pub mime_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<HarItem>>,
}

/// A fully resolved request, ready for code conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    pub method: HttpMethod,
    pub pathname: String,
    pub url: String,
    pub headers: Vec<HarItem>,
    pub query_string: Vec<HarItem>,
    pub cookies: Vec<HarItem>,
    pub http_version: String,
    pub headers_size: u64,
    pub body_size: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<HarPostData>,

    /// The payload mime type, or empty when there is no payload.
    pub comment: String,
}

impl HarRequest {
    pub fn mime_type(&self) -> Option<&str> {
        (!self.comment.is_empty()).then_some(self.comment.as_str())
    }
}

/// One operation with its descriptors, one per request content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarEndpoint {
    pub method: HttpMethod,
    pub pathname: String,
    pub url: String,
    pub description: String,
    pub hars: Vec<HarRequest>,
}
