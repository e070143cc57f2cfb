use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::components::Components;
use super::operation::{HttpMethod, PathItem};
use super::ref_resolve::RefResolver;
use super::security::SecurityRequirement;
use super::server::Server;
use crate::error::ParseError;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level OpenAPI 3.x specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenApiSpec {
    #[serde(default)]
    pub openapi: String,

    #[serde(default)]
    pub info: Info,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// A parsed document: the raw JSON tree used for `$ref` pointer walking and
/// the typed view built from it. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Document {
    raw: Value,
    spec: OpenApiSpec,
}

impl Document {
    pub fn from_value(raw: Value) -> Result<Self, ParseError> {
        let spec: OpenApiSpec = serde_json::from_value(raw.clone())?;
        Ok(Self { raw, spec })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn resolver(&self) -> RefResolver<'_> {
        RefResolver::new(&self.raw)
    }

    /// Methods declared on `pathname`, in the order they appear in the document.
    pub fn declared_methods(&self, pathname: &str) -> Vec<HttpMethod> {
        self.raw
            .get("paths")
            .and_then(|paths| paths.get(pathname))
            .and_then(Value::as_object)
            .map(|item| {
                item.keys()
                    .filter_map(|key| key.parse::<HttpMethod>().ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
