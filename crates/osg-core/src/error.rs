use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("the path {0} is not available")]
    InvalidPath(String),

    #[error("the method {method} is not available for {path}")]
    InvalidMethod { path: String, method: String },

    #[error("the scheme {0} is not available for securitySchemes")]
    InvalidScheme(String),

    #[error("the auth type {0} is invalid or not implemented")]
    InvalidAuthType(String),

    #[error("the scheme reference {0} is not valid or not implemented")]
    InvalidSchemeReference(String),

    #[error("servers must be declared on the document, path or operation to build requests")]
    NoServer,

    #[error("unresolved reference: {0}")]
    UnresolvedRef(String),

    #[error("circular reference detected: {0}")]
    CircularRef(String),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference {pointer} does not point at a valid object: {message}")]
    InvalidRefTarget { pointer: String, message: String },
}
