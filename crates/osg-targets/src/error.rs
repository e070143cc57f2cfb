use osg_core::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("the language {0} is not available")]
    InvalidLanguage(String),

    #[error("the library {library} is not available for {language}")]
    InvalidLibrary { language: String, library: String },

    #[error("template render failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("invalid request url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// A failure while generating snippets for one operation, with enough of the
/// operation attached to find the offending declaration.
#[derive(Debug, Error)]
#[error("error generating snippet code for {method} on {path}: {source}")]
pub struct SnippetGenerateError {
    pub path: String,
    pub method: String,
    pub summary: Option<String>,
    pub parameters: String,
    pub request_body: String,
    #[source]
    pub source: Box<EmitError>,
}

impl SnippetGenerateError {
    /// Multi-line report including the operation's parameters and request body.
    pub fn report(&self) -> String {
        format!(
            "Error generating snippet code on {} for {}\n - Summary: {}\n - Parameters: {}\n - Request Body: {}\n - Cause: {}",
            self.path,
            self.method,
            self.summary.as_deref().unwrap_or("-"),
            self.parameters,
            self.request_body,
            self.source,
        )
    }
}
