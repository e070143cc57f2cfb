use std::cmp::Ordering;

use osg_core::har::HarEndpoint;
use osg_core::{ApiToHar, HttpMethod};
use serde::{Deserialize, Serialize};

use crate::converter::CodeConverter;
use crate::error::{EmitError, SnippetGenerateError};
use crate::snippet::{Snippet, create_all};
use crate::target::LanguageTarget;

/// Method precedence within one resource.
const METHOD_ORDER: [HttpMethod; 5] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Patch,
];

/// All snippets of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSnippets {
    pub method: HttpMethod,
    pub url: String,
    pub description: String,
    pub resource: String,
    pub snippets: Vec<Snippet>,
}

impl EndpointSnippets {
    fn new(endpoint: &HarEndpoint, snippets: Vec<Snippet>) -> Self {
        Self {
            method: endpoint.method,
            url: endpoint.url.clone(),
            description: endpoint.description.clone(),
            resource: resource_name(&endpoint.url).unwrap_or_default().to_string(),
            snippets,
        }
    }
}

/// Last non-empty segment that is not a `{param}` template.
pub fn resource_name(url: &str) -> Option<&str> {
    url.rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
}

/// Snippets for one operation in every target.
pub fn endpoint_snippets(
    converter: &dyn CodeConverter,
    har: &ApiToHar<'_>,
    path: &str,
    method: HttpMethod,
    targets: &[LanguageTarget],
) -> Result<EndpointSnippets, SnippetGenerateError> {
    let build = || -> Result<EndpointSnippets, EmitError> {
        let endpoint = har.endpoint(path, method)?;
        let snippets = create_all(converter, targets, &endpoint.hars)?;
        Ok(EndpointSnippets::new(endpoint, snippets))
    };
    build().map_err(|source| generate_error(har, path, method, source))
}

/// Snippets for every operation of the document, sorted by resource then
/// method. Stops at the first operation that fails.
pub fn all_snippets(
    converter: &dyn CodeConverter,
    har: &ApiToHar<'_>,
    targets: &[LanguageTarget],
) -> Result<Vec<EndpointSnippets>, SnippetGenerateError> {
    let mut results = Vec::new();
    for path in har.paths() {
        let methods: Vec<HttpMethod> = har
            .spec()
            .path(path)
            .map(|p| p.methods().collect())
            .map_err(|e| generate_error(har, path, HttpMethod::Get, e.into()))?;
        for method in methods {
            results.push(endpoint_snippets(converter, har, path, method, targets)?);
        }
    }
    sort_endpoints(&mut results);
    log::debug!("generated snippets for {} operations", results.len());
    Ok(results)
}

/// Stable sort by resource ascending, then method precedence. Methods
/// outside [`METHOD_ORDER`] go last.
pub fn sort_endpoints(endpoints: &mut [EndpointSnippets]) {
    endpoints.sort_by(|a, b| {
        a.resource
            .cmp(&b.resource)
            .then_with(|| method_order(a.method, b.method))
    });
}

fn method_order(a: HttpMethod, b: HttpMethod) -> Ordering {
    let rank = |m: HttpMethod| METHOD_ORDER.iter().position(|o| *o == m).unwrap_or(METHOD_ORDER.len());
    rank(a).cmp(&rank(b))
}

fn generate_error(
    har: &ApiToHar<'_>,
    path: &str,
    method: HttpMethod,
    source: EmitError,
) -> SnippetGenerateError {
    let operation = har
        .spec()
        .document()
        .spec()
        .paths
        .get(path)
        .and_then(|item| item.operation(method));
    SnippetGenerateError {
        path: path.to_string(),
        method: method.key().to_string(),
        summary: operation.and_then(|op| op.summary.clone()),
        parameters: operation
            .map(|op| format!("{:?}", op.parameters))
            .unwrap_or_default(),
        request_body: operation
            .and_then(|op| op.request_body.as_ref())
            .map(|body| format!("{body:?}"))
            .unwrap_or_default(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: HttpMethod, resource: &str) -> EndpointSnippets {
        EndpointSnippets {
            method,
            url: String::new(),
            description: String::new(),
            resource: resource.to_string(),
            snippets: Vec::new(),
        }
    }

    #[test]
    fn test_resource_name() {
        assert_eq!(resource_name("/api/users/{id}"), Some("users"));
        assert_eq!(resource_name("/api/auth/login"), Some("login"));
        assert_eq!(resource_name("http://x.io/api/users/"), Some("users"));
        assert_eq!(resource_name("/{id}"), None);
    }

    #[test]
    fn test_sort_by_resource_then_method() {
        let mut endpoints = vec![
            endpoint(HttpMethod::Patch, "users"),
            endpoint(HttpMethod::Options, "users"),
            endpoint(HttpMethod::Post, "users"),
            endpoint(HttpMethod::Get, "users"),
            endpoint(HttpMethod::Post, "login"),
        ];
        sort_endpoints(&mut endpoints);
        let order: Vec<_> = endpoints
            .iter()
            .map(|e| (e.resource.as_str(), e.method))
            .collect();
        assert_eq!(
            order,
            vec![
                ("login", HttpMethod::Post),
                ("users", HttpMethod::Get),
                ("users", HttpMethod::Post),
                ("users", HttpMethod::Patch),
                ("users", HttpMethod::Options),
            ]
        );
    }
}
