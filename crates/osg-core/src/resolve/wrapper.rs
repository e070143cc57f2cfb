use std::cell::OnceCell;

use indexmap::IndexMap;

use super::security::{SecurityInfo, requirement_names, security_scheme};
use super::{memoize, resolve_parameters};
use crate::error::ResolveError;
use crate::parse::operation::{HttpMethod, Operation, PathItem};
use crate::parse::parameter::Parameter;
use crate::parse::request_body::{RequestBody, RequestBodyOrRef};
use crate::parse::security::SecurityScheme;
use crate::parse::server::first_url;
use crate::parse::spec::Document;

/// Entry point over a parsed document. Path wrappers are created on first
/// request and kept for the lifetime of this value.
#[derive(Debug)]
pub struct SpecWrapper<'a> {
    doc: &'a Document,
    paths: IndexMap<&'a str, OnceCell<PathWrapper<'a>>>,
    security_requirements: OnceCell<Vec<String>>,
}

impl<'a> SpecWrapper<'a> {
    pub fn new(doc: &'a Document) -> Self {
        let paths = doc
            .spec()
            .paths
            .keys()
            .map(|name| (name.as_str(), OnceCell::new()))
            .collect();
        Self {
            doc,
            paths,
            security_requirements: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Path names in document order.
    pub fn available_paths(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.paths.keys().copied()
    }

    pub fn path(&self, name: &str) -> Result<&PathWrapper<'a>, ResolveError> {
        let invalid = || ResolveError::InvalidPath(name.to_string());
        let (pathname, item) = self.doc.spec().paths.get_key_value(name).ok_or_else(invalid)?;
        let cell = self.paths.get(name).ok_or_else(invalid)?;
        Ok(cell.get_or_init(|| {
            log::debug!("wrapping path {pathname}");
            PathWrapper::new(self.doc, pathname.as_str(), item)
        }))
    }

    /// Every path wrapper in document order.
    pub fn paths(&self) -> Vec<&PathWrapper<'a>> {
        self.doc
            .spec()
            .paths
            .iter()
            .zip(self.paths.values())
            .map(|((name, item), cell)| {
                cell.get_or_init(|| PathWrapper::new(self.doc, name.as_str(), item))
            })
            .collect()
    }

    /// Document-level base URL.
    pub fn base_url(&self) -> Result<String, ResolveError> {
        first_url(&self.doc.spec().servers).ok_or(ResolveError::NoServer)
    }

    /// Document-level requirement names.
    pub fn security_requirements(&self) -> &[String] {
        self.security_requirements.get_or_init(|| {
            requirement_names(self.doc.spec().security.as_deref().unwrap_or_default())
        })
    }

    pub fn security_scheme(&self, id: &str) -> Result<SecurityScheme, ResolveError> {
        security_scheme(self.doc, id)
    }
}

/// One path item with its lazily wrapped operations.
#[derive(Debug)]
pub struct PathWrapper<'a> {
    doc: &'a Document,
    pathname: &'a str,
    item: &'a PathItem,
    base_url: OnceCell<String>,
    parameters: OnceCell<Vec<Parameter>>,
    operations: IndexMap<HttpMethod, OnceCell<OperationWrapper<'a>>>,
}

impl<'a> PathWrapper<'a> {
    fn new(doc: &'a Document, pathname: &'a str, item: &'a PathItem) -> Self {
        let operations = doc
            .declared_methods(pathname)
            .into_iter()
            .filter(|method| item.operation(*method).is_some())
            .map(|method| (method, OnceCell::new()))
            .collect();
        Self {
            doc,
            pathname,
            item,
            base_url: OnceCell::new(),
            parameters: OnceCell::new(),
            operations,
        }
    }

    pub fn pathname(&self) -> &'a str {
        self.pathname
    }

    pub fn item(&self) -> &'a PathItem {
        self.item
    }

    /// Declared methods in document key order.
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.operations.keys().copied()
    }

    /// Path servers first, then document servers.
    pub fn base_url(&self) -> Result<&str, ResolveError> {
        memoize(&self.base_url, || {
            first_url(&self.item.servers)
                .or_else(|| first_url(&self.doc.spec().servers))
                .ok_or(ResolveError::NoServer)
        })
        .map(String::as_str)
    }

    /// Path-level parameters with `$ref` entries resolved.
    pub fn parameters(&self) -> Result<&[Parameter], ResolveError> {
        memoize(&self.parameters, || {
            resolve_parameters(self.doc.resolver(), &self.item.parameters)
        })
        .map(Vec::as_slice)
    }

    pub fn operation(&self, method: HttpMethod) -> Result<&OperationWrapper<'a>, ResolveError> {
        let invalid = || ResolveError::InvalidMethod {
            path: self.pathname.to_string(),
            method: method.key().to_string(),
        };
        let cell = self.operations.get(&method).ok_or_else(invalid)?;
        let operation = self.item.operation(method).ok_or_else(invalid)?;
        Ok(cell.get_or_init(|| {
            OperationWrapper::new(self.doc, self.pathname, self.item, method, operation)
        }))
    }

    /// Every declared operation in document key order.
    pub fn operations(&self) -> Vec<&OperationWrapper<'a>> {
        self.methods()
            .filter_map(|method| self.operation(method).ok())
            .collect()
    }
}

/// One operation. All derived values are resolved on first access.
#[derive(Debug)]
pub struct OperationWrapper<'a> {
    doc: &'a Document,
    pathname: &'a str,
    path_item: &'a PathItem,
    method: HttpMethod,
    operation: &'a Operation,
    base_url: OnceCell<String>,
    parameters: OnceCell<Vec<Parameter>>,
    request_body: OnceCell<Option<RequestBody>>,
    security_requirements: OnceCell<Vec<String>>,
}

impl<'a> OperationWrapper<'a> {
    fn new(
        doc: &'a Document,
        pathname: &'a str,
        path_item: &'a PathItem,
        method: HttpMethod,
        operation: &'a Operation,
    ) -> Self {
        Self {
            doc,
            pathname,
            path_item,
            method,
            operation,
            base_url: OnceCell::new(),
            parameters: OnceCell::new(),
            request_body: OnceCell::new(),
            security_requirements: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn pathname(&self) -> &'a str {
        self.pathname
    }

    pub fn operation(&self) -> &'a Operation {
        self.operation
    }

    pub fn description(&self) -> Option<&'a str> {
        self.operation.description.as_deref()
    }

    /// Operation servers, then path servers, then document servers.
    pub fn base_url(&self) -> Result<&str, ResolveError> {
        memoize(&self.base_url, || {
            first_url(&self.operation.servers)
                .or_else(|| first_url(&self.path_item.servers))
                .or_else(|| first_url(&self.doc.spec().servers))
                .ok_or(ResolveError::NoServer)
        })
        .map(String::as_str)
    }

    /// Operation-level parameters with `$ref` entries resolved. Path-level
    /// parameters are merged in later, per location.
    pub fn parameters(&self) -> Result<&[Parameter], ResolveError> {
        memoize(&self.parameters, || {
            resolve_parameters(self.doc.resolver(), &self.operation.parameters)
        })
        .map(Vec::as_slice)
    }

    pub fn request_body(&self) -> Result<Option<&RequestBody>, ResolveError> {
        memoize(&self.request_body, || match &self.operation.request_body {
            None => Ok(None),
            Some(RequestBodyOrRef::RequestBody(body)) => Ok(Some(body.clone())),
            Some(RequestBodyOrRef::Ref { ref_path }) => {
                self.doc.resolver().resolve_as(ref_path).map(Some)
            }
        })
        .map(Option::as_ref)
    }

    /// Requirement names for this operation. A missing `security` field falls
    /// back to the document requirements; an explicit empty list means none.
    pub fn security_requirements(&self) -> &[String] {
        self.security_requirements.get_or_init(|| {
            let requirements = self
                .operation
                .security
                .as_deref()
                .or(self.doc.spec().security.as_deref())
                .unwrap_or_default();
            requirement_names(requirements)
        })
    }

    pub fn security_info(&self) -> SecurityInfo<'_> {
        SecurityInfo::new(self.security_requirements(), self.doc)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document() -> Document {
        Document::from_value(json!({
            "openapi": "3.0.0",
            "servers": [{ "url": "http://api.example.com" }],
            "security": [{ "bearer": [] }],
            "components": {
                "parameters": {
                    "Trace": { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
                },
                "requestBodies": {
                    "UserBody": {
                        "content": { "application/json": { "schema": { "type": "object" } } }
                    }
                },
                "securitySchemes": {
                    "bearer": { "type": "http", "scheme": "bearer" }
                }
            },
            "paths": {
                "/users": {
                    "parameters": [{ "$ref": "#/components/parameters/Trace" }],
                    "post": {
                        "requestBody": { "$ref": "#/components/requestBodies/UserBody" }
                    },
                    "get": { "security": [] }
                },
                "/health": {
                    "servers": [{ "url": "http://{env}.example.com", "variables": { "env": { "default": "status" } } }],
                    "get": {
                        "servers": [{ "url": "http://op.example.com" }],
                        "description": "Health check"
                    },
                    "head": {}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_unknown_path_and_method() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        assert_eq!(
            spec.path("/nope").unwrap_err(),
            ResolveError::InvalidPath("/nope".to_string())
        );
        let err = spec
            .path("/users")
            .unwrap()
            .operation(HttpMethod::Delete)
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidMethod {
                path: "/users".to_string(),
                method: "delete".to_string()
            }
        );
    }

    #[test]
    fn test_path_wrapper_is_cached() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        let first = spec.path("/users").unwrap();
        let second = spec.path("/users").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(spec.paths().len(), 2);
    }

    #[test]
    fn test_methods_follow_document_order() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        let methods: Vec<_> = spec.path("/users").unwrap().methods().collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
    }

    #[test]
    fn test_base_url_precedence() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        let health = spec.path("/health").unwrap();
        assert_eq!(health.base_url().unwrap(), "http://status.example.com");
        assert_eq!(
            health.operation(HttpMethod::Get).unwrap().base_url().unwrap(),
            "http://op.example.com"
        );
        assert_eq!(
            health.operation(HttpMethod::Head).unwrap().base_url().unwrap(),
            "http://status.example.com"
        );
        let users = spec.path("/users").unwrap();
        assert_eq!(
            users.operation(HttpMethod::Get).unwrap().base_url().unwrap(),
            "http://api.example.com"
        );
    }

    #[test]
    fn test_missing_servers() {
        let doc = Document::from_value(json!({ "paths": { "/a": { "get": {} } } })).unwrap();
        let spec = SpecWrapper::new(&doc);
        let op = spec.path("/a").unwrap().operation(HttpMethod::Get).unwrap();
        assert_eq!(op.base_url().unwrap_err(), ResolveError::NoServer);
        assert_eq!(spec.base_url().unwrap_err(), ResolveError::NoServer);
    }

    #[test]
    fn test_security_fallback() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        let users = spec.path("/users").unwrap();
        assert_eq!(
            users.operation(HttpMethod::Post).unwrap().security_requirements(),
            ["bearer"]
        );
        assert!(
            users
                .operation(HttpMethod::Get)
                .unwrap()
                .security_requirements()
                .is_empty()
        );
    }

    #[test]
    fn test_references_are_resolved() {
        let doc = document();
        let spec = SpecWrapper::new(&doc);
        let users = spec.path("/users").unwrap();
        assert_eq!(users.parameters().unwrap()[0].name, "X-Trace");
        let body = users
            .operation(HttpMethod::Post)
            .unwrap()
            .request_body()
            .unwrap()
            .unwrap();
        assert!(body.content.contains_key("application/json"));
        assert!(
            users
                .operation(HttpMethod::Get)
                .unwrap()
                .request_body()
                .unwrap()
                .is_none()
        );
    }
}
