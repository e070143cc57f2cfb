use std::cell::OnceCell;

use indexmap::IndexMap;

use super::parameters::ParameterSet;
use super::post_data::PostData;
use super::security::security_headers;
use super::types::{HTTP_VERSION, HarEndpoint, HarItem, HarPostData, HarRequest};
use crate::error::ResolveError;
use crate::parse::operation::HttpMethod;
use crate::parse::spec::Document;
use crate::resolve::{OperationWrapper, SpecWrapper, memoize};
use crate::sample::{DefaultSampler, SchemaSampler};

pub const NO_DESCRIPTION: &str = "No description available";
const CONTENT_TYPE: &str = "content-type";

/// Turns every operation of a document into request descriptors. Endpoints
/// are built on first request and cached.
pub struct ApiToHar<'a> {
    spec: SpecWrapper<'a>,
    sampler: Box<dyn SchemaSampler + 'a>,
    endpoints: IndexMap<&'a str, IndexMap<HttpMethod, OnceCell<HarEndpoint>>>,
    path_parameters: IndexMap<&'a str, OnceCell<ParameterSet>>,
}

impl<'a> ApiToHar<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self::with_sampler(doc, DefaultSampler)
    }

    pub fn with_sampler(doc: &'a Document, sampler: impl SchemaSampler + 'a) -> Self {
        let path_parameters = doc
            .spec()
            .paths
            .keys()
            .map(|name| (name.as_str(), OnceCell::new()))
            .collect();
        let endpoints = doc
            .spec()
            .paths
            .keys()
            .map(|name| {
                let methods = doc
                    .declared_methods(name)
                    .into_iter()
                    .map(|method| (method, OnceCell::new()))
                    .collect();
                (name.as_str(), methods)
            })
            .collect();
        Self {
            spec: SpecWrapper::new(doc),
            sampler: Box::new(sampler),
            endpoints,
            path_parameters,
        }
    }

    pub fn spec(&self) -> &SpecWrapper<'a> {
        &self.spec
    }

    pub fn endpoint(&self, pathname: &str, method: HttpMethod) -> Result<&HarEndpoint, ResolveError> {
        let path = self.spec.path(pathname)?;
        let operation = path.operation(method)?;
        let cell = self
            .endpoints
            .get(pathname)
            .and_then(|methods| methods.get(&method))
            .ok_or_else(|| ResolveError::InvalidMethod {
                path: pathname.to_string(),
                method: method.key().to_string(),
            })?;
        memoize(cell, || {
            log::debug!("building requests for {} {}", method, pathname);
            let parent = self.path_parameters(pathname)?;
            build_endpoint(parent, operation, self.sampler.as_ref())
        })
    }

    /// Path-level parameters, partitioned once and shared by every operation
    /// on the path.
    pub fn path_parameters(&self, pathname: &str) -> Result<&ParameterSet, ResolveError> {
        let path = self.spec.path(pathname)?;
        let cell = self
            .path_parameters
            .get(pathname)
            .ok_or_else(|| ResolveError::InvalidPath(pathname.to_string()))?;
        memoize(cell, || {
            ParameterSet::new(path.parameters()?, self.spec.document().resolver())
        })
    }

    /// Every endpoint of one path, in document key order.
    pub fn path(&self, pathname: &str) -> Result<Vec<&HarEndpoint>, ResolveError> {
        let path = self.spec.path(pathname)?;
        path.methods()
            .map(|method| self.endpoint(pathname, method))
            .collect()
    }

    /// Path names in document order.
    pub fn paths(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.spec.available_paths()
    }

    /// Every endpoint of the document, paths in document order.
    pub fn to_vec(&self) -> Result<Vec<&HarEndpoint>, ResolveError> {
        let mut endpoints = Vec::new();
        for pathname in self.paths() {
            endpoints.extend(self.path(pathname)?);
        }
        Ok(endpoints)
    }
}

fn build_endpoint(
    parent: &ParameterSet,
    operation: &OperationWrapper<'_>,
    sampler: &dyn SchemaSampler,
) -> Result<HarEndpoint, ResolveError> {
    let base_url = operation.base_url()?;
    let url = format!("{base_url}{}", operation.pathname());
    Ok(HarEndpoint {
        method: operation.method(),
        pathname: operation.pathname().to_string(),
        description: operation
            .description()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        hars: build_requests(parent, operation, sampler, &url)?,
        url,
    })
}

/// One request per sampled content type, or a single request without a
/// payload when the operation has no usable request body.
pub fn build_requests(
    parent: &ParameterSet,
    operation: &OperationWrapper<'_>,
    sampler: &dyn SchemaSampler,
    url: &str,
) -> Result<Vec<HarRequest>, ResolveError> {
    let resolver = operation.document().resolver();
    let params = ParameterSet::new(operation.parameters()?, resolver)?;

    let mut headers = params.headers(Some(parent));
    headers.extend(security_headers(&operation.security_info())?);

    let base = HarRequest {
        method: operation.method(),
        pathname: operation.pathname().to_string(),
        url: url.to_string(),
        headers,
        query_string: params.query_string(Some(parent)),
        cookies: params.cookies(Some(parent)),
        http_version: HTTP_VERSION.to_string(),
        headers_size: 0,
        body_size: 0,
        post_data: None,
        comment: String::new(),
    };

    let post_data = PostData::new(operation.request_body()?);
    if post_data.is_empty() {
        return Ok(vec![base]);
    }
    let payloads = post_data.to_vec(sampler, resolver)?;
    Ok(payloads
        .into_iter()
        .map(|payload| with_payload(&base, payload))
        .collect())
}

fn with_payload(base: &HarRequest, payload: HarPostData) -> HarRequest {
    let mut request = base.clone();
    request
        .headers
        .push(HarItem::new(CONTENT_TYPE, payload.mime_type.clone()));
    request.comment = payload.mime_type.clone();
    request.post_data = Some(payload);
    request
}
