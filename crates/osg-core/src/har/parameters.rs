use heck::ToShoutySnakeCase;
use serde_json::Value;

use super::types::HarItem;
use crate::error::ResolveError;
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{Schema, SchemaOrRef};

/// A parameter reduced to what a request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub name: String,
    pub location: ParameterLocation,
    pub value: String,
}

impl ResolvedParameter {
    pub fn resolve(param: &Parameter, resolver: RefResolver<'_>) -> Result<Self, ResolveError> {
        let schema = match &param.schema {
            Some(SchemaOrRef::Schema(schema)) => Some(schema.as_ref().clone()),
            Some(SchemaOrRef::Ref { ref_path }) => Some(resolver.resolve_as::<Schema>(ref_path)?),
            None => None,
        };
        Ok(Self {
            name: param.name.clone(),
            location: param.location,
            value: placeholder_value(param, schema.as_ref()),
        })
    }

    fn same_slot(&self, other: &ResolvedParameter) -> bool {
        self.name == other.name && self.location == other.location
    }

    fn to_item(&self) -> HarItem {
        HarItem::new(&self.name, &self.value)
    }
}

/// Value for a parameter: schema default, then parameter example, then schema
/// example, else a `SOME_<TYPE>_VALUE` marker.
pub fn placeholder_value(param: &Parameter, schema: Option<&Schema>) -> String {
    let explicit = schema
        .and_then(|s| s.default_value.as_ref())
        .filter(|v| !v.is_null())
        .or(param.example.as_ref())
        .or(schema.and_then(|s| s.example.as_ref()));
    match explicit {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => match schema.and_then(Schema::primary_type) {
            Some(kind) => format!("SOME_{}_VALUE", kind.as_str().to_shouty_snake_case()),
            None => "SOME_VALUE".to_string(),
        },
    }
}

/// `local` entries first, then every `parent` entry whose name and location
/// are not already taken.
pub fn merge<'p>(
    local: &'p [ResolvedParameter],
    parent: &'p [ResolvedParameter],
) -> Vec<&'p ResolvedParameter> {
    let mut merged: Vec<&ResolvedParameter> = local.iter().collect();
    for candidate in parent {
        if !merged.iter().any(|taken| taken.same_slot(candidate)) {
            merged.push(candidate);
        }
    }
    merged
}

/// Parameters partitioned by the locations that end up in a request.
/// Path parameters stay in the URL template and are not collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    headers: Vec<ResolvedParameter>,
    query: Vec<ResolvedParameter>,
    cookies: Vec<ResolvedParameter>,
}

impl ParameterSet {
    pub fn new(params: &[Parameter], resolver: RefResolver<'_>) -> Result<Self, ResolveError> {
        let mut set = Self::default();
        for param in params {
            let bucket = match param.location {
                ParameterLocation::Header => &mut set.headers,
                ParameterLocation::Query => &mut set.query,
                ParameterLocation::Cookie => &mut set.cookies,
                ParameterLocation::Path => continue,
            };
            bucket.push(ResolvedParameter::resolve(param, resolver)?);
        }
        Ok(set)
    }

    pub fn headers(&self, parent: Option<&ParameterSet>) -> Vec<HarItem> {
        to_items(&self.headers, parent.map(|p| p.headers.as_slice()))
    }

    pub fn query_string(&self, parent: Option<&ParameterSet>) -> Vec<HarItem> {
        to_items(&self.query, parent.map(|p| p.query.as_slice()))
    }

    pub fn cookies(&self, parent: Option<&ParameterSet>) -> Vec<HarItem> {
        to_items(&self.cookies, parent.map(|p| p.cookies.as_slice()))
    }
}

fn to_items(local: &[ResolvedParameter], parent: Option<&[ResolvedParameter]>) -> Vec<HarItem> {
    merge(local, parent.unwrap_or_default())
        .into_iter()
        .map(ResolvedParameter::to_item)
        .collect()
}
