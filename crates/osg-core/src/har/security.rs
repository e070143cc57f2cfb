use super::types::HarItem;
use crate::error::ResolveError;
use crate::parse::security::{ApiKeyLocation, SecurityScheme};
use crate::resolve::SecurityInfo;
use crate::resolve::security::PUBLIC_REQUIREMENT;

pub const AUTHORIZATION: &str = "Authorization";
pub const BASIC_PLACEHOLDER: &str = "Basic REPLACE_BASIC_AUTH";
pub const BEARER_PLACEHOLDER: &str = "Bearer REPLACE_BEARER_TOKEN";
pub const API_KEY_PLACEHOLDER: &str = "REPLACE_KEY_VALUE";

/// The supported kinds of authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthKind {
    Basic,
    Bearer,
    ApiKey {
        name: Option<String>,
        location: Option<ApiKeyLocation>,
    },
    OAuth2,
}

impl AuthKind {
    pub fn classify(scheme: &SecurityScheme) -> Result<Self, ResolveError> {
        match scheme.scheme_type.to_ascii_lowercase().as_str() {
            "http" => match scheme.scheme.as_deref().map(str::to_ascii_lowercase).as_deref() {
                Some("basic") => Ok(AuthKind::Basic),
                Some("bearer") | None => Ok(AuthKind::Bearer),
                Some(other) => Err(ResolveError::InvalidAuthType(other.to_string())),
            },
            "apikey" => Ok(AuthKind::ApiKey {
                name: scheme.name.clone(),
                location: scheme.location,
            }),
            "oauth2" => Ok(AuthKind::OAuth2),
            _ => Err(ResolveError::InvalidAuthType(scheme.scheme_type.clone())),
        }
    }

    /// The header this kind of auth travels in, if any.
    pub fn header(&self) -> Option<HarItem> {
        match self {
            AuthKind::Basic => Some(HarItem::new(AUTHORIZATION, BASIC_PLACEHOLDER)),
            AuthKind::Bearer => Some(HarItem::new(AUTHORIZATION, BEARER_PLACEHOLDER)),
            AuthKind::ApiKey {
                name,
                location: Some(ApiKeyLocation::Header),
            } => Some(HarItem::new(
                name.as_deref().unwrap_or(AUTHORIZATION),
                API_KEY_PLACEHOLDER,
            )),
            AuthKind::ApiKey { .. } | AuthKind::OAuth2 => None,
        }
    }
}

/// Headers for every requirement of an operation, in requirement order.
pub fn security_headers(info: &SecurityInfo<'_>) -> Result<Vec<HarItem>, ResolveError> {
    let mut headers = Vec::new();
    for id in info.requirements() {
        if id == PUBLIC_REQUIREMENT {
            continue;
        }
        let scheme = info.scheme(id)?;
        if let Some(header) = AuthKind::classify(&scheme)?.header() {
            headers.push(header);
        }
    }
    Ok(headers)
}
