use crate::error::ResolveError;
use crate::parse::security::{SecurityRequirement, SecurityScheme, SecuritySchemeOrRef};
use crate::parse::spec::Document;

/// Requirement name standing for "no authentication".
pub const PUBLIC_REQUIREMENT: &str = "public";

/// Flatten requirement objects into scheme names. An empty object (optional
/// auth) becomes [`PUBLIC_REQUIREMENT`].
pub fn requirement_names(security: &[SecurityRequirement]) -> Vec<String> {
    security
        .iter()
        .flat_map(|requirement| {
            if requirement.is_empty() {
                vec![PUBLIC_REQUIREMENT.to_string()]
            } else {
                requirement.keys().cloned().collect()
            }
        })
        .collect()
}

/// Look up a security scheme by id in `components.securitySchemes`.
pub fn security_scheme(doc: &Document, id: &str) -> Result<SecurityScheme, ResolveError> {
    let entry = doc
        .spec()
        .components
        .as_ref()
        .and_then(|c| c.security_schemes.get(id))
        .ok_or_else(|| ResolveError::InvalidScheme(id.to_string()))?;
    match entry {
        SecuritySchemeOrRef::Scheme(scheme) => Ok(scheme.clone()),
        SecuritySchemeOrRef::Ref { ref_path } => doc
            .resolver()
            .resolve_as(ref_path)
            .map_err(|_| ResolveError::InvalidSchemeReference(ref_path.clone())),
    }
}

/// The effective requirements of one operation plus access to scheme lookup.
#[derive(Debug, Clone, Copy)]
pub struct SecurityInfo<'w> {
    requirements: &'w [String],
    doc: &'w Document,
}

impl<'w> SecurityInfo<'w> {
    pub fn new(requirements: &'w [String], doc: &'w Document) -> Self {
        Self { requirements, doc }
    }

    pub fn requirements(&self) -> &'w [String] {
        self.requirements
    }

    pub fn scheme(&self, id: &str) -> Result<SecurityScheme, ResolveError> {
        security_scheme(self.doc, id)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_requirement_names() {
        let mut bearer = IndexMap::new();
        bearer.insert("bearer".to_string(), vec![]);
        let mut both = IndexMap::new();
        both.insert("apikey".to_string(), vec![]);
        both.insert("basic".to_string(), vec![]);
        let names = requirement_names(&[bearer, IndexMap::new(), both]);
        assert_eq!(names, vec!["bearer", "public", "apikey", "basic"]);
    }

    #[test]
    fn test_scheme_lookup() {
        let doc = Document::from_value(json!({
            "components": {
                "securitySchemes": {
                    "bearer": { "type": "http", "scheme": "bearer" },
                    "shared": { "$ref": "#/components/securitySchemes/bearer" },
                    "broken": { "$ref": "#/components/securitySchemes/nope" }
                }
            }
        }))
        .unwrap();

        assert_eq!(security_scheme(&doc, "shared").unwrap().scheme.as_deref(), Some("bearer"));
        assert_eq!(
            security_scheme(&doc, "missing").unwrap_err(),
            ResolveError::InvalidScheme("missing".to_string())
        );
        assert_eq!(
            security_scheme(&doc, "broken").unwrap_err(),
            ResolveError::InvalidSchemeReference("#/components/securitySchemes/nope".to_string())
        );
    }
}
