use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ResolveError;

/// Walks local `$ref` pointers (`#/a/b/c`) over the raw document tree.
///
/// Resolution follows chained references until it reaches a node without a
/// `$ref`; a chain that revisits a pointer is reported as circular instead of
/// looping.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a Value,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Look up a single pointer without following any `$ref` found at the target.
    pub fn lookup(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        if ref_path.is_empty() {
            return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
        }
        let pointer = ref_path
            .strip_prefix('#')
            .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
        if !pointer.starts_with('/') {
            return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
        }
        self.root
            .pointer(pointer)
            .ok_or_else(|| ResolveError::UnresolvedRef(ref_path.to_string()))
    }

    /// Follow `ref_path` and any chained references to the first concrete node.
    pub fn follow(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        let mut visited = HashSet::new();
        let mut current = ref_path;
        loop {
            if !visited.insert(current) {
                return Err(ResolveError::CircularRef(ref_path.to_string()));
            }
            let node = self.lookup(current)?;
            match node.get("$ref").and_then(Value::as_str) {
                Some(next) => {
                    log::debug!("following chained reference {current} -> {next}");
                    current = next;
                }
                None => return Ok(node),
            }
        }
    }

    /// Follow `ref_path` and deserialize the target node into `T`.
    pub fn resolve_as<T: DeserializeOwned>(&self, ref_path: &str) -> Result<T, ResolveError> {
        let node = self.follow(ref_path)?;
        serde_json::from_value(node.clone()).map_err(|e| ResolveError::InvalidRefTarget {
            pointer: ref_path.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::parse::schema::{Schema, SchemaType, TypeSet};

    fn doc() -> Value {
        json!({
            "components": {
                "schemas": {
                    "User": { "type": "object" },
                    "Alias": { "$ref": "#/components/schemas/User" },
                    "Loop": { "$ref": "#/components/schemas/Back" },
                    "Back": { "$ref": "#/components/schemas/Loop" }
                }
            },
            "paths": {
                "/users/{id}": { "get": {} }
            }
        })
    }

    #[test]
    fn test_lookup_walks_from_root() {
        let root = doc();
        let resolver = RefResolver::new(&root);
        let node = resolver.lookup("#/components/schemas/User").unwrap();
        assert_eq!(node, &json!({ "type": "object" }));
    }

    #[test]
    fn test_lookup_decodes_escaped_segments() {
        let root = doc();
        let resolver = RefResolver::new(&root);
        assert!(resolver.lookup("#/paths/~1users~1{id}/get").is_ok());
    }

    #[test]
    fn test_follow_chained_reference() {
        let root = doc();
        let resolver = RefResolver::new(&root);
        let schema: Schema = resolver.resolve_as("#/components/schemas/Alias").unwrap();
        assert_eq!(schema.schema_type, Some(TypeSet::Single(SchemaType::Object)));
    }

    #[test]
    fn test_circular_chain_fails_fast() {
        let root = doc();
        let resolver = RefResolver::new(&root);
        let err = resolver.follow("#/components/schemas/Loop").unwrap_err();
        assert_eq!(
            err,
            ResolveError::CircularRef("#/components/schemas/Loop".to_string())
        );
    }

    #[test]
    fn test_invalid_pointers() {
        let root = doc();
        let resolver = RefResolver::new(&root);
        assert!(matches!(
            resolver.lookup(""),
            Err(ResolveError::InvalidRefFormat(_))
        ));
        assert!(matches!(
            resolver.lookup("#"),
            Err(ResolveError::InvalidRefFormat(_))
        ));
        assert!(matches!(
            resolver.lookup("other.yaml#/components/schemas/User"),
            Err(ResolveError::InvalidRefFormat(_))
        ));
        assert!(matches!(
            resolver.lookup("#/components/schemas/Missing"),
            Err(ResolveError::UnresolvedRef(_))
        ));
    }
}
