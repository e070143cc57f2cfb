use osg_core::parse;
use osg_core::parse::operation::HttpMethod;
use osg_core::parse::request_body::RequestBodyOrRef;
use osg_core::parse::security::SecuritySchemeOrRef;

const USERS_API: &str = include_str!("fixtures/users-api.json");
const CATALOG: &str = include_str!("fixtures/catalog.yaml");

#[test]
fn parse_users_api_json() {
    let doc = parse::from_json(USERS_API).expect("should parse users-api.json");
    let spec = doc.spec();
    assert_eq!(spec.openapi, "3.0.0");
    assert_eq!(spec.info.title, "Users API");
    assert_eq!(spec.paths.len(), 3);
    assert_eq!(spec.servers[0].url, "http://test.domain.com");

    let user = spec.paths.get("/api/users/{id}").expect("should have /api/users/{id}");
    assert_eq!(user.parameters.len(), 1);
    let patch = user.patch.as_ref().expect("should have PATCH");
    assert_eq!(patch.operation_id.as_deref(), Some("UsersController_patch"));
    match patch.request_body.as_ref() {
        Some(RequestBodyOrRef::RequestBody(body)) => {
            let types: Vec<_> = body.content.keys().map(String::as_str).collect();
            assert_eq!(
                types,
                vec!["application/json", "application/xml", "multipart/form-data"]
            );
        }
        other => panic!("expected inline request body, got {other:?}"),
    }
}

#[test]
fn parse_catalog_yaml() {
    let doc = parse::from_yaml(CATALOG).expect("should parse catalog.yaml");
    let spec = doc.spec();
    assert_eq!(spec.info.version, "2.0.0");
    assert_eq!(spec.security.as_ref().map(Vec::len), Some(1));

    let schemes = &spec.components.as_ref().expect("components").security_schemes;
    assert!(matches!(schemes.get("basic"), Some(SecuritySchemeOrRef::Ref { .. })));
    assert!(matches!(schemes.get("apiKey"), Some(SecuritySchemeOrRef::Scheme(_))));

    let reviews = spec.paths.get("/products/{productId}/reviews").expect("reviews path");
    assert_eq!(reviews.servers[0].url, "https://reviews.example.com");
    let delete = reviews.delete.as_ref().expect("should have DELETE");
    assert_eq!(delete.security.as_ref().map(|s| s[0].is_empty()), Some(true));
}

#[test]
fn declared_methods_keep_document_order() {
    let doc = parse::from_json(USERS_API).unwrap();
    assert_eq!(
        doc.declared_methods("/api/users/{id}"),
        vec![HttpMethod::Patch, HttpMethod::Get]
    );
    assert!(doc.declared_methods("/missing").is_empty());
}

#[test]
fn invalid_input_is_reported() {
    assert!(parse::from_json("{ not json").is_err());
    assert!(parse::from_yaml("paths: [unclosed").is_err());
}
