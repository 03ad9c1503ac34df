use utoipa::OpenApi;

use catalog_api::ApiDoc;

#[test]
fn test_openapi_spec_has_all_endpoints() {
    let spec = ApiDoc::openapi();
    let paths = spec.paths.paths;

    for collection in ["/products", "/categories", "/users"] {
        let by_id = format!("{collection}/{{id}}");

        let list = paths.get(collection).unwrap_or_else(|| panic!("Missing {collection} path"));
        assert!(list.get.is_some(), "Missing GET {collection}");
        assert!(list.post.is_some(), "Missing POST {collection}");

        let item = paths.get(&by_id).unwrap_or_else(|| panic!("Missing {by_id} path"));
        assert!(item.get.is_some(), "Missing GET {by_id}");
        assert!(item.put.is_some(), "Missing PUT {by_id}");
        assert!(item.delete.is_some(), "Missing DELETE {by_id}");
    }

    assert!(paths.contains_key("/health"), "Missing /health path");
}

#[test]
fn test_openapi_spec_has_schemas() {
    let spec = ApiDoc::openapi();
    let components = spec.components.expect("Missing components");

    for schema in [
        "ProductDto",
        "CategoryDto",
        "UserDto",
        "UserInsertDto",
        "UserUpdateDto",
        "RoleDto",
        "ErrorResponse",
        "FieldMessage",
    ] {
        assert!(components.schemas.contains_key(schema), "Missing {schema} schema");
    }
}

#[test]
fn test_openapi_spec_serializes() {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .expect("Failed to generate OpenAPI JSON");

    assert!(json.contains("\"products\""));
    assert!(json.contains("linesPerPage"));
    assert!(json.contains("categoryId"));
}
