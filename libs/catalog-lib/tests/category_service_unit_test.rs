mod common;

use std::sync::Arc;

use catalog_lib::category_service::CategoryService;
use catalog_lib::dto::CategoryDto;
use catalog_lib::errors_service::CatalogServiceError;
use catalog_lib::pagination::{CategorySort, PageRequest, SortDirection};
use catalog_lib::repository::errors::CatalogRepositoryError;

use common::*;

fn create_test_service(category_repo: MockCategoryRepo) -> CategoryService<MockCategoryRepo> {
    CategoryService::with_repos(Arc::new(category_repo))
}

fn category_dto(name: &str) -> CategoryDto {
    CategoryDto {
        id: None,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_find_by_id_success() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_find_by_id()
        .withf(|id| *id == 3)
        .times(1)
        .returning(|id| Ok(Some(category_row(id, "Computadores"))));

    let service = create_test_service(category_repo);
    let category = service.find_by_id(3).await.unwrap();

    assert_eq!(category.id, Some(3));
    assert_eq!(category.name, "Computadores");
}

#[tokio::test]
async fn test_find_by_id_missing_is_not_found() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo.expect_find_by_id().returning(|_| Ok(None));

    let service = create_test_service(category_repo);
    let err = service.find_by_id(7).await.unwrap_err();

    assert_eq!(err.to_string(), "Object not found! Id: 7, Type: CategoryDto");
}

#[tokio::test]
async fn test_find_all_paged_maps_rows_and_totals() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_find_all_paged()
        .withf(|page| page.sort == CategorySort::Id && page.direction == SortDirection::Desc)
        .times(1)
        .returning(|_| Ok((vec![category_row(3, "Computadores"), category_row(2, "Eletrônicos")], 3)));

    let service = create_test_service(category_repo);
    let page = PageRequest::new(0, 2, CategorySort::Id, SortDirection::Desc);
    let result = service.find_all_paged(page).await.unwrap();

    assert_eq!(result.content.len(), 2);
    assert_eq!(result.content[0].id, Some(3));
    assert_eq!(result.total_elements, 3);
    assert_eq!(result.total_pages, 2);
    assert!(!result.last);
}

#[tokio::test]
async fn test_create_trims_name() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_insert()
        .withf(|name| name == "Games")
        .times(1)
        .returning(|name| Ok(category_row(4, name)));

    let service = create_test_service(category_repo);
    let created = service.create(&category_dto("  Games  ")).await.unwrap();

    assert_eq!(created.id, Some(4));
    assert_eq!(created.name, "Games");
}

#[tokio::test]
async fn test_update_existing() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_update()
        .withf(|id, name| *id == 1 && name == "Books")
        .times(1)
        .returning(|id, name| Ok(category_row(id, name)));

    let service = create_test_service(category_repo);
    let updated = service.update(1, &category_dto("Books")).await.unwrap();

    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.name, "Books");
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_update()
        .returning(|_, _| Err(CatalogRepositoryError::NotFound));

    let service = create_test_service(category_repo);
    let err = service.update(1000, &category_dto("Books")).await.unwrap_err();

    assert!(matches!(err, CatalogServiceError::NotFound(_)));
    assert_eq!(err.to_string(), "Id not found! Id: 1000");
}

#[tokio::test]
async fn test_delete_referenced_category_is_integrity_error() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_delete()
        .withf(|id| *id == 3)
        .times(1)
        .returning(|_| Err(CatalogRepositoryError::ForeignKeyViolation));

    let service = create_test_service(category_repo);
    let err = service.delete(3).await.unwrap_err();

    assert!(matches!(err, CatalogServiceError::Integrity(_)));
    assert_eq!(err.to_string(), "category cannot be deleted! it has associated records");
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_delete()
        .returning(|_| Err(CatalogRepositoryError::NotFound));

    let service = create_test_service(category_repo);
    let err = service.delete(1000).await.unwrap_err();

    assert!(matches!(err, CatalogServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_driver_error_is_internal() {
    let mut category_repo = MockCategoryRepo::new();
    category_repo
        .expect_find_by_id()
        .returning(|_| Err(CatalogRepositoryError::Sqlx(sqlx::Error::PoolTimedOut)));

    let service = create_test_service(category_repo);
    let err = service.find_by_id(1).await.unwrap_err();

    assert!(matches!(err, CatalogServiceError::Internal(_)));
}
