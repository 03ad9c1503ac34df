mod common;

use std::sync::Arc;

use cucumber::{given, then, when, World};

use catalog_lib::category_service::CategoryService;
use catalog_lib::dto::{CategoryDto, ProductDto};
use catalog_lib::errors_service::CatalogServiceError;
use catalog_lib::pagination::{Page, PageRequest, ProductSort, SortDirection};
use catalog_lib::product_service::ProductService;
use catalog_lib::repository::errors::CatalogRepositoryError;
use catalog_lib::repository::models::{CategoryRow, ProductRow, UserRoleMapping, UserRow};
use catalog_lib::user_service::{UserIdentity, UserService};

use common::*;

const SEEDED_PRODUCTS: [&str; 25] = [
    "The Lord of the Rings", "Smart TV", "Macbook Pro", "PC Gamer", "Rails for Dummies",
    "PC Gamer Ex", "PC Gamer X", "PC Gamer Alfa", "PC Gamer Tera", "PC Gamer Y",
    "PC Gamer Nitro", "PC Gamer Card", "PC Gamer Plus", "PC Gamer Hera", "PC Gamer Weed",
    "PC Gamer Max", "PC Gamer Turbo", "PC Gamer Hot", "PC Gamer Ez", "PC Gamer Tr",
    "PC Gamer Tx", "PC Gamer Tu", "PC Gamer Foo", "PC Gamer Boo", "PC Gamer Barfoo",
];

#[derive(Debug, Default, World)]
pub struct CatalogWorld {
    // Store contents seen by the mocks
    products: Vec<ProductRow>,
    categories: Vec<CategoryRow>,
    referenced_categories: Vec<i64>,
    users: Vec<UserRow>,
    user_roles: Vec<UserRoleMapping>,

    // Results
    product_page: Option<Page<ProductDto>>,
    product: Option<ProductDto>,
    identity: Option<UserIdentity>,
    succeeded: bool,
    error: Option<CatalogServiceError>,
}

impl CatalogWorld {
    fn product_service(&self) -> ProductService<MockProductRepo, MockCategoryRepo> {
        let mut product_repo = MockProductRepo::new();
        let mut category_repo = MockCategoryRepo::new();

        let stored = self.products.clone();
        product_repo
            .expect_find_all_paged()
            .returning(move |_, name, page| Ok(page_of(&stored, name, page)));

        let stored = self.products.clone();
        product_repo.expect_update().returning(move |id, record| {
            if stored.iter().any(|p| p.id == id) {
                Ok(product_record_to_row(id, record))
            } else {
                Err(CatalogRepositoryError::NotFound)
            }
        });

        let next_id = self.products.len() as i64 + 1;
        product_repo
            .expect_insert()
            .returning(move |record| Ok(product_record_to_row(next_id, record)));

        let known = self.categories.clone();
        category_repo.expect_find_by_ids().returning(move |ids| {
            Ok(known.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
        });
        category_repo.expect_find_for_products().returning(|_| Ok(vec![]));

        ProductService::with_repos(Arc::new(product_repo), Arc::new(category_repo))
    }

    fn category_service(&self) -> CategoryService<MockCategoryRepo> {
        let mut category_repo = MockCategoryRepo::new();

        let known = self.categories.clone();
        category_repo
            .expect_find_by_id()
            .returning(move |id| Ok(known.iter().find(|c| c.id == id).cloned()));

        let known = self.categories.clone();
        let referenced = self.referenced_categories.clone();
        category_repo.expect_delete().returning(move |id| {
            if referenced.contains(&id) {
                Err(CatalogRepositoryError::ForeignKeyViolation)
            } else if known.iter().any(|c| c.id == id) {
                Ok(())
            } else {
                Err(CatalogRepositoryError::NotFound)
            }
        });

        CategoryService::with_repos(Arc::new(category_repo))
    }

    fn user_service(&self) -> UserService<MockUserRepo, MockRoleRepo> {
        let mut user_repo = MockUserRepo::new();
        let mut role_repo = MockRoleRepo::new();

        let users = self.users.clone();
        user_repo
            .expect_find_by_email()
            .returning(move |email| Ok(users.iter().find(|u| u.email == email).cloned()));

        let mappings = self.user_roles.clone();
        role_repo.expect_find_for_users().returning(move |ids| {
            Ok(mappings.iter().filter(|m| ids.contains(&m.user_id)).cloned().collect())
        });

        UserService::with_repos(Arc::new(user_repo), Arc::new(role_repo))
    }

    fn record<T>(&mut self, result: Result<T, CatalogServiceError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.succeeded = true;
                Some(value)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

/// In-memory version of the store's filtered, ordered, paged query.
fn page_of(stored: &[ProductRow], name: &str, page: PageRequest<ProductSort>) -> (Vec<ProductRow>, u64) {
    let needle = name.trim().to_lowercase();
    let mut matching: Vec<ProductRow> = stored
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    if page.direction == SortDirection::Desc {
        matching.reverse();
    }
    let total = matching.len() as u64;
    let content = matching
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    (content, total)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn product_payload(name: &str, category_ids: &[i64]) -> ProductDto {
    ProductDto {
        id: None,
        name: name.to_string(),
        description: Some("Good phone".to_string()),
        price: Some(800.0),
        img_url: None,
        date: None,
        categories: category_ids
            .iter()
            .map(|id| CategoryDto { id: Some(*id), name: String::new() })
            .collect(),
    }
}

// ==================== GIVEN STEPS ====================

#[given("the seeded catalog of 25 products")]
async fn seeded_catalog(world: &mut CatalogWorld) {
    world.products = SEEDED_PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, name)| product_row(i as i64 + 1, name))
        .collect();
    world.categories = vec![
        category_row(1, "Livros"),
        category_row(2, "Eletrônicos"),
        category_row(3, "Computadores"),
    ];
}

#[given(expr = "a category {string} with id {int} referenced by products")]
async fn referenced_category(world: &mut CatalogWorld, name: String, id: i64) {
    world.categories.push(category_row(id, &name));
    world.referenced_categories.push(id);
}

#[given(expr = "a category {string} with id {int}")]
async fn category_exists(world: &mut CatalogWorld, name: String, id: i64) {
    world.categories.push(category_row(id, &name));
}

#[given(expr = "a user {string} with roles {string}")]
async fn user_with_roles(world: &mut CatalogWorld, email: String, roles: String) {
    let user_id = world.users.len() as i64 + 1;
    world.users.push(user_row(user_id, "Maria", &email));
    for (i, authority) in split_list(&roles).into_iter().enumerate() {
        world.user_roles.push(UserRoleMapping {
            user_id,
            role_id: i as i64 + 1,
            authority,
        });
    }
}

// ==================== WHEN STEPS ====================

#[when(expr = "I request page {int} with {int} products per page ordered by name {word}")]
async fn request_page(world: &mut CatalogWorld, page: u32, size: u32, direction: String) {
    let direction = if direction == "descending" { SortDirection::Desc } else { SortDirection::Asc };
    let request = PageRequest::new(page, size, ProductSort::Name, direction);
    let result = world.product_service().find_all_paged(None, "", request).await;
    world.product_page = world.record(result);
}

#[when(expr = "I search products named {string}")]
async fn search_products(world: &mut CatalogWorld, name: String) {
    let result = world
        .product_service()
        .find_all_paged(Some(0), &name, PageRequest::default())
        .await;
    world.product_page = world.record(result);
}

#[when(expr = "I update product {int} with name {string}")]
async fn update_product(world: &mut CatalogWorld, id: i64, name: String) {
    let result = world
        .product_service()
        .update(id, &product_payload(&name, &[2]))
        .await;
    world.product = world.record(result);
}

#[when(expr = "I create a product named {string} in category {int}")]
async fn create_product(world: &mut CatalogWorld, name: String, category_id: i64) {
    let result = world
        .product_service()
        .create(&product_payload(&name, &[category_id]))
        .await;
    world.product = world.record(result);
}

#[when(expr = "I delete category {int}")]
async fn delete_category(world: &mut CatalogWorld, id: i64) {
    let result = world.category_service().delete(id).await;
    world.record(result);
}

#[when(expr = "I read category {int}")]
async fn read_category(world: &mut CatalogWorld, id: i64) {
    let result = world.category_service().find_by_id(id).await;
    world.record(result);
}

#[when(expr = "I load the identity {string}")]
async fn load_identity(world: &mut CatalogWorld, email: String) {
    let result = world.user_service().load_by_identity(&email).await;
    world.identity = world.record(result);
}

// ==================== THEN STEPS ====================

#[then(expr = "I receive {int} products out of {int}")]
async fn receive_products(world: &mut CatalogWorld, count: usize, total: u64) {
    let page = world.product_page.as_ref().expect("page should be set");
    assert_eq!(page.content.len(), count);
    assert_eq!(page.total_elements, total);
}

#[then(expr = "the first products are {string}, {string}, {string}")]
async fn first_products(world: &mut CatalogWorld, first: String, second: String, third: String) {
    let page = world.product_page.as_ref().expect("page should be set");
    let names: Vec<&str> = page.content.iter().take(3).map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec![first.as_str(), second.as_str(), third.as_str()]);
}

#[then("the page is the last one")]
async fn page_is_last(world: &mut CatalogWorld) {
    let page = world.product_page.as_ref().expect("page should be set");
    assert!(page.last);
    assert!(!page.first);
}

#[then(expr = "the returned product has id {int} and name {string}")]
async fn returned_product(world: &mut CatalogWorld, id: i64, name: String) {
    let product = world.product.as_ref().expect("product should be set");
    assert_eq!(product.id, Some(id));
    assert_eq!(product.name, name);
}

#[then(expr = "the operation fails as not found with message {string}")]
async fn fails_not_found(world: &mut CatalogWorld, message: String) {
    let err = world.error.as_ref().expect("an error should be recorded");
    assert!(matches!(err, CatalogServiceError::NotFound(_)));
    assert_eq!(err.to_string(), message);
}

#[then(expr = "the operation fails as an integrity violation containing {string}")]
async fn fails_integrity(world: &mut CatalogWorld, fragment: String) {
    let err = world.error.as_ref().expect("an error should be recorded");
    assert!(matches!(err, CatalogServiceError::Integrity(_)));
    assert!(err.to_string().contains(&fragment));
}

#[then("the operation succeeds")]
async fn operation_succeeds(world: &mut CatalogWorld) {
    assert!(world.succeeded);
    assert!(world.error.is_none());
}

#[then(expr = "the identity has authorities {string}")]
async fn identity_authorities(world: &mut CatalogWorld, authorities: String) {
    let identity = world.identity.as_ref().expect("identity should be set");
    assert_eq!(identity.authorities, split_list(&authorities));
}

#[then("the identity is not found")]
async fn identity_not_found(world: &mut CatalogWorld) {
    assert!(matches!(world.error, Some(CatalogServiceError::IdentityNotFound(_))));
}

#[tokio::main]
async fn main() {
    CatalogWorld::run("tests/features").await;
}
