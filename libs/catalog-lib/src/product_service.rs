use crate::dto::ProductDto;
use crate::errors_service::CatalogServiceError;
use crate::pagination::{Page, PageRequest, ProductSort};
use crate::repository::models::{CategoryRow, ProductRecord, ProductRow};
use crate::repository::traits::{CategoryRepositoryTrait, ProductRepositoryTrait};
use crate::repository::{CategoryRepository, ProductRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

fn record_from_dto(dto: &ProductDto, category_ids: Vec<i64>) -> ProductRecord {
    ProductRecord {
        name: dto.name.trim().to_string(),
        description: dto.description.clone(),
        price: dto.price,
        img_url: dto.img_url.clone(),
        date: dto.date,
        category_ids,
    }
}

#[derive(Debug, Clone)]
pub struct ProductService<P = ProductRepository, C = CategoryRepository>
where
    P: ProductRepositoryTrait,
    C: CategoryRepositoryTrait,
{
    pub product_repo: Arc<P>,
    pub category_repo: Arc<C>,
}

impl ProductService<ProductRepository, CategoryRepository> {
    pub fn new(product_repo: ProductRepository, category_repo: CategoryRepository) -> Self {
        Self {
            product_repo: Arc::new(product_repo),
            category_repo: Arc::new(category_repo),
        }
    }
}

impl<P, C> ProductService<P, C>
where
    P: ProductRepositoryTrait,
    C: CategoryRepositoryTrait,
{
    pub fn with_repos(product_repo: Arc<P>, category_repo: Arc<C>) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    /// Resolves every requested category id, failing on the first missing one.
    async fn resolve_categories(&self, ids: &[i64]) -> Result<Vec<CategoryRow>, CatalogServiceError> {
        let found = self
            .category_repo
            .find_by_ids(ids)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "category"))?;

        if let Some(missing) = ids.iter().find(|id| !found.iter().any(|c| c.id == **id)) {
            return Err(CatalogServiceError::NotFound(format!(
                "Category not found! Id: {missing}"
            )));
        }
        Ok(found)
    }

    async fn with_categories(&self, rows: Vec<ProductRow>) -> Result<Vec<ProductDto>, CatalogServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let product_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mappings = self
            .category_repo
            .find_for_products(&product_ids)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "category"))?;

        let mut categories_by_product: HashMap<i64, Vec<CategoryRow>> = HashMap::new();
        for mapping in mappings {
            categories_by_product
                .entry(mapping.product_id)
                .or_default()
                .push(CategoryRow {
                    id: mapping.category_id,
                    name: mapping.category_name,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let categories = categories_by_product.remove(&row.id).unwrap_or_default();
                ProductDto::from_row_with_categories(row, categories)
            })
            .collect())
    }

    async fn single_with_categories(&self, row: ProductRow) -> Result<ProductDto, CatalogServiceError> {
        let mut dtos = self.with_categories(vec![row]).await?;
        dtos.pop()
            .ok_or_else(|| CatalogServiceError::Internal(anyhow::anyhow!("product vanished while loading categories")))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ProductDto, CatalogServiceError> {
        let row = self
            .product_repo
            .find_by_id(id)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "product"))?
            .ok_or_else(|| {
                CatalogServiceError::NotFound(format!("Object not found! Id: {id}, Type: ProductDto"))
            })?;
        self.single_with_categories(row).await
    }

    /// `category_id` 0 or `None` disables the category filter, an empty
    /// `name` disables the name filter.
    pub async fn find_all_paged(
        &self,
        category_id: Option<i64>,
        name: &str,
        page: PageRequest<ProductSort>,
    ) -> Result<Page<ProductDto>, CatalogServiceError> {
        let category_id = category_id.filter(|id| *id != 0);
        let (rows, total) = self
            .product_repo
            .find_all_paged(category_id, name, page)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "product"))?;

        let content = self.with_categories(rows).await?;
        Ok(Page::new(content, total, &page))
    }

    pub async fn create(&self, dto: &ProductDto) -> Result<ProductDto, CatalogServiceError> {
        let category_ids = dto.category_ids();
        let categories = self.resolve_categories(&category_ids).await?;

        let row = self
            .product_repo
            .insert(&record_from_dto(dto, category_ids))
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "product"))?;

        info!(product_id = row.id, "product created");
        Ok(ProductDto::from_row_with_categories(row, sorted_by_id(categories)))
    }

    pub async fn update(&self, id: i64, dto: &ProductDto) -> Result<ProductDto, CatalogServiceError> {
        let category_ids = dto.category_ids();
        let categories = self.resolve_categories(&category_ids).await?;

        let row = self
            .product_repo
            .update(id, &record_from_dto(dto, category_ids))
            .await
            .map_err(|e| CatalogServiceError::from_write(e, "product", id))?;

        info!(product_id = id, "product updated");
        Ok(ProductDto::from_row_with_categories(row, sorted_by_id(categories)))
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogServiceError> {
        self.product_repo
            .delete(id)
            .await
            .map_err(|e| CatalogServiceError::from_delete(e, "product", id))?;
        info!(product_id = id, "product deleted");
        Ok(())
    }
}

/// Orders resolved categories by id, matching how they are read back from the store.
fn sorted_by_id(mut categories: Vec<CategoryRow>) -> Vec<CategoryRow> {
    categories.sort_by_key(|c| c.id);
    categories
}
