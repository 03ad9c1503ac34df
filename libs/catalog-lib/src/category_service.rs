use crate::dto::CategoryDto;
use crate::errors_service::CatalogServiceError;
use crate::pagination::{CategorySort, Page, PageRequest};
use crate::repository::traits::CategoryRepositoryTrait;
use crate::repository::CategoryRepository;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CategoryService<C = CategoryRepository>
where
    C: CategoryRepositoryTrait,
{
    pub category_repo: Arc<C>,
}

impl CategoryService<CategoryRepository> {
    pub fn new(category_repo: CategoryRepository) -> Self {
        Self {
            category_repo: Arc::new(category_repo),
        }
    }
}

impl<C> CategoryService<C>
where
    C: CategoryRepositoryTrait,
{
    pub fn with_repos(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<CategoryDto, CatalogServiceError> {
        self.category_repo
            .find_by_id(id)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "category"))?
            .map(CategoryDto::from_row)
            .ok_or_else(|| {
                CatalogServiceError::NotFound(format!("Object not found! Id: {id}, Type: CategoryDto"))
            })
    }

    pub async fn find_all_paged(
        &self,
        page: PageRequest<CategorySort>,
    ) -> Result<Page<CategoryDto>, CatalogServiceError> {
        let (rows, total) = self
            .category_repo
            .find_all_paged(page)
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "category"))?;
        Ok(Page::new(rows, total, &page).map(CategoryDto::from_row))
    }

    pub async fn create(&self, dto: &CategoryDto) -> Result<CategoryDto, CatalogServiceError> {
        let row = self
            .category_repo
            .insert(dto.name.trim())
            .await
            .map_err(|e| CatalogServiceError::from_repo(e, "category"))?;
        info!(category_id = row.id, "category created");
        Ok(CategoryDto::from_row(row))
    }

    pub async fn update(&self, id: i64, dto: &CategoryDto) -> Result<CategoryDto, CatalogServiceError> {
        let row = self
            .category_repo
            .update(id, dto.name.trim())
            .await
            .map_err(|e| CatalogServiceError::from_write(e, "category", id))?;
        info!(category_id = id, "category updated");
        Ok(CategoryDto::from_row(row))
    }

    /// Fails with `Integrity` while any product still references the category.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogServiceError> {
        self.category_repo
            .delete(id)
            .await
            .map_err(|e| CatalogServiceError::from_delete(e, "category", id))?;
        info!(category_id = id, "category deleted");
        Ok(())
    }
}
