use catalog_lib::pagination::{
    PageRequest, SortDirection, SortKey, SortParseError, DEFAULT_PAGE_SIZE,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;

/// Paging and sorting parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index (default 0)
    pub page: Option<u32>,
    /// Page size (default 12, at most 100)
    pub lines_per_page: Option<u32>,
    /// `ASC` or `DESC` (default `ASC`)
    pub direction: Option<String>,
    /// Property to sort by
    pub orderby: Option<String>,
}

/// Product list parameters: paging plus the category and name filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Category filter, 0 or absent means every category
    pub category_id: Option<i64>,
    /// Case-insensitive name fragment
    pub name: Option<String>,
    pub page: Option<u32>,
    pub lines_per_page: Option<u32>,
    pub direction: Option<String>,
    pub orderby: Option<String>,
}

fn build_page_request<S: SortKey>(
    page: Option<u32>,
    lines_per_page: Option<u32>,
    direction: Option<&str>,
    orderby: Option<&str>,
) -> Result<PageRequest<S>, SortParseError> {
    let direction = match direction {
        Some(d) => d.parse::<SortDirection>()?,
        None => SortDirection::Asc,
    };
    let sort = match orderby {
        Some(o) => o.parse::<S>()?,
        None => S::default(),
    };
    Ok(PageRequest::new(
        page.unwrap_or(0),
        lines_per_page.unwrap_or(DEFAULT_PAGE_SIZE),
        sort,
        direction,
    ))
}

impl PageQuery {
    pub fn page_request<S: SortKey>(&self) -> Result<PageRequest<S>, SortParseError> {
        build_page_request(
            self.page,
            self.lines_per_page,
            self.direction.as_deref(),
            self.orderby.as_deref(),
        )
    }
}

impl ProductQuery {
    pub fn page_request<S: SortKey>(&self) -> Result<PageRequest<S>, SortParseError> {
        build_page_request(
            self.page,
            self.lines_per_page,
            self.direction.as_deref(),
            self.orderby.as_deref(),
        )
    }
}

pub fn parse_id(id: &str, path: &str) -> Result<i64, ApiError> {
    id.parse::<i64>().map_err(|_| ApiError::invalid_id(path))
}

/// `Location` of a newly created resource: the collection path plus its id.
pub fn location_of(collection_path: &str, id: i64) -> String {
    format!("{}/{}", collection_path.trim_end_matches('/'), id)
}
