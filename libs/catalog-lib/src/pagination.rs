//! Paging and sorting types shared by repositories, services and the HTTP layer.
//!
//! Sort properties are closed enums so that only known columns ever reach
//! the `ORDER BY` clause.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("unknown sort direction '{0}', expected ASC or DESC")]
    Direction(String),

    #[error("unknown sort property '{0}'")]
    Property(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(SortParseError::Direction(s.to_string()))
        }
    }
}

/// A sortable property of one entity, parsed from its JSON field name.
pub trait SortKey:
    Copy + Default + fmt::Debug + FromStr<Err = SortParseError> + Send + Sync + 'static
{
    /// Column name used in `ORDER BY`.
    fn column(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    Id,
    #[default]
    Name,
    Price,
    Date,
}

impl SortKey for ProductSort {
    fn column(self) -> &'static str {
        match self {
            ProductSort::Id => "id",
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Date => "date",
        }
    }
}

impl FromStr for ProductSort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ProductSort::Id),
            "name" => Ok(ProductSort::Name),
            "price" => Ok(ProductSort::Price),
            "date" => Ok(ProductSort::Date),
            other => Err(SortParseError::Property(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySort {
    Id,
    #[default]
    Name,
}

impl SortKey for CategorySort {
    fn column(self) -> &'static str {
        match self {
            CategorySort::Id => "id",
            CategorySort::Name => "name",
        }
    }
}

impl FromStr for CategorySort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CategorySort::Id),
            "name" => Ok(CategorySort::Name),
            other => Err(SortParseError::Property(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSort {
    Id,
    #[default]
    FirstName,
    LastName,
    Email,
}

impl SortKey for UserSort {
    fn column(self) -> &'static str {
        match self {
            UserSort::Id => "id",
            UserSort::FirstName => "first_name",
            UserSort::LastName => "last_name",
            UserSort::Email => "email",
        }
    }
}

impl FromStr for UserSort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(UserSort::Id),
            "firstName" => Ok(UserSort::FirstName),
            "lastName" => Ok(UserSort::LastName),
            "email" => Ok(UserSort::Email),
            other => Err(SortParseError::Property(other.to_string())),
        }
    }
}

/// Page index (0-based), page size and ordering for a paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S: SortKey> {
    pub page: u32,
    pub size: u32,
    pub sort: S,
    pub direction: SortDirection,
}

impl<S: SortKey> PageRequest<S> {
    /// Builds a request, clamping `size` into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32, sort: S, direction: SortDirection) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
            direction,
        }
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// `ORDER BY` body with `id` as the tie-breaker, e.g. `p.name ASC, p.id ASC`.
    pub fn order_by(&self, alias: &str) -> String {
        format!(
            "{alias}{} {}, {alias}id ASC",
            self.sort.column(),
            self.direction.as_sql()
        )
    }
}

impl<S: SortKey> Default for PageRequest<S> {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, S::default(), SortDirection::Asc)
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new<S: SortKey>(content: Vec<T>, total_elements: u64, request: &PageRequest<S>) -> Self {
        let total_pages = total_elements.div_ceil(request.size as u64) as u32;
        let number_of_elements = content.len() as u32;
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size: request.size,
            number: request.page,
            number_of_elements,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_page_size() {
        let req = PageRequest::new(0, 0, ProductSort::Name, SortDirection::Asc);
        assert_eq!(req.size, 1);
        let req = PageRequest::new(0, 1000, ProductSort::Name, SortDirection::Asc);
        assert_eq!(req.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn default_request_is_first_page_of_twelve_by_name() {
        let req = PageRequest::<ProductSort>::default();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.sort, ProductSort::Name);
        assert_eq!(req.direction, SortDirection::Asc);
    }

    #[test]
    fn order_by_appends_id_tie_breaker() {
        let req = PageRequest::new(2, 5, UserSort::LastName, SortDirection::Desc);
        assert_eq!(req.order_by("u."), "u.last_name DESC, u.id ASC");
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        assert_eq!(
            "password".parse::<UserSort>(),
            Err(SortParseError::Property("password".to_string()))
        );
        assert_eq!("firstName".parse::<UserSort>(), Ok(UserSort::FirstName));
        assert_eq!("date".parse::<ProductSort>(), Ok(ProductSort::Date));
    }

    #[test]
    fn page_past_the_end_at_max_index_is_last() {
        let req = PageRequest::new(u32::MAX, 12, ProductSort::Name, SortDirection::Asc);
        let page: Page<i32> = Page::new(vec![], 25, &req);
        assert!(page.last);
        assert!(page.empty);
        assert_eq!(page.number, u32::MAX);
        assert_eq!(req.offset(), u32::MAX as u64 * 12);
    }

    #[test]
    fn page_totals() {
        let req = PageRequest::new(0, 5, ProductSort::Name, SortDirection::Asc);
        let page = Page::new(vec![1, 2, 3, 4, 5], 25, &req);
        assert_eq!(page.total_pages, 5);
        assert!(page.first);
        assert!(!page.last);
        assert_eq!(page.number_of_elements, 5);

        let req = PageRequest::new(4, 5, ProductSort::Name, SortDirection::Asc);
        let page: Page<i32> = Page::new(vec![21, 22, 23, 24, 25], 25, &req);
        assert!(page.last);
        assert!(!page.first);
    }

    #[test]
    fn empty_page_is_last_and_empty() {
        let req = PageRequest::<CategorySort>::default();
        let page: Page<String> = Page::new(vec![], 0, &req);
        assert!(page.empty);
        assert!(page.last);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn map_keeps_totals() {
        let req = PageRequest::new(1, 2, CategorySort::Id, SortDirection::Asc);
        let page = Page::new(vec![1, 2], 7, &req).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.number, 1);
    }
}
