//! Filter, sort and paginate over a product snapshot.
//!
//! [`run_query`] is a pure function: it borrows the snapshot, never mutates it,
//! and returns the same page for the same inputs.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::domain::Product;

/// Sentinel category that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(size) => size,
    None => unreachable!(),
};

/// Field a query sorts on. Unknown keys fail to parse, so the pipeline never
/// sees one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Stock,
    Category,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(wanted) => wanted == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Exact(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(value)
        }
    }
}

/// UI query state. Not persisted; a fresh view starts from `Default`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameters {
    pub search_term: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-based.
    pub page_number: NonZeroUsize,
    pub page_size: NonZeroUsize,
    /// Restricts results to featured products (the featured collection view).
    pub featured_only: bool,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QueryParameters {
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page_number: NonZeroUsize::MIN,
            page_size,
            featured_only: false,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn in_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn sort_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }

    pub fn page(mut self, page_number: NonZeroUsize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    /// Copy whose page number is pulled back to `total_pages` (or page 1 when
    /// nothing matched). [`run_query`] itself never clamps.
    pub fn clamped_to(&self, total_pages: usize) -> Self {
        let last = NonZeroUsize::new(total_pages).unwrap_or(NonZeroUsize::MIN);
        let mut clamped = self.clone();
        clamped.page_number = self.page_number.min(last);
        clamped
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    pub page: Vec<Product>,
    /// Matches before slicing.
    pub total_matched: usize,
    /// `ceil(total_matched / page_size)`; 0 when nothing matched.
    pub total_pages: usize,
}

/// Runs the filter, stable sort and page slice over `products`.
///
/// A page number past `total_pages` yields an empty page, not an error.
pub fn run_query(products: &[Product], params: &QueryParameters) -> QueryPage {
    let needle = params.search_term.to_lowercase();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|product| matches(product, params, &needle))
        .collect();

    // `sort_by` is stable, so ties keep snapshot order in both directions.
    matched.sort_by(|a, b| params.sort_direction.apply(compare(a, b, params.sort_key)));

    let total_matched = matched.len();
    let page_size = params.page_size.get();
    let total_pages = total_matched.div_ceil(page_size);
    let start = (params.page_number.get() - 1).saturating_mul(page_size);
    let page = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    QueryPage {
        page,
        total_matched,
        total_pages,
    }
}

fn matches(product: &Product, params: &QueryParameters, needle: &str) -> bool {
    if params.featured_only && !product.featured {
        return false;
    }
    let matches_search = needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle);
    matches_search && params.category.matches(&product.category)
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::Stock => a.stock.cmp(&b.stock),
        SortKey::Category => compare_text(&a.category, &b.category),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
