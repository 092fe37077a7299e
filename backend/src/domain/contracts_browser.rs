//! Search, sort, and pagination for the contracts browser page.
//!
//! The catalog returns the full public list; the browser narrows it in
//! memory. Pages are 1-based and clamped into range.

use serde::{Deserialize, Serialize};

use super::ProjectSummary;

/// Number of contracts per browser page.
pub const ITEMS_PER_PAGE: usize = 6;

/// Ordering by last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Browser query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
    pub page: usize,
}

/// One page of browser results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePage {
    pub items: Vec<ProjectSummary>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub sort: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

fn matches(summary: &ProjectSummary, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    contains(&summary.name)
        || summary.description.as_deref().is_some_and(contains)
        || contains(&summary.template_type)
}

/// Filter, order, and slice `summaries` according to `query`.
///
/// # Examples
/// ```
/// use showcase::domain::{browse, BrowseQuery};
///
/// let page = browse(Vec::new(), &BrowseQuery::default());
/// assert_eq!(page.page, 1);
/// assert_eq!(page.total_pages, 1);
/// ```
pub fn browse(mut summaries: Vec<ProjectSummary>, query: &BrowseQuery) -> BrowsePage {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);
    if let Some(needle) = search.as_deref() {
        summaries.retain(|summary| matches(summary, needle));
    }

    match query.sort {
        SortOrder::Asc => summaries.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        SortOrder::Desc => summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }

    let total_items = summaries.len();
    let total_pages = total_items.div_ceil(ITEMS_PER_PAGE).max(1);
    let page = query.page.clamp(1, total_pages);
    let items = summaries
        .into_iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .collect();

    BrowsePage {
        items,
        page,
        total_pages,
        total_items,
        sort: query.sort,
        search,
    }
}
