use crate::models::Property;
use serde::Serialize;

/// Which backend endpoint served a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `GET /properties`
    List,
    /// `POST /properties/search`
    Search,
}

/// One page of listings.
///
/// The backend reports no total, so a page that came back full is taken to mean
/// more pages may exist. When the catalog size is an exact multiple of the page
/// size, the last page still advertises a next page that turns out empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub items: Vec<Property>,
    pub page: u32,
    pub page_size: u32,
    pub endpoint: Endpoint,
}

impl ResultPage {
    /// Size of this page, shown as the result count
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        has_next(self.items.len(), self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub(crate) fn has_next(count: usize, page_size: u32) -> bool {
    page_size > 0 && count == page_size as usize
}
