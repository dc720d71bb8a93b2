//! Page-number pagination

use serde::{Deserialize, Serialize};

/// Products per page when nothing else is configured.
pub const DEFAULT_PER_PAGE: u64 = 10;

// == Page Request ==
/// A 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Clamps `page` and `per_page` to at least 1.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn first(per_page: u64) -> Self {
        Self::new(1, per_page)
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> usize {
        ((self.page - 1).saturating_mul(self.per_page)) as usize
    }

    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

// == Page ==
/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub current_page: u64,
    pub data: Vec<T>,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    /// 1-based position of the first item, `None` for an empty page
    pub from: Option<u64>,
    /// 1-based position of the last item, `None` for an empty page
    pub to: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let last_page = total.div_ceil(request.per_page).max(1);
        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = request.offset() as u64 + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        Self {
            current_page: request.page,
            data,
            per_page: request.per_page,
            total,
            last_page,
            from,
            to,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
