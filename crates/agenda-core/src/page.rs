//! Pagination request and result types.
//!
//! The result shape mirrors a conventional length-aware paginator:
//! `data` plus `current_page`, `per_page`, `total`, `last_page`, `from`, `to`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

/// A 1-based page selection, always within bounds once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page:     u32,
  per_page: u32,
}

impl PageRequest {
  /// Clamp caller input: `page` to at least 1, `per_page` into
  /// `1..=MAX_PER_PAGE`, defaulting to [`DEFAULT_PER_PAGE`].
  pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
    Self {
      page:     page.unwrap_or(1).max(1),
      per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
    }
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn per_page(&self) -> u32 { self.per_page }

  /// Number of rows to skip.
  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.per_page)
  }
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(None, None) }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub data:         Vec<T>,
  pub current_page: u32,
  pub per_page:     u32,
  pub total:        u64,
  pub last_page:    u64,
  /// 1-based position of the first item on this page; `None` when empty.
  pub from:         Option<u64>,
  pub to:           Option<u64>,
}

impl<T> Page<T> {
  pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
    let per_page = u64::from(request.per_page());
    let last_page = total.div_ceil(per_page).max(1);
    let (from, to) = if data.is_empty() {
      (None, None)
    } else {
      let first = request.offset() + 1;
      (Some(first), Some(first + data.len() as u64 - 1))
    };

    Self {
      data,
      current_page: request.page(),
      per_page: request.per_page(),
      total,
      last_page,
      from,
      to,
    }
  }
}
