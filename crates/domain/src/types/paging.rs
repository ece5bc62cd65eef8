//! Paging metadata carried by list envelopes

use serde::{Deserialize, Serialize};

/// Paging block returned with most list endpoints.
///
/// Values are passed through exactly as the provider sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingMeta {
    /// Items on this page.
    pub count: Option<u32>,
    /// Requested page size.
    pub size: Option<u32>,
    /// Number of pages available.
    pub total_pages: Option<u32>,
    /// Page number, on endpoints that call it `page`.
    pub page: Option<u32>,
    /// Page number, on endpoints that call it `current_page`.
    pub current_page: Option<u32>,
    /// Page size, on endpoints that call it `per_page`.
    pub per_page: Option<u32>,
    /// Previous page, if any.
    pub prev_page: Option<u32>,
    /// Next page, if any.
    pub next_page: Option<u32>,
    /// Items across all pages.
    pub total_count: Option<u64>,
    /// Search origin latitude.
    pub lat: Option<f64>,
    /// Search origin longitude.
    pub lng: Option<f64>,
    /// Search radius.
    pub radius: Option<f64>,
}

impl PagingMeta {
    /// Size of the final page: `total_count % size`, or `size` when the
    /// division is exact. `None` when either value is missing or `size` is 0.
    pub fn last_page_size(&self) -> Option<u64> {
        let size = u64::from(self.size.or(self.per_page)?);
        let total = self.total_count?;
        if size == 0 {
            return None;
        }
        match total % size {
            0 => Some(size),
            remainder => Some(remainder),
        }
    }
}

/// Paging block returned by the voucher listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoucherPagingMeta {
    /// Items on this page.
    pub count: Option<u32>,
    /// Requested page size.
    pub size: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Number of pages available.
    pub total_pages: Option<u32>,
    /// Sort order applied by the provider.
    pub order: Option<String>,
    /// Voucher type filter applied by the provider.
    #[serde(rename = "type")]
    pub voucher_type: Option<String>,
}

/// Pagination information needed to walk every page of a listing.
pub trait PageCursor {
    /// Number of pages available, if reported.
    fn total_pages(&self) -> Option<u32>;
    /// Page the provider says comes next, if reported.
    fn next_page(&self) -> Option<u32>;
}

impl PageCursor for PagingMeta {
    fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    fn next_page(&self) -> Option<u32> {
        self.next_page
    }
}

impl PageCursor for VoucherPagingMeta {
    fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    fn next_page(&self) -> Option<u32> {
        None
    }
}
