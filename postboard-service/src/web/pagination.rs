//! Pagination response headers for list endpoints
//!
//! List responses carry the total record count in `X-Total-Count` and
//! RFC 5988 `Link` page navigation: `first` and `last` always, `next` and
//! `prev` when such a page exists.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::error::{ApiError, ApiOperation};

/// Header carrying the total number of records across all pages
pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Build the `X-Total-Count` and `Link` headers for one page of results
///
/// `page` is the 0-based index of the returned page.
pub fn pagination_headers(
    base_path: &str,
    page: u32,
    size: u32,
    total: u64,
) -> Result<HeaderMap, ApiError> {
    let total_pages = total_pages(total, size);
    let last_page = total_pages.saturating_sub(1);

    let mut links = Vec::new();
    if u64::from(page) < u64::from(last_page) {
        links.push(page_link(base_path, page + 1, size, "next"));
    }
    if page > 0 {
        links.push(page_link(base_path, page - 1, size, "prev"));
    }
    links.push(page_link(base_path, last_page, size, "last"));
    links.push(page_link(base_path, 0, size, "first"));

    let mut headers = HeaderMap::new();
    headers.insert(
        X_TOTAL_COUNT,
        HeaderValue::from_str(&total.to_string()).map_err(|e| header_error(e.to_string()))?,
    );
    headers.insert(
        axum::http::header::LINK,
        HeaderValue::from_str(&links.join(",")).map_err(|e| header_error(e.to_string()))?,
    );
    Ok(headers)
}

/// Number of pages needed for `total` records at `size` per page
fn total_pages(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

fn page_link(base_path: &str, page: u32, size: u32, rel: &str) -> String {
    format!("<{}?page={}&size={}>; rel=\"{}\"", base_path, page, size, rel)
}

fn header_error(message: String) -> ApiError {
    ApiError::internal(format!("Failed to build pagination headers: {}", message))
        .with_operation(ApiOperation::List)
}
