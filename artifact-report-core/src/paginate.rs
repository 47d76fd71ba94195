//! Generic page-number pagination.
//!
//! Termination is decided from the length of each page alone: a page shorter than
//! the requested size ends the listing. When the item count is an exact multiple of
//! the page size this costs one extra request that returns an empty page.

use std::future::Future;

use tracing::debug;

use crate::error::FetchError;

/// Fetch pages 1, 2, ... through `fetch_page` until a short page, concatenating the
/// items in page order.
///
/// An empty page always ends the listing. The first error aborts the collection and
/// is returned as-is; items gathered so far are dropped.
pub async fn collect_pages<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, FetchError>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = fetch_page(page).await?;
        let returned = batch.len();
        debug!(page, returned, page_size, "Fetched page");
        items.extend(batch);

        if returned == 0 || returned < page_size as usize {
            break;
        }
        page += 1;
    }

    Ok(items)
}
