//! Walking every page of a v2 listing.

use std::future::Future;

use crate::client::Page;
use crate::error::Result;

/// Fetches page 1, then every further page it announces, and returns all
/// resources in order.
pub(crate) async fn collect_pages<R, F, Fut>(mut fetch: F) -> Result<Vec<R>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<R>>>,
{
    let first = fetch(1).await?;
    let total_pages = first.total_pages;
    let mut resources = first.resources;

    for page in 2..=total_pages {
        resources.extend(fetch(page).await?.resources);
    }

    Ok(resources)
}
