//! Pagination draining
//!
//! Turns a page-at-a-time listing into the complete, ordered item sequence.

use plugscope_gateway::Page;
use std::future::Future;
use tracing::debug;

/// Fetch every page of a listing and concatenate the items
///
/// `fetch_page` is called with `None` first and then with each returned
/// `next_page_token` until a page comes back without one. Items keep page
/// order and in-page order; duplicates are kept. The first failing fetch
/// aborts the drain and its error is returned unchanged, so a caller never
/// sees a partial listing. No retries happen here.
pub async fn drain_pages<T, E, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(token.take()).await?;
        pages += 1;
        items.extend(page.items);

        match page.next_page_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    debug!("Drained {} items over {} pages", items.len(), pages);
    Ok(items)
}
