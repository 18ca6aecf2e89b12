//! Link-header pagination
//!
//! GitHub REST list endpoints advertise further pages through a `Link`
//! header containing `rel="next"`. Pages are requested strictly in order
//! starting at 1 and accumulated append-only.

use std::future::Future;

use log::{debug, warn};

use super::ApiResult;
use crate::error::ApiError;

/// Items per page requested from list endpoints (GitHub maximum)
pub const PER_PAGE: u32 = 100;

/// Hard stop for the events walk.
///
/// GitHub serves at most 300 public events, so a longer chain means a
/// misbehaving upstream.
pub const MAX_EVENT_PAGES: u32 = 20;

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// The response carried a `rel="next"` link
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
        }
    }

    pub fn with_next(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: true,
        }
    }
}

/// Whether a `Link` header value advertises a next page.
pub fn has_next_link(link: Option<&str>) -> bool {
    link.is_some_and(|value| value.split(',').any(|part| part.contains("rel=\"next\"")))
}

/// Position of a pagination walk
#[derive(Debug, Clone)]
pub enum PageState {
    FetchingPage(u32),
    Done,
    Failed { page: u32, error: ApiError },
}

/// A walk that stopped on an error.
///
/// Carries what was accumulated before the failing page so the caller can
/// choose a policy.
#[derive(Debug)]
pub struct PageFailure<T> {
    pub fetched: Vec<T>,
    pub failed_page: u32,
    pub error: ApiError,
}

/// Fetch pages 1, 2, ... until one has no next link.
///
/// Stops at `max_pages` with whatever was accumulated.
pub async fn fetch_all_pages<T, F, Fut>(
    max_pages: u32,
    mut fetch_page: F,
) -> Result<Vec<T>, PageFailure<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut state = PageState::FetchingPage(1);

    loop {
        state = match state {
            PageState::FetchingPage(page) if page > max_pages => {
                warn!(
                    "Stopping pagination after {} pages ({} items)",
                    max_pages,
                    items.len()
                );
                PageState::Done
            }
            PageState::FetchingPage(page) => match fetch_page(page).await {
                Ok(fetched) => {
                    debug!(
                        "Page {} returned {} items (next: {})",
                        page,
                        fetched.items.len(),
                        fetched.has_next
                    );
                    items.extend(fetched.items);
                    if fetched.has_next {
                        PageState::FetchingPage(page + 1)
                    } else {
                        PageState::Done
                    }
                }
                Err(error) => PageState::Failed { page, error },
            },
            PageState::Done => {
                debug!("Pagination finished with {} items", items.len());
                return Ok(items);
            }
            PageState::Failed { page, error } => {
                return Err(PageFailure {
                    fetched: items,
                    failed_page: page,
                    error,
                });
            }
        };
    }
}
