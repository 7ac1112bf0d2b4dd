//! Guards against product fetches that finish after the page is gone.
//!
//! Every navigation to a product page calls [`PageLifetime::enter`] and gets a
//! ticket. Leaving the page (or entering another one) invalidates all earlier
//! tickets, and a fetch that completes under a dead ticket is discarded rather
//! than applied.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ecam_core::{AssetUrls, ProductDetail};

use crate::query::QueryParams;
use crate::session::VariantSession;

#[derive(Debug, Clone, Default)]
pub struct PageLifetime {
    epoch: Arc<AtomicU64>,
}

impl PageLifetime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new page view, invalidating any outstanding ticket.
    #[must_use]
    pub fn enter(&self) -> PageTicket {
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        PageTicket {
            epoch,
            current: Arc::clone(&self.epoch),
        }
    }

    /// Ends the current page view.
    pub fn leave(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug, Clone)]
pub struct PageTicket {
    epoch: u64,
    current: Arc<AtomicU64>,
}

impl PageTicket {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.epoch
    }
}

#[derive(Debug)]
pub enum PageLoad {
    Ready(VariantSession),
    /// The page was left before the fetch finished; nothing was applied.
    Stale,
}

/// Awaits `fetch` and builds a session, unless the page died in the meantime.
///
/// A fetch that completes after the ticket is dead yields
/// [`PageLoad::Stale`] whether it succeeded or failed.
///
/// # Errors
///
/// Returns the fetch error when the ticket is still live.
pub async fn load_variant_page<F, E>(
    ticket: &PageTicket,
    fetch: F,
    query: &QueryParams,
    assets: AssetUrls,
) -> Result<PageLoad, E>
where
    F: Future<Output = Result<ProductDetail, E>>,
{
    let result = fetch.await;
    if !ticket.is_live() {
        tracing::debug!("discarding product fetch for a page that is no longer shown");
        return Ok(PageLoad::Stale);
    }

    let product = result?;
    Ok(PageLoad::Ready(VariantSession::new(
        Arc::new(product),
        query,
        assets,
    )))
}
