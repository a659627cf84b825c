//! Content Fetcher - memoized, single-flight post retrieval
//!
//! Wraps a [`ContentBackend`] with two pieces of shared state:
//! - a [`PostCache`] holding every successful fetch for the cache's lifetime
//! - an in-flight map so concurrent first-time callers for the same identity
//!   await one upstream request instead of issuing several
//!
//! ## Algorithm
//! 1. Normalize the handle (strip `@`, trim)
//! 2. Return the cached list if present
//! 3. Otherwise join (or start) the in-flight request for the identity
//! 4. When it settles: cache on success, then drop the in-flight entry
//!
//! Failures are shared with every waiter but never cached, so the next call
//! after a failure goes back upstream.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::backend::ContentBackend;
use domain::{Identity, PostCache, PostList, Result};

type Flight = Shared<BoxFuture<'static, Result<Arc<PostList>>>>;

enum Lookup {
    Cached(Arc<PostList>),
    InFlight(Flight),
}

/// Fetches post lists, memoizing per identity
#[derive(Clone)]
pub struct ContentFetcher {
    backend: Arc<dyn ContentBackend>,
    cache: Arc<PostCache>,
    in_flight: Arc<Mutex<HashMap<Identity, Flight>>>,
}

impl ContentFetcher {
    /// Create a fetcher over `backend`, memoizing into `cache`
    pub fn new(backend: Arc<dyn ContentBackend>, cache: Arc<PostCache>) -> Self {
        Self {
            backend,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The cache this fetcher writes to
    pub fn cache(&self) -> &Arc<PostCache> {
        &self.cache
    }

    /// Normalize a raw handle and fetch its posts
    pub async fn fetch_posts(&self, handle: &str) -> Result<Arc<PostList>> {
        let identity = Identity::parse(handle)?;
        self.fetch(&identity).await
    }

    /// Fetch the posts for an already-normalized identity
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn fetch(&self, identity: &Identity) -> Result<Arc<PostList>> {
        let flight = match self.lookup(identity) {
            Lookup::Cached(posts) => {
                info!("Using cached posts for {}", identity);
                return Ok(posts);
            }
            Lookup::InFlight(flight) => flight,
        };

        let outcome = flight.clone().await;
        self.settle(identity, &flight, &outcome);
        outcome
    }

    /// Number of identities with a request currently outstanding
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    fn lookup(&self, identity: &Identity) -> Lookup {
        if let Some(posts) = self.cache.get(identity) {
            return Lookup::Cached(posts);
        }

        let mut in_flight = self.in_flight.lock();

        // A flight may have settled between the check above and the lock
        if let Some(posts) = self.cache.get(identity) {
            return Lookup::Cached(posts);
        }

        let flight = in_flight
            .entry(identity.clone())
            .or_insert_with(|| {
                debug!("Starting upstream fetch for {}", identity);
                let backend = Arc::clone(&self.backend);
                let identity = identity.clone();
                async move { backend.fetch_posts(&identity).await.map(Arc::new) }
                    .boxed()
                    .shared()
            })
            .clone();

        Lookup::InFlight(flight)
    }

    fn settle(&self, identity: &Identity, flight: &Flight, outcome: &Result<Arc<PostList>>) {
        let mut in_flight = self.in_flight.lock();

        // Cache before clearing the flight so a lookup always sees one of them
        if let Ok(posts) = outcome {
            self.cache.insert(identity.clone(), Arc::clone(posts));
        }

        // Only remove our own flight; a newer one may have replaced it
        if in_flight
            .get(identity)
            .is_some_and(|current| current.ptr_eq(flight))
        {
            in_flight.remove(identity);
        }
    }
}
