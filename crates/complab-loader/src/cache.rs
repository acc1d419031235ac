//! Session cache of fetched material records.
//!
//! Each identifier has at most one fetch in flight: callers that arrive
//! while a fetch is running await the same shared future. Successful loads
//! stay cached for the lifetime of the cache; failures leave no entry and
//! are reported to every caller that awaited them.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use complab_core::MemorySource;
//! use complab_loader::RecordCache;
//!
//! let source = Arc::new(MemorySource::new().with_document(
//!     "materials/fibers/t300.json",
//!     r#"{"id": "T300", "name": "T300 Carbon Fiber", "type": "Fiber"}"#,
//! ));
//! let cache = RecordCache::new(source.clone());
//!
//! let first = cache.get_or_fetch("T300", "materials/fibers/t300.json").await.unwrap();
//! let again = cache.get_or_fetch("T300", "materials/fibers/t300.json").await.unwrap();
//! assert!(Arc::ptr_eq(&first, &again));
//! assert_eq!(source.fetch_count("materials/fibers/t300.json"), 1);
//! # });
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use complab_core::util::ids::normalize_tag;
use complab_core::{Category, Error, MaterialRecord, RecordSource, Result};
use futures::future::{self, BoxFuture, FutureExt, Shared};

type SharedFetch = Shared<BoxFuture<'static, std::result::Result<Arc<MaterialRecord>, String>>>;

/// Result of fetching one manifest entry during a bulk load.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Identifier that was requested.
    pub id: String,
    /// The record, or why it could not be loaded.
    pub result: Result<Arc<MaterialRecord>>,
}

#[derive(Default)]
struct CacheState {
    records: HashMap<String, Arc<MaterialRecord>>,
    in_flight: HashMap<String, SharedFetch>,
}

/// Keyed store of fetched material records.
pub struct RecordCache {
    source: Arc<dyn RecordSource>,
    state: Mutex<CacheState>,
}

impl RecordCache {
    /// Create an empty cache reading through `source`.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached record for `id`, fetching it from `location` if
    /// it is not cached yet.
    pub async fn get_or_fetch(&self, id: &str, location: &str) -> Result<Arc<MaterialRecord>> {
        let fetch = {
            let mut state = self.lock();
            if let Some(record) = state.records.get(id) {
                log::debug!("Serving {id} from cache");
                return Ok(record.clone());
            }
            self.join_or_start(&mut state, id, location)
        };
        self.settle(id, fetch).await
    }

    /// Fetch `id` again even if it is cached, replacing the cached record.
    ///
    /// A fetch already in flight for `id` is joined rather than duplicated.
    /// On failure the previously cached record is kept.
    pub async fn refetch(&self, id: &str, location: &str) -> Result<Arc<MaterialRecord>> {
        let fetch = {
            let mut state = self.lock();
            self.join_or_start(&mut state, id, location)
        };
        self.settle(id, fetch).await
    }

    /// Fetch every `(id, location)` pair concurrently.
    ///
    /// Waits for all fetches to finish. Outcomes are returned in input order
    /// regardless of completion order; one failure does not affect the
    /// others.
    pub async fn get_or_fetch_all<I, S, L>(&self, entries: I) -> Vec<FetchOutcome>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<String>,
    {
        let fetches = entries.into_iter().map(|(id, location)| {
            let id = id.into();
            let location = location.into();
            async move {
                let result = self.get_or_fetch(&id, &location).await;
                FetchOutcome { id, result }
            }
        });
        future::join_all(fetches).await
    }

    fn join_or_start(&self, state: &mut CacheState, id: &str, location: &str) -> SharedFetch {
        if let Some(fetch) = state.in_flight.get(id) {
            log::debug!("Joining in-flight fetch for {id}");
            return fetch.clone();
        }

        let fetch = load_record(self.source.clone(), id.to_string(), location.to_string())
            .boxed()
            .shared();
        state.in_flight.insert(id.to_string(), fetch.clone());
        fetch
    }

    async fn settle(&self, id: &str, fetch: SharedFetch) -> Result<Arc<MaterialRecord>> {
        let outcome = fetch.clone().await;

        let mut state = self.lock();
        if state
            .in_flight
            .get(id)
            .is_some_and(|current| current.ptr_eq(&fetch))
        {
            state.in_flight.remove(id);
        }

        match outcome {
            Ok(record) => {
                state.records.insert(id.to_string(), record.clone());
                Ok(record)
            }
            Err(reason) => Err(Error::record_unavailable(id, reason)),
        }
    }

    /// Cached record for `id`, without fetching.
    pub fn get(&self, id: &str) -> Option<Arc<MaterialRecord>> {
        self.lock().records.get(id).cloned()
    }

    /// Whether `id` is cached.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().records.contains_key(id)
    }

    /// All cached records, ordered by identifier.
    pub fn get_all(&self) -> Vec<Arc<MaterialRecord>> {
        self.snapshot().into_values().collect()
    }

    /// Cached records whose category tag matches `tag`, ignoring case.
    ///
    /// Singular and plural category names are equivalent (`fiber`,
    /// `Fibers`); other tags are compared after normalization.
    pub fn get_by_category(&self, tag: &str) -> Vec<Arc<MaterialRecord>> {
        let wanted = Category::parse(tag);
        let wanted_tag = normalize_tag(tag);
        self.get_all()
            .into_iter()
            .filter(|record| match (wanted, record.category()) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => normalize_tag(&record.kind) == wanted_tag,
            })
            .collect()
    }

    /// Snapshot of the cache keyed by identifier.
    pub fn snapshot(&self) -> BTreeMap<String, Arc<MaterialRecord>> {
        self.lock()
            .records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }
}

impl std::fmt::Debug for RecordCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("RecordCache")
            .field("source", &self.source.describe())
            .field("records", &state.records.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

async fn load_record(
    source: Arc<dyn RecordSource>,
    id: String,
    location: String,
) -> std::result::Result<Arc<MaterialRecord>, String> {
    log::debug!("Fetching {id} from {location}");
    let body = source.fetch(&location).await.map_err(|e| {
        log::warn!("Error loading material from {location}: {e}");
        e.to_string()
    })?;
    let record = MaterialRecord::from_json(&body).map_err(|e| {
        log::warn!("Error parsing material {id} from {location}: {e}");
        e.to_string()
    })?;

    if record.id != id {
        log::warn!(
            "Material file {location} declares id '{}' but is listed as '{id}'; caching under '{id}'",
            record.id
        );
    }
    for property in record.blank_properties() {
        log::warn!("Material {id}: property '{}' has no displayable value", property.key);
    }
    Ok(Arc::new(record))
}
