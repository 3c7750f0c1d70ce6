use crate::compilation::Compilation;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::trace;

pub const DEFAULT_CACHE_SIZE: usize = 10;

fn default_cache_size() -> usize {
    std::env::var("ACTIONFLOW_CACHE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CACHE_SIZE)
}

/// Recently used compilations, one per document, keyed by uri and checked
/// against the document version.
#[derive(Debug)]
pub struct CompilationCache {
    entries: LruCache<String, (i32, Arc<Compilation>)>,
}

impl CompilationCache {
    /// A capacity of zero falls back to [`DEFAULT_CACHE_SIZE`].
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_SIZE))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Capacity from `ACTIONFLOW_CACHE_SIZE`, or [`DEFAULT_CACHE_SIZE`].
    pub fn with_default_size() -> Self {
        Self::new(default_cache_size())
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached compilation of `uri` at exactly `version`.
    pub fn get(&mut self, uri: &str, version: i32) -> Option<Arc<Compilation>> {
        match self.entries.get(uri) {
            Some((cached, compilation)) if *cached == version => {
                trace!(uri, version, "compilation cache hit");
                Some(Arc::clone(compilation))
            }
            _ => None,
        }
    }

    /// Returns the cached compilation for `(uri, version)` or compiles `text`
    /// and stores it, replacing any older version of the same document.
    pub fn get_or_compile(&mut self, uri: &str, version: i32, text: &str) -> Arc<Compilation> {
        if let Some(compilation) = self.get(uri, version) {
            return compilation;
        }

        trace!(uri, version, "compilation cache miss");
        let compilation = Arc::new(Compilation::new(text));
        self.entries
            .put(uri.to_string(), (version, Arc::clone(&compilation)));
        compilation
    }

    pub fn remove(&mut self, uri: &str) -> Option<Arc<Compilation>> {
        self.entries.pop(uri).map(|(_, compilation)| compilation)
    }
}

impl Default for CompilationCache {
    fn default() -> Self {
        Self::with_default_size()
    }
}
