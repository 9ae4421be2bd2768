/// Page lifecycle counters.
///
/// Used for testing and debugging recycling behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PagerStats {
    /// Number of index bindings currently held by the cache.
    pub pages_cached: usize,

    /// Number of pages built by a kind's factory.
    pub pages_created: usize,

    /// Number of pages evicted from one index and handed out for another.
    pub reuse_count: usize,

    /// Number of attach requests sent to the surface.
    pub attach_count: usize,

    /// Number of detach requests sent to the surface.
    pub detach_count: usize,
}
