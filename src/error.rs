//! Error type shared by the table constructors and growth path.

/// Failures that abort a table operation outright.
///
/// Missing keys, empty lists and exhausted cursors are not errors; those
/// surface as `None` or `false`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A table was requested with zero buckets.
    #[error("a hash table needs at least one bucket")]
    ZeroBuckets,

    /// The configured load factor threshold was zero.
    #[error("load factor threshold must be at least 1")]
    ZeroLoadFactor,

    /// The configured growth factor would not grow the table.
    #[error("growth factor must be at least 2, got {0}")]
    GrowthFactor(usize),

    /// Growing from the given bucket count overflows `usize`.
    #[error("bucket count overflows growing from {0} buckets")]
    CapacityOverflow(usize),

    /// The allocator could not provide a bucket array of the given length.
    #[error("failed to allocate a bucket array of {0} buckets")]
    Allocation(usize),
}
