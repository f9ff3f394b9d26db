//! Table sizing and growth policy.

use crate::error::Error;

/// Sizing policy for a [`HashTable`](crate::HashTable).
///
/// The table grows when, at the start of an insert, it already holds
/// `max_load_factor * bucket_count` elements; the new bucket count is
/// `growth_factor * bucket_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub initial_buckets: usize,
    pub max_load_factor: usize,
    pub growth_factor: usize,
}

impl TableConfig {
    pub const DEFAULT_BUCKETS: usize = 16;
    pub const DEFAULT_LOAD_FACTOR: usize = 3;
    pub const DEFAULT_GROWTH_FACTOR: usize = 9;

    pub const fn new(initial_buckets: usize) -> Self {
        Self {
            initial_buckets,
            max_load_factor: Self::DEFAULT_LOAD_FACTOR,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    pub const fn with_initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    pub const fn with_max_load_factor(mut self, load_factor: usize) -> Self {
        self.max_load_factor = load_factor;
        self
    }

    pub const fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Reject policies that would leave the table without buckets or unable
    /// to grow.
    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        if self.max_load_factor == 0 {
            return Err(Error::ZeroLoadFactor);
        }
        if self.growth_factor < 2 {
            return Err(Error::GrowthFactor(self.growth_factor));
        }
        Ok(())
    }

    /// Element count at which a table with `buckets` buckets grows.
    pub(crate) fn grow_threshold(&self, buckets: usize) -> usize {
        self.max_load_factor.saturating_mul(buckets)
    }

    /// Bucket count after one growth step from `buckets`.
    pub(crate) fn grown_buckets(&self, buckets: usize) -> Result<usize, Error> {
        buckets
            .checked_mul(self.growth_factor)
            .ok_or(Error::CapacityOverflow(buckets))
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_documented_constants() {
        let c = TableConfig::default();
        assert_eq!(c.initial_buckets, 16);
        assert_eq!(c.max_load_factor, 3);
        assert_eq!(c.growth_factor, 9);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_policies() {
        assert_eq!(TableConfig::new(0).validate(), Err(Error::ZeroBuckets));
        assert_eq!(
            TableConfig::new(4).with_max_load_factor(0).validate(),
            Err(Error::ZeroLoadFactor)
        );
        assert_eq!(
            TableConfig::new(4).with_growth_factor(1).validate(),
            Err(Error::GrowthFactor(1))
        );
    }

    #[test]
    fn growth_arithmetic() {
        let c = TableConfig::new(2);
        assert_eq!(c.grow_threshold(2), 6);
        assert_eq!(c.grown_buckets(2), Ok(18));
        assert_eq!(
            c.grown_buckets(usize::MAX / 2),
            Err(Error::CapacityOverflow(usize::MAX / 2))
        );
        assert_eq!(c.grow_threshold(usize::MAX), usize::MAX);
    }
}
