// ============================================================================
// Factorial
// Sequential factorial jobs backed by a shared, insert-only cache
// ============================================================================

use crate::numeric::{Decimal, NumericError, NumericResult};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// `n!` for `n` in `0..=20`, loaded into every new cache.
const SEED: [(u64, &str); 21] = [
    (0, "1"),
    (1, "1"),
    (2, "2"),
    (3, "6"),
    (4, "24"),
    (5, "120"),
    (6, "720"),
    (7, "5040"),
    (8, "40320"),
    (9, "362880"),
    (10, "3628800"),
    (11, "39916800"),
    (12, "479001600"),
    (13, "6227020800"),
    (14, "87178291200"),
    (15, "1307674368000"),
    (16, "20922789888000"),
    (17, "355687428096000"),
    (18, "6402373705728000"),
    (19, "121645100408832000"),
    (20, "2432902008176640000"),
];

lazy_static! {
    static ref GLOBAL_CACHE: Arc<FactorialCache> = Arc::new(FactorialCache::new());
}

fn require_whole(n: &Decimal) -> NumericResult<()> {
    if !n.is_integer() || n.is_negative() {
        return Err(NumericError::out_of_range(format!(
            "factorial of {} is undefined",
            n
        )));
    }
    Ok(())
}

// ============================================================================
// Factorial Job
// ============================================================================

/// One factorial computation, multiplying upward from a known `start!`.
#[derive(Debug, Clone)]
pub struct Factorial {
    target: Decimal,
    start: Decimal,
    start_value: Decimal,
    result: Option<Decimal>,
}

impl Factorial {
    /// Compute `target!` from `0! = 1`.
    pub fn new(target: Decimal) -> Self {
        Self::with_start(target, Decimal::zero(), Decimal::one())
    }

    /// Compute `target!` resuming from `start! = start_value`.
    pub fn with_start(target: Decimal, start: Decimal, start_value: Decimal) -> Self {
        Self {
            target,
            start,
            start_value,
            result: None,
        }
    }

    /// Run the multiplication, storing and returning the result.
    ///
    /// # Errors
    /// Returns `OutOfRange` for a negative or fractional target, or a start
    /// above the target.
    pub fn run(&mut self) -> NumericResult<Decimal> {
        require_whole(&self.target)?;
        require_whole(&self.start)?;
        if self.start > self.target {
            return Err(NumericError::out_of_range(format!(
                "factorial start {} is above target {}",
                self.start, self.target
            )));
        }

        let one = Decimal::one();
        let mut value = self.start_value.clone();
        let mut k = self.start.checked_add(&one)?;
        while k <= self.target {
            value = value.checked_mul(&k)?;
            k = k.checked_add(&one)?;
        }

        self.result = Some(value.clone());
        Ok(value)
    }

    /// The computed value, once [`run`](Self::run) has succeeded.
    pub fn result(&self) -> Option<&Decimal> {
        self.result.as_ref()
    }

    pub fn from(&self) -> &Decimal {
        &self.target
    }

    pub fn start(&self) -> &Decimal {
        &self.start
    }

    pub fn has_run(&self) -> bool {
        self.result.is_some()
    }
}

// ============================================================================
// Factorial Cache
// ============================================================================

/// Thread-safe map from `n` to `n!`, keyed by canonical digit strings.
///
/// Entries are never replaced: [`insert`](Self::insert) rejects existing
/// keys, and computed values go in with
/// [`insert_if_absent`](Self::insert_if_absent).
#[derive(Debug)]
pub struct FactorialCache {
    entries: RwLock<HashMap<String, String>>,
}

impl FactorialCache {
    /// A cache seeded with `0!` through `20!`.
    pub fn new() -> Self {
        let entries = SEED
            .iter()
            .map(|(n, value)| (n.to_string(), value.to_string()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// The process-wide cache.
    pub fn global() -> Arc<FactorialCache> {
        Arc::clone(&GLOBAL_CACHE)
    }

    pub fn get(&self, n: &Decimal) -> Option<Decimal> {
        self.entries
            .read()
            .get(n.as_str())
            .map(|value| Decimal::from_canonical(value.clone()))
    }

    /// Add `n! = value`.
    ///
    /// # Errors
    /// Returns `DuplicateKey` if `n` is already cached.
    pub fn insert(&self, n: &Decimal, value: &Decimal) -> NumericResult<()> {
        if self.insert_if_absent(n, value) {
            Ok(())
        } else {
            Err(NumericError::DuplicateKey {
                key: n.to_string(),
            })
        }
    }

    /// Add `n! = value` unless `n` is present. Returns whether it was added.
    pub fn insert_if_absent(&self, n: &Decimal, value: &Decimal) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(n.as_str()) {
            return false;
        }
        entries.insert(n.to_string(), value.to_string());
        debug!(n = %n, digits = value.as_str().len(), "factorial cached");
        true
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All cached pairs in ascending order of `n`.
    pub fn entries(&self) -> Vec<(Decimal, Decimal)> {
        let mut pairs: Vec<(Decimal, Decimal)> = self
            .entries
            .read()
            .iter()
            .map(|(n, value)| {
                (
                    Decimal::from_canonical(n.clone()),
                    Decimal::from_canonical(value.clone()),
                )
            })
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Largest cached `k <= n` with its value.
    fn nearest_below(&self, n: &Decimal) -> Option<(Decimal, Decimal)> {
        self.entries
            .read()
            .iter()
            .map(|(k, value)| (Decimal::from_canonical(k.clone()), value))
            .filter(|(k, _)| k <= n)
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(k, value)| (k, Decimal::from_canonical(value.clone())))
    }

    /// `n!`, from the cache or computed from the nearest cached entry below.
    ///
    /// # Errors
    /// Returns `OutOfRange` for negative or fractional `n`.
    pub fn calculate(&self, n: &Decimal) -> NumericResult<Decimal> {
        require_whole(n)?;
        if let Some(value) = self.get(n) {
            return Ok(value);
        }

        let (start, start_value) = self
            .nearest_below(n)
            .unwrap_or_else(|| (Decimal::zero(), Decimal::one()));
        let value = Factorial::with_start(n.clone(), start, start_value).run()?;

        if !self.insert_if_absent(n, &value) {
            debug!(n = %n, "factorial already cached by another caller");
        }
        Ok(value)
    }

    /// Cache every factorial up to `max!`.
    pub fn fill(&self, max: u64) -> NumericResult<()> {
        let started = Instant::now();
        for k in 0..=max {
            self.calculate(&Decimal::from(k))?;
        }
        debug!(
            max,
            entries = self.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "factorial cache filled"
        );
        Ok(())
    }

    /// Fill up to `max!` and return `get!`.
    ///
    /// # Errors
    /// Returns `OutOfRange` if `get > max`.
    pub fn fill_and_get(&self, max: u64, get: u64) -> NumericResult<Decimal> {
        if get > max {
            return Err(NumericError::out_of_range(format!(
                "requested {}! beyond filled range {}",
                get, max
            )));
        }
        self.fill(max)?;
        self.calculate(&Decimal::from(get))
    }
}

impl Default for FactorialCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn d(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    #[test]
    fn test_job_runs_from_start() {
        let mut job = Factorial::with_start(d("7"), d("5"), d("120"));
        assert!(!job.has_run());
        assert_eq!(job.run().unwrap(), d("5040"));
        assert_eq!(job.result(), Some(&d("5040")));
        assert_eq!(job.start(), &d("5"));
        assert_eq!(job.from(), &d("7"));

        assert_eq!(Factorial::new(d("0")).run().unwrap(), d("1"));
    }

    #[test]
    fn test_job_rejects_bad_input() {
        assert!(Factorial::new(d("-1")).run().is_err());
        assert!(Factorial::new(d("2.5")).run().is_err());
        assert!(Factorial::with_start(d("3"), d("4"), d("24")).run().is_err());
    }

    #[test]
    fn test_seeded_cache() {
        let cache = FactorialCache::new();
        assert_eq!(cache.len(), 21);
        assert_eq!(cache.get(&d("5")), Some(d("120")));
        assert_eq!(cache.get(&d("20")), Some(d("2432902008176640000")));
        assert_eq!(cache.get(&d("21")), None);
    }

    #[test]
    fn test_insert_is_insert_only() {
        let cache = FactorialCache::new();
        assert!(matches!(
            cache.insert(&d("5"), &d("120")),
            Err(NumericError::DuplicateKey { .. })
        ));
        assert!(!cache.insert_if_absent(&d("5"), &d("1")));
        assert_eq!(cache.get(&d("5")), Some(d("120")));
    }

    #[test]
    fn test_calculate_beyond_seed() {
        let cache = FactorialCache::new();
        assert_eq!(cache.calculate(&d("25")).unwrap(), d("15511210043330985984000000"));
        assert_eq!(cache.len(), 22);
        // second call is a cache hit
        assert_eq!(cache.calculate(&d("25")).unwrap(), d("15511210043330985984000000"));
        assert_eq!(cache.len(), 22);
        assert!(cache.calculate(&d("-3")).is_err());
    }

    #[test]
    fn test_fill_and_entries_sorted() {
        let cache = FactorialCache::new();
        assert_eq!(cache.fill_and_get(30, 22).unwrap(), d("1124000727777607680000"));
        assert_eq!(cache.len(), 31);

        let entries = cache.entries();
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.to_u64().unwrap()).collect();
        assert_eq!(keys, (0..=30).collect::<Vec<u64>>());

        assert!(cache.fill_and_get(10, 11).is_err());
    }

    #[test]
    fn test_concurrent_calculation() {
        let cache = Arc::new(FactorialCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.calculate(&Decimal::from(40u64)).unwrap())
            })
            .collect();

        let results: Vec<Decimal> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 22);
    }

    #[test]
    fn test_global_cache_is_shared() {
        let first = FactorialCache::global();
        let second = FactorialCache::global();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
