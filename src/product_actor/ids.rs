use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond-timestamp product ids that never repeat and never go backwards.
///
/// Two ids drawn in the same millisecond, or after the clock steps back, are
/// bumped past the last one issued. `floor` is the largest id already in use.
pub fn timestamp_ids(floor: u64) -> impl Fn() -> u64 + Send + Sync + 'static {
    let last = AtomicU64::new(floor);
    move || {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        let next = |prev: u64| now.max(prev.saturating_add(1));
        match last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(next(prev))) {
            Ok(prev) | Err(prev) => next(prev),
        }
    }
}
