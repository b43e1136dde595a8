/// Wall-clock source for storage keys and cache-busting stamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}
