use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// Sliding window
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64, now: Instant) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    /// Returns (allowed, retry_after_secs)
    fn allow(&mut self, now: Instant) -> (bool, Option<u64>) {
        self.last_seen = now;
        let mut elapsed = now.duration_since(self.current_window_start);

        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
            elapsed = Duration::ZERO;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
            elapsed -= self.window_size;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            (true, None)
        } else {
            let remaining = self.window_size.saturating_sub(elapsed).as_secs();
            (false, Some(remaining.max(1)))
        }
    }
}

/// Per-client limiter in front of the contact relay, keyed by client IP.
#[derive(Clone)]
pub struct ContactRateLimiter {
    map: Arc<DashMap<String, Arc<Mutex<SlidingWindow>>>>,
    window_size: Duration,
    limit: u64,
}

impl ContactRateLimiter {
    pub fn new(limit: u64, window_size: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window_size,
            limit,
        }
    }

    /// Returns `Err(retry_after_secs)` once `key` has used up its window.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        let window = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit, now))))
            .clone();

        match window.lock().allow(now) {
            (true, _) => Ok(()),
            (false, retry_after) => Err(retry_after.unwrap_or(1)),
        }
    }

    /// Drops windows idle for longer than two window lengths.
    pub fn evict_idle(&self) {
        let now = Instant::now();
        let ttl = self.window_size * 2;
        self.map
            .retain(|_, window| now.duration_since(window.lock().last_seen) <= ttl);
    }

    pub fn spawn_eviction(&self, interval: Duration) {
        let limiter = self.clone();
        tokio::spawn(async move {
            loop {
                sleep(interval).await;
                limiter.evict_idle();
            }
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.map.len()
    }
}
