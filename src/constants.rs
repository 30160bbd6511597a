use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Health responses are rebuilt at most this often.
pub const HEALTH_CACHE_SECS: i64 = 5;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const LIMITER_EVICTION_INTERVAL: Duration = Duration::from_secs(300);

/// Public pages listed in the sitemap with their priority.
pub const SITEMAP_STATIC_ROUTES: [(&str, &str); 3] = [("", "1.0"), ("/about", "0.8"), ("/contact", "0.8")];
