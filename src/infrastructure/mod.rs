pub mod auth;
pub mod limiter;
pub mod supabase;
pub mod utils;
