pub mod contact_me;
pub mod project;
pub mod storage;
pub mod supabase_repo;
