pub mod asset;
pub mod contact_me;
pub mod profile;
pub mod project;
pub mod token;
