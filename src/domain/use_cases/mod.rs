pub mod admin;
pub mod contact;
pub mod content;
pub mod editor;
pub mod extractors;
