pub mod media;
pub mod store;
pub mod wiki;
