pub mod asset;
pub mod sync;
pub mod webhook;
