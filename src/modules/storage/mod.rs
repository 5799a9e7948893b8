//! Storage module for processed upload files
//!
//! Provides a local disk store addressing files by generated name.

mod local_store;

pub use local_store::LocalDiskStore;
