//! Persisted credential store
//! Flat key=value file, loaded once and flushed on every write

pub mod keys;
pub mod store;

pub use keys::CredentialKeys;
pub use store::CredentialStore;
