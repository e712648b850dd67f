//! Secret store implementations.

mod file_secret_store;

pub use file_secret_store::FileSecretStore;
