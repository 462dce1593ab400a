//! Asset declaration, asynchronous loading and lookup.
//!
//! Flow:
//! - the game declares an `AssetManifest` once
//! - `ResourceProvider::load` fetches every entry off the loop thread
//! - the ready callback fires exactly once, after every entry has settled
//! - `ResourceProvider::get` then resolves identifiers synchronously

mod error;
mod id;
mod loader;
mod manifest;
mod provider;

pub use error::AssetError;
pub use id::AssetId;
pub use loader::{AssetLoader, FileLoader};
pub use manifest::AssetManifest;
pub use provider::{ReadyCallback, ResourceProvider, Resources};
