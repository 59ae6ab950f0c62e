//! Catalog access: raw transport, response normalization, and the typed
//! Deezer client built on the request cache.

pub mod deezer;
pub mod error;
pub mod models;
pub mod normalize;
pub mod transport;

pub use deezer::*;
pub use error::{CatalogError, CatalogResult};
pub use models::*;
pub use transport::{FixtureTransport, HttpResponse, HttpTransport, ReqwestTransport};
