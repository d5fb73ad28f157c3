//! Catalog Store: turns raw makeup-catalog JSON into an immutable, ordered
//! collection of [`cosmo_core::Product`] values.

pub mod error;
pub mod normalize;
pub mod options;
pub(crate) mod parse;
pub mod store;
pub mod types;

pub use error::CatalogError;
pub use normalize::{normalize_product, CoercionWarning, NormalizedRecord};
pub use options::{filter_options, suggest, FilterOptions};
pub use store::{Catalog, LoadSummary, ParseFailure};
pub use types::{RawColor, RawProduct};
