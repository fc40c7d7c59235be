//! # tubelinks Core
//!
//! Core types, errors, and traits shared by every tubelinks crate.
//!
//! - **Types**: cache keys, transcript segments, and the cached response payload
//! - **Errors**: one error enum covering upstream and service failures
//! - **Constants**: process-wide defaults
//! - **Traits**: the transcript fetcher seam
//!
//! ## Example
//!
//! ```rust
//! use tubelinks_core::{CacheKey, ResponseData};
//!
//! let key = CacheKey::new("dQw4w9WgXcQ", "en");
//! let response = ResponseData::new("never gonna give you up", Default::default());
//! let json = serde_json::to_string(&response).unwrap();
//! assert!(json.contains("\"links\":[]"));
//! # let _ = key;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, TubelinksError};
pub use traits::*;
pub use types::*;
