//! Domain types for tubelinks.
//!
//! - [`CacheKey`]: the (video id, language) pair identifying a cache slot
//! - [`TranscriptSegment`]: one caption cue as returned by upstream
//! - [`ResponseData`]: the transcript plus the links found in it

mod key;
mod response;
mod segment;

pub use key::*;
pub use response::*;
pub use segment::*;
