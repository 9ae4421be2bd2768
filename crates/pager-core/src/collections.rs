//! Map types used for identifier lookups.
//!
//! The fast hasher is the default; the `std-hash` feature swaps in the
//! standard library's SipHash maps.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
    pub use std::collections::hash_map::Entry;
}
