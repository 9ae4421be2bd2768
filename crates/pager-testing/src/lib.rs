//! Testing utilities and harness for Pager
//!
//! Headless stand-ins for the collaborators of a
//! [`PagingController`](pager_core::PagingController): a surface that records
//! every attach and detach, a data source driven by reuse identifiers, and a
//! delegate that records selections.

pub mod assertions;
pub mod source;
pub mod surface;

pub use assertions::*;
pub use source::*;
pub use surface::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::source::*;
    pub use crate::surface::*;
}
