//! Content wrapper registry
//!
//! Bidirectional correspondence between host-side concrete content types
//! and the extension-side wrapper types that expose them.

mod registry;

pub use registry::{
    ContentWrapper, UserContent, WrapperEntry, WrapperError, WrapperRegistry,
};
