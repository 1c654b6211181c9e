//! Capability traits implemented by backend client libraries.

mod traits;

pub use traits::*;
