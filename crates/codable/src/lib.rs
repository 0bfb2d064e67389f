//! ## Crate layout
//! - `record!`: the build-time expansion (re-exported from `codable-macros`).
//! - `container`: the keyed source generated decode constructors read from.
//! - `traits`: what generated code implements (`Decode`, `KeySet`, `Record`).
//! - `error`: decode failures.
//!
//! Generated code only names items through this crate, so users never have
//! to depend on serde themselves.

pub mod container;
pub mod error;
pub mod traits;

pub use codable_macros::record;
pub use container::KeyedContainer;
pub use error::DecodeError;
pub use traits::{Decode, KeySet, Record, from_json};

/// re-exports
///
/// generated code reaches serde through here
pub mod __reexports {
    pub use serde;
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        container::KeyedContainer as _,
        record,
        traits::{Decode as _, KeySet as _, Record as _},
    };
}
