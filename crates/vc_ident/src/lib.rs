#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;
mod object;
mod session;

pub mod generator;
pub mod key;
pub mod resolver;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{BindError, ConflictError};
pub use hash::{FixedHashState, HashMap};
pub use object::{Bound, IdObject, ObjectRef};
pub use session::{SessionId, SessionIdAllocator};
