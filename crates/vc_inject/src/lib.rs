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

mod config;
mod opt_bool;
mod serde;
mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::OverrideConfig;
pub use opt_bool::OptBool;
pub use value::OverrideValue;
