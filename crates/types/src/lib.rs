#![forbid(unsafe_code)]
#![deny(trivial_casts, trivial_numeric_casts)]
#![allow(missing_docs)]

pub mod aliases;
pub mod constants;
pub mod slot;

pub use slot::{Epoch, Slot};
