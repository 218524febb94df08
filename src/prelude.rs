//! Derive macros shared across the crate's modules.

pub use derive_more::{Display, Into};
