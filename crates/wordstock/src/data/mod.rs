//! # Data Loading
//!
//! Parallel, order-preserving batch collation.

pub mod batch_loader;

#[doc(inline)]
pub use batch_loader::BatchLoader;
