//! # Word Vectors
//!
//! * [`Vectors`] / [`build_vectors`] - in-memory token-to-vector tables.
//! * [`vectors_io`] - delimited text loaders.
//! * [`pretrained`] - GloVe and FastText.

pub mod pretrained;
pub mod vectors_io;
pub mod word_vectors;

#[doc(inline)]
pub use pretrained::{FastTextOptions, GloVeOptions};
#[doc(inline)]
pub use vectors_io::{VectorsLoadOptions, VectorsLoadReport, load_vectors_from_file_path};
#[doc(inline)]
pub use word_vectors::{Vectors, build_vectors};
