//! # `wordstock` Text Data Loading
//!
//! Vocabularies, pretrained word-vector tables, and subword tokenizers
//! for feeding text into numeric pipelines.
//!
//! See:
//! * [`vocab`] to build and load token/index vocabularies.
//! * [`vectors`] to build, load, and fetch pretrained word vectors (GloVe, FastText).
//! * [`transforms`] for tokenizers, regex normalization, and vocab/vector lookups.
//! * [`sentencepiece`] for a pure-Rust sentencepiece runtime.
//! * [`data`] for parallel batch loading.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Loading Pretrained Vectors
//!
//! ```rust,no_run
//! use wordstock::vectors::pretrained::GloVeOptions;
//!
//! let glove = GloVeOptions::default()
//!     .with_name("6B")
//!     .with_dim(50)
//!     .with_root(Some(".data"))
//!     .load()?;
//!
//! let the: &[f32] = glove.get("the");
//! assert_eq!(the.len(), 50);
//! # Ok::<(), wordstock::WordstockError>(())
//! ```
//!
//! ## Building a Vocabulary
//!
//! ```rust,no_run
//! use wordstock::transforms::basic_english_normalize;
//! use wordstock::vocab::{VocabOptions, build_vocab_from_text_file};
//!
//! let vocab = build_vocab_from_text_file(
//!     "corpus.txt",
//!     &basic_english_normalize(),
//!     VocabOptions::default().with_min_freq(2),
//! )?;
//! println!("{} tokens", vocab.len());
//! # Ok::<(), wordstock::WordstockError>(())
//! ```
#![warn(missing_docs, unused)]

pub mod concurrency;
pub mod data;
pub mod errors;
pub mod resources;
pub mod sentencepiece;
mod text_lines;
pub mod transforms;
pub mod types;
pub mod vectors;
pub mod vocab;

#[cfg(feature = "download")]
#[doc(inline)]
pub use wordstock_disk_cache as disk_cache;

#[doc(inline)]
pub use errors::{WSResult, WordstockError};
#[doc(inline)]
pub use types::{DType, DenseMatrix};
#[doc(inline)]
pub use vectors::{Vectors, build_vectors};
#[doc(inline)]
pub use vocab::Vocab;
