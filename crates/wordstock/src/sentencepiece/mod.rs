//! # SentencePiece Runtime
//!
//! Loads serialized sentencepiece models and runs their unigram or BPE
//! segmentation in pure Rust.
//!
//! ```rust,no_run
//! use wordstock::sentencepiece::sentencepiece_processor;
//!
//! let spm = sentencepiece_processor("text_bpe_25000.model")?;
//! let ids = spm.encode("the pretrained spm model names");
//! println!("{ids:?}");
//! # Ok::<(), wordstock::WordstockError>(())
//! ```

mod bpe;
pub mod model;
pub mod model_proto;
pub mod normalizer;
pub mod pretrained;
pub mod processor;
mod unigram;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use model::{PieceId, SentencePieceModel};
#[doc(inline)]
pub use pretrained::{PRETRAINED_SP_MODEL, load_pretrained_sp_model};
#[doc(inline)]
pub use processor::{
    SentencePieceProcessor,
    SentencePieceTokenizer,
    sentencepiece_processor,
    sentencepiece_tokenizer,
};
