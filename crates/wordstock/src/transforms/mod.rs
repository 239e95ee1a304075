//! # Text Transforms
//!
//! Tokenizers, regex normalization, and the lookups which turn token
//! sequences into indices or vectors.
//!
//! Every transform is a plain `Send + Sync` value, so a single instance
//! can be shared across worker threads.

pub mod regex_tokenizer;
pub mod tokenize;
pub mod vocab_transform;

#[doc(inline)]
pub use regex_tokenizer::{
    BASIC_ENGLISH_RULES,
    ConstReplaceRule,
    RegexReplacer,
    RegexTokenizer,
    basic_english_normalize,
    custom_replace,
};
#[doc(inline)]
pub use tokenize::{Lowercase, Sequential, TextTransform, Tokenize, WhitespaceTokenizer};
#[doc(inline)]
pub use vocab_transform::{VectorTransform, VocabTransform};
