//! # Vocabularies
//!
//! [`Vocab`] is the token/index mapping; the [`vocab_factory`] functions
//! build one from files or token streams.

pub mod token_counter;
pub mod token_vocab;
pub mod vocab_factory;

#[doc(inline)]
pub use token_counter::{TokenCounter, TokenOrder, TokenStats};
#[doc(inline)]
pub use token_vocab::Vocab;
#[doc(inline)]
pub use vocab_factory::{
    VocabOptions,
    build_vocab_from_iterator,
    build_vocab_from_text_file,
    load_vocab_from_file,
};
