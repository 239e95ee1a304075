//! # Tokenizer and Processor Handles
//!
//! Cheap-to-clone handles sharing one [`SentencePieceModel`].

use std::{path::Path, sync::Arc};

use crate::{
    errors::WSResult,
    sentencepiece::model::{PieceId, SentencePieceModel},
    transforms::Tokenize,
};

/// Text to sentencepiece pieces.
#[derive(Debug, Clone)]
pub struct SentencePieceTokenizer {
    model: Arc<SentencePieceModel>,
}

impl SentencePieceTokenizer {
    /// Wrap a model.
    pub fn new(model: Arc<SentencePieceModel>) -> Self {
        Self { model }
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<SentencePieceModel> {
        &self.model
    }

    /// Join pieces back into text.
    pub fn decode<S: AsRef<str>>(
        &self,
        pieces: &[S],
    ) -> String {
        self.model.decode_pieces(pieces)
    }
}

impl Tokenize for SentencePieceTokenizer {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        self.model.encode_as_pieces(text)
    }
}

impl From<SentencePieceModel> for SentencePieceTokenizer {
    fn from(model: SentencePieceModel) -> Self {
        Self::new(Arc::new(model))
    }
}

/// Text to sentencepiece ids.
#[derive(Debug, Clone)]
pub struct SentencePieceProcessor {
    model: Arc<SentencePieceModel>,
}

impl SentencePieceProcessor {
    /// Wrap a model.
    pub fn new(model: Arc<SentencePieceModel>) -> Self {
        Self { model }
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<SentencePieceModel> {
        &self.model
    }

    /// Encode `text` into piece ids.
    pub fn encode(
        &self,
        text: &str,
    ) -> Vec<PieceId> {
        self.model.encode_as_ids(text)
    }

    /// Encode a batch of texts.
    pub fn encode_batch<S: AsRef<str>>(
        &self,
        batch: &[S],
    ) -> Vec<Vec<PieceId>> {
        batch
            .iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// Decode piece ids back into text.
    ///
    /// ## Errors
    /// `IndexOutOfRange` for an id outside the vocab.
    pub fn decode(
        &self,
        ids: &[PieceId],
    ) -> WSResult<String> {
        self.model.decode_ids(ids)
    }
}

impl From<SentencePieceModel> for SentencePieceProcessor {
    fn from(model: SentencePieceModel) -> Self {
        Self::new(Arc::new(model))
    }
}

/// Load a model file as a [`SentencePieceTokenizer`].
///
/// ## Errors
/// * `Io` if the file cannot be read.
/// * `Model` if it is not a valid model.
pub fn sentencepiece_tokenizer<P: AsRef<Path>>(path: P) -> WSResult<SentencePieceTokenizer> {
    Ok(SentencePieceModel::from_file(path)?.into())
}

/// Load a model file as a [`SentencePieceProcessor`].
///
/// ## Errors
/// * `Io` if the file cannot be read.
/// * `Model` if it is not a valid model.
pub fn sentencepiece_processor<P: AsRef<Path>>(path: P) -> WSResult<SentencePieceProcessor> {
    Ok(SentencePieceModel::from_file(path)?.into())
}

#[cfg(test)]
mod tests {
    use prost::Message;
    use tempdir::TempDir;

    use super::*;
    use crate::{
        sentencepiece::testing::toy_unigram_proto,
        types::{check_is_send, check_is_sync},
        vocab::{VocabOptions, build_vocab_from_iterator},
    };

    #[test]
    fn test_handles_share_model() {
        check_is_send::<SentencePieceTokenizer>();
        check_is_sync::<SentencePieceTokenizer>();

        let model = Arc::new(SentencePieceModel::from_proto(toy_unigram_proto()).unwrap());
        let tokenizer = SentencePieceTokenizer::new(model.clone());
        let processor = SentencePieceProcessor::new(model.clone());
        let copy = processor.clone();
        assert!(Arc::ptr_eq(copy.model(), tokenizer.model()));

        assert_eq!(tokenizer.tokenize("the model"), vec!["▁the", "▁model"]);
        assert_eq!(tokenizer.decode(&["▁the", "▁model"]), "the model");
        assert_eq!(processor.encode("the model"), vec![3, 14]);
        assert_eq!(
            processor.encode_batch(&["the", "model"]),
            vec![vec![3], vec![14]]
        );
        assert_eq!(processor.decode(&[3, 14]).unwrap(), "the model");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new("spm").unwrap();
        let path = dir.path().join("toy.model");
        std::fs::write(&path, toy_unigram_proto().encode_to_vec()).unwrap();

        let tokenizer = sentencepiece_tokenizer(&path).unwrap();
        let processor = sentencepiece_processor(&path).unwrap();
        assert_eq!(
            tokenizer.tokenize("the pretrained model"),
            vec!["▁the", "▁pre", "trained", "▁model"]
        );
        assert_eq!(processor.encode("the pretrained model"), vec![3, 9, 10, 14]);

        assert!(sentencepiece_processor(dir.path().join("missing.model")).is_err());
    }

    #[test]
    fn test_tokenizer_feeds_vocab() {
        let tokenizer: SentencePieceTokenizer =
            SentencePieceModel::from_proto(toy_unigram_proto())
                .unwrap()
                .into();
        let lines = ["the model", "the pretrained model"];
        let vocab = build_vocab_from_iterator(
            lines.iter().map(|line| tokenizer.tokenize(line)),
            VocabOptions::default(),
        )
        .unwrap();
        assert_eq!(vocab.get_itos()[..2], ["▁model", "▁the"]);
        assert_eq!(vocab.len(), 4);
    }
}
