//! # SentencePiece Model Protobuf
//!
//! The subset of `sentencepiece_model.proto` the runtime reads.
//! Unlisted fields are skipped by the decoder.
//!
//! Fields are proto2 `optional`; the `*_or_default` helpers apply the
//! proto's declared defaults.

use crate::errors::{WSResult, WordstockError};

/// The serialized model.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ModelProto {
    /// The vocabulary, in id order.
    #[prost(message, repeated, tag = "1")]
    pub pieces: Vec<SentencePiece>,

    /// Training parameters; carries model type and special ids.
    #[prost(message, optional, tag = "2")]
    pub trainer_spec: Option<TrainerSpec>,

    /// Normalization parameters.
    #[prost(message, optional, tag = "3")]
    pub normalizer_spec: Option<NormalizerSpec>,
}

/// A vocabulary entry.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SentencePiece {
    /// The piece text.
    #[prost(string, optional, tag = "1")]
    pub piece: Option<String>,

    /// The piece score (log probability for unigram, merge priority for BPE).
    #[prost(float, optional, tag = "2")]
    pub score: Option<f32>,

    /// The piece kind, as a raw [`PieceType`] value.
    #[prost(enumeration = "PieceType", optional, tag = "3")]
    pub r#type: Option<i32>,
}

impl SentencePiece {
    /// Build a piece.
    pub fn new<S: Into<String>>(
        piece: S,
        score: f32,
        kind: PieceType,
    ) -> Self {
        Self {
            piece: Some(piece.into()),
            score: Some(score),
            r#type: Some(kind as i32),
        }
    }

    /// The piece kind; unknown values read as [`PieceType::Normal`].
    pub fn piece_type(&self) -> PieceType {
        self.r#type
            .and_then(|v| PieceType::try_from(v).ok())
            .unwrap_or(PieceType::Normal)
    }
}

/// The kind of a vocabulary entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PieceType {
    /// An ordinary piece.
    Normal = 1,

    /// The unknown piece.
    Unknown = 2,

    /// A control symbol (`<s>`, `</s>`, ...); never produced by encoding.
    Control = 3,

    /// A user-defined symbol; always kept atomic.
    UserDefined = 4,

    /// A piece excluded from encoding.
    Unused = 5,

    /// A byte-fallback piece, `<0xXX>`.
    Byte = 6,
}

/// The segmentation algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ModelType {
    /// Unigram language model; Viterbi segmentation.
    Unigram = 1,

    /// Byte-pair encoding; score-ordered merges.
    Bpe = 2,

    /// Whitespace-delimited words.
    Word = 3,

    /// Single characters.
    Char = 4,
}

/// Training parameters.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TrainerSpec {
    /// The segmentation algorithm.
    #[prost(enumeration = "ModelType", optional, tag = "3")]
    pub model_type: Option<i32>,

    /// The trained vocabulary size.
    #[prost(int32, optional, tag = "4")]
    pub vocab_size: Option<i32>,

    /// Decompose unknown characters into `<0xXX>` byte pieces.
    #[prost(bool, optional, tag = "35")]
    pub byte_fallback: Option<bool>,

    /// Id of the unknown piece.
    #[prost(int32, optional, tag = "40")]
    pub unk_id: Option<i32>,

    /// Id of the beginning-of-sentence piece; `-1` disables it.
    #[prost(int32, optional, tag = "41")]
    pub bos_id: Option<i32>,

    /// Id of the end-of-sentence piece; `-1` disables it.
    #[prost(int32, optional, tag = "42")]
    pub eos_id: Option<i32>,

    /// Id of the padding piece; `-1` disables it.
    #[prost(int32, optional, tag = "43")]
    pub pad_id: Option<i32>,

    /// Text emitted when decoding the unknown piece.
    #[prost(string, optional, tag = "44")]
    pub unk_surface: Option<String>,

    /// The unknown piece text.
    #[prost(string, optional, tag = "45")]
    pub unk_piece: Option<String>,
}

impl TrainerSpec {
    /// The model type; defaults to unigram.
    pub fn model_type_or_default(&self) -> WSResult<ModelType> {
        match self.model_type {
            None => Ok(ModelType::Unigram),
            Some(v) => ModelType::try_from(v)
                .map_err(|_| WordstockError::Model(format!("unknown model type {v}"))),
        }
    }

    /// Byte fallback; defaults to `false`.
    pub fn byte_fallback_or_default(&self) -> bool {
        self.byte_fallback.unwrap_or(false)
    }

    /// The unk id; defaults to `0`.
    pub fn unk_id_or_default(&self) -> i32 {
        self.unk_id.unwrap_or(0)
    }

    /// The bos id; defaults to `1`.
    pub fn bos_id_or_default(&self) -> i32 {
        self.bos_id.unwrap_or(1)
    }

    /// The eos id; defaults to `2`.
    pub fn eos_id_or_default(&self) -> i32 {
        self.eos_id.unwrap_or(2)
    }

    /// The pad id; defaults to `-1` (disabled).
    pub fn pad_id_or_default(&self) -> i32 {
        self.pad_id.unwrap_or(-1)
    }

    /// The unk surface; defaults to `" \u{2047} "`.
    pub fn unk_surface_or_default(&self) -> &str {
        self.unk_surface.as_deref().unwrap_or(DEFAULT_UNK_SURFACE)
    }
}

/// The default decoding of the unknown piece.
pub const DEFAULT_UNK_SURFACE: &str = " \u{2047} ";

/// Normalization parameters.
#[derive(Clone, PartialEq, prost::Message)]
pub struct NormalizerSpec {
    /// The normalization rule name, e.g. `nmt_nfkc`.
    #[prost(string, optional, tag = "1")]
    pub name: Option<String>,

    /// Prefix the text with a whitespace marker.
    #[prost(bool, optional, tag = "3")]
    pub add_dummy_prefix: Option<bool>,

    /// Strip and collapse whitespace.
    #[prost(bool, optional, tag = "4")]
    pub remove_extra_whitespaces: Option<bool>,

    /// Replace spaces with `\u{2581}`.
    #[prost(bool, optional, tag = "5")]
    pub escape_whitespaces: Option<bool>,
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn test_round_trip_and_defaults() {
        let proto = ModelProto {
            pieces: vec![
                SentencePiece::new("<unk>", 0.0, PieceType::Unknown),
                SentencePiece::new("\u{2581}a", -1.5, PieceType::Normal),
            ],
            trainer_spec: Some(TrainerSpec {
                model_type: Some(ModelType::Bpe as i32),
                ..Default::default()
            }),
            normalizer_spec: None,
        };
        let bytes = proto.encode_to_vec();
        let decoded = ModelProto::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, proto);

        let spec = decoded.trainer_spec.unwrap();
        assert_eq!(spec.model_type_or_default().unwrap(), ModelType::Bpe);
        assert_eq!(spec.unk_id_or_default(), 0);
        assert_eq!(spec.bos_id_or_default(), 1);
        assert_eq!(spec.eos_id_or_default(), 2);
        assert_eq!(spec.pad_id_or_default(), -1);
        assert!(!spec.byte_fallback_or_default());
        assert_eq!(spec.unk_surface_or_default(), DEFAULT_UNK_SURFACE);

        assert_eq!(decoded.pieces[0].piece_type(), PieceType::Unknown);
        let odd = SentencePiece {
            r#type: Some(99),
            ..Default::default()
        };
        assert_eq!(odd.piece_type(), PieceType::Normal);

        let bad = TrainerSpec {
            model_type: Some(42),
            ..Default::default()
        };
        assert!(matches!(
            bad.model_type_or_default(),
            Err(WordstockError::Model(_))
        ));
    }
}
