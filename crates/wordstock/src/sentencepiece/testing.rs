//! # Toy Models
//!
//! Small in-memory models for tests.

use crate::sentencepiece::model_proto::{
    ModelProto,
    ModelType,
    PieceType,
    SentencePiece,
    TrainerSpec,
};

fn piece(
    text: &str,
    score: f32,
) -> SentencePiece {
    SentencePiece::new(text, score, PieceType::Normal)
}

fn specials() -> Vec<SentencePiece> {
    vec![
        SentencePiece::new("<unk>", 0.0, PieceType::Unknown),
        SentencePiece::new("<s>", 0.0, PieceType::Control),
        SentencePiece::new("</s>", 0.0, PieceType::Control),
    ]
}

/// A unigram model which segments `"the pretrained model"` as
/// `["▁the", "▁pre", "trained", "▁model"]`.
pub fn toy_unigram_proto() -> ModelProto {
    let mut pieces = specials();
    pieces.extend([
        piece("▁the", -1.0),
        piece("the", -1.5),
        piece("▁", -2.0),
        piece("t", -3.0),
        piece("h", -3.0),
        piece("e", -3.0),
        piece("▁pre", -2.0),
        piece("trained", -2.5),
        piece("tr", -4.0),
        piece("ain", -4.0),
        piece("ed", -4.0),
        piece("▁model", -2.0),
        piece("▁mod", -3.0),
        piece("el", -3.0),
        piece("r", -3.0),
        piece("a", -3.0),
        piece("i", -3.0),
        piece("n", -3.0),
        piece("d", -3.0),
        piece("p", -3.0),
        piece("m", -3.0),
        piece("o", -3.0),
        piece("l", -3.0),
    ]);
    ModelProto {
        pieces,
        trainer_spec: Some(TrainerSpec {
            model_type: Some(ModelType::Unigram as i32),
            ..Default::default()
        }),
        normalizer_spec: None,
    }
}

/// A BPE model which segments `"the low"` as `["▁the", "▁low"]`.
///
/// Byte pieces exist for the UTF-8 encoding of `€` only.
pub fn toy_bpe_proto(byte_fallback: bool) -> ModelProto {
    let mut pieces = specials();
    pieces.extend([
        piece("▁t", -1.0),
        piece("he", -2.0),
        piece("▁the", -3.0),
        piece("lo", -4.0),
        piece("▁lo", -5.0),
        piece("ow", -6.0),
        piece("low", -7.0),
        piece("▁low", -8.0),
        piece("aa", -1.5),
    ]);
    for c in ["▁", "t", "h", "e", "l", "o", "w", "a"] {
        pieces.push(piece(c, -10.0));
    }
    for b in ["<0xE2>", "<0x82>", "<0xAC>"] {
        pieces.push(SentencePiece::new(b, 0.0, PieceType::Byte));
    }
    ModelProto {
        pieces,
        trainer_spec: Some(TrainerSpec {
            model_type: Some(ModelType::Bpe as i32),
            byte_fallback: Some(byte_fallback),
            ..Default::default()
        }),
        normalizer_spec: None,
    }
}
