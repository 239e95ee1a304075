//! # SentencePiece Model
//!
//! A loaded [`ModelProto`], ready for encoding and decoding.

use std::{ops::Range, path::Path};

use prost::Message;

use crate::{
    errors::{WSResult, WordstockError},
    sentencepiece::{
        bpe::encode_bpe,
        model_proto::{ModelProto, ModelType, PieceType},
        normalizer::{Normalizer, SPACE_SYMBOL},
        unigram::encode_unigram,
    },
    types::{WSHashMap, hash_map_with_capacity},
};

/// Piece id type.
pub type PieceId = u32;

/// Score penalty of the unknown piece, below the lowest piece score.
pub const UNK_PENALTY: f32 = 10.0;

/// A piece of the normalized text chosen by an encoder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Span {
    /// The vocab id; `unk_id` for unknown text.
    pub id: PieceId,

    /// Byte range in the normalized text.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
struct PieceEntry {
    piece: String,
    score: f32,
    kind: PieceType,
}

/// A SentencePiece unigram or BPE model.
#[derive(Debug, Clone)]
pub struct SentencePieceModel {
    pieces: Vec<PieceEntry>,
    piece_to_id: WSHashMap<String, PieceId>,
    model_type: ModelType,
    normalizer: Normalizer,
    unk_id: PieceId,
    bos_id: Option<PieceId>,
    eos_id: Option<PieceId>,
    pad_id: Option<PieceId>,
    byte_fallback: bool,
    unk_surface: String,
    user_defined: Vec<PieceId>,
    max_piece_len: usize,
    min_score: f32,
}

fn optional_id(
    id: i32,
    len: usize,
) -> Option<PieceId> {
    usize::try_from(id)
        .ok()
        .filter(|&id| id < len)
        .map(|id| id as PieceId)
}

/// Parse `<0xXX>`.
fn parse_byte_piece(piece: &str) -> Option<u8> {
    let hex = piece.strip_prefix("<0x")?.strip_suffix('>')?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

impl SentencePieceModel {
    /// Load a serialized model file.
    ///
    /// ## Errors
    /// * `Io` if the file cannot be read.
    /// * `Model` if it is not a valid model.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> WSResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("loading sentencepiece model {}", path.display());
        Self::from_bytes(&bytes)
    }

    /// Load a serialized model.
    pub fn from_bytes(bytes: &[u8]) -> WSResult<Self> {
        Self::from_proto(ModelProto::decode(bytes)?)
    }

    /// Build a model from a decoded proto.
    ///
    /// ## Errors
    /// `Model` if the vocab is empty, a piece is empty or duplicated, the
    /// unk id is out of range, or the model type is not unigram or BPE.
    pub fn from_proto(proto: ModelProto) -> WSResult<Self> {
        let trainer = proto.trainer_spec.unwrap_or_default();
        let model_type = trainer.model_type_or_default()?;
        if !matches!(model_type, ModelType::Unigram | ModelType::Bpe) {
            return Err(WordstockError::Model(format!(
                "unsupported model type {model_type:?}"
            )));
        }
        if proto.pieces.is_empty() {
            return Err(WordstockError::Model("model has no pieces".to_string()));
        }

        let len = proto.pieces.len();
        let mut pieces = Vec::with_capacity(len);
        let mut piece_to_id = hash_map_with_capacity(len);
        let mut user_defined = Vec::new();
        let mut max_piece_len = 0;
        let mut min_score = f32::INFINITY;

        for (idx, sp) in proto.pieces.iter().enumerate() {
            let kind = sp.piece_type();
            let piece = sp.piece.clone().unwrap_or_default();
            let score = sp.score.unwrap_or(0.0);
            if piece.is_empty() {
                return Err(WordstockError::Model(format!("piece {idx} is empty")));
            }
            if piece_to_id
                .insert(piece.clone(), idx as PieceId)
                .is_some()
            {
                return Err(WordstockError::Model(format!(
                    "duplicate piece {piece:?}"
                )));
            }
            match kind {
                PieceType::Normal => {
                    max_piece_len = max_piece_len.max(piece.len());
                    min_score = min_score.min(score);
                }
                PieceType::UserDefined => user_defined.push(idx as PieceId),
                _ => {}
            }
            pieces.push(PieceEntry { piece, score, kind });
        }
        if !min_score.is_finite() {
            min_score = 0.0;
        }
        user_defined.sort_by_key(|&id| std::cmp::Reverse(pieces[id as usize].piece.len()));

        let unk_id = optional_id(trainer.unk_id_or_default(), len).ok_or_else(|| {
            WordstockError::Model(format!(
                "unk id {} out of range for {len} pieces",
                trainer.unk_id_or_default()
            ))
        })?;

        Ok(Self {
            pieces,
            piece_to_id,
            model_type,
            normalizer: Normalizer::from_spec(proto.normalizer_spec.as_ref()),
            unk_id,
            bos_id: optional_id(trainer.bos_id_or_default(), len),
            eos_id: optional_id(trainer.eos_id_or_default(), len),
            pad_id: optional_id(trainer.pad_id_or_default(), len),
            byte_fallback: trainer.byte_fallback_or_default(),
            unk_surface: trainer.unk_surface_or_default().to_string(),
            user_defined,
            max_piece_len,
            min_score,
        })
    }

    /// The segmentation algorithm.
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// The number of pieces.
    pub fn vocab_size(&self) -> usize {
        self.pieces.len()
    }

    /// The unknown piece id.
    pub fn unk_id(&self) -> PieceId {
        self.unk_id
    }

    /// The beginning-of-sentence id, if enabled.
    pub fn bos_id(&self) -> Option<PieceId> {
        self.bos_id
    }

    /// The end-of-sentence id, if enabled.
    pub fn eos_id(&self) -> Option<PieceId> {
        self.eos_id
    }

    /// The padding id, if enabled.
    pub fn pad_id(&self) -> Option<PieceId> {
        self.pad_id
    }

    /// Does this model decompose unknown text into byte pieces?
    pub fn byte_fallback(&self) -> bool {
        self.byte_fallback
    }

    /// The id of `piece`, or the unk id.
    pub fn piece_to_id(
        &self,
        piece: &str,
    ) -> PieceId {
        self.piece_to_id
            .get(piece)
            .copied()
            .unwrap_or(self.unk_id)
    }

    /// The piece for `id`.
    ///
    /// ## Errors
    /// `IndexOutOfRange` if `id >= vocab_size()`.
    pub fn id_to_piece(
        &self,
        id: PieceId,
    ) -> WSResult<&str> {
        self.pieces
            .get(id as usize)
            .map(|e| e.piece.as_str())
            .ok_or(WordstockError::IndexOutOfRange {
                index: id as usize,
                len: self.pieces.len(),
            })
    }

    /// The score of piece `id`.
    pub(crate) fn score(
        &self,
        id: PieceId,
    ) -> f32 {
        self.pieces[id as usize].score
    }

    /// The score given to unknown characters.
    pub(crate) fn unk_score(&self) -> f32 {
        self.min_score - UNK_PENALTY
    }

    /// The longest encodable piece, in bytes.
    pub(crate) fn max_piece_len(&self) -> usize {
        self.max_piece_len
    }

    /// The id of `text` if it is an encodable (normal) piece.
    pub(crate) fn normal_piece_id(
        &self,
        text: &str,
    ) -> Option<PieceId> {
        self.piece_to_id
            .get(text)
            .copied()
            .filter(|&id| self.pieces[id as usize].kind == PieceType::Normal)
    }

    /// Normalize, then segment into spans of the normalized text.
    fn encode_spans(
        &self,
        text: &str,
    ) -> (String, Vec<Span>) {
        let normalized = self.normalizer.normalize(text);
        let mut spans = Vec::new();

        let mut segment_start = 0;
        let mut pos = 0;
        while pos < normalized.len() {
            let rest = &normalized[pos..];
            let user = self
                .user_defined
                .iter()
                .find(|&&id| rest.starts_with(&self.pieces[id as usize].piece));
            match user {
                Some(&id) => {
                    self.encode_segment(&normalized, segment_start..pos, &mut spans);
                    let end = pos + self.pieces[id as usize].piece.len();
                    spans.push(Span { id, range: pos..end });
                    pos = end;
                    segment_start = end;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        self.encode_segment(&normalized, segment_start..normalized.len(), &mut spans);

        (normalized, spans)
    }

    fn encode_segment(
        &self,
        normalized: &str,
        range: Range<usize>,
        spans: &mut Vec<Span>,
    ) {
        if range.is_empty() {
            return;
        }
        let offset = range.start;
        let segment = &normalized[range];
        let encoded = match self.model_type {
            ModelType::Bpe => encode_bpe(self, segment),
            _ => encode_unigram(self, segment),
        };
        spans.extend(encoded.into_iter().map(|s| Span {
            id: s.id,
            range: s.range.start + offset..s.range.end + offset,
        }));
    }

    /// The byte-fallback ids for unknown text, if every byte piece exists.
    fn byte_ids(
        &self,
        text: &str,
    ) -> Option<Vec<PieceId>> {
        if !self.byte_fallback {
            return None;
        }
        text.bytes()
            .map(|b| self.piece_to_id.get(&format!("<0x{b:02X}>")).copied())
            .collect()
    }

    /// Segment `text` into pieces.
    ///
    /// Unknown text is returned as its surface form, or as `<0xXX>`
    /// pieces under byte fallback.
    pub fn encode_as_pieces(
        &self,
        text: &str,
    ) -> Vec<String> {
        let (normalized, spans) = self.encode_spans(text);
        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
            let surface = &normalized[span.range];
            if span.id != self.unk_id {
                out.push(self.pieces[span.id as usize].piece.clone());
                continue;
            }
            match self.byte_ids(surface) {
                Some(ids) => out.extend(
                    ids.into_iter()
                        .map(|id| self.pieces[id as usize].piece.clone()),
                ),
                None => out.push(surface.to_string()),
            }
        }
        out
    }

    /// Segment `text` into piece ids.
    pub fn encode_as_ids(
        &self,
        text: &str,
    ) -> Vec<PieceId> {
        let (normalized, spans) = self.encode_spans(text);
        let mut out = Vec::with_capacity(spans.len());
        for span in spans {
            if span.id != self.unk_id {
                out.push(span.id);
                continue;
            }
            match self.byte_ids(&normalized[span.range]) {
                Some(ids) => out.extend(ids),
                None => out.push(self.unk_id),
            }
        }
        out
    }

    /// Join pieces back into text.
    ///
    /// Control pieces are dropped; runs of `<0xXX>` pieces are decoded as UTF-8.
    pub fn decode_pieces<S: AsRef<str>>(
        &self,
        pieces: &[S],
    ) -> String {
        let mut decoder = PieceDecoder::default();
        for piece in pieces {
            let piece = piece.as_ref();
            let kind = self
                .piece_to_id
                .get(piece)
                .map(|&id| self.pieces[id as usize].kind);
            match kind {
                Some(PieceType::Control) => {}
                Some(PieceType::Byte) => match parse_byte_piece(piece) {
                    Some(b) => decoder.push_byte(b),
                    None => decoder.push_text(piece),
                },
                _ => decoder.push_text(piece),
            }
        }
        decoder.finish(self.normalizer.add_dummy_prefix())
    }

    /// Decode piece ids back into text.
    ///
    /// ## Errors
    /// `IndexOutOfRange` for an id outside the vocab.
    pub fn decode_ids(
        &self,
        ids: &[PieceId],
    ) -> WSResult<String> {
        let mut decoder = PieceDecoder::default();
        for &id in ids {
            let piece = self.id_to_piece(id)?;
            match self.pieces[id as usize].kind {
                PieceType::Control => {}
                PieceType::Unknown => decoder.push_text(&self.unk_surface),
                PieceType::Byte => match parse_byte_piece(piece) {
                    Some(b) => decoder.push_byte(b),
                    None => decoder.push_text(piece),
                },
                _ => decoder.push_text(piece),
            }
        }
        Ok(decoder.finish(self.normalizer.add_dummy_prefix()))
    }
}

/// Accumulates decoded text and pending fallback bytes.
#[derive(Default)]
struct PieceDecoder {
    text: String,
    bytes: Vec<u8>,
}

impl PieceDecoder {
    fn flush(&mut self) {
        if !self.bytes.is_empty() {
            self.text.push_str(&String::from_utf8_lossy(&self.bytes));
            self.bytes.clear();
        }
    }

    fn push_byte(
        &mut self,
        b: u8,
    ) {
        self.bytes.push(b);
    }

    fn push_text(
        &mut self,
        text: &str,
    ) {
        self.flush();
        self.text.push_str(text);
    }

    fn finish(
        mut self,
        strip_prefix: bool,
    ) -> String {
        self.flush();
        let text = self.text.replace(SPACE_SYMBOL, " ");
        match text.strip_prefix(' ') {
            Some(rest) if strip_prefix => rest.to_string(),
            _ => text,
        }
    }
}
