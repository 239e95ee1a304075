//! # Unigram Encoder
//!
//! Viterbi search over the piece lattice of a normalized segment,
//! maximizing the summed piece scores.

use crate::sentencepiece::model::{PieceId, SentencePieceModel, Span};

#[derive(Clone, Copy)]
struct BestPath {
    score: f32,
    start: usize,
    id: PieceId,
}

/// Segment `text` with the unigram model.
///
/// Characters with no single-character piece become unk candidates
/// scored below every real piece; adjacent unks are merged.
pub(crate) fn encode_unigram(
    model: &SentencePieceModel,
    text: &str,
) -> Vec<Span> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let n = bounds.len() - 1;
    if n == 0 {
        return Vec::new();
    }

    let unk_id = model.unk_id();
    let unk_score = model.unk_score();
    let max_len = model.max_piece_len();

    let mut best: Vec<Option<BestPath>> = vec![None; n + 1];
    best[0] = Some(BestPath {
        score: 0.0,
        start: 0,
        id: unk_id,
    });

    for i in 0..n {
        let Some(here) = best[i] else {
            continue;
        };
        let start = bounds[i];
        let mut has_single = false;

        for j in i + 1..=n {
            let end = bounds[j];
            if end - start > max_len {
                break;
            }
            let Some(id) = model.normal_piece_id(&text[start..end]) else {
                continue;
            };
            if j == i + 1 {
                has_single = true;
            }
            relax(&mut best[j], here.score + model.score(id), i, id);
        }

        if !has_single {
            relax(&mut best[i + 1], here.score + unk_score, i, unk_id);
        }
    }

    // Backtrack from the end, merging runs of unknowns.
    let mut spans: Vec<Span> = Vec::new();
    let mut pos = n;
    while pos > 0 {
        let Some(step) = best[pos] else {
            break;
        };
        let range = bounds[step.start]..bounds[pos];
        match spans.last_mut() {
            Some(last) if step.id == unk_id && last.id == unk_id => {
                last.range.start = range.start;
            }
            _ => spans.push(Span { id: step.id, range }),
        }
        pos = step.start;
    }
    spans.reverse();
    spans
}

fn relax(
    slot: &mut Option<BestPath>,
    score: f32,
    start: usize,
    id: PieceId,
) {
    if slot.is_none_or(|b| score > b.score) {
        *slot = Some(BestPath { score, start, id });
    }
}

#[cfg(test)]
mod tests {
    use crate::sentencepiece::{model::SentencePieceModel, testing::toy_unigram_proto};

    #[test]
    fn test_viterbi() {
        let model = SentencePieceModel::from_proto(toy_unigram_proto()).unwrap();

        assert_eq!(
            model.encode_as_pieces("the pretrained model"),
            vec!["▁the", "▁pre", "trained", "▁model"]
        );
        assert_eq!(model.encode_as_ids("the pretrained model"), vec![3, 9, 10, 14]);
        assert_eq!(model.encode_as_pieces("the   model "), vec!["▁the", "▁model"]);
        assert!(model.encode_as_ids("").is_empty());
    }

    #[test]
    fn test_unknowns_merge() {
        let model = SentencePieceModel::from_proto(toy_unigram_proto()).unwrap();

        assert_eq!(model.encode_as_pieces("the zz"), vec!["▁the", "▁", "zz"]);
        assert_eq!(model.encode_as_ids("the zz"), vec![3, 5, 0]);
        assert_eq!(model.encode_as_ids("zzthe"), vec![5, 0, 4]);
        assert_eq!(model.decode_ids(&[3, 5, 0]).unwrap(), "the  \u{2047} ");
    }
}
