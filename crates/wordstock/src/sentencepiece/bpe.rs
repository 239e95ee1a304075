//! # BPE Encoder
//!
//! Score-ordered merging with a binary max-heap over a doubly-linked list
//! of symbols; the highest-scoring, leftmost pair merges first.

use std::collections::BinaryHeap;

use crate::sentencepiece::model::{PieceId, SentencePieceModel, Span};

const NONE: u32 = u32::MAX;

struct Node {
    start: usize,
    end: usize,
    prev: u32,
    next: u32,
}

/// Heap entry representing a potential merge.
///
/// `left_end` and `right_end` are stored for O(1) stale-entry detection.
struct MergeEntry {
    score: f32,
    left_idx: u32,
    left_end: usize,
    right_end: usize,
}

impl PartialEq for MergeEntry {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for MergeEntry {}

impl Ord for MergeEntry {
    fn cmp(
        &self,
        other: &Self,
    ) -> std::cmp::Ordering {
        self.score
            .total_cmp(&other.score)
            .then(other.left_idx.cmp(&self.left_idx))
    }
}

impl PartialOrd for MergeEntry {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn push_pair(
    model: &SentencePieceModel,
    text: &str,
    nodes: &[Node],
    heap: &mut BinaryHeap<MergeEntry>,
    left: u32,
    right: u32,
) {
    let (l, r) = (&nodes[left as usize], &nodes[right as usize]);
    if let Some(id) = model.normal_piece_id(&text[l.start..r.end]) {
        heap.push(MergeEntry {
            score: model.score(id),
            left_idx: left,
            left_end: l.end,
            right_end: r.end,
        });
    }
}

/// Segment `text` with the BPE model.
///
/// Symbols left outside the vocab map to the unk id.
pub(crate) fn encode_bpe(
    model: &SentencePieceModel,
    text: &str,
) -> Vec<Span> {
    let mut nodes: Vec<Node> = Vec::with_capacity(text.len());
    for (idx, (start, c)) in text.char_indices().enumerate() {
        nodes.push(Node {
            start,
            end: start + c.len_utf8(),
            prev: if idx == 0 { NONE } else { idx as u32 - 1 },
            next: idx as u32 + 1,
        });
    }
    let n = nodes.len();
    if n == 0 {
        return Vec::new();
    }
    nodes[n - 1].next = NONE;

    let mut heap = BinaryHeap::new();
    for i in 0..(n - 1) as u32 {
        push_pair(model, text, &nodes, &mut heap, i, i + 1);
    }

    while let Some(entry) = heap.pop() {
        let li = entry.left_idx as usize;
        let ri_u32 = nodes[li].next;
        if ri_u32 == NONE {
            continue;
        }
        let ri = ri_u32 as usize;

        // Both symbols must be unchanged since the entry was pushed.
        if nodes[li].end != entry.left_end
            || nodes[ri].end != entry.right_end
            || nodes[ri].prev != entry.left_idx
        {
            continue;
        }

        // Merge: left absorbs right.
        nodes[li].end = nodes[ri].end;
        let right_next = nodes[ri].next;
        nodes[li].next = right_next;
        if right_next != NONE {
            nodes[right_next as usize].prev = entry.left_idx;
        }
        nodes[ri].prev = NONE;
        nodes[ri].next = NONE;

        let left_prev = nodes[li].prev;
        if left_prev != NONE {
            push_pair(model, text, &nodes, &mut heap, left_prev, entry.left_idx);
        }
        if right_next != NONE {
            push_pair(model, text, &nodes, &mut heap, entry.left_idx, right_next);
        }
    }

    let mut spans = Vec::new();
    let mut idx = 0u32;
    while idx != NONE {
        let node = &nodes[idx as usize];
        let range = node.start..node.end;
        let id: PieceId = model
            .normal_piece_id(&text[range.clone()])
            .unwrap_or(model.unk_id());
        spans.push(Span { id, range });
        idx = node.next;
    }
    spans
}
