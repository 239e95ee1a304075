//! # Token Counter
//!
//! Frequency counting with first-occurrence tracking; counters over
//! disjoint chunks of a corpus can be merged in any order.

use crate::types::{WSHashMap, hash_map_with_capacity};

/// The count and first position of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStats {
    /// How often the token was seen.
    pub count: usize,

    /// The global position at which the token was first seen.
    ///
    /// Token files and iterators count token positions; raw text files
    /// count line indices.
    pub first_seen: usize,
}

/// How counted tokens are ordered when emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenOrder {
    /// Frequency descending; ties by first occurrence.
    #[default]
    FrequencyThenFirstSeen,

    /// Frequency descending; ties by lexicographic token order.
    FrequencyThenLexical,
}

/// Token frequency counter.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    counts: WSHashMap<String, TokenStats>,
}

impl TokenCounter {
    /// Create a counter with space for `capacity` distinct tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: hash_map_with_capacity(capacity),
        }
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Is the counter empty?
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The stats for a token.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<TokenStats> {
        self.counts.get(token).copied()
    }

    /// Count one occurrence of `token`, seen at global position `position`.
    ///
    /// Empty tokens are ignored.
    pub fn add(
        &mut self,
        token: &str,
        position: usize,
    ) {
        if token.is_empty() {
            return;
        }
        match self.counts.get_mut(token) {
            Some(stats) => {
                stats.count += 1;
                stats.first_seen = stats.first_seen.min(position);
            }
            None => {
                self.counts.insert(
                    token.to_string(),
                    TokenStats {
                        count: 1,
                        first_seen: position,
                    },
                );
            }
        }
    }

    /// Merge another counter into this one.
    pub fn merge(
        &mut self,
        other: TokenCounter,
    ) {
        for (token, stats) in other.counts {
            self.counts
                .entry(token)
                .and_modify(|s| {
                    s.count += stats.count;
                    s.first_seen = s.first_seen.min(stats.first_seen);
                })
                .or_insert(stats);
        }
    }

    /// Remove a token, returning its stats.
    pub fn remove(
        &mut self,
        token: &str,
    ) -> Option<TokenStats> {
        self.counts.remove(token)
    }

    /// Emit the tokens seen at least `min_freq` times, in `order`.
    pub fn into_sorted_tokens(
        self,
        min_freq: usize,
        order: TokenOrder,
    ) -> Vec<String> {
        let mut entries: Vec<(String, TokenStats)> = self
            .counts
            .into_iter()
            .filter(|(_, stats)| stats.count >= min_freq)
            .collect();

        entries.sort_by(|(ta, sa), (tb, sb)| {
            sb.count.cmp(&sa.count).then_with(|| match order {
                TokenOrder::FrequencyThenFirstSeen => sa.first_seen.cmp(&sb.first_seen),
                TokenOrder::FrequencyThenLexical => ta.cmp(tb),
            })
        });

        entries.into_iter().map(|(token, _)| token).collect()
    }
}
