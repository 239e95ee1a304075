//! # Vocab Factories
//!
//! Build a [`Vocab`] from token files, raw text, or token iterators.

use std::path::Path;

use crate::{
    concurrency::map_chunks,
    errors::{WSResult, WordstockError},
    text_lines::utf8_lines,
    transforms::Tokenize,
    vocab::{
        token_counter::{TokenCounter, TokenOrder},
        token_vocab::Vocab,
    },
};

/// Options for the vocab factories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabOptions {
    /// Minimum count for a token to be kept; must be `>= 1`.
    pub min_freq: usize,

    /// Number of chunks to count in parallel.
    pub num_cpus: usize,

    /// Special tokens added to the vocab regardless of frequency.
    pub specials: Vec<String>,

    /// Place specials before (`true`) or after (`false`) counted tokens.
    pub special_first: bool,

    /// A token whose index becomes the default index.
    pub default_token: Option<String>,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            min_freq: 1,
            num_cpus: 4,
            specials: Vec::new(),
            special_first: true,
            default_token: None,
        }
    }
}

impl VocabOptions {
    /// Set the minimum frequency.
    pub fn with_min_freq(
        self,
        min_freq: usize,
    ) -> Self {
        Self { min_freq, ..self }
    }

    /// Set the number of parallel chunks.
    pub fn with_num_cpus(
        self,
        num_cpus: usize,
    ) -> Self {
        Self { num_cpus, ..self }
    }

    /// Set the special tokens.
    pub fn with_specials<I>(
        self,
        specials: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            specials: specials.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Set where the specials are placed.
    pub fn with_special_first(
        self,
        special_first: bool,
    ) -> Self {
        Self {
            special_first,
            ..self
        }
    }

    /// Set the default token.
    pub fn with_default_token<S: Into<String>>(
        self,
        default_token: Option<S>,
    ) -> Self {
        Self {
            default_token: default_token.map(Into::into),
            ..self
        }
    }

    fn validate(&self) -> WSResult<()> {
        if self.min_freq == 0 {
            return Err(WordstockError::InvalidValue(
                "min_freq must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Assemble the final vocab from sorted counted tokens.
    fn finish(
        &self,
        counted: Vec<String>,
    ) -> WSResult<Vocab> {
        let counted = counted
            .into_iter()
            .filter(|t| !self.specials.contains(t));

        let specials = self.specials.iter().cloned();
        let mut vocab = if self.special_first {
            Vocab::new(specials.chain(counted))?
        } else {
            Vocab::new(counted.chain(specials))?
        };

        if let Some(token) = &self.default_token {
            let index = vocab.get(token).ok_or_else(|| {
                WordstockError::InvalidValue(format!(
                    "default token {token:?} is not in the vocab"
                ))
            })?;
            vocab.set_default_index(Some(index));
        }
        Ok(vocab)
    }
}

/// Count tokens, position-tagged, in parallel chunks.
fn count_chunked<T, F>(
    items: &[T],
    num_cpus: usize,
    count: F,
) -> TokenCounter
where
    T: Sync,
    F: Fn(usize, &[T], &mut TokenCounter) + Send + Sync,
{
    map_chunks(items, num_cpus, |offset, chunk| {
        let mut counter = TokenCounter::default();
        count(offset, chunk, &mut counter);
        counter
    })
    .into_iter()
    .fold(TokenCounter::default(), |mut acc, counter| {
        acc.merge(counter);
        acc
    })
}

/// Load a vocab from a file holding one token per line.
///
/// Lines are trimmed; empty and non-UTF-8 lines are skipped.
///
/// ## Arguments
/// * `path` - the token file.
/// * `options` - frequency cutoff, parallelism, and specials.
///
/// ## Returns
/// Tokens seen at least `min_freq` times, ordered by frequency descending,
/// ties broken by first occurrence.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn load_vocab_from_file<P: AsRef<Path>>(
    path: P,
    options: VocabOptions,
) -> WSResult<Vocab> {
    options.validate()?;
    let path = path.as_ref();
    let content = std::fs::read(path)?;

    let tokens: Vec<&str> = utf8_lines(&content, path)
        .lines
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let counter = count_chunked(&tokens, options.num_cpus, |offset, chunk, counter| {
        for (idx, token) in chunk.iter().enumerate() {
            counter.add(token, offset + idx);
        }
    });
    log::debug!(
        "counted {} distinct tokens in {} lines of {}",
        counter.len(),
        tokens.len(),
        path.display()
    );

    options.finish(counter.into_sorted_tokens(options.min_freq, TokenOrder::FrequencyThenFirstSeen))
}

/// Count the tokens of each line; positions are line indices.
fn count_text_lines<T>(
    lines: &[&str],
    tokenizer: &T,
    num_cpus: usize,
) -> TokenCounter
where
    T: Tokenize + ?Sized,
{
    count_chunked(lines, num_cpus, |offset, chunk, counter| {
        for (idx, line) in chunk.iter().enumerate() {
            for token in tokenizer.tokenize(line) {
                counter.add(&token, offset + idx);
            }
        }
    })
}

/// Build a vocab by tokenizing each line of a raw text file.
///
/// Non-UTF-8 lines are skipped with a warning.
///
/// ## Arguments
/// * `path` - the text file.
/// * `tokenizer` - applied to each line.
/// * `options` - frequency cutoff, parallelism, and specials.
///
/// ## Returns
/// Tokens seen at least `min_freq` times, ordered by frequency descending,
/// ties broken by lexicographic order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn build_vocab_from_text_file<P, T>(
    path: P,
    tokenizer: &T,
    options: VocabOptions,
) -> WSResult<Vocab>
where
    P: AsRef<Path>,
    T: Tokenize + ?Sized,
{
    options.validate()?;
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    let lines = utf8_lines(&content, path).lines;

    let counter = count_text_lines(&lines, tokenizer, options.num_cpus);
    log::debug!(
        "counted {} distinct tokens in {} lines of {}",
        counter.len(),
        lines.len(),
        path.display()
    );

    options.finish(counter.into_sorted_tokens(options.min_freq, TokenOrder::FrequencyThenLexical))
}

/// Build a vocab from an iterator of token sequences.
///
/// Ordering matches [`build_vocab_from_text_file`].
pub fn build_vocab_from_iterator<I, S>(
    iterator: I,
    options: VocabOptions,
) -> WSResult<Vocab>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    options.validate()?;
    let mut counter = TokenCounter::default();
    let mut position = 0;
    for tokens in iterator {
        for token in tokens {
            counter.add(token.as_ref(), position);
            position += 1;
        }
    }
    options.finish(counter.into_sorted_tokens(options.min_freq, TokenOrder::FrequencyThenLexical))
}
