//! # Token Vocabulary
//!
//! A bidirectional ``{ String <-> usize }`` mapping with an optional
//! default index for out-of-vocabulary tokens.

use crate::{
    errors::{WSResult, WordstockError},
    types::{WSHashMap, hash_map_with_capacity},
};

/// Bidirectional token/index vocabulary.
///
/// Indices are dense: `itos[i]` is the token for index `i`, and
/// `stoi[itos[i]] == i` for every `i`.
#[derive(Debug, Clone, Default)]
pub struct Vocab {
    itos: Vec<String>,
    stoi: WSHashMap<String, usize>,
    default_index: Option<usize>,
}

impl PartialEq for Vocab {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.itos == other.itos && self.default_index == other.default_index
    }
}

impl Vocab {
    /// Build a vocabulary; indices are assigned in iteration order.
    ///
    /// ## Errors
    /// `InvalidValue` if a token appears twice.
    pub fn new<I>(tokens: I) -> WSResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let tokens = tokens.into_iter();
        let mut vocab = Vocab {
            itos: Vec::with_capacity(tokens.size_hint().0),
            stoi: hash_map_with_capacity(tokens.size_hint().0),
            default_index: None,
        };
        for token in tokens {
            vocab.append_token(token)?;
        }
        Ok(vocab)
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Is `token` in the vocabulary?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.stoi.contains_key(token)
    }

    /// Look up the index of a token, without the default fallback.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.stoi.get(token).copied()
    }

    /// Look up the index of a token.
    ///
    /// Out-of-vocabulary tokens resolve to the default index when one is set.
    ///
    /// ## Errors
    /// `TokenNotFound` if the token is unknown and no default index is set.
    pub fn index(
        &self,
        token: &str,
    ) -> WSResult<usize> {
        self.get(token)
            .or(self.default_index)
            .ok_or_else(|| WordstockError::TokenNotFound(token.to_string()))
    }

    /// Set (or clear) the index returned for out-of-vocabulary tokens.
    pub fn set_default_index(
        &mut self,
        index: Option<usize>,
    ) {
        self.default_index = index;
    }

    /// The index returned for out-of-vocabulary tokens, if any.
    pub fn default_index(&self) -> Option<usize> {
        self.default_index
    }

    /// Append a token at the end of the vocabulary.
    ///
    /// ## Returns
    /// The index of the new token.
    ///
    /// ## Errors
    /// `InvalidValue` if the token is already present.
    pub fn append_token<S: Into<String>>(
        &mut self,
        token: S,
    ) -> WSResult<usize> {
        let token = token.into();
        if self.stoi.contains_key(&token) {
            return Err(WordstockError::InvalidValue(format!(
                "token {token:?} already exists in the vocab"
            )));
        }
        let index = self.itos.len();
        self.stoi.insert(token.clone(), index);
        self.itos.push(token);
        Ok(index)
    }

    /// Insert a token at `index`, shifting later tokens up by one.
    ///
    /// ## Errors
    /// * `InvalidValue` if the token is already present.
    /// * `IndexOutOfRange` if `index > len()`.
    pub fn insert_token<S: Into<String>>(
        &mut self,
        token: S,
        index: usize,
    ) -> WSResult<()> {
        let token = token.into();
        if index > self.itos.len() {
            return Err(WordstockError::IndexOutOfRange {
                index,
                len: self.itos.len(),
            });
        }
        if self.stoi.contains_key(&token) {
            return Err(WordstockError::InvalidValue(format!(
                "token {token:?} already exists in the vocab"
            )));
        }

        for shifted in &self.itos[index..] {
            if let Some(idx) = self.stoi.get_mut(shifted) {
                *idx += 1;
            }
        }
        self.stoi.insert(token.clone(), index);
        self.itos.insert(index, token);
        Ok(())
    }

    /// Look up the token for an index.
    ///
    /// ## Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn lookup_token(
        &self,
        index: usize,
    ) -> WSResult<&str> {
        self.itos
            .get(index)
            .map(String::as_str)
            .ok_or(WordstockError::IndexOutOfRange {
                index,
                len: self.itos.len(),
            })
    }

    /// Look up the tokens for a sequence of indices.
    pub fn lookup_tokens(
        &self,
        indices: &[usize],
    ) -> WSResult<Vec<String>> {
        indices
            .iter()
            .map(|&idx| self.lookup_token(idx).map(str::to_string))
            .collect()
    }

    /// Look up the indices for a sequence of tokens; see [`Vocab::index`].
    pub fn lookup_indices<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WSResult<Vec<usize>> {
        tokens.iter().map(|t| self.index(t.as_ref())).collect()
    }

    /// The index-to-token table.
    pub fn get_itos(&self) -> &[String] {
        &self.itos
    }

    /// The token-to-index table.
    pub fn get_stoi(&self) -> &WSHashMap<String, usize> {
        &self.stoi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_lookup() {
        let vocab = Vocab::new(["b", "a", "c"]).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.get_itos(), &["b", "a", "c"]);
        assert_eq!(vocab.get("a"), Some(1));
        assert_eq!(vocab.get("z"), None);
        assert!(vocab.contains("c"));

        assert_eq!(vocab.lookup_token(2).unwrap(), "c");
        assert!(matches!(
            vocab.lookup_token(3),
            Err(WordstockError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(vocab.lookup_tokens(&[1, 0]).unwrap(), vec!["a", "b"]);

        for (idx, token) in vocab.get_itos().iter().enumerate() {
            assert_eq!(vocab.get_stoi()[token], idx);
        }
    }

    #[test]
    fn test_duplicate_tokens() {
        assert!(matches!(
            Vocab::new(["a", "b", "a"]),
            Err(WordstockError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_default_index() {
        let mut vocab = Vocab::new(["<unk>", "hello", "world"]).unwrap();

        assert!(matches!(
            vocab.index("missing"),
            Err(WordstockError::TokenNotFound(t)) if t == "missing"
        ));

        vocab.set_default_index(Some(0));
        assert_eq!(vocab.default_index(), Some(0));
        assert_eq!(vocab.index("missing").unwrap(), 0);
        assert_eq!(
            vocab.lookup_indices(&["world", "missing", "hello"]).unwrap(),
            vec![2, 0, 1]
        );

        vocab.set_default_index(None);
        assert!(vocab.lookup_indices(&["missing"]).is_err());
    }

    #[test]
    fn test_insert_and_append() {
        let mut vocab = Vocab::new(["a", "b", "c"]).unwrap();

        vocab.insert_token("<pad>", 1).unwrap();
        assert_eq!(vocab.get_itos(), &["a", "<pad>", "b", "c"]);
        assert_eq!(vocab.get("c"), Some(3));
        assert_eq!(vocab.get("<pad>"), Some(1));

        assert_eq!(vocab.append_token("d").unwrap(), 4);
        vocab.insert_token("z", 5).unwrap();
        assert_eq!(vocab.get("z"), Some(5));

        assert!(vocab.insert_token("a", 0).is_err());
        assert!(matches!(
            vocab.insert_token("q", 10),
            Err(WordstockError::IndexOutOfRange { index: 10, len: 6 })
        ));
        assert!(vocab.append_token("b").is_err());
    }
}
