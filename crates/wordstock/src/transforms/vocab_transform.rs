//! # Vocab and Vector Lookup Transforms

use std::sync::Arc;

use crate::{errors::WSResult, types::DenseMatrix, vectors::Vectors, vocab::Vocab};

/// Maps token sequences to vocab indices.
#[derive(Debug, Clone)]
pub struct VocabTransform {
    vocab: Arc<Vocab>,
}

impl VocabTransform {
    /// Wrap a vocab.
    pub fn new(vocab: Arc<Vocab>) -> Self {
        Self { vocab }
    }

    /// The wrapped vocab.
    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    /// Look up each token through [`Vocab::index`].
    ///
    /// ## Errors
    /// `TokenNotFound` for an out-of-vocabulary token when the vocab
    /// has no default index.
    pub fn forward<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> WSResult<Vec<usize>> {
        self.vocab.lookup_indices(tokens)
    }

    /// Apply [`VocabTransform::forward`] to each token sequence.
    pub fn forward_batch<S: AsRef<str>>(
        &self,
        batch: &[Vec<S>],
    ) -> WSResult<Vec<Vec<usize>>> {
        batch.iter().map(|tokens| self.forward(tokens)).collect()
    }
}

impl From<Vocab> for VocabTransform {
    fn from(vocab: Vocab) -> Self {
        Self::new(Arc::new(vocab))
    }
}

/// Maps token sequences to a `[len, dim]` matrix of word vectors.
#[derive(Debug, Clone)]
pub struct VectorTransform {
    vectors: Arc<Vectors>,
}

impl VectorTransform {
    /// Wrap a vector table.
    pub fn new(vectors: Arc<Vectors>) -> Self {
        Self { vectors }
    }

    /// The wrapped vector table.
    pub fn vectors(&self) -> &Arc<Vectors> {
        &self.vectors
    }

    /// Look up the vector for each token; unknown tokens get the unk tensor.
    pub fn forward<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> DenseMatrix {
        self.vectors.get_vecs_by_tokens(tokens)
    }
}

impl From<Vectors> for VectorTransform {
    fn from(vectors: Vectors) -> Self {
        Self::new(Arc::new(vectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::WordstockError, vectors::build_vectors};

    #[test]
    fn test_vocab_transform() {
        let mut vocab = Vocab::new(["<unk>", "a", "b"]).unwrap();
        let transform = VocabTransform::from(vocab.clone());

        assert_eq!(transform.forward(&["b", "a"]).unwrap(), vec![2, 1]);
        assert!(matches!(
            transform.forward(&["zzz"]),
            Err(WordstockError::TokenNotFound(_))
        ));

        vocab.set_default_index(Some(0));
        let transform = VocabTransform::new(Arc::new(vocab));
        assert_eq!(
            transform
                .forward_batch(&[vec!["a", "zzz"], vec!["b"]])
                .unwrap(),
            vec![vec![1, 0], vec![2]]
        );
    }

    #[test]
    fn test_vector_transform() {
        let matrix = DenseMatrix::from_f32_rows(&[[1.0f32, 0.0], [0.0, 1.0]]).unwrap();
        let vectors = build_vectors(&["x", "y"], matrix, None).unwrap();
        let transform = VectorTransform::from(vectors);

        let out = transform.forward(&["y", "missing", "x"]);
        assert_eq!(out.shape(), (3, 2));
        assert_eq!(out.as_f32().unwrap(), &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
