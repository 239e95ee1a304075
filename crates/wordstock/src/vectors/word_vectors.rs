//! # Word Vector Tables

use crate::{
    errors::{WSResult, WordstockError},
    types::{DType, DenseMatrix, WSHashMap, hash_map_with_capacity},
};

/// A token-to-vector table of fixed dimension.
///
/// Unknown tokens resolve to the `unk_tensor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vectors {
    tokens: Vec<String>,
    stoi: WSHashMap<String, usize>,
    data: Vec<f32>,
    dim: usize,
    unk_tensor: Vec<f32>,
}

impl Vectors {
    /// Build a table from tokens and a flat row-major buffer.
    ///
    /// ## Arguments
    /// * `tokens` - one token per row.
    /// * `data` - `tokens.len() * dim` floats.
    /// * `dim` - the vector dimension.
    /// * `unk_tensor` - the fallback vector; defaults to `zeros(dim)`.
    ///
    /// ## Errors
    /// `InvalidValue` on shape mismatches or duplicate tokens.
    pub fn new(
        tokens: Vec<String>,
        data: Vec<f32>,
        dim: usize,
        unk_tensor: Option<Vec<f32>>,
    ) -> WSResult<Self> {
        if data.len() != tokens.len() * dim {
            return Err(WordstockError::InvalidValue(format!(
                "{} tokens with dim {dim} need {} values, found {}",
                tokens.len(),
                tokens.len() * dim,
                data.len()
            )));
        }

        let unk_tensor = unk_tensor.unwrap_or_else(|| vec![0.0; dim]);
        if unk_tensor.len() != dim {
            return Err(WordstockError::InvalidValue(format!(
                "unk_tensor has length {}, expected {dim}",
                unk_tensor.len()
            )));
        }

        let mut stoi = hash_map_with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if stoi.insert(token.clone(), idx).is_some() {
                return Err(WordstockError::InvalidValue(format!(
                    "duplicate token {token:?} in vectors"
                )));
            }
        }

        Ok(Self {
            tokens,
            stoi,
            data,
            dim,
            unk_tensor,
        })
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The vector dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Does the table hold a vector for `token`?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.stoi.contains_key(token)
    }

    /// The tokens, in row order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The fallback vector for unknown tokens.
    pub fn unk_tensor(&self) -> &[f32] {
        &self.unk_tensor
    }

    fn row(
        &self,
        idx: usize,
    ) -> &[f32] {
        &self.data[idx * self.dim..(idx + 1) * self.dim]
    }

    /// The vector for `token`, or the unk tensor.
    pub fn get(
        &self,
        token: &str,
    ) -> &[f32] {
        match self.stoi.get(token) {
            Some(&idx) => self.row(idx),
            None => &self.unk_tensor,
        }
    }

    /// Stack the vectors of `tokens` into a `[tokens.len(), dim]` matrix.
    pub fn get_vecs_by_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> DenseMatrix {
        let mut values = Vec::with_capacity(tokens.len() * self.dim);
        for token in tokens {
            values.extend_from_slice(self.get(token.as_ref()));
        }
        DenseMatrix::from_f32_parts(tokens.len(), self.dim, values)
    }

    /// Look up the vectors of `tokens`, one `Vec` per token.
    pub fn lookup_vectors<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Vec<Vec<f32>> {
        tokens.iter().map(|t| self.get(t.as_ref()).to_vec()).collect()
    }

    /// Insert or overwrite the vector for `token`.
    ///
    /// ## Errors
    /// `InvalidValue` if `vector.len() != dim()`.
    pub fn insert_token<S: Into<String>>(
        &mut self,
        token: S,
        vector: &[f32],
    ) -> WSResult<()> {
        if vector.len() != self.dim {
            return Err(WordstockError::InvalidValue(format!(
                "vector has length {}, expected {}",
                vector.len(),
                self.dim
            )));
        }
        let token = token.into();
        match self.stoi.get(&token) {
            Some(&idx) => {
                self.data[idx * self.dim..(idx + 1) * self.dim].copy_from_slice(vector);
            }
            None => {
                self.stoi.insert(token.clone(), self.tokens.len());
                self.tokens.push(token);
                self.data.extend_from_slice(vector);
            }
        }
        Ok(())
    }
}

/// Build a [`Vectors`] table from tokens and a `[tokens.len(), dim]` matrix.
///
/// ## Arguments
/// * `tokens` - one token per matrix row.
/// * `matrix` - an `f32` matrix.
/// * `unk_tensor` - the fallback vector; defaults to `zeros(dim)`.
///
/// ## Errors
/// * `TypeMismatch` if the matrix is not `f32`; checked first.
/// * `InvalidValue` if the dimension cannot be inferred (no tokens, no rows,
///   and no `unk_tensor`), on row-count or unk-length mismatches, and on
///   duplicate tokens.
pub fn build_vectors<S: AsRef<str>>(
    tokens: &[S],
    matrix: DenseMatrix,
    unk_tensor: Option<Vec<f32>>,
) -> WSResult<Vectors> {
    if matrix.dtype() != DType::F32 {
        return Err(WordstockError::TypeMismatch {
            expected: DType::F32,
            found: matrix.dtype(),
        });
    }

    let dim = if tokens.is_empty() && matrix.rows() == 0 {
        match &unk_tensor {
            Some(unk) => unk.len(),
            None => {
                return Err(WordstockError::InvalidValue(
                    "cannot infer the vector dimension from empty tokens without an unk_tensor"
                        .to_string(),
                ));
            }
        }
    } else {
        matrix.cols()
    };

    if matrix.rows() != tokens.len() {
        return Err(WordstockError::InvalidValue(format!(
            "{} tokens but the matrix has {} rows",
            tokens.len(),
            matrix.rows()
        )));
    }

    let tokens = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    Vectors::new(tokens, matrix.into_f32()?, dim, unk_tensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vectors {
        let matrix = DenseMatrix::from_f32_rows(&[[1.0f32, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        build_vectors(&["a", "b"], matrix, None).unwrap()
    }

    #[test]
    fn test_build_and_get() {
        let vectors = sample();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors.dim(), 3);
        assert_eq!(vectors.get("a"), &[1.0, 0.0, 0.0]);
        assert_eq!(vectors.get("b"), &[0.0, 1.0, 0.0]);
        assert_eq!(vectors.get("not_in_it"), &[0.0, 0.0, 0.0]);
        assert!(vectors.contains("a"));
        assert!(!vectors.contains("c"));
        assert_eq!(vectors.tokens(), &["a", "b"]);

        let m = vectors.get_vecs_by_tokens(&["b", "zzz"]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.as_f32().unwrap(), &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            vectors.lookup_vectors(&["a"]),
            vec![vec![1.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn test_custom_unk() {
        let matrix = DenseMatrix::from_f32_rows(&[[1.0f32, 2.0]]).unwrap();
        let vectors = build_vectors(&["x"], matrix, Some(vec![-1.0, -1.0])).unwrap();
        assert_eq!(vectors.get("y"), &[-1.0, -1.0]);
        assert_eq!(vectors.unk_tensor(), &[-1.0, -1.0]);

        let empty = build_vectors::<&str>(&[], DenseMatrix::empty(DType::F32), Some(vec![0.5; 4]))
            .unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.dim(), 4);
        assert_eq!(empty.get("anything"), &[0.5; 4]);
    }

    #[test]
    fn test_build_errors() {
        let i8_matrix = DenseMatrix::unsqueeze(vec![1i8, 0, 0]);
        assert!(matches!(
            build_vectors(&["a"], i8_matrix, None),
            Err(WordstockError::TypeMismatch { .. })
        ));

        assert!(matches!(
            build_vectors::<&str>(&[], DenseMatrix::empty(DType::F32), None),
            Err(WordstockError::InvalidValue(_))
        ));

        let matrix = DenseMatrix::from_f32_rows(&[[1.0f32, 0.0]]).unwrap();
        assert!(matches!(
            build_vectors(&["a", "b"], matrix.clone(), None),
            Err(WordstockError::InvalidValue(_))
        ));
        assert!(matches!(
            build_vectors(&["a"], matrix, Some(vec![0.0; 3])),
            Err(WordstockError::InvalidValue(_))
        ));

        let matrix = DenseMatrix::from_f32_rows(&[[1.0f32], [2.0]]).unwrap();
        assert!(matches!(
            build_vectors(&["a", "a"], matrix, None),
            Err(WordstockError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_insert_token() {
        let mut vectors = sample();
        vectors.insert_token("c", &[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors.get("c"), &[0.0, 0.0, 1.0]);

        vectors.insert_token("a", &[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors.get("a"), &[2.0, 2.0, 2.0]);

        assert!(matches!(
            vectors.insert_token("d", &[1.0]),
            Err(WordstockError::InvalidValue(_))
        ));
    }
}
