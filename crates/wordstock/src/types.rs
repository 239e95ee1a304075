//! # Common Types
//!
//! Hash map aliases, and the [`DenseMatrix`] container used to hand
//! vector data in and out of [`crate::vectors::Vectors`].

use crate::errors::{WSResult, WordstockError};

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WSHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WSHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WSHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WSHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Create a new hash map with the given capacity.
pub fn hash_map_with_capacity<K, V>(capacity: usize) -> WSHashMap<K, V> {
    WSHashMap::with_capacity(capacity)
}

/// Compile-time check that a type is [`Send`].
pub fn check_is_send<T: Send>() {}

/// Compile-time check that a type is [`Sync`].
pub fn check_is_sync<T: Sync>() {}

/// Element type of a [`DenseMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum DType {
    /// 32-bit float.
    F32,

    /// 64-bit float.
    F64,

    /// 8-bit signed integer.
    I8,

    /// 32-bit signed integer.
    I32,

    /// 64-bit signed integer.
    I64,
}

/// Typed storage for a [`DenseMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
    /// 32-bit float storage.
    F32(Vec<f32>),

    /// 64-bit float storage.
    F64(Vec<f64>),

    /// 8-bit signed integer storage.
    I8(Vec<i8>),

    /// 32-bit signed integer storage.
    I32(Vec<i32>),

    /// 64-bit signed integer storage.
    I64(Vec<i64>),
}

impl MatrixData {
    /// The element type.
    pub fn dtype(&self) -> DType {
        match self {
            MatrixData::F32(_) => DType::F32,
            MatrixData::F64(_) => DType::F64,
            MatrixData::I8(_) => DType::I8,
            MatrixData::I32(_) => DType::I32,
            MatrixData::I64(_) => DType::I64,
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        match self {
            MatrixData::F32(v) => v.len(),
            MatrixData::F64(v) => v.len(),
            MatrixData::I8(v) => v.len(),
            MatrixData::I32(v) => v.len(),
            MatrixData::I64(v) => v.len(),
        }
    }

    /// Is the storage empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An element type which can be stored in a [`DenseMatrix`].
pub trait Element: Copy + Send + Sync + 'static {
    /// The matching [`DType`].
    const DTYPE: DType;

    /// Wrap a buffer as [`MatrixData`].
    fn into_data(values: Vec<Self>) -> MatrixData;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            fn into_data(values: Vec<Self>) -> MatrixData {
                MatrixData::$variant(values)
            }
        }
    };
}

impl_element!(f32, F32);
impl_element!(f64, F64);
impl_element!(i8, I8);
impl_element!(i32, I32);
impl_element!(i64, I64);

/// A row-major 2-D numeric buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: MatrixData,
}

impl DenseMatrix {
    /// Build a matrix from a flat row-major buffer.
    ///
    /// ## Errors
    /// `InvalidValue` if `values.len() != rows * cols`.
    pub fn new<E: Element>(
        rows: usize,
        cols: usize,
        values: Vec<E>,
    ) -> WSResult<Self> {
        if values.len() != rows * cols {
            return Err(WordstockError::InvalidValue(format!(
                "buffer of {} elements cannot be shaped as [{rows}, {cols}]",
                values.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: E::into_data(values),
        })
    }

    /// Wrap an `f32` buffer already known to hold `rows * cols` elements.
    pub(crate) fn from_f32_parts(
        rows: usize,
        cols: usize,
        values: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self {
            rows,
            cols,
            data: MatrixData::F32(values),
        }
    }

    /// An empty `[0, 0]` matrix of the given element type.
    pub fn empty(dtype: DType) -> Self {
        let data = match dtype {
            DType::F32 => MatrixData::F32(Vec::new()),
            DType::F64 => MatrixData::F64(Vec::new()),
            DType::I8 => MatrixData::I8(Vec::new()),
            DType::I32 => MatrixData::I32(Vec::new()),
            DType::I64 => MatrixData::I64(Vec::new()),
        };
        Self {
            rows: 0,
            cols: 0,
            data,
        }
    }

    /// A `[rows, cols]` matrix of `f32` zeros.
    pub fn zeros(
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            rows,
            cols,
            data: MatrixData::F32(vec![0.0; rows * cols]),
        }
    }

    /// A `[1, n]` matrix holding a single vector.
    pub fn unsqueeze<E: Element>(vector: Vec<E>) -> Self {
        Self {
            rows: 1,
            cols: vector.len(),
            data: E::into_data(vector),
        }
    }

    /// Build a matrix from equal-length rows.
    ///
    /// ## Errors
    /// `InvalidValue` if the rows are ragged.
    pub fn from_rows<E, R>(rows: &[R]) -> WSResult<Self>
    where
        E: Element,
        R: AsRef<[E]>,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(WordstockError::InvalidValue(format!(
                    "row {idx} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            values.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, values)
    }

    /// Build an `f32` matrix from equal-length rows.
    pub fn from_f32_rows<R: AsRef<[f32]>>(rows: &[R]) -> WSResult<Self> {
        Self::from_rows::<f32, R>(rows)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `[rows, cols]` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The element type.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// The typed storage.
    pub fn data(&self) -> &MatrixData {
        &self.data
    }

    /// The flat `f32` buffer, if this is an `f32` matrix.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            MatrixData::F32(v) => Some(v),
            _ => None,
        }
    }

    /// A row of an `f32` matrix.
    pub fn row_f32(
        &self,
        row: usize,
    ) -> Option<&[f32]> {
        if row >= self.rows {
            return None;
        }
        self.as_f32()
            .map(|v| &v[row * self.cols..(row + 1) * self.cols])
    }

    /// Consume the matrix, returning its flat `f32` buffer.
    ///
    /// ## Errors
    /// `TypeMismatch` if this is not an `f32` matrix.
    pub fn into_f32(self) -> WSResult<Vec<f32>> {
        match self.data {
            MatrixData::F32(v) => Ok(v),
            other => Err(WordstockError::TypeMismatch {
                expected: DType::F32,
                found: other.dtype(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_matrix_shapes() {
        let m = DenseMatrix::from_rows::<f32, _>(&[[1.0f32, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.dtype(), DType::F32);
        assert_eq!(m.row_f32(1), Some(&[0.0, 1.0, 0.0][..]));
        assert_eq!(m.row_f32(2), None);

        let ragged: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            DenseMatrix::from_rows::<f32, _>(&ragged),
            Err(WordstockError::InvalidValue(_))
        ));

        assert!(DenseMatrix::new(2, 2, vec![1i64, 2, 3]).is_err());
    }

    #[test]
    fn test_dense_matrix_dtypes() {
        let m = DenseMatrix::unsqueeze(vec![1i8, 0, 0]);
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m.dtype(), DType::I8);
        assert_eq!(m.as_f32(), None);
        assert!(matches!(
            m.into_f32(),
            Err(WordstockError::TypeMismatch {
                expected: DType::F32,
                found: DType::I8,
            })
        ));

        let empty = DenseMatrix::empty(DType::F32);
        assert_eq!(empty.shape(), (0, 0));
        assert!(empty.data().is_empty());

        assert_eq!(DType::F32.to_string(), "f32");
        assert_eq!("i64".parse::<DType>().unwrap(), DType::I64);
    }
}
