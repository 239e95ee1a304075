//! # Delimited Vector Files
//!
//! Reads `token<d>v1<d>v2...` tables, as written by GloVe, FastText,
//! and plain CSV exports.

use std::path::Path;

use crate::{
    concurrency::map_chunks,
    errors::{WSResult, WordstockError},
    text_lines::utf8_lines,
    types::WSHashSet,
    vectors::word_vectors::Vectors,
};

/// Options for [`load_vectors_from_file_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorsLoadOptions {
    /// Field delimiter.
    pub delimiter: char,

    /// Number of chunks to parse in parallel.
    pub num_cpus: usize,

    /// The fallback vector; defaults to `zeros(dim)`.
    pub unk_tensor: Option<Vec<f32>>,
}

impl Default for VectorsLoadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            num_cpus: 32,
            unk_tensor: None,
        }
    }
}

impl VectorsLoadOptions {
    /// Set the delimiter.
    pub fn with_delimiter(
        self,
        delimiter: char,
    ) -> Self {
        Self { delimiter, ..self }
    }

    /// Set the number of parallel chunks.
    pub fn with_num_cpus(
        self,
        num_cpus: usize,
    ) -> Self {
        Self { num_cpus, ..self }
    }

    /// Set the fallback vector.
    pub fn with_unk_tensor(
        self,
        unk_tensor: Option<Vec<f32>>,
    ) -> Self {
        Self { unk_tensor, ..self }
    }
}

/// The result of loading a vector file.
#[derive(Debug, Clone)]
pub struct VectorsLoadReport {
    /// The loaded table; duplicates keep their first occurrence.
    pub vectors: Vectors,

    /// Tokens which appeared more than once, in file order.
    pub duplicate_tokens: Vec<String>,

    /// Number of lines skipped for having the wrong field count, or for
    /// not being UTF-8.
    pub skipped_lines: usize,
}

/// Is this line a `count dim` header?
fn is_header(
    line: &str,
    delimiter: char,
) -> bool {
    let fields: Vec<&str> = line.trim_end().split(delimiter).collect();
    fields.len() == 2 && fields.iter().all(|f| f.parse::<u64>().is_ok())
}

/// A parsed chunk of lines.
#[derive(Default)]
struct ParsedChunk {
    tokens: Vec<String>,
    data: Vec<f32>,
    skipped: usize,
}

fn parse_chunk(
    lines: &[&str],
    first_line_no: usize,
    delimiter: char,
    dim: usize,
) -> WSResult<ParsedChunk> {
    let mut chunk = ParsedChunk::default();
    chunk.data.reserve(lines.len() * dim);

    for (idx, line) in lines.iter().enumerate() {
        let line_no = first_line_no + idx + 1;
        let mut fields = line.trim_end().split(delimiter);
        let token = fields.next().unwrap_or_default();
        let values: Vec<&str> = fields.collect();

        if values.len() != dim {
            log::warn!(
                "skipping line {line_no}: expected {} fields, found {}",
                dim + 1,
                values.len() + 1
            );
            chunk.skipped += 1;
            continue;
        }

        for value in values {
            let v = value.parse::<f32>().map_err(|e| {
                WordstockError::Parse(format!("line {line_no}: bad float {value:?}: {e}"))
            })?;
            chunk.data.push(v);
        }
        chunk.tokens.push(token.to_string());
    }
    Ok(chunk)
}

/// Load a vector table from a delimited text file.
///
/// ## Arguments
/// * `path` - the file to read.
/// * `options` - delimiter, parallelism and unk tensor.
///
/// ## Returns
/// The table, and the duplicate tokens which were dropped from it.
///
/// ## Errors
/// * `Io` if the file cannot be read.
/// * `Parse` if a value is not a float.
/// * `InvalidValue` if the file has no data lines.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn load_vectors_from_file_path<P: AsRef<Path>>(
    path: P,
    options: VectorsLoadOptions,
) -> WSResult<VectorsLoadReport> {
    let path = path.as_ref();
    let content = std::fs::read(path)?;
    let delimiter = options.delimiter;

    let split = utf8_lines(&content, path);
    let mut lines = split.lines;
    let mut offset = 0;
    if lines.first().is_some_and(|l| is_header(l, delimiter)) {
        lines.remove(0);
        offset = 1;
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let first = lines.first().ok_or_else(|| {
        WordstockError::InvalidValue(format!("no vectors in {}", path.display()))
    })?;
    let dim = first.trim_end().split(delimiter).count() - 1;
    log::debug!(
        "loading {} lines of dim {dim} from {}",
        lines.len(),
        path.display()
    );

    let chunks = map_chunks(&lines, options.num_cpus, |start, chunk| {
        parse_chunk(chunk, offset + start, delimiter, dim)
    });

    let mut tokens = Vec::with_capacity(lines.len());
    let mut data = Vec::with_capacity(lines.len() * dim);
    let mut seen: WSHashSet<String> = WSHashSet::with_capacity(lines.len());
    let mut duplicate_tokens = Vec::new();
    let mut skipped_lines = split.skipped;

    for chunk in chunks {
        let chunk = chunk?;
        skipped_lines += chunk.skipped;
        for (idx, token) in chunk.tokens.into_iter().enumerate() {
            if seen.contains(&token) {
                duplicate_tokens.push(token);
                continue;
            }
            seen.insert(token.clone());
            tokens.push(token);
            data.extend_from_slice(&chunk.data[idx * dim..(idx + 1) * dim]);
        }
    }

    if !duplicate_tokens.is_empty() {
        log::warn!(
            "{} duplicate tokens in {}; keeping first occurrences",
            duplicate_tokens.len(),
            path.display()
        );
    }

    Ok(VectorsLoadReport {
        vectors: Vectors::new(tokens, data, dim, options.unk_tensor)?,
        duplicate_tokens,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_header_detection() {
        assert!(is_header("1000 300", ' '));
        assert!(is_header("1000 300  ", ' '));
        assert!(!is_header("the 300", ' '));
        assert!(!is_header("1 2 3", ' '));
        assert!(!is_header("a,1,0,0", ','));
    }

    #[test]
    fn test_load_csv() {
        let dir = TempDir::new("vectors_io").unwrap();
        let path = dir.path().join("v.csv");
        fs::write(&path, "a,1,0,0\nb,0,1,0\n").unwrap();

        let report = load_vectors_from_file_path(&path, VectorsLoadOptions::default()).unwrap();
        assert!(report.duplicate_tokens.is_empty());
        assert_eq!(report.skipped_lines, 0);

        let vectors = report.vectors;
        assert_eq!(vectors.dim(), 3);
        assert_eq!(vectors.get("a"), &[1.0, 0.0, 0.0]);
        assert_eq!(vectors.get("b"), &[0.0, 1.0, 0.0]);
        assert_eq!(vectors.get("not_in_it"), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_header_skips_and_duplicates() {
        let dir = TempDir::new("vectors_io").unwrap();
        let path = dir.path().join("v.vec");
        fs::write(
            &path,
            "4 2\nx 1.5 2 \ny 3 4\nbad 1\nx 9 9\nz -1 -2\n\n",
        )
        .unwrap();

        for num_cpus in [1, 2, 3, 8] {
            let report = load_vectors_from_file_path(
                &path,
                VectorsLoadOptions::default()
                    .with_delimiter(' ')
                    .with_num_cpus(num_cpus),
            )
            .unwrap();
            assert_eq!(report.duplicate_tokens, vec!["x"]);
            assert_eq!(report.skipped_lines, 1);
            assert_eq!(report.vectors.tokens(), &["x", "y", "z"]);
            assert_eq!(report.vectors.get("x"), &[1.5, 2.0]);
            assert_eq!(report.vectors.get("z"), &[-1.0, -2.0]);
        }
    }

    #[test]
    fn test_non_utf8_lines_are_skipped() {
        let dir = TempDir::new("vectors_io").unwrap();
        let path = dir.path().join("v.txt");
        fs::write(&path, b"the 1 2\n\xff\xfe 3 4\npeople 5 6\n").unwrap();

        let report = load_vectors_from_file_path(
            &path,
            VectorsLoadOptions::default().with_delimiter(' '),
        )
        .unwrap();
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.vectors.tokens(), &["the", "people"]);
        assert_eq!(report.vectors.get("people"), &[5.0, 6.0]);
    }

    #[test]
    fn test_parse_errors() {
        let dir = TempDir::new("vectors_io").unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "a,1,0\nb,0,oops\n").unwrap();
        assert!(matches!(
            load_vectors_from_file_path(&path, VectorsLoadOptions::default()),
            Err(WordstockError::Parse(_))
        ));

        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            load_vectors_from_file_path(&path, VectorsLoadOptions::default()),
            Err(WordstockError::InvalidValue(_))
        ));
    }
}
