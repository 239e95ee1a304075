//! # Path Utilities

use std::path::{Path, PathBuf};

/// Extend a base path with context dirs and a filename.
///
/// * Does not check that the path exists.
/// * Does not initialize the containing directories.
///
/// # Arguments
/// * `path` - the base directory.
/// * `context` - prefix dirs, inserted between `path` and `filename`.
/// * `filename` - the final file name.
pub fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// The file name component of a URL.
///
/// Query strings and fragments are dropped.
///
/// ## Returns
/// `None` if the URL has no non-empty final path segment.
pub fn url_file_name(url: &str) -> Option<&str> {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let (_, rest) = url.split_once("://").unwrap_or(("", url));
    let (_, path) = rest.split_once('/')?;
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Some(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_path() {
        let path = extend_path("/tmp/wordstock", &["cache", "data"], "file.txt");
        assert_eq!(path, PathBuf::from("/tmp/wordstock/cache/data/file.txt"));

        let no_context: &[&str] = &[];
        let path = extend_path("/tmp/wordstock", no_context, "file.txt");
        assert_eq!(path, PathBuf::from("/tmp/wordstock/file.txt"));
    }

    #[test]
    fn test_url_file_name() {
        assert_eq!(
            url_file_name("https://nlp.stanford.edu/data/glove.6B.zip"),
            Some("glove.6B.zip")
        );
        assert_eq!(
            url_file_name(
                "https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_bpe_25000.model?x=1"
            ),
            Some("text_bpe_25000.model")
        );
        assert_eq!(url_file_name("https://example.com/"), None);
        assert_eq!(url_file_name("https://example.com"), None);
    }
}
