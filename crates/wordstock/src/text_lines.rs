//! # UTF-8 Line Splitting
//!
//! Splits raw file bytes into lines, dropping lines which are not UTF-8.

use std::path::Path;

/// Lines of a byte buffer, and the count of non-UTF-8 lines dropped.
#[derive(Debug, Default)]
pub(crate) struct Utf8Lines<'a> {
    pub lines: Vec<&'a str>,
    pub skipped: usize,
}

/// Split `bytes` on `\n` (trimming a trailing `\r`), skipping non-UTF-8 lines.
///
/// Line splitting matches [`str::lines`]; `path` only labels the warnings.
pub(crate) fn utf8_lines<'a>(
    bytes: &'a [u8],
    path: &Path,
) -> Utf8Lines<'a> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let mut result = Utf8Lines::default();
    if bytes.is_empty() {
        return result;
    }

    for (idx, raw) in bytes.split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => result.lines.push(line),
            Err(e) => {
                log::warn!(
                    "skipping non-UTF-8 line {} of {}: {e}",
                    idx + 1,
                    path.display()
                );
                result.skipped += 1;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_str_lines() {
        for text in ["", "a", "a\n", "a\n\nb", "a\r\nb\r\n", "a\n\n", "\n"] {
            let split = utf8_lines(text.as_bytes(), Path::new("t.txt"));
            assert_eq!(split.lines, text.lines().collect::<Vec<_>>(), "{text:?}");
            assert_eq!(split.skipped, 0);
        }
    }

    #[test]
    fn test_skips_invalid_lines() {
        let split = utf8_lines(b"the 1 2\n\xff\xfe 3 4\npeople 5 6\n", Path::new("v.txt"));
        assert_eq!(split.lines, vec!["the 1 2", "people 5 6"]);
        assert_eq!(split.skipped, 1);
    }
}
