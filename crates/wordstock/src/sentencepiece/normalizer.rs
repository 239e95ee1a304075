//! # Text Normalizer
//!
//! NFKC stands in for the precompiled character map of a trained model.

use unicode_normalization::UnicodeNormalization;

use crate::sentencepiece::model_proto::NormalizerSpec;

/// The whitespace marker, `▁` (U+2581).
pub const SPACE_SYMBOL: char = '\u{2581}';

/// Normalizes raw text into the form pieces are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    nfkc: bool,
    add_dummy_prefix: bool,
    remove_extra_whitespaces: bool,
    escape_whitespaces: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            nfkc: true,
            add_dummy_prefix: true,
            remove_extra_whitespaces: true,
            escape_whitespaces: true,
        }
    }
}

impl Normalizer {
    /// Build a normalizer from a model's spec; `None` gives the defaults.
    pub fn from_spec(spec: Option<&NormalizerSpec>) -> Self {
        let Some(spec) = spec else {
            return Self::default();
        };
        let name = spec.name.as_deref().unwrap_or("nmt_nfkc");
        Self {
            nfkc: name.starts_with("nmt_nfkc") || name.starts_with("nfkc"),
            add_dummy_prefix: spec.add_dummy_prefix.unwrap_or(true),
            remove_extra_whitespaces: spec.remove_extra_whitespaces.unwrap_or(true),
            escape_whitespaces: spec.escape_whitespaces.unwrap_or(true),
        }
    }

    /// Does this normalizer prefix text with a whitespace marker?
    pub fn add_dummy_prefix(&self) -> bool {
        self.add_dummy_prefix
    }

    /// Normalize `text`.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let text: String = if self.nfkc {
            text.nfkc()
                .map(|c| if c.is_whitespace() { ' ' } else { c })
                .collect()
        } else {
            text.to_string()
        };

        let text = if self.remove_extra_whitespaces {
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            text
        };
        if text.is_empty() {
            return text;
        }

        let mut out = String::with_capacity(text.len() + SPACE_SYMBOL.len_utf8());
        let space = if self.escape_whitespaces {
            SPACE_SYMBOL
        } else {
            ' '
        };
        if self.add_dummy_prefix {
            out.push(space);
        }
        for c in text.chars() {
            out.push(if c == ' ' { space } else { c });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_normalize() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("  hello   world "), "▁hello▁world");
        assert_eq!(n.normalize("   "), "");
        assert_eq!(n.normalize("ﬁne ①"), "▁fine▁1");
        assert_eq!(n.normalize("\thello\t\tworld\r\n"), "▁hello▁world");
        assert_eq!(n.normalize("a\u{3000}b"), "▁a▁b");
    }

    #[test]
    fn test_from_spec() {
        let spec = NormalizerSpec {
            name: Some("identity".to_string()),
            add_dummy_prefix: Some(false),
            remove_extra_whitespaces: Some(false),
            escape_whitespaces: Some(true),
        };
        let n = Normalizer::from_spec(Some(&spec));
        assert!(!n.add_dummy_prefix());
        assert_eq!(n.normalize(" ﬁ  x"), "▁ﬁ▁▁x");
        assert_eq!(n.normalize("a\tb"), "a\tb");

        assert_eq!(Normalizer::from_spec(None), Normalizer::default());
    }
}
