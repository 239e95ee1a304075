//! # Regex Normalization and Tokenization
//!
//! Ordered `(pattern, replacement)` rewrite rules, and the
//! whitespace-splitting tokenizers built on top of them.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    errors::{WSResult, WordstockError},
    transforms::tokenize::{TextTransform, Tokenize},
};

/// A `(pattern, replacement)` rule with static strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstReplaceRule {
    /// The regex pattern.
    pub pattern: &'static str,

    /// The replacement template; see [`RegexReplacer`].
    pub replacement: &'static str,
}

impl ConstReplaceRule {
    /// Create a new rule.
    pub const fn new(
        pattern: &'static str,
        replacement: &'static str,
    ) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

/// Rewrite rules applied by [`basic_english_normalize`], in order.
pub const BASIC_ENGLISH_RULES: &[ConstReplaceRule] = &[
    ConstReplaceRule::new(r"'", " '  "),
    ConstReplaceRule::new(r#"""#, ""),
    ConstReplaceRule::new(r"\.", " . "),
    ConstReplaceRule::new(r"<br />", " "),
    ConstReplaceRule::new(r",", " , "),
    ConstReplaceRule::new(r"\(", " ( "),
    ConstReplaceRule::new(r"\)", " ) "),
    ConstReplaceRule::new(r"!", " ! "),
    ConstReplaceRule::new(r"\?", " ? "),
    ConstReplaceRule::new(r";", " "),
    ConstReplaceRule::new(r":", " "),
    ConstReplaceRule::new(r"\s+", " "),
];

/// Translate a backslash-style template into `regex` expansion syntax.
///
/// `\N` and `\NN` become `${N}`, `\g<name>` becomes `${name}`, `\\`,
/// `\n` and `\t` are unescaped, and `$` is kept literal.
fn expand_template(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut rest = replacement;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        if c == '$' {
            out.push_str("$$");
            continue;
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        let digits = rest
            .bytes()
            .take(2)
            .take_while(u8::is_ascii_digit)
            .count();
        if digits > 0 {
            out.push_str(&format!("${{{}}}", &rest[..digits]));
            rest = &rest[digits..];
        } else if let Some((name, after)) = rest
            .strip_prefix("g<")
            .and_then(|r| r.split_once('>'))
        {
            out.push_str(&format!("${{{name}}}"));
            rest = after;
        } else {
            let unescaped = match rest.chars().next() {
                Some('\\') => Some('\\'),
                Some('n') => Some('\n'),
                Some('t') => Some('\t'),
                _ => None,
            };
            match unescaped {
                Some(u) => {
                    out.push(u);
                    rest = &rest[1..];
                }
                None => out.push('\\'),
            }
        }
    }
    out
}

/// An ordered list of compiled regex rewrite rules.
///
/// Replacement templates use backslash group references, as in
/// `re.sub`: `\1` or `\g<name>` insert a capture group. `$` is literal.
#[derive(Debug, Clone)]
pub struct RegexReplacer {
    rules: Vec<(Regex, String)>,
}

impl RegexReplacer {
    /// Compile a list of `(pattern, replacement)` rules.
    ///
    /// ## Errors
    /// `InvalidValue` if a pattern does not compile.
    pub fn new<P, R>(rules: &[(P, R)]) -> WSResult<Self>
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let rules = rules
            .iter()
            .map(|(pattern, replacement)| {
                Regex::new(pattern.as_ref())
                    .map(|re| (re, expand_template(replacement.as_ref())))
                    .map_err(|e| {
                        WordstockError::InvalidValue(format!(
                            "bad pattern {:?}: {e}",
                            pattern.as_ref()
                        ))
                    })
            })
            .collect::<WSResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Compile a list of [`ConstReplaceRule`]s.
    pub fn from_const_rules(rules: &[ConstReplaceRule]) -> WSResult<Self> {
        let pairs: Vec<(&str, &str)> = rules
            .iter()
            .map(|r| (r.pattern, r.replacement))
            .collect();
        Self::new(&pairs)
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Are there no rules?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule, in order, to `text`.
    pub fn apply(
        &self,
        text: &str,
    ) -> String {
        let mut current = text.to_string();
        for (re, replacement) in &self.rules {
            current = re
                .replace_all(&current, replacement.as_str())
                .into_owned();
        }
        current
    }

    /// Apply the rules to each string of an iterator.
    pub fn apply_all<I>(
        &self,
        texts: I,
    ) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        texts.into_iter().map(|t| self.apply(t.as_ref())).collect()
    }
}

impl TextTransform for RegexReplacer {
    fn transform(
        &self,
        text: &str,
    ) -> String {
        self.apply(text)
    }
}

/// Build a [`RegexReplacer`] from `(pattern, replacement)` pairs.
pub fn custom_replace<P, R>(rules: &[(P, R)]) -> WSResult<RegexReplacer>
where
    P: AsRef<str>,
    R: AsRef<str>,
{
    RegexReplacer::new(rules)
}

/// Rewrite with regex rules, then split on whitespace.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    replacer: RegexReplacer,
    to_lower: bool,
}

impl RegexTokenizer {
    /// Create a tokenizer; lowercasing, if enabled, runs before the rules.
    pub fn new(
        replacer: RegexReplacer,
        to_lower: bool,
    ) -> Self {
        Self { replacer, to_lower }
    }

    /// The rewrite rules.
    pub fn replacer(&self) -> &RegexReplacer {
        &self.replacer
    }

    /// Does this tokenizer lowercase its input?
    pub fn to_lower(&self) -> bool {
        self.to_lower
    }
}

impl Tokenize for RegexTokenizer {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        let normalized = if self.to_lower {
            self.replacer.apply(&text.to_lowercase())
        } else {
            self.replacer.apply(text)
        };
        normalized.split_whitespace().map(str::to_string).collect()
    }
}

static BASIC_ENGLISH: LazyLock<RegexTokenizer> = LazyLock::new(|| {
    let replacer = RegexReplacer::from_const_rules(BASIC_ENGLISH_RULES)
        .expect("BASIC_ENGLISH_RULES are valid regexes");
    RegexTokenizer::new(replacer, true)
});

/// The basic english normalizing tokenizer.
///
/// Lowercases, pads punctuation with spaces, drops double quotes, `;` and `:`,
/// collapses whitespace, then splits on whitespace.
pub fn basic_english_normalize() -> RegexTokenizer {
    BASIC_ENGLISH.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_replace() {
        let replacer = custom_replace(&[("a", "x"), (r"\s+", " "), ("x", "$0y")]).unwrap();
        assert_eq!(replacer.len(), 3);
        assert_eq!(replacer.apply("a  b\tca"), "$0y b c$0y");
        assert_eq!(
            replacer.apply_all(["aa", "b"]),
            vec!["$0y$0y", "b"]
        );

        let replacer = custom_replace(&[
            (r"(\w+)@(\w+)", r"\2 at \1"),
            (r"(?P<num>\d+)", r"<\g<num>>"),
            (r"/", r"\\"),
        ])
        .unwrap();
        assert_eq!(replacer.apply("me@home 12/3"), r"home at me <12>\<3>");
        assert_eq!(expand_template(r"\1\12x \q $1"), r"${1}${12}x \q $$1");

        assert!(matches!(
            custom_replace(&[("(", "")]),
            Err(WordstockError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_basic_english_normalize() {
        let tokenizer = basic_english_normalize();
        assert!(tokenizer.to_lower());
        assert_eq!(tokenizer.replacer().len(), BASIC_ENGLISH_RULES.len());

        assert_eq!(
            tokenizer.tokenize("This is an example!"),
            vec!["this", "is", "an", "example", "!"]
        );
        assert_eq!(
            tokenizer.tokenize("He said: \"don't\"; (really?)<br />Yes."),
            vec![
                "he", "said", "don", "'", "t", "(", "really", "?", ")", "yes", "."
            ]
        );
        assert_eq!(
            tokenizer.tokenize("Turner   Newall say they are 'disappointed'"),
            vec!["turner", "newall", "say", "they", "are", "'", "disappointed", "'"]
        );
    }
}
