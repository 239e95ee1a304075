//! # Tokenizer Traits

use std::sync::Arc;

/// Split text into string tokens.
///
/// Implementations are shared across worker threads when building
/// vocabularies, so they must be [`Send`] + [`Sync`].
pub trait Tokenize: Send + Sync {
    /// Tokenize a single piece of text.
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String>;

    /// Tokenize a batch of texts.
    fn tokenize_batch(
        &self,
        batch: &[String],
    ) -> Vec<Vec<String>> {
        batch.iter().map(|text| self.tokenize(text)).collect()
    }
}

impl<F> Tokenize for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        self(text)
    }
}

/// Rewrite a string into another string.
pub trait TextTransform: Send + Sync {
    /// Apply the transform.
    fn transform(
        &self,
        text: &str,
    ) -> String;
}

/// Splits on unicode whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Lowercases text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl TextTransform for Lowercase {
    fn transform(
        &self,
        text: &str,
    ) -> String {
        text.to_lowercase()
    }
}

/// A chain of [`TextTransform`]s feeding a final [`Tokenize`].
#[derive(Clone)]
pub struct Sequential {
    steps: Vec<Arc<dyn TextTransform>>,
    tokenizer: Arc<dyn Tokenize>,
}

impl Sequential {
    /// Create a pipeline ending in `tokenizer`.
    pub fn new(tokenizer: Arc<dyn Tokenize>) -> Self {
        Self {
            steps: Vec::new(),
            tokenizer,
        }
    }

    /// Append a text transform; transforms run in insertion order.
    pub fn with_step(
        mut self,
        step: Arc<dyn TextTransform>,
    ) -> Self {
        self.steps.push(step);
        self
    }

    /// The number of text transforms before tokenization.
    pub fn num_steps(&self) -> usize {
        self.steps.len()
    }
}

impl Tokenize for Sequential {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut current = text.to_string();
        for step in &self.steps {
            current = step.transform(&current);
        }
        self.tokenizer.tokenize(&current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_tokenizer() {
        let tok = |s: &str| -> Vec<String> { s.split(',').map(str::to_string).collect() };
        assert_eq!(tok.tokenize("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(
            tok.tokenize_batch(&["x,y".to_string(), "z".to_string()]),
            vec![vec!["x", "y"], vec!["z"]]
        );
    }

    #[test]
    fn test_sequential() {
        let pipeline = Sequential::new(Arc::new(WhitespaceTokenizer)).with_step(Arc::new(Lowercase));
        assert_eq!(pipeline.num_steps(), 1);
        assert_eq!(pipeline.tokenize("Hello  World\t!"), vec!["hello", "world", "!"]);

        let shared: Arc<dyn Tokenize> = Arc::new(pipeline);
        assert_eq!(shared.tokenize("A B"), vec!["a", "b"]);
    }
}
