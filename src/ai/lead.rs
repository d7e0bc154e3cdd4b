//! Extractive summarizer that keeps the leading sentences of a text.

use async_trait::async_trait;

use super::Summarizer;
use crate::errors::SummarizeError;

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Deterministic offline summarizer returning the first `sentences` sentences.
#[derive(Debug, Clone)]
pub struct LeadSummarizer {
    sentences: usize,
}

impl LeadSummarizer {
    #[must_use]
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
        }
    }

    #[must_use]
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    /// Joins the leading sentences of `text` with single spaces.
    #[must_use]
    pub fn lead(&self, text: &str) -> String {
        split_sentences(text)
            .into_iter()
            .take(self.sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        Ok(self.lead(text))
    }

    fn name(&self) -> &'static str {
        "lead"
    }
}

/// Splits on `.`, `!` or `?` followed by whitespace or end of text.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }
        let at_boundary = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if at_boundary {
            let end = i + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}
