use std::fmt;

/// Sentence terminators, ASCII and full-width.
const SENTENCE_TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// Lower-cased text with punctuation removed and whitespace collapsed to
/// single spaces. Built only through [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whitespace-delimited tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|token| !token.is_empty())
    }

    pub fn chars(&self) -> Vec<char> {
        self.0.chars().collect()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Letters, digits and underscore.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Lowercase, drop everything that is neither a word character nor
/// whitespace, collapse whitespace runs and trim.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut space_pending = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            space_pending = !normalized.is_empty();
        } else if is_word_char(ch) {
            if space_pending {
                normalized.push(' ');
                space_pending = false;
            }
            normalized.push(ch);
        }
    }

    NormalizedText(normalized)
}

/// Split on sentence terminators, trimming fragments and dropping empty
/// ones. Case is preserved.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(|ch: char| SENTENCE_TERMINATORS.contains(&ch))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Maximal runs of word characters.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !is_word_char(ch))
        .filter(|run| !run.is_empty())
}
