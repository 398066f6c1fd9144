/// Granularity requested from a [`Tokenizer`](crate::pipeline::traits::Tokenizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenLevel {
    /// Whitespace-separated words.
    Word,
    /// Individual characters, whitespace included.
    Character,
}

/// Remove ASCII punctuation and lowercase.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn tokenize_normalized(text: &str, level: TokenLevel) -> Vec<String> {
    let cleaned = normalize_text(text);
    match level {
        TokenLevel::Word => cleaned.split_whitespace().map(str::to_string).collect(),
        TokenLevel::Character => cleaned.chars().map(String::from).collect(),
    }
}
