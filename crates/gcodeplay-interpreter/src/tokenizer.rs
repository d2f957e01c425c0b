//! Line tokenizer
//!
//! Splits one raw G-code line into letter/number words. The scan is
//! deliberately permissive: anything that is not an ASCII letter
//! immediately followed by a signed decimal number is skipped rather
//! than rejected, so trailing garbage and unsupported words never fail
//! a line.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Tokenized words of one line: uppercase letter mapped to its value.
///
/// When a letter repeats on a line the last occurrence wins. A `Words`
/// value is ephemeral; it is discarded once the line has been applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Words {
    values: HashMap<char, f64>,
}

impl Words {
    /// Value of a word, if the line carried it
    pub fn get(&self, letter: char) -> Option<f64> {
        self.values.get(&letter).copied()
    }

    /// Check whether the line carried a word
    pub fn has(&self, letter: char) -> bool {
        self.values.contains_key(&letter)
    }

    /// True when the line carried no words at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct words on the line
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX
        .get_or_init(|| Regex::new(r"([A-Z])(-?\d+(\.\d+)?)").expect("invalid regex pattern"))
}

/// Tokenize one raw G-code line.
///
/// Everything from the first `;` onward is treated as a comment and
/// discarded, the remainder is trimmed and uppercased, then scanned
/// left to right for letter/number words. Blank and comment-only lines
/// return an empty map. Pure function of the line text.
pub fn tokenize(line: &str) -> Words {
    let code = line.split(';').next().unwrap_or(line);
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Words::default();
    }

    let mut values = HashMap::new();
    for caps in word_regex().captures_iter(&code) {
        let letter = caps[1].chars().next();
        let value = caps[2].parse::<f64>();
        if let (Some(letter), Ok(value)) = (letter, value) {
            values.insert(letter, value);
        }
    }
    Words { values }
}
