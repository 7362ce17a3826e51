use crate::word::{is_word, Word, MEMORY_SIZE};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("line {0}: cannot parse `{1}` as a word")]
    ParseWord(usize, String),

    #[error("line {0}: word {1} out of range")]
    WordOverflow(usize, i64),

    #[error("image holds more than 1000 words")]
    TooLong,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

/// The full memory contents handed from the compiler to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image(Vec<Word>);

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    pub fn new() -> Self {
        Image(vec![0; MEMORY_SIZE])
    }

    /// Build from leading words; the remainder is zero.
    pub fn from_words(words: &[Word]) -> Result<Self, ImageError> {
        if words.len() > MEMORY_SIZE {
            return Err(ImageError::TooLong);
        }
        let mut image = Image::new();
        for (idx, word) in words.iter().enumerate() {
            if !is_word(*word as i64) {
                return Err(ImageError::WordOverflow(idx + 1, *word as i64));
            }
            image.0[idx] = *word;
        }
        Ok(image)
    }

    pub fn get(&self, addr: usize) -> Word {
        self.0[addr]
    }

    pub fn set(&mut self, addr: usize, word: Word) {
        self.0[addr] = word;
    }

    pub fn words(&self) -> &[Word] {
        &self.0
    }
}

// ----------------------------------------------------------------------------
// Text format: one signed decimal per line

impl Image {
    pub fn parse(text: &str) -> Result<Self, ImageError> {
        let mut words = Vec::with_capacity(MEMORY_SIZE);
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: i64 = line
                .parse()
                .map_err(|_| ImageError::ParseWord(idx + 1, line.to_string()))?;
            if !is_word(value) {
                return Err(ImageError::WordOverflow(idx + 1, value));
            }
            if words.len() == MEMORY_SIZE {
                return Err(ImageError::TooLong);
            }
            words.push(value as Word);
        }
        Image::from_words(&words)
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(MEMORY_SIZE * 3);
        for word in &self.0 {
            text.push_str(&word.to_string());
            text.push('\n');
        }
        text
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ImageError::FileOpen(path.display().to_string(), e))?;
        Image::parse(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_text())
            .map_err(|e| ImageError::FileWrite(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text() {
        let image = Image::from_words(&[10999, -5, 43000]).unwrap();
        let text = image.to_text();
        assert_eq!(text.lines().count(), MEMORY_SIZE);
        assert!(text.starts_with("10999\n-5\n43000\n0\n"));
        assert_eq!(Image::parse(&text).unwrap(), image);
    }

    #[test]
    fn test_short_image() {
        let image = Image::parse("20007\n\n43000\n").unwrap();
        assert_eq!(image.get(0), 20007);
        assert_eq!(image.get(1), 43000);
        assert_eq!(image.get(999), 0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Image::parse("1\nhoge\n"),
            Err(ImageError::ParseWord(2, _))
        ));
        assert!(matches!(
            Image::parse("100000\n"),
            Err(ImageError::WordOverflow(1, 100000))
        ));
        let long = "0\n".repeat(MEMORY_SIZE + 1);
        assert!(matches!(Image::parse(&long), Err(ImageError::TooLong)));
    }
}
