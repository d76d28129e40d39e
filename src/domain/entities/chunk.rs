use serde::{Deserialize, Serialize};

/// A unit of text to embed, keyed by its position in the upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
}

impl Chunk {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self {
            id: position.to_string(),
            text: text.into(),
        }
    }

    /// Assigns ids `"0"`, `"1"`, ... in input order.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i, t.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_position() {
        let chunks = Chunk::from_texts(&["a", "b", "c"]);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].id, "0");
        assert_eq!(chunks[2].id, "2");
        assert_eq!(chunks[2].text, "c");
    }

    #[test]
    fn test_empty_input() {
        let chunks = Chunk::from_texts::<&str>(&[]);
        assert!(chunks.is_empty());
    }
}
