//! Single-line text buffer with a length cap

/// Editable text with a maximum length in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuffer {
    text: String,
    max_length: usize,
}

impl FieldBuffer {
    pub fn new(max_length: usize) -> Self {
        FieldBuffer {
            text: String::new(),
            max_length,
        }
    }

    /// Append a character. Returns false (and changes nothing) at the cap.
    pub fn append(&mut self, c: char) -> bool {
        if self.len() >= self.max_length {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Remove the last character; no-op when empty
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[cfg(test)]
    pub fn is_full(&self) -> bool {
        self.len() >= self.max_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
