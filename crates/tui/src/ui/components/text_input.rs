//! UTF-8 safe text input state with cursor management and a character cap.
//!
//! Each registration field owns one of these. The cap enforces the field's
//! maximum character count at the input layer: keystrokes past the limit are
//! rejected outright rather than flagged as invalid afterwards.

#[derive(Clone, Debug, Default)]
pub struct TextInputState {
    /// The underlying text buffer
    input: String,
    /// Cursor byte index into `input` (always on a UTF-8 boundary)
    cursor: usize,
    /// Maximum character count accepted by `insert_char`, when set
    max_chars: Option<usize>,
}

impl TextInputState {
    /// Empty buffer capped at the given character count.
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Character count of the buffer (not its byte length).
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Whether the buffer has reached its character cap.
    pub fn at_capacity(&self) -> bool {
        self.max_chars.is_some_and(|max| self.char_count() >= max)
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Move cursor one Unicode scalar to the left.
    pub fn move_left(&mut self) {
        if let Some((index, _)) = self.input[..self.cursor].char_indices().next_back() {
            self.cursor = index;
        }
    }

    /// Move cursor one Unicode scalar to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    /// Insert a char at the cursor. Returns false when the buffer is already
    /// at its character cap and the keystroke was dropped.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.at_capacity() {
            return false;
        }
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Backspace the char immediately before the cursor. Returns whether the
    /// buffer changed.
    pub fn backspace(&mut self) -> bool {
        let Some((start, _)) = self.input[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.input.drain(start..self.cursor);
        self.cursor = start;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_move_insert_backspace() {
        let mut st = TextInputState::default();
        for c in "héllo".chars() {
            st.insert_char(c);
        }
        assert_eq!(st.input(), "héllo");
        st.move_left();
        st.move_left();
        st.backspace(); // delete the second l
        assert_eq!(st.input(), "hélo");
        st.move_home();
        st.move_right();
        st.backspace(); // delete the h
        assert_eq!(st.input(), "élo");
    }

    #[test]
    fn cap_rejects_keystrokes_past_the_limit() {
        let mut st = TextInputState::with_max_chars(3);
        assert!(st.insert_char('a'));
        assert!(st.insert_char('b'));
        assert!(st.insert_char('c'));
        assert!(st.at_capacity());
        assert!(!st.insert_char('d'));
        assert_eq!(st.input(), "abc");
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        let mut st = TextInputState::with_max_chars(2);
        assert!(st.insert_char('é'));
        assert!(st.insert_char('ü'));
        assert!(!st.insert_char('x'));
        assert_eq!(st.char_count(), 2);
    }

    #[test]
    fn backspace_frees_capacity() {
        let mut st = TextInputState::with_max_chars(1);
        assert!(st.insert_char('a'));
        assert!(!st.insert_char('b'));
        assert!(st.backspace());
        assert!(st.insert_char('b'));
        assert_eq!(st.input(), "b");
    }

    #[test]
    fn backspace_on_empty_reports_no_change() {
        let mut st = TextInputState::default();
        assert!(!st.backspace());
    }
}
