pub(super) struct TextBufferEdit;

impl TextBufferEdit {
    pub(super) fn insert_char(value: &mut String, cursor_pos: &mut usize, c: char) {
        value.insert(*cursor_pos, c);
        *cursor_pos += c.len_utf8();
    }

    pub(super) fn backspace(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }

        let prev = Self::prev_char_start(value, *cursor_pos);
        value.remove(prev);
        *cursor_pos = prev;
    }

    pub(super) fn delete(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos < value.len() {
            value.remove(*cursor_pos);
        }
    }

    pub(super) fn left(value: &str, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }

        *cursor_pos = Self::prev_char_start(value, *cursor_pos);
    }

    pub(super) fn right(value: &str, cursor_pos: &mut usize) {
        if *cursor_pos >= value.len() {
            return;
        }

        *cursor_pos = value[*cursor_pos..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| *cursor_pos + i)
            .unwrap_or(value.len());
    }

    pub(super) fn home(cursor_pos: &mut usize) {
        *cursor_pos = 0;
    }

    pub(super) fn end(value: &str, cursor_pos: &mut usize) {
        *cursor_pos = value.len();
    }

    fn prev_char_start(value: &str, cursor_pos: usize) -> usize {
        value[..cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
