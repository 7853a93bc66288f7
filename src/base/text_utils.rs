//! Text manipulation utilities for working with source code.

/// Check if a character is considered part of a Groovy identifier.
///
/// Uses Unicode Standard Annex #31 continue rules, plus `$` which Groovy
/// (like Java) accepts anywhere in an identifier.
#[inline]
pub fn is_word_character(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

/// Convert a UTF-16 code unit offset within `chars` into a char index.
///
/// Offsets pointing into the middle of a surrogate pair round up to the next
/// char. Offsets past the end clamp to `chars.len()`.
fn char_index_for_utf16(chars: &[char], utf16_offset: usize) -> usize {
    let mut units = 0;
    for (idx, c) in chars.iter().enumerate() {
        if units >= utf16_offset {
            return idx;
        }
        units += c.len_utf16();
    }
    chars.len()
}

/// Find the boundaries of the word touching `position`.
///
/// Unlike a strict "cursor is on a word" check, a cursor placed directly
/// after the last character of a word still touches it, which is where
/// editors put the caret after typing a name.
///
/// Returns `Some((start, end))` as char indices (end exclusive), or `None`
/// if no word character is adjacent.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    let position = position.min(chars.len());

    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    (start < end).then_some((start, end))
}

/// Extract the identifier touching a cursor on a single line.
///
/// `character` is the LSP character offset, counted in UTF-16 code units.
///
/// # Example
/// ```
/// use groovy_lsp::base::extract_word_at_cursor;
///
/// let line = "def total = price";
/// assert_eq!(extract_word_at_cursor(line, 5), Some("total".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 9), Some("total".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 10), None); // '='
/// ```
pub fn extract_word_at_cursor(line: &str, character: u32) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let position = char_index_for_utf16(&chars, character as usize);

    let (start, end) = find_word_boundaries(&chars, position)?;

    Some(chars[start..end].iter().collect())
}

/// Return line `line` of `text` (0-based), splitting on `'\n'`.
///
/// A trailing `'\r'` is stripped so CRLF documents behave like LF ones.
pub fn line_at(text: &str, line: u32) -> Option<&str> {
    text.split('\n')
        .nth(line as usize)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_word_character() {
        assert!(is_word_character('a'));
        assert!(is_word_character('Z'));
        assert!(is_word_character('0'));
        assert!(is_word_character('_'));
        assert!(is_word_character('$'));
        assert!(is_word_character('é'));
        assert!(!is_word_character(' '));
        assert!(!is_word_character('.'));
        assert!(!is_word_character('('));
    }

    #[test]
    fn test_find_word_boundaries() {
        let chars: Vec<char> = "foo bar_baz".chars().collect();

        assert_eq!(find_word_boundaries(&chars, 0), Some((0, 3)));
        assert_eq!(find_word_boundaries(&chars, 2), Some((0, 3)));
        // just past "foo"
        assert_eq!(find_word_boundaries(&chars, 3), Some((0, 3)));
        assert_eq!(find_word_boundaries(&chars, 7), Some((4, 11)));
        assert_eq!(find_word_boundaries(&chars, 11), Some((4, 11)));
    }

    #[test]
    fn test_find_word_boundaries_none() {
        let chars: Vec<char> = "a  + b".chars().collect();
        assert_eq!(find_word_boundaries(&chars, 2), None);
        assert_eq!(find_word_boundaries(&[], 0), None);
    }

    #[test]
    fn test_extract_word_at_cursor() {
        let line = "    int add(int a, int b) {";
        assert_eq!(extract_word_at_cursor(line, 9), Some("add".to_string()));
        assert_eq!(extract_word_at_cursor(line, 16), Some("a".to_string()));
        assert_eq!(extract_word_at_cursor(line, 1), None);
        assert_eq!(extract_word_at_cursor(line, 200), None);
    }

    #[test]
    fn test_extract_word_with_dollar() {
        assert_eq!(
            extract_word_at_cursor("x = $inner", 6),
            Some("$inner".to_string())
        );
    }

    #[test]
    fn test_extract_word_counts_utf16() {
        // '𝒳' is two UTF-16 units, so "name" starts at character 3
        let line = "𝒳 name";
        assert_eq!(extract_word_at_cursor(line, 4), Some("name".to_string()));
    }

    #[test]
    fn test_line_at() {
        let text = "first\r\nsecond\nthird";
        assert_eq!(line_at(text, 0), Some("first"));
        assert_eq!(line_at(text, 1), Some("second"));
        assert_eq!(line_at(text, 2), Some("third"));
        assert_eq!(line_at(text, 3), None);
    }
}
