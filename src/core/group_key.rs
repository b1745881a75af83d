/// Derive the grouping key from an image filename.
///
/// Files that share a key belong to the same product and must always be
/// distributed to the same designer. The key is taken from the filename
/// prefix:
/// - first 13 characters, if they exist and are all decimal digits
///   (the barcode-style product id), otherwise
/// - first 12 characters, if the filename is at least 12 characters long,
///   otherwise
/// - no key.
pub fn extract_group_key(filename: &str) -> Option<String> {
    let chars: Vec<char> = filename.chars().collect();

    if chars.len() >= 13 && chars[..13].iter().all(|c| c.is_ascii_digit()) {
        return Some(chars[..13].iter().collect());
    }

    if chars.len() >= 12 {
        return Some(chars[..12].iter().collect());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_digit_prefix() {
        assert_eq!(
            extract_group_key("1234567890123_x.jpg"),
            Some("1234567890123".to_string())
        );
    }

    #[test]
    fn test_thirteen_chars_not_all_digits_falls_back_to_twelve() {
        assert_eq!(
            extract_group_key("ABCDEFGHIJKLX.png"),
            Some("ABCDEFGHIJKL".to_string())
        );
    }

    #[test]
    fn test_exactly_twelve_digits_uses_twelve() {
        // 12 digits followed by a non-digit: the 13-char rule fails on the
        // extension dot, so the 12-char rule applies.
        assert_eq!(
            extract_group_key("123456789012.jpg"),
            Some("123456789012".to_string())
        );
    }

    #[test]
    fn test_short_filename_has_no_key() {
        assert_eq!(extract_group_key("short.png"), None);
        assert_eq!(extract_group_key(""), None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_group_key("1234567890123_front.jpg");
        let second = extract_group_key("1234567890123_front.jpg");
        assert_eq!(first, second);
    }

    #[test]
    fn test_multibyte_filenames_do_not_panic() {
        // 12 characters, some multibyte: counted in characters, not bytes.
        assert_eq!(
            extract_group_key("ürünfotoğraf.jpg"),
            Some("ürünfotoğraf".to_string())
        );
    }
}
