use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Number of terminal columns `s` occupies (CJK and emoji count as two).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into `max_width` terminal columns, appending "..." when cut.
///
/// Widths of 3 or less have no room for an ellipsis, so the result is
/// simply the longest prefix that fits. Returns `Cow::Borrowed` whenever
/// the input already fits.
///
/// ```
/// use boomer::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Ratio", 10), "Ratio");
/// assert_eq!(truncate_to_width("Brat Summer", 8), "Brat ...");
/// assert_eq!(truncate_to_width("Ratio", 2), "Ra");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let with_ellipsis = max_width > ELLIPSIS_WIDTH;
    let budget = if with_ellipsis {
        max_width - ELLIPSIS_WIDTH
    } else {
        max_width
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    if with_ellipsis {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    } else {
        Cow::Owned(s[..end].to_string())
    }
}

/// Keep at most `max_chars` Unicode scalar values of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn is_stripped_control(b: u8) -> bool {
    b == 0x7f || (b < 0x20 && b != b'\t' && b != b'\n' && b != b'\r')
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Remote trend text is rendered straight into the terminal, so CSI
/// (`ESC [ ... final`), OSC (`ESC ] ... BEL|ST`), bare ESC, DEL and C0
/// controls are dropped. Tab, newline and carriage return survive.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if !bytes.iter().any(|&b| b == 0x1b || is_stripped_control(b)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == 0x1b {
            match bytes.get(i + 1) {
                Some(b'[') => {
                    i += 2;
                    while i < bytes.len() {
                        let c = bytes[i];
                        i += 1;
                        if (0x40..=0x7e).contains(&c) {
                            break;
                        }
                    }
                }
                Some(b']') => {
                    i += 2;
                    while i < bytes.len() {
                        if bytes[i] == 0x07 {
                            i += 1;
                            break;
                        }
                        if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                            i += 2;
                            break;
                        }
                        i += 1;
                    }
                }
                _ => i += 1,
            }
        } else if is_stripped_control(b) {
            i += 1;
        } else {
            let start = i;
            while i < bytes.len() && bytes[i] != 0x1b && !is_stripped_control(bytes[i]) {
                i += 1;
            }
            // Only ASCII bytes terminate the run, so the slice is on a char boundary.
            out.push_str(&s[start..i]);
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        let result = truncate_to_width("NPC Streamer", 40);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_cjk_truncation() {
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好世界", 5), "你...");
    }

    #[test]
    fn test_narrow_widths_have_no_ellipsis() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("你好", 1), "");
        assert_eq!(truncate_to_width("你好", 3), "你");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_strip_clean_text_borrowed() {
        let input = "line one\nline\ttwo\r\n";
        let result = strip_control_chars(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_c0_and_del() {
        assert_eq!(strip_control_chars("ra\x00ti\x07o\x7f"), "ratio");
    }

    #[test]
    fn test_strip_csi_and_osc() {
        assert_eq!(strip_control_chars("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_control_chars("\x1b]0;title\x07body"), "body");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\body"), "body");
        assert_eq!(strip_control_chars("a\x1bb"), "ab");
    }

    #[test]
    fn test_strip_preserves_unicode() {
        assert_eq!(strip_control_chars("日本 \x1b[1m語\x1b[0m"), "日本 語");
    }
}
