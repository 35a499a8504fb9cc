//! Inline helpers shared by rules that scan line text.

/// Replace the contents of inline code spans with spaces.
///
/// Backtick runs open a span that closes at the next run of the same
/// length; the backticks themselves are blanked too. Unmatched runs are left
/// as literal text. Character positions are preserved so columns computed
/// on the masked text match the original line.
pub fn mask_code_spans(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut masked = chars.clone();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '`' {
            i += 1;
            continue;
        }

        let open_len = run_length(&chars, i);
        match find_closing_run(&chars, i + open_len, open_len) {
            Some(close) => {
                let end = close + open_len;
                for c in &mut masked[i..end] {
                    *c = ' ';
                }
                i = end;
            }
            None => i += open_len,
        }
    }

    masked.into_iter().collect()
}

/// Convert a byte offset into a 1-indexed character column.
pub fn char_column(text: &str, byte_offset: usize) -> usize {
    text.get(..byte_offset)
        .map_or(byte_offset, |prefix| prefix.chars().count())
        + 1
}

fn run_length(chars: &[char], start: usize) -> usize {
    chars[start..].iter().take_while(|&&c| c == '`').count()
}

fn find_closing_run(chars: &[char], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '`' {
            let run = run_length(chars, i);
            if run == len {
                return Some(i);
            }
            i += run;
        } else {
            i += 1;
        }
    }
    None
}
