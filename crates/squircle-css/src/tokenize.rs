//! Depth-aware splitting for shadow lists.
//!
//! Separators only count at parenthesis depth zero, so the commas and spaces
//! inside `rgba(1, 2, 3, 0.4)` never split anything. A stray `)` leaves the
//! depth at zero rather than going negative.

/// Split on top-level commas. Pieces are untrimmed; a trailing empty piece is
/// dropped.
pub fn split_top_level_commas(input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&input[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    if start < input.len() {
        out.push(&input[start..]);
    }
    out
}

/// Split on runs of top-level whitespace, dropping empty tokens.
pub fn split_top_level_whitespace(input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(&input[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(&input[s..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_inside_parens_do_not_split_entries() {
        let parts = split_top_level_commas("0 2 4 rgb(255,0,0), 1 1 1 1 #00ff00");
        assert_eq!(parts, vec!["0 2 4 rgb(255,0,0)", " 1 1 1 1 #00ff00"]);
    }

    #[test]
    fn whitespace_inside_parens_does_not_split_tokens() {
        let tokens = split_top_level_whitespace("0 0  0\t0 rgba(1, 2, 3, 0.4)");
        assert_eq!(tokens, vec!["0", "0", "0", "0", "rgba(1, 2, 3, 0.4)"]);
    }

    #[test]
    fn lone_comma_and_trailing_comma() {
        assert_eq!(split_top_level_commas(","), vec![""]);
        assert_eq!(split_top_level_commas("a,"), vec!["a"]);
        assert!(split_top_level_commas("").is_empty());
    }

    #[test]
    fn unbalanced_parens_never_go_negative() {
        assert_eq!(split_top_level_commas(")a,b"), vec![")a", "b"]);
        assert_eq!(split_top_level_whitespace("a) b"), vec!["a)", "b"]);
        // an unclosed paren swallows the rest
        assert_eq!(split_top_level_commas("rgb(1, 2"), vec!["rgb(1, 2"]);
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(split_top_level_whitespace("   ").is_empty());
    }
}
