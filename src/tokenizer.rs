use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A token is a run of plain characters and complete quoted runs. A quote
    // with no closing partner later on the line is matched as a plain char.
    static ref TOKEN: Regex =
        Regex::new(r#"(?:[^\s"']+|"[^"]*"|'[^']*'|["'])+"#).expect("invalid token regex");
}

/// Split one input line into shell-like tokens.
///
/// Whitespace outside quotes separates tokens. Quoted runs stay inside their
/// token with the quote characters kept as content, so `text="a b"` is one
/// token. Blank input yields no tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
