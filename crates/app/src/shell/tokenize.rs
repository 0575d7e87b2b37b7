//! Quote-aware splitting of shell input lines

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("unterminated {0} quote")]
    Unterminated(char),
}

/// Split `line` on whitespace. Single or double quotes group words; a
/// backslash escapes the next character outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(TokenizeError::Unterminated(q));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
