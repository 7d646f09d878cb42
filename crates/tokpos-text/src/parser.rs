#![forbid(unsafe_code)]

//! Placeholder parser.
//!
//! Splits source text into literal runs and token references:
//!
//! - `{{Name}}` references token `Name`.
//! - `{{Name: input}}` passes `input` (trimmed) to the token.
//! - A stray `}}` outside a placeholder is literal text.
//!
//! Names are trimmed and limited to ASCII alphanumerics, `_`, `.` and `-`.

use crate::error::{Result, TokenStringError};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A token reference inside a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    pub name: String,
    pub input: Option<String>,
}

/// One run of parsed source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Literal(String),
    Token(TokenRef),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn parse_token(body: &str, offset: usize) -> Result<TokenRef> {
    let (name, input) = match body.split_once(':') {
        Some((name, input)) => (name.trim(), Some(input.trim())),
        None => (body.trim(), None),
    };
    if name.is_empty() {
        return Err(TokenStringError::EmptyName { offset });
    }
    if !name.chars().all(is_name_char) {
        return Err(TokenStringError::InvalidName {
            name: name.to_string(),
            offset,
        });
    }
    Ok(TokenRef {
        name: name.to_string(),
        input: input.filter(|i| !i.is_empty()).map(str::to_string),
    })
}

/// Parse `raw` into parts. Adjacent literal text is merged into one part.
pub fn parse(raw: &str) -> Result<Vec<Part>> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut rest = raw;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        literal.push_str(&rest[..start]);

        let body_start = start + OPEN.len();
        let Some(len) = rest[body_start..].find(CLOSE) else {
            return Err(TokenStringError::Unterminated {
                offset: offset + start,
            });
        };
        let body = &rest[body_start..body_start + len];
        if let Some(nested) = body.find(OPEN) {
            return Err(TokenStringError::Nested {
                offset: offset + body_start + nested,
            });
        }

        let token = parse_token(body, offset + start)?;
        if !literal.is_empty() {
            parts.push(Part::Literal(std::mem::take(&mut literal)));
        }
        parts.push(Part::Token(token));

        let consumed = body_start + len + CLOSE.len();
        rest = &rest[consumed..];
        offset += consumed;
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }
    Ok(parts)
}
