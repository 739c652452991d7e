//! Textual type syntax.
//!
//! ```text
//! int                 atomic
//! [int]               list
//! {f, 10, 3}          tensor of f with shape (10, 3)
//! (int, int) -> int   arrow; arrows associate to the right
//! () -> int           nullary arrow
//! ```

use super::term::Type;

/// Error type for [`parse_type`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("unexpected end of type string")]
    UnexpectedEnd,
    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },
    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
    #[error("invalid tensor dimension {raw:?} at offset {offset}")]
    InvalidDimension { offset: usize, raw: String },
}

/// Render a type in the textual syntax.
#[must_use]
pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Atomic(name) => name.clone(),
        Type::List(element) => format!("[{}]", render_type(element)),
        Type::Tensor { element, shape } => {
            let mut out = format!("{{{}", render_type(element));
            for dim in shape {
                out.push_str(&format!(", {dim}"));
            }
            out.push('}');
            out
        }
        Type::Arrow { inputs, output } => {
            let inputs: Vec<String> = inputs.iter().map(render_type).collect();
            format!("({}) -> {}", inputs.join(", "), render_type(output))
        }
    }
}

/// Parse a type from the textual syntax.
///
/// # Errors
///
/// Returns [`TypeParseError`] on malformed input, including trailing tokens
/// after a complete type.
pub fn parse_type(s: &str) -> Result<Type, TypeParseError> {
    let tokens = tokenize(s);
    let mut parser = Parser { tokens, pos: 0 };
    let ty = parser.parse_type()?;
    match parser.peek() {
        None => Ok(ty),
        Some(tok) => Err(TypeParseError::TrailingInput { offset: tok.offset }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    offset: usize,
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = s.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '[' | ']' | '{' | '}' | '(' | ')' | ',' => tokens.push(Token {
                text: c.to_string(),
                offset,
            }),
            '-' if matches!(chars.peek(), Some((_, '>'))) => {
                chars.next();
                tokens.push(Token {
                    text: "->".into(),
                    offset,
                });
            }
            _ => {
                let mut text = c.to_string();
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_whitespace() || "[]{}(),".contains(next) || starts_arrow(&chars) {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                tokens.push(Token { text, offset });
            }
        }
    }
    tokens
}

/// Whether the next two characters are `->`. A lone `-` stays in the word.
fn starts_arrow(chars: &std::iter::Peekable<std::str::CharIndices<'_>>) -> bool {
    let mut ahead = chars.clone();
    matches!(ahead.next(), Some((_, '-'))) && matches!(ahead.next(), Some((_, '>')))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, TypeParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(TypeParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, text: &str) -> Result<(), TypeParseError> {
        let tok = self.next()?;
        if tok.text == text {
            Ok(())
        } else {
            Err(TypeParseError::UnexpectedToken {
                offset: tok.offset,
                found: tok.text,
            })
        }
    }

    fn parse_type(&mut self) -> Result<Type, TypeParseError> {
        let tok = self.next()?;
        match tok.text.as_str() {
            "[" => {
                let element = self.parse_type()?;
                self.expect("]")?;
                Ok(Type::list(element))
            }
            "{" => {
                let element = self.parse_type()?;
                let mut shape = Vec::new();
                loop {
                    let tok = self.next()?;
                    match tok.text.as_str() {
                        "}" => break,
                        "," => {
                            let dim = self.next()?;
                            let parsed = dim.text.parse::<usize>().map_err(|_| {
                                TypeParseError::InvalidDimension {
                                    offset: dim.offset,
                                    raw: dim.text.clone(),
                                }
                            })?;
                            shape.push(parsed);
                        }
                        _ => {
                            return Err(TypeParseError::UnexpectedToken {
                                offset: tok.offset,
                                found: tok.text,
                            })
                        }
                    }
                }
                Ok(Type::tensor(element, shape))
            }
            "(" => {
                let mut inputs = Vec::new();
                if self.peek().is_some_and(|t| t.text == ")") {
                    self.pos += 1;
                } else {
                    loop {
                        inputs.push(self.parse_type()?);
                        let sep = self.next()?;
                        match sep.text.as_str() {
                            ")" => break,
                            "," => {}
                            _ => {
                                return Err(TypeParseError::UnexpectedToken {
                                    offset: sep.offset,
                                    found: sep.text,
                                })
                            }
                        }
                    }
                }
                if self.peek().is_some_and(|t| t.text == "->") {
                    self.pos += 1;
                    let output = self.parse_type()?;
                    Ok(Type::arrow(inputs, output))
                } else if inputs.len() == 1 {
                    // Plain grouping: `(int)`.
                    Ok(inputs.remove(0))
                } else {
                    Err(match self.peek() {
                        Some(t) => TypeParseError::UnexpectedToken {
                            offset: t.offset,
                            found: t.text.clone(),
                        },
                        None => TypeParseError::UnexpectedEnd,
                    })
                }
            }
            "]" | "}" | ")" | "," | "->" => Err(TypeParseError::UnexpectedToken {
                offset: tok.offset,
                found: tok.text,
            }),
            _ => Ok(Type::Atomic(tok.text)),
        }
    }
}
