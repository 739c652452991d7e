//! S-expression textual syntax: `(symbol child1 child2 ...)`.
//!
//! A bare token denotes either an atom or a zero-child node. The parser
//! cannot tell the two apart on its own, so callers name the symbols that
//! must come back as zero-child nodes (`should_not_be_leaf`). Inside a list
//! every element is a program node, so atoms only survive at top level.
//!
//! [`RenderMode::ForStitch`] renders zero-child calls as `leaf-<symbol>` so
//! that `(f)` and `f` stay distinct for tools that would otherwise conflate
//! them. `$`-prefixed symbols are pattern variables and pass through as is.

use std::collections::HashSet;

use super::sexpr::{SExpression, LEAF_PREFIX, VARIABLE_MARKER};

/// Rendering convention shared by the renderer and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Zero-child nodes render as the bare symbol.
    #[default]
    Default,
    /// Zero-child, non-variable nodes render as `leaf-<symbol>`.
    ForStitch,
}

/// Structural error in s-expression text. Never recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected exactly one top-level expression, found {found}")]
    MalformedInput { found: usize },
    #[error("unclosed '(' at offset {offset}")]
    UnbalancedParen { offset: usize },
    #[error("unexpected ')' at offset {offset}")]
    UnexpectedCloseParen { offset: usize },
    #[error("empty list at offset {offset}")]
    EmptyList { offset: usize },
    #[error("list at offset {offset} does not start with a symbol")]
    ListHeadNotSymbol { offset: usize },
    #[error("list at offset {offset} nests deeper than {} levels", MAX_NESTING)]
    TooDeep { offset: usize },
}

/// Deepest list nesting the parser accepts. Programs are dropped, rendered
/// and evaluated recursively, so unbounded depth would exhaust the stack.
pub const MAX_NESTING: usize = 1024;

/// Result of parsing one top-level expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// A bare token that is not a known zero-child node.
    Atom(String),
    /// A program node.
    Expr(SExpression),
}

impl Parsed {
    /// Treat an atom as a zero-child node.
    #[must_use]
    pub fn into_expression(self) -> SExpression {
        match self {
            Self::Atom(symbol) => SExpression::leaf(symbol),
            Self::Expr(e) => e,
        }
    }

    #[must_use]
    pub fn as_expression(&self) -> Option<&SExpression> {
        match self {
            Self::Atom(_) => None,
            Self::Expr(e) => Some(e),
        }
    }
}

/// Render a program on a single line.
#[must_use]
pub fn render_s_expression(e: &SExpression, mode: RenderMode) -> String {
    let mut out = String::new();
    write_expr(&mut out, e, mode);
    out
}

fn write_expr(out: &mut String, e: &SExpression, mode: RenderMode) {
    if e.is_leaf() {
        if mode == RenderMode::ForStitch && !e.symbol().starts_with(VARIABLE_MARKER) {
            out.push_str(LEAF_PREFIX);
        }
        out.push_str(e.symbol());
        return;
    }
    out.push('(');
    out.push_str(e.symbol());
    for child in e.children() {
        out.push(' ');
        write_expr(out, child, mode);
    }
    out.push(')');
}

/// Parse exactly one top-level expression.
///
/// # Errors
///
/// Returns [`ParseError::MalformedInput`] if `s` holds zero or several
/// top-level expressions, [`ParseError::TooDeep`] past [`MAX_NESTING`], and
/// the other [`ParseError`] variants for unbalanced or misshapen lists.
pub fn parse_s_expression(
    s: &str,
    should_not_be_leaf: &HashSet<&str>,
    mode: RenderMode,
) -> Result<Parsed, ParseError> {
    let converter = Converter {
        should_not_be_leaf,
        mode,
    };
    // Open lists, innermost last. Parsing never recurses.
    let mut open: Vec<OpenList<'_>> = Vec::new();
    let mut top_level = Vec::new();
    for token in tokenize(s) {
        match token {
            Token::Open(offset) => {
                if open.len() >= MAX_NESTING {
                    return Err(ParseError::TooDeep { offset });
                }
                if let Some(parent) = open.last() {
                    if parent.head.is_none() {
                        return Err(ParseError::ListHeadNotSymbol {
                            offset: parent.offset,
                        });
                    }
                }
                open.push(OpenList {
                    offset,
                    head: None,
                    children: Vec::new(),
                });
            }
            Token::Word(w) => match open.last_mut() {
                None => top_level.push(converter.convert_word(w)),
                Some(list) if list.head.is_none() => list.head = Some(w),
                Some(list) => list.children.push(converter.convert_word(w).into_expression()),
            },
            Token::Close(offset) => {
                let Some(list) = open.pop() else {
                    return Err(ParseError::UnexpectedCloseParen { offset });
                };
                let Some(head) = list.head else {
                    return Err(ParseError::EmptyList {
                        offset: list.offset,
                    });
                };
                let expr = SExpression::new(head, list.children);
                match open.last_mut() {
                    None => top_level.push(Parsed::Expr(expr)),
                    Some(parent) => parent.children.push(expr),
                }
            }
        }
    }
    if let Some(list) = open.last() {
        return Err(ParseError::UnbalancedParen {
            offset: list.offset,
        });
    }
    if top_level.len() != 1 {
        return Err(ParseError::MalformedInput {
            found: top_level.len(),
        });
    }
    Ok(top_level.remove(0))
}

#[derive(Debug)]
enum Token<'a> {
    Open(usize),
    Close(usize),
    Word(&'a str),
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() || c == '(' || c == ')' {
            if let Some(start) = word_start.take() {
                tokens.push(Token::Word(&s[start..i]));
            }
            match c {
                '(' => tokens.push(Token::Open(i)),
                ')' => tokens.push(Token::Close(i)),
                _ => {}
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&s[start..]));
    }
    tokens
}

struct OpenList<'a> {
    offset: usize,
    head: Option<&'a str>,
    children: Vec<SExpression>,
}

struct Converter<'s> {
    should_not_be_leaf: &'s HashSet<&'s str>,
    mode: RenderMode,
}

impl Converter<'_> {
    fn convert_word(&self, w: &str) -> Parsed {
        if self.mode == RenderMode::ForStitch {
            if let Some(symbol) = w.strip_prefix(LEAF_PREFIX) {
                return Parsed::Expr(SExpression::leaf(symbol));
            }
            if w.starts_with(VARIABLE_MARKER) {
                return Parsed::Expr(SExpression::leaf(w));
            }
        }
        if self.should_not_be_leaf.contains(w) {
            return Parsed::Expr(SExpression::leaf(w));
        }
        Parsed::Atom(w.to_string())
    }
}
