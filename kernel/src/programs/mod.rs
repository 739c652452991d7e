//! Symbolic programs: the s-expression tree and its textual syntax.

pub mod render;
pub mod sexpr;

pub use render::{
    parse_s_expression, render_s_expression, ParseError, Parsed, RenderMode, MAX_NESTING,
};
pub use sexpr::{SExpression, LEAF_PREFIX, VARIABLE_MARKER};
