//! A small, embeddable mathematical expression engine: a lexer, a precedence-climbing recursive
//! descent parser, and a [`Context`] that holds everything the parser and evaluator can name
//! (variables, operators, and functions).
//!
//! ```
//! use reckon::{evaluate, Context};
//!
//! let context = Context::default();
//! assert_eq!(evaluate("2 * (1 + pi)", &context).unwrap().as_number().unwrap(), 2.0 * (1.0 + std::f64::consts::PI));
//! ```

pub mod context;
pub mod error;
mod eval;
mod lexer;
mod num;
mod parser;
pub mod span;
pub mod value;

pub use context::Context;
pub use error::{Diagnostics, Error, ErrorKind};
pub use eval::{eval as eval_tree, evaluate};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse, ExprTree};
pub use span::Span;
pub use value::Value;
