use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::lexer::{tokenize, Token, TokenKind};

/// Which context table a unary tree node dispatches through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
	Op,
	Func,
	LogicOp,
}

/// Which context table a binary tree node dispatches through. `Rel` covers both relational
/// (`<`, `<=`, `>`, `>=`) and equality (`=`, `==`, `!=`) symbols, since the context keeps them in
/// one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
	Op,
	Func,
	Rel,
	LogicOp,
}

/// A parsed expression: a leaf value, or an operator/function node with its operand(s).
#[derive(Debug, Clone)]
pub enum ExprTree {
	Number(f64),
	Variable(String),
	Unary { kind: UnaryKind, name: String, operand: Box<ExprTree> },
	Binary { kind: BinaryKind, name: String, left: Box<ExprTree>, right: Box<ExprTree> },
}

struct Cursor<'tokens, 'source> {
	tokens: &'tokens [Token],
	source: &'source str,
	position: usize,
}

impl<'tokens, 'source> Cursor<'tokens, 'source> {
	fn peek(&self) -> Token {
		self.tokens[self.position]
	}

	fn peek_kind(&self) -> TokenKind {
		self.peek().kind
	}

	fn advance(&mut self) -> Token {
		let token = self.peek();
		if self.position + 1 < self.tokens.len() {
			self.position += 1;
		}
		token
	}

	fn text(&self, token: Token) -> &'source str {
		token.text(self.source)
	}

	/// The operator symbol a token stands for; a zero-length `BinaryOp` (implicit multiplication)
	/// always stands for `*`.
	fn operator_symbol(&self, token: Token) -> String {
		if token.span.is_empty() {
			"*".to_owned()
		} else {
			self.text(token).to_owned()
		}
	}
}

/// Remaps a "ran out of input" error from a nested call into the caller's more specific variant;
/// any other error kind passes through unchanged.
fn require_operand<T>(result: Result<T, Error>, on_missing: ErrorKind) -> Result<T, Error> {
	result.map_err(|error| if error.kind() == ErrorKind::MalformedInput { Error::new(on_missing) } else { error })
}

fn expression(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = logical_and(cursor, context)?;
	while cursor.peek_kind() == TokenKind::BinaryLogicOp && cursor.text(cursor.peek()) == "||" {
		cursor.advance();
		let right = require_operand(logical_and(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::LogicOp, name: "||".to_owned(), left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn logical_and(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = equality(cursor, context)?;
	while cursor.peek_kind() == TokenKind::BinaryLogicOp && cursor.text(cursor.peek()) == "&&" {
		cursor.advance();
		let right = require_operand(equality(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::LogicOp, name: "&&".to_owned(), left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn equality(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = relational(cursor, context)?;
	while cursor.peek_kind() == TokenKind::EqOp {
		let symbol = cursor.text(cursor.advance()).to_owned();
		let right = require_operand(relational(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::Rel, name: symbol, left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn relational(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = term(cursor, context)?;
	while cursor.peek_kind() == TokenKind::RelOp {
		let symbol = cursor.text(cursor.advance()).to_owned();
		let right = require_operand(term(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::Rel, name: symbol, left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn term(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = factor(cursor, context)?;
	loop {
		if cursor.peek_kind() != TokenKind::BinaryOp {
			break;
		}
		let symbol = cursor.operator_symbol(cursor.peek());
		if symbol != "+" && symbol != "-" {
			break;
		}
		cursor.advance();
		let right = require_operand(factor(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::Op, name: symbol, left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn factor(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let mut left = unary(cursor, context)?;
	loop {
		if cursor.peek_kind() != TokenKind::BinaryOp {
			break;
		}
		let symbol = cursor.operator_symbol(cursor.peek());
		if symbol != "*" && symbol != "/" && symbol != "%" {
			break;
		}
		cursor.advance();
		let right = require_operand(unary(cursor, context), ErrorKind::MalformedBinexp)?;
		left = ExprTree::Binary { kind: BinaryKind::Op, name: symbol, left: Box::new(left), right: Box::new(right) };
	}
	Ok(left)
}

fn unary(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	match cursor.peek_kind() {
		TokenKind::UnaryOp => {
			let symbol = cursor.text(cursor.advance()).to_owned();
			let operand = require_operand(unary(cursor, context), ErrorKind::MalformedUnexp)?;
			Ok(ExprTree::Unary { kind: UnaryKind::Op, name: symbol, operand: Box::new(operand) })
		}
		TokenKind::UnaryLogicOp => {
			let symbol = cursor.text(cursor.advance()).to_owned();
			let operand = require_operand(unary(cursor, context), ErrorKind::MalformedUnexp)?;
			Ok(ExprTree::Unary { kind: UnaryKind::LogicOp, name: symbol, operand: Box::new(operand) })
		}
		_ => exponentiation(cursor, context),
	}
}

fn exponentiation(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	let left = primary(cursor, context)?;
	if cursor.peek_kind() != TokenKind::BinaryOp {
		return Ok(left);
	}
	let symbol = cursor.operator_symbol(cursor.peek());
	if symbol != "^" && symbol != "**" {
		return Ok(left);
	}
	cursor.advance();
	let right = require_operand(exponentiation(cursor, context), ErrorKind::MalformedBinexp)?;
	Ok(ExprTree::Binary { kind: BinaryKind::Op, name: symbol, left: Box::new(left), right: Box::new(right) })
}

fn primary(cursor: &mut Cursor, context: &Context) -> Result<ExprTree, Error> {
	match cursor.peek_kind() {
		TokenKind::Number => {
			let token = cursor.advance();
			let text = cursor.text(token);
			let value: f64 = text.parse().map_err(|_| Error::new(ErrorKind::MalformedInput))?;
			if !value.is_finite() {
				return Err(Error::new(ErrorKind::MalformedInput).with_frame("parser::primary: numeric literal is not finite"));
			}
			Ok(ExprTree::Number(value))
		}
		TokenKind::GroupStart => {
			cursor.advance();
			let inner = expression(cursor, context)?;
			if cursor.peek_kind() != TokenKind::GroupEnd {
				return Err(Error::new(ErrorKind::UnbalancedGroupSymbols));
			}
			cursor.advance();
			Ok(inner)
		}
		TokenKind::Identifier => {
			let token = cursor.advance();
			let name = cursor.text(token).to_owned();
			if context.has_variable(&name) {
				Ok(ExprTree::Variable(name))
			} else if context.is_function(&name) {
				function_call(cursor, context, name)
			} else {
				Err(Error::new(ErrorKind::UnknownId).with_frame(format!("parser::primary: '{name}' is not known to this context")))
			}
		}
		TokenKind::Eof => Err(Error::new(ErrorKind::MalformedInput)),
		_ => Err(Error::new(ErrorKind::UnknownToken)),
	}
}

fn function_call(cursor: &mut Cursor, context: &Context, name: String) -> Result<ExprTree, Error> {
	if cursor.peek_kind() != TokenKind::GroupStart {
		return Err(Error::new(ErrorKind::UncalledFunc));
	}
	cursor.advance();

	let arity = if context.has_unary_func(&name) { 1 } else { 2 };
	let mut arguments = Vec::with_capacity(arity);

	if cursor.peek_kind() != TokenKind::GroupEnd {
		loop {
			arguments.push(expression(cursor, context)?);
			if cursor.peek_kind() == TokenKind::ParamSep {
				cursor.advance();
				continue;
			}
			break;
		}
	}

	if cursor.peek_kind() != TokenKind::GroupEnd {
		return Err(Error::new(ErrorKind::UnclosedFunc));
	}
	cursor.advance();

	if arguments.len() != arity {
		return Err(Error::new(ErrorKind::WrongArity));
	}

	let mut arguments = arguments.into_iter();
	if arity == 1 {
		Ok(ExprTree::Unary { kind: UnaryKind::Func, name, operand: Box::new(arguments.next().expect("checked len == 1")) })
	} else {
		let left = arguments.next().expect("checked len == 2");
		let right = arguments.next().expect("checked len == 2");
		Ok(ExprTree::Binary { kind: BinaryKind::Func, name, left: Box::new(left), right: Box::new(right) })
	}
}

/// Tokenizes and parses `source` against `context` into an [`ExprTree`], consuming the entire
/// input; leftover tokens after a complete parse are an `UnprocessedInput` error.
pub fn parse(source: &str, context: &Context) -> Result<ExprTree, Error> {
	let tokens = tokenize(source, context)?;
	let mut cursor = Cursor { tokens: &tokens, source, position: 0 };
	let tree = expression(&mut cursor, context)?;
	if cursor.peek_kind() != TokenKind::Eof {
		return Err(Error::new(ErrorKind::UnprocessedInput));
	}
	Ok(tree)
}

#[cfg(test)]
mod tests {
	use super::{parse, BinaryKind, ExprTree};
	use crate::context::Context;
	use crate::error::ErrorKind;

	#[test]
	fn exponentiation_is_right_associative() {
		let tree = parse("2^3^2", &Context::default()).unwrap();
		match tree {
			ExprTree::Binary { kind: BinaryKind::Op, name, left, right } => {
				assert_eq!(name, "^");
				assert!(matches!(*left, ExprTree::Number(n) if n == 2.0));
				assert!(matches!(*right, ExprTree::Binary { .. }));
			}
			other => panic!("expected a binary exponentiation node, got {other:?}"),
		}
	}

	#[test]
	fn multiplication_binds_tighter_than_addition() {
		let tree = parse("1+2*3", &Context::default()).unwrap();
		match tree {
			ExprTree::Binary { kind: BinaryKind::Op, name, right, .. } => {
				assert_eq!(name, "+");
				assert!(matches!(*right, ExprTree::Binary { .. }));
			}
			other => panic!("expected a binary addition node, got {other:?}"),
		}
	}

	#[test]
	fn unknown_identifier_is_rejected() {
		let result = parse("notavariable", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::UnknownId);
	}

	#[test]
	fn function_without_parens_is_uncalled() {
		let result = parse("sin", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::UncalledFunc);
	}

	#[test]
	fn wrong_arity_is_rejected() {
		let result = parse("sin(1, 2)", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::WrongArity);
	}

	#[test]
	fn trailing_tokens_are_unprocessed_input() {
		let result = parse("1 2", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::UnprocessedInput);
	}

	#[test]
	fn missing_binary_rhs_is_malformed_binexp() {
		let result = parse("1+", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::MalformedBinexp);
	}

	#[test]
	fn missing_unary_operand_is_malformed_unexp() {
		let result = parse("-", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::MalformedUnexp);
	}

	#[test]
	fn implicit_multiplication_parses_as_star() {
		let tree = parse("2pi", &Context::default()).unwrap();
		match tree {
			ExprTree::Binary { kind: BinaryKind::Op, name, .. } => assert_eq!(name, "*"),
			other => panic!("expected an implicit multiplication node, got {other:?}"),
		}
	}
}
