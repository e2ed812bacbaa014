use convert_case::{Case, Casing};
use regex_macro::regex;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::span::Span;

/// The kind of a lexed token. `Number` and `Identifier` carry their text via the token's span;
/// every other kind is fully determined by its kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	Number,
	UnaryOp,
	BinaryOp,
	RelOp,
	UnaryLogicOp,
	BinaryLogicOp,
	EqOp,
	ParamSep,
	Identifier,
	GroupStart,
	GroupEnd,
	Eof,
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", format!("{self:?}").to_case(Case::Lower))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
}

impl Token {
	pub const fn new(kind: TokenKind, span: Span) -> Self {
		Self { kind, span }
	}

	/// The source text this token covers. The caller must pass the same string `tokenize` was
	/// called with.
	pub fn text<'text>(&self, source: &'text str) -> &'text str {
		self.span.slice(source)
	}
}

/// The multi-character symbols recognized in stage 1, in the priority order used for longest-
/// prefix matching. Declaration order is iteration order via [`strum::IntoEnumIterator`].
#[derive(Debug, Clone, Copy, EnumIter)]
enum MultiCharSymbol {
	Exponent,
	Equal,
	LessOrEqual,
	GreaterOrEqual,
	NotEqual,
	And,
	Or,
}

impl MultiCharSymbol {
	const fn text(self) -> &'static str {
		match self {
			Self::Exponent => "**",
			Self::Equal => "==",
			Self::LessOrEqual => "<=",
			Self::GreaterOrEqual => ">=",
			Self::NotEqual => "!=",
			Self::And => "&&",
			Self::Or => "||",
		}
	}
}

fn match_multi_char_symbol(remaining: &str) -> Option<&'static str> {
	MultiCharSymbol::iter().map(MultiCharSymbol::text).find(|symbol| remaining.starts_with(symbol))
}

fn match_single_char_symbol(remaining: &str) -> Option<char> {
	let pattern = regex!(r"^[,()\[\]+\-*/^%!=<>]");
	pattern.find(remaining).map(|_| remaining.chars().next().expect("pattern matched a non-empty prefix"))
}

/// What stage 1 sliced out of the input, before stage 2 assigns it a [`TokenKind`].
#[derive(Debug, Clone, Copy)]
enum RawSlice {
	MultiSymbol,
	SingleSymbol(char),
	Number,
	Identifier,
}

struct Slice {
	kind: RawSlice,
	span: Span,
}

fn check_balanced_groups(source: &str) -> Result<(), Error> {
	let mut depth: i64 = 0;
	for character in source.chars() {
		match character {
			'(' => depth += 1,
			')' => {
				depth -= 1;
				if depth < 0 {
					return Err(Error::new(ErrorKind::UnbalancedGroupSymbols));
				}
			}
			_ => {}
		}
	}
	if depth != 0 {
		return Err(Error::new(ErrorKind::UnbalancedGroupSymbols));
	}
	Ok(())
}

/// Stage 1: slice the input into raw lexemes without yet deciding their final [`TokenKind`].
fn slice(source: &str) -> Result<Vec<Slice>, Error> {
	let mut slices = Vec::new();
	let mut position = 0;

	while position < source.len() {
		let remaining = &source[position..];
		let current = remaining.chars().next().expect("position is within bounds");

		if current.is_whitespace() {
			position += current.len_utf8();
			continue;
		}

		if let Some(symbol) = match_multi_char_symbol(remaining) {
			slices.push(Slice { kind: RawSlice::MultiSymbol, span: Span::new(position, symbol.len()) });
			position += symbol.len();
			continue;
		}

		if let Some(symbol) = match_single_char_symbol(remaining) {
			let length = symbol.len_utf8();
			slices.push(Slice { kind: RawSlice::SingleSymbol(symbol), span: Span::new(position, length) });
			position += length;
			continue;
		}

		let next = remaining.chars().nth(1);
		if current.is_ascii_digit() || (current == '.' && next.is_some_and(|next| next.is_ascii_digit())) {
			let mut length = 0;
			let mut dot_count = 0;
			for character in remaining.chars() {
				if character.is_ascii_digit() {
					length += 1;
				} else if character == '.' {
					dot_count += 1;
					length += 1;
				} else {
					break;
				}
			}
			if dot_count > 1 {
				return Err(Error::new(ErrorKind::MalformedInput).with_frame("lexer: number literal has more than one '.'"));
			}
			slices.push(Slice { kind: RawSlice::Number, span: Span::new(position, length) });
			position += length;
			continue;
		}

		if current.is_ascii_lowercase() {
			let length = remaining.chars().take_while(|character| character.is_ascii_lowercase()).count();
			slices.push(Slice { kind: RawSlice::Identifier, span: Span::new(position, length) });
			position += length;
			continue;
		}

		return Err(Error::new(ErrorKind::InvalidArg).with_frame(format!("lexer: unrecognized character '{current}'")));
	}

	Ok(slices)
}

/// Stage 2: assign each raw slice its [`TokenKind`], disambiguating unary vs. binary `+`/`-` by
/// what was emitted immediately before it. A single-char symbol the match has no kind for (e.g.
/// `[`/`]`, which stage 1 accepts but no grammar production ever uses) is rejected here rather
/// than panicking.
fn classify(source: &str, slices: Vec<Slice>) -> Result<Vec<Token>, Error> {
	let mut tokens = Vec::with_capacity(slices.len());
	let mut previous: Option<TokenKind> = None;

	for raw in slices {
		let text = raw.span.slice(source);
		let kind = match raw.kind {
			RawSlice::Number => TokenKind::Number,
			RawSlice::Identifier => TokenKind::Identifier,
			RawSlice::MultiSymbol => match text {
				"&&" | "||" => TokenKind::BinaryLogicOp,
				"==" | "!=" => TokenKind::EqOp,
				"<=" | ">=" => TokenKind::RelOp,
				_ => TokenKind::BinaryOp, // "**"
			},
			RawSlice::SingleSymbol(symbol) => match symbol {
				'(' => TokenKind::GroupStart,
				')' => TokenKind::GroupEnd,
				',' => TokenKind::ParamSep,
				'!' => TokenKind::UnaryLogicOp,
				'=' => TokenKind::EqOp,
				'<' | '>' => TokenKind::RelOp,
				'*' | '/' | '^' | '%' => TokenKind::BinaryOp,
				'+' | '-' => {
					let is_unary_position = matches!(
						previous,
						None | Some(TokenKind::GroupStart)
							| Some(TokenKind::BinaryOp)
							| Some(TokenKind::UnaryOp)
							| Some(TokenKind::RelOp)
							| Some(TokenKind::EqOp)
							| Some(TokenKind::BinaryLogicOp)
							| Some(TokenKind::UnaryLogicOp)
							| Some(TokenKind::ParamSep)
					);
					if is_unary_position {
						TokenKind::UnaryOp
					} else {
						TokenKind::BinaryOp
					}
				}
				other => return Err(Error::new(ErrorKind::InvalidArg).with_frame(format!("lexer: '{other}' has no token kind"))),
			},
		};
		tokens.push(Token::new(kind, raw.span));
		previous = Some(kind);
	}

	Ok(tokens)
}

/// Stage 3: insert zero-length implicit-multiplication tokens between adjacent tokens like
/// `2pi`, `pi(2)`, and `e(pi)(2(4))`.
fn insert_implicit_multiplication(source: &str, context: &Context, tokens: Vec<Token>) -> Vec<Token> {
	let Some(first) = tokens.first().copied() else {
		return tokens;
	};

	let mut result = Vec::with_capacity(tokens.len());
	result.push(first);

	for window in tokens.windows(2) {
		let (previous, current) = (window[0], window[1]);

		let left_qualifies = match previous.kind {
			TokenKind::Number | TokenKind::GroupEnd => true,
			TokenKind::Identifier => context.has_variable(previous.text(source)),
			_ => false,
		};
		let right_qualifies = matches!(current.kind, TokenKind::GroupStart | TokenKind::Identifier);

		if left_qualifies && right_qualifies {
			result.push(Token::new(TokenKind::BinaryOp, Span::empty_at(current.span.start())));
		}
		result.push(current);
	}

	result
}

/// Tokenizes `source` against `context`, producing a token stream terminated by [`TokenKind::Eof`].
/// `context` is only read (never mutated) to disambiguate identifiers during implicit-
/// multiplication insertion.
pub fn tokenize(source: &str, context: &Context) -> Result<Vec<Token>, Error> {
	check_balanced_groups(source)?;
	let slices = slice(source)?;
	let tokens = classify(source, slices)?;
	let mut tokens = insert_implicit_multiplication(source, context, tokens);
	tokens.push(Token::new(TokenKind::Eof, Span::empty_at(source.len())));
	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::{tokenize, TokenKind};
	use crate::context::Context;
	use crate::error::ErrorKind;

	fn kinds(source: &str) -> Vec<TokenKind> {
		tokenize(source, &Context::default()).unwrap().into_iter().map(|token| token.kind).collect()
	}

	#[test]
	fn unary_minus_after_open_paren() {
		assert_eq!(kinds("(-1)"), vec![TokenKind::GroupStart, TokenKind::UnaryOp, TokenKind::Number, TokenKind::GroupEnd, TokenKind::Eof]);
	}

	#[test]
	fn binary_minus_after_number() {
		assert_eq!(kinds("1-2"), vec![TokenKind::Number, TokenKind::BinaryOp, TokenKind::Number, TokenKind::Eof]);
	}

	#[test]
	fn implicit_multiplication_between_number_and_variable() {
		assert_eq!(kinds("2pi"), vec![TokenKind::Number, TokenKind::BinaryOp, TokenKind::Identifier, TokenKind::Eof]);
	}

	#[test]
	fn implicit_multiplication_chain_of_groups() {
		let kinds = kinds("e(pi)(2(4))");
		assert_eq!(kinds.iter().filter(|kind| **kind == TokenKind::BinaryOp).count(), 3);
	}

	#[test]
	fn unbalanced_parens_is_rejected() {
		let result = tokenize("(1 + 2", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::UnbalancedGroupSymbols);
	}

	#[test]
	fn two_decimal_points_is_malformed() {
		let result = tokenize("1.2.3", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::MalformedInput);
	}

	#[test]
	fn disallowed_character_is_invalid_arg() {
		let result = tokenize("1 @ 2", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArg);
	}

	#[test]
	fn bracket_characters_are_rejected_not_panicking() {
		let result = tokenize("[", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArg);
		let result = tokenize("1]2", &Context::default());
		assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArg);
	}

	#[test]
	fn equality_symbols_are_distinct_from_relational() {
		assert_eq!(kinds("1==2"), vec![TokenKind::Number, TokenKind::EqOp, TokenKind::Number, TokenKind::Eof]);
		assert_eq!(kinds("1<=2"), vec![TokenKind::Number, TokenKind::RelOp, TokenKind::Number, TokenKind::Eof]);
	}
}
