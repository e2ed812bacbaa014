//! Generative tests for the quantified invariants of the evaluator and lexer: purity,
//! associativity, and the type-purity / balanced-symbols boundary behaviors.

use proptest::prelude::*;
use reckon::{evaluate, tokenize, Context, ErrorKind, TokenKind};

fn arithmetic_expr() -> impl Strategy<Value = String> {
	let leaf = (1u32..100).prop_map(|n| n.to_string());
	leaf.prop_recursive(4, 64, 8, |inner| {
		prop_oneof![
			(inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}+{b})")),
			(inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}-{b})")),
			(inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a}*{b})")),
		]
	})
}

/// A sequence of number/operator tokens separated by variable whitespace, for exercising the
/// lexer's "whitespace is not part of any token" contract.
fn whitespace_padded_expr() -> impl Strategy<Value = String> {
	let operand = (1u32..1000).prop_map(|n| n.to_string());
	let operator = prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")];
	let gap = prop_oneof![Just(""), Just(" "), Just("  "), Just("\t")];
	(operand.clone(), prop::collection::vec((gap.clone(), operator, gap.clone(), operand), 0..6)).prop_map(|(first, rest)| {
		let mut source = first;
		for (before_op, operator, before_operand, operand) in rest {
			source.push_str(before_op);
			source.push_str(operator);
			source.push_str(before_operand);
			source.push_str(&operand);
		}
		source
	})
}

proptest! {
	#[test]
	fn evaluation_is_pure(expr in arithmetic_expr()) {
		let context = Context::default();
		let first = evaluate(&expr, &context);
		let second = evaluate(&expr, &context);
		match (first, second) {
			(Ok(a), Ok(b)) => prop_assert_eq!(a, b),
			(Err(a), Err(b)) => prop_assert_eq!(a.kind(), b.kind()),
			_ => prop_assert!(false, "evaluate was not pure for {expr}"),
		}
	}

	#[test]
	fn exponentiation_is_right_associative(a in 1u32..5, b in 1u32..5, c in 1u32..5) {
		let context = Context::default();
		let chained = evaluate(&format!("{a}^{b}^{c}"), &context).unwrap();
		let explicit = evaluate(&format!("{a}^({b}^{c})"), &context).unwrap();
		prop_assert_eq!(chained, explicit);
	}

	#[test]
	fn subtraction_is_left_associative(a in 1i32..1000, b in 1i32..1000, c in 1i32..1000) {
		let context = Context::default();
		let chained = evaluate(&format!("{a}-{b}-{c}"), &context).unwrap();
		let explicit = evaluate(&format!("({a}-{b})-{c}"), &context).unwrap();
		prop_assert_eq!(chained, explicit);
	}

	#[test]
	fn multiplication_binds_tighter_than_addition(a in 1i32..100, b in 1i32..100, c in 1i32..100) {
		let context = Context::default();
		let implicit_precedence = evaluate(&format!("{a}+{b}*{c}"), &context).unwrap();
		let explicit_precedence = evaluate(&format!("{a}+({b}*{c})"), &context).unwrap();
		prop_assert_eq!(implicit_precedence, explicit_precedence);
	}

	#[test]
	fn unmatched_open_paren_is_unbalanced(extra_opens in 1usize..10) {
		let context = Context::default();
		let source = format!("{}1", "(".repeat(extra_opens));
		let result = tokenize(&source, &context);
		prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::UnbalancedGroupSymbols);
	}

	#[test]
	fn unmatched_close_paren_is_unbalanced(extra_closes in 1usize..10) {
		let context = Context::default();
		let source = format!("1{}", ")".repeat(extra_closes));
		let result = tokenize(&source, &context);
		prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::UnbalancedGroupSymbols);
	}

	#[test]
	fn arithmetic_on_boolean_operand_is_bad_cast(number in -1000.0f64..1000.0) {
		let context = Context::default();
		let source = format!("{number:.3} + true");
		let result = evaluate(&source, &context);
		prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::BadCast);
	}

	#[test]
	fn logic_on_number_operand_is_bad_cast(number in -1000.0f64..1000.0) {
		let context = Context::default();
		let source = format!("true && {number:.3}");
		let result = evaluate(&source, &context);
		prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::BadCast);
	}

	#[test]
	fn tokenizer_round_trip_reconstructs_non_whitespace_input(source in whitespace_padded_expr()) {
		let context = Context::default();
		let tokens = tokenize(&source, &context).unwrap();
		let reconstructed: String = tokens
			.iter()
			.filter(|token| token.kind != TokenKind::Eof && !token.span.is_empty())
			.map(|token| token.text(&source))
			.collect();
		let expected: String = source.chars().filter(|character| !character.is_whitespace()).collect();
		prop_assert_eq!(reconstructed, expected);
	}

	#[test]
	fn implicit_multiplication_before_variable_matches_explicit_star(coefficient in 1i32..1000) {
		let context = Context::default();
		let implicit = evaluate(&format!("{coefficient}pi"), &context).unwrap();
		let explicit = evaluate(&format!("{coefficient}*pi"), &context).unwrap();
		prop_assert_eq!(implicit, explicit);
	}

	#[test]
	fn implicit_multiplication_before_group_matches_explicit_star(value in 1i32..1000) {
		let context = Context::default();
		let implicit = evaluate(&format!("pi({value})"), &context).unwrap();
		let explicit = evaluate(&format!("pi*({value})"), &context).unwrap();
		prop_assert_eq!(implicit, explicit);
	}
}
