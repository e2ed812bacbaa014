use crate::context::Context;
use crate::error::{Error, ErrorKind};
use crate::parser::{BinaryKind, ExprTree, UnaryKind};
use crate::value::Value;

/// Post-order evaluation of a parsed tree against a context. Dispatch is purely by which context
/// table the node's `kind` names; an implicit-multiplication node is just a `Binary` node whose
/// name is `"*"`, so it needs no special case here.
pub fn eval(tree: &ExprTree, context: &Context) -> Result<Value, Error> {
	match tree {
		ExprTree::Number(value) => Ok(Value::Number(*value)),
		ExprTree::Variable(name) => context.get_variable(name).ok_or_else(|| Error::new(ErrorKind::UnknownId).with_frame(format!("eval: variable '{name}' is no longer bound"))),
		ExprTree::Unary { kind, name, operand } => {
			let operand = eval(operand, context)?;
			eval_unary(*kind, name, operand, context)
		}
		ExprTree::Binary { kind, name, left, right } => {
			let left = eval(left, context)?;
			let right = eval(right, context)?;
			eval_binary(*kind, name, left, right, context)
		}
	}
}

fn eval_unary(kind: UnaryKind, name: &str, operand: Value, context: &Context) -> Result<Value, Error> {
	match kind {
		UnaryKind::Op => {
			let (_, _, implementation) = context.get_unary_op(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(operand).map_err(|error| error.with_frame(format!("eval::unary: applying operator '{name}'")))
		}
		UnaryKind::Func => {
			let implementation = context.get_unary_func(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(operand).map_err(|error| error.with_frame(format!("eval::unary: calling '{name}'")))
		}
		UnaryKind::LogicOp => {
			let (_, _, implementation) = context.get_unary_logic_op(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(operand).map_err(|error| error.with_frame(format!("eval::unary: applying operator '{name}'")))
		}
	}
}

fn eval_binary(kind: BinaryKind, name: &str, left: Value, right: Value, context: &Context) -> Result<Value, Error> {
	match kind {
		BinaryKind::Op => {
			let (_, _, implementation) = context.get_binary_op(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(left, right).map_err(|error| error.with_frame(format!("eval::binary: applying operator '{name}'")))
		}
		BinaryKind::Func => {
			let implementation = context.get_binary_func(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(left, right).map_err(|error| error.with_frame(format!("eval::binary: calling '{name}'")))
		}
		BinaryKind::Rel => {
			let (_, _, implementation) = context.get_rel_op(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(left, right).map_err(|error| error.with_frame(format!("eval::binary: applying operator '{name}'")))
		}
		BinaryKind::LogicOp => {
			let (_, _, implementation) = context.get_binary_logic_op(name).ok_or_else(|| Error::new(ErrorKind::UnknownId))?;
			implementation(left, right).map_err(|error| error.with_frame(format!("eval::binary: applying operator '{name}'")))
		}
	}
}

/// Parses and evaluates `source` against `context` in one call.
pub fn evaluate(source: &str, context: &Context) -> Result<Value, Error> {
	let tree = crate::parser::parse(source, context)?;
	eval(&tree, context)
}

#[cfg(test)]
mod tests {
	use super::evaluate;
	use crate::context::Context;
	use crate::error::ErrorKind;
	use crate::value::Value;

	#[test]
	fn arithmetic_precedence() {
		let context = Context::default();
		assert_eq!(evaluate("1+2*3", &context).unwrap(), Value::Number(7.0));
	}

	#[test]
	fn implicit_multiplication_evaluates() {
		let context = Context::default();
		assert_eq!(evaluate("2pi", &context).unwrap(), Value::Number(2.0 * std::f64::consts::PI));
	}

	#[test]
	fn relational_and_logic_compose() {
		let context = Context::default();
		assert_eq!(evaluate("1 < 2 && 3 > 2", &context).unwrap(), Value::Boolean(true));
	}

	#[test]
	fn unary_function_call() {
		let context = Context::default();
		assert_eq!(evaluate("sqrt(4)", &context).unwrap(), Value::Number(2.0));
	}

	#[test]
	fn binary_function_call() {
		let context = Context::default();
		let result = evaluate("pow(2, 10)", &context).unwrap();
		assert_eq!(result, Value::Number(1024.0));
	}

	#[test]
	fn division_by_zero_propagates() {
		let context = Context::default();
		let result = evaluate("1/0", &context);
		assert_eq!(result.unwrap_err().kind(), ErrorKind::DivByZero);
	}

	#[test]
	fn degrees_mode_affects_evaluation() {
		let mut context = Context::default();
		context.set_degrees_mode(true);
		let sine = evaluate("sin(90)", &context).unwrap();
		assert_eq!(sine, Value::Number(1.0));
	}
}
