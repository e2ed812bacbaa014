use crate::error::{Error, ErrorKind};
use crate::value::Value;

/// A binding's associativity: for equal-precedence operators, whether `a op b op c` parses as
/// `(a op b) op c` (left) or `a op (b op c)` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
	Left,
	Right,
}

/// Relative binding strength of operators; higher binds tighter. Values mirror the literal
/// numbers in the default-context table: binary `+`/`-` at 1, `*`/`/`/`%` at 2, unary `+`/`-`/`!`
/// at 3, `^`/`**` at 4, with relational/equality/logical tiers extending below 1.
pub type Precedence = i32;

pub const PRECEDENCE_LOGIC_OR: Precedence = -3;
pub const PRECEDENCE_LOGIC_AND: Precedence = -2;
pub const PRECEDENCE_EQUALITY: Precedence = -1;
pub const PRECEDENCE_RELATIONAL: Precedence = 0;
pub const PRECEDENCE_ADDITIVE: Precedence = 1;
pub const PRECEDENCE_MULTIPLICATIVE: Precedence = 2;
pub const PRECEDENCE_UNARY: Precedence = 3;
pub const PRECEDENCE_EXPONENTIATION: Precedence = 4;

pub type UnaryFn = fn(Value) -> Result<Value, Error>;
pub type BinaryFn = fn(Value, Value) -> Result<Value, Error>;

#[derive(Clone)]
struct UnaryFunction {
	name: String,
	implementation: UnaryFn,
}

#[derive(Clone)]
struct BinaryFunction {
	name: String,
	implementation: BinaryFn,
}

#[derive(Clone)]
struct UnaryOperator {
	symbol: String,
	precedence: Precedence,
	associativity: Associativity,
	implementation: UnaryFn,
}

#[derive(Clone)]
struct BinaryOperator {
	symbol: String,
	precedence: Precedence,
	associativity: Associativity,
	implementation: BinaryFn,
}

const OPERATOR_SYMBOL_CHARS: &str = ",()[]+-*/^%!=<>&|";

fn is_identifier(name: &str) -> bool {
	!name.is_empty() && name.bytes().all(|byte| byte.is_ascii_lowercase())
}

fn is_operator_symbol(symbol: &str) -> bool {
	!symbol.is_empty() && symbol.chars().all(|character| OPERATOR_SYMBOL_CHARS.contains(character))
}

/// Trig/hyperbolic function name paired with its radian and degree implementations, used to swap
/// bindings when [`Context::set_degrees_mode`] is toggled.
const UNARY_TRIG_BINDINGS: &[(&str, UnaryFn, UnaryFn)] = &[
	("sin", Value::sin, Value::sin_deg),
	("cos", Value::cos, Value::cos_deg),
	("tan", Value::tan, Value::tan_deg),
	("sec", Value::sec, Value::sec_deg),
	("csc", Value::csc, Value::csc_deg),
	("cot", Value::cot, Value::cot_deg),
	("asin", Value::asin, Value::asin_deg),
	("acos", Value::acos, Value::acos_deg),
	("atan", Value::atan, Value::atan_deg),
	("asec", Value::asec, Value::asec_deg),
	("acsc", Value::acsc, Value::acsc_deg),
	("acot", Value::acot, Value::acot_deg),
	("sinh", Value::sinh, Value::sinh_deg),
	("cosh", Value::cosh, Value::cosh_deg),
	("tanh", Value::tanh, Value::tanh_deg),
	("asinh", Value::asinh, Value::asinh_deg),
	("acosh", Value::acosh, Value::acosh_deg),
	("atanh", Value::atanh, Value::atanh_deg),
];

const BINARY_TRIG_BINDINGS: &[(&str, BinaryFn, BinaryFn)] = &[("atan2", Value::atan2, Value::atan2_deg)];

/// The registry of everything the parser and evaluator can name: variables, functions, and
/// operators, organized as seven ordered collections rather than hash maps (cardinality per
/// collection is small, so linear search is both simpler and plenty fast).
pub struct Context {
	variables: Vec<(String, Value)>,
	unary_functions: Vec<UnaryFunction>,
	binary_functions: Vec<BinaryFunction>,
	unary_operators: Vec<UnaryOperator>,
	binary_operators: Vec<BinaryOperator>,
	relational_operators: Vec<BinaryOperator>,
	unary_logic_operators: Vec<UnaryOperator>,
	binary_logic_operators: Vec<BinaryOperator>,
	degrees_mode: bool,
}

impl Context {
	/// Identifier is in use as a variable or a function name (these three categories share one
	/// namespace).
	fn identifier_in_use(&self, name: &str) -> bool {
		self.variables.iter().any(|(existing, _)| existing == name)
			|| self.unary_functions.iter().any(|function| function.name == name)
			|| self.binary_functions.iter().any(|function| function.name == name)
	}

	/// Symbol is in use in any operator category other than the unary/binary arithmetic-operator
	/// pair, which are allowed to overlap (to permit `+`/`-` ambiguity).
	fn symbol_in_use_outside_arithmetic(&self, symbol: &str) -> bool {
		self.relational_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_logic_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_logic_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn add_variable(&mut self, name: impl Into<String>, value: Value) -> Result<(), Error> {
		let name = name.into();
		if !is_identifier(&name) || self.identifier_in_use(&name) {
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.variables.push((name, value));
		Ok(())
	}

	pub fn add_unary_func(&mut self, name: impl Into<String>, implementation: UnaryFn) -> Result<(), Error> {
		let name = name.into();
		if !is_identifier(&name) || self.identifier_in_use(&name) {
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.unary_functions.push(UnaryFunction { name, implementation });
		Ok(())
	}

	pub fn add_binary_func(&mut self, name: impl Into<String>, implementation: BinaryFn) -> Result<(), Error> {
		let name = name.into();
		if !is_identifier(&name) || self.identifier_in_use(&name) {
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.binary_functions.push(BinaryFunction { name, implementation });
		Ok(())
	}

	pub fn add_unary_op(&mut self, symbol: impl Into<String>, precedence: Precedence, associativity: Associativity, implementation: UnaryFn) -> Result<(), Error> {
		let symbol = symbol.into();
		if !is_operator_symbol(&symbol) || self.unary_operators.iter().any(|operator| operator.symbol == symbol) || self.symbol_in_use_outside_arithmetic(&symbol) {
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.unary_operators.push(UnaryOperator { symbol, precedence, associativity, implementation });
		Ok(())
	}

	pub fn add_binary_op(&mut self, symbol: impl Into<String>, precedence: Precedence, associativity: Associativity, implementation: BinaryFn) -> Result<(), Error> {
		let symbol = symbol.into();
		if !is_operator_symbol(&symbol) || self.binary_operators.iter().any(|operator| operator.symbol == symbol) || self.symbol_in_use_outside_arithmetic(&symbol) {
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.binary_operators.push(BinaryOperator { symbol, precedence, associativity, implementation });
		Ok(())
	}

	pub fn add_rel_op(&mut self, symbol: impl Into<String>, precedence: Precedence, associativity: Associativity, implementation: BinaryFn) -> Result<(), Error> {
		let symbol = symbol.into();
		if !is_operator_symbol(&symbol)
			|| self.relational_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_logic_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_logic_operators.iter().any(|operator| operator.symbol == symbol)
		{
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.relational_operators.push(BinaryOperator { symbol, precedence, associativity, implementation });
		Ok(())
	}

	pub fn add_unary_logic_op(&mut self, symbol: impl Into<String>, precedence: Precedence, associativity: Associativity, implementation: UnaryFn) -> Result<(), Error> {
		let symbol = symbol.into();
		if !is_operator_symbol(&symbol)
			|| self.unary_logic_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.relational_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_logic_operators.iter().any(|operator| operator.symbol == symbol)
		{
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.unary_logic_operators.push(UnaryOperator { symbol, precedence, associativity, implementation });
		Ok(())
	}

	pub fn add_binary_logic_op(&mut self, symbol: impl Into<String>, precedence: Precedence, associativity: Associativity, implementation: BinaryFn) -> Result<(), Error> {
		let symbol = symbol.into();
		if !is_operator_symbol(&symbol)
			|| self.binary_logic_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.binary_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.relational_operators.iter().any(|operator| operator.symbol == symbol)
			|| self.unary_logic_operators.iter().any(|operator| operator.symbol == symbol)
		{
			return Err(Error::new(ErrorKind::InvalidArg));
		}
		self.binary_logic_operators.push(BinaryOperator { symbol, precedence, associativity, implementation });
		Ok(())
	}

	pub fn has_variable(&self, name: &str) -> bool {
		self.variables.iter().any(|(existing, _)| existing == name)
	}

	pub fn get_variable(&self, name: &str) -> Option<Value> {
		self.variables.iter().find(|(existing, _)| existing == name).map(|(_, value)| *value)
	}

	pub fn has_unary_func(&self, name: &str) -> bool {
		self.unary_functions.iter().any(|function| function.name == name)
	}

	pub fn get_unary_func(&self, name: &str) -> Option<UnaryFn> {
		self.unary_functions.iter().find(|function| function.name == name).map(|function| function.implementation)
	}

	pub fn has_binary_func(&self, name: &str) -> bool {
		self.binary_functions.iter().any(|function| function.name == name)
	}

	pub fn get_binary_func(&self, name: &str) -> Option<BinaryFn> {
		self.binary_functions.iter().find(|function| function.name == name).map(|function| function.implementation)
	}

	/// Whether `name` is bound as a variable, a unary function, or a binary function — the three
	/// categories that make up the identifier namespace.
	pub fn is_known_identifier(&self, name: &str) -> bool {
		self.identifier_in_use(name)
	}

	/// Whether `name` names a function (unary or binary), as opposed to a variable.
	pub fn is_function(&self, name: &str) -> bool {
		self.has_unary_func(name) || self.has_binary_func(name)
	}

	pub fn has_unary_op(&self, symbol: &str) -> bool {
		self.unary_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn get_unary_op(&self, symbol: &str) -> Option<(Precedence, Associativity, UnaryFn)> {
		self.unary_operators
			.iter()
			.find(|operator| operator.symbol == symbol)
			.map(|operator| (operator.precedence, operator.associativity, operator.implementation))
	}

	pub fn has_binary_op(&self, symbol: &str) -> bool {
		self.binary_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn get_binary_op(&self, symbol: &str) -> Option<(Precedence, Associativity, BinaryFn)> {
		self.binary_operators
			.iter()
			.find(|operator| operator.symbol == symbol)
			.map(|operator| (operator.precedence, operator.associativity, operator.implementation))
	}

	pub fn has_rel_op(&self, symbol: &str) -> bool {
		self.relational_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn get_rel_op(&self, symbol: &str) -> Option<(Precedence, Associativity, BinaryFn)> {
		self.relational_operators
			.iter()
			.find(|operator| operator.symbol == symbol)
			.map(|operator| (operator.precedence, operator.associativity, operator.implementation))
	}

	pub fn has_unary_logic_op(&self, symbol: &str) -> bool {
		self.unary_logic_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn get_unary_logic_op(&self, symbol: &str) -> Option<(Precedence, Associativity, UnaryFn)> {
		self.unary_logic_operators
			.iter()
			.find(|operator| operator.symbol == symbol)
			.map(|operator| (operator.precedence, operator.associativity, operator.implementation))
	}

	pub fn has_binary_logic_op(&self, symbol: &str) -> bool {
		self.binary_logic_operators.iter().any(|operator| operator.symbol == symbol)
	}

	pub fn get_binary_logic_op(&self, symbol: &str) -> Option<(Precedence, Associativity, BinaryFn)> {
		self.binary_logic_operators
			.iter()
			.find(|operator| operator.symbol == symbol)
			.map(|operator| (operator.precedence, operator.associativity, operator.implementation))
	}

	pub const fn is_degrees_mode(&self) -> bool {
		self.degrees_mode
	}

	/// Swaps every trig/hyperbolic function binding between its radian and degree variant.
	/// Idempotent: toggling to the mode already in effect is a no-op.
	pub fn set_degrees_mode(&mut self, enabled: bool) {
		if self.degrees_mode == enabled {
			return;
		}
		self.degrees_mode = enabled;
		for (name, radians, degrees) in UNARY_TRIG_BINDINGS {
			if let Some(function) = self.unary_functions.iter_mut().find(|function| function.name == *name) {
				function.implementation = if enabled { *degrees } else { *radians };
			}
		}
		for (name, radians, degrees) in BINARY_TRIG_BINDINGS {
			if let Some(function) = self.binary_functions.iter_mut().find(|function| function.name == *name) {
				function.implementation = if enabled { *degrees } else { *radians };
			}
		}
	}
}

impl Default for Context {
	fn default() -> Self {
		let variables = vec![
			("pi".to_owned(), Value::Number(std::f64::consts::PI)),
			("e".to_owned(), Value::Number(std::f64::consts::E)),
			("true".to_owned(), Value::Boolean(true)),
			("false".to_owned(), Value::Boolean(false)),
		];

		let unary_operators = vec![
			UnaryOperator { symbol: "+".to_owned(), precedence: PRECEDENCE_UNARY, associativity: Associativity::Right, implementation: Value::unary_plus },
			UnaryOperator { symbol: "-".to_owned(), precedence: PRECEDENCE_UNARY, associativity: Associativity::Right, implementation: Value::unary_minus },
		];

		let binary_operators = vec![
			BinaryOperator { symbol: "+".to_owned(), precedence: PRECEDENCE_ADDITIVE, associativity: Associativity::Left, implementation: Value::add },
			BinaryOperator { symbol: "-".to_owned(), precedence: PRECEDENCE_ADDITIVE, associativity: Associativity::Left, implementation: Value::subtract },
			BinaryOperator { symbol: "*".to_owned(), precedence: PRECEDENCE_MULTIPLICATIVE, associativity: Associativity::Left, implementation: Value::multiply },
			BinaryOperator { symbol: "/".to_owned(), precedence: PRECEDENCE_MULTIPLICATIVE, associativity: Associativity::Left, implementation: Value::divide },
			BinaryOperator { symbol: "%".to_owned(), precedence: PRECEDENCE_MULTIPLICATIVE, associativity: Associativity::Left, implementation: Value::modulo },
			BinaryOperator { symbol: "^".to_owned(), precedence: PRECEDENCE_EXPONENTIATION, associativity: Associativity::Right, implementation: Value::pow },
			BinaryOperator { symbol: "**".to_owned(), precedence: PRECEDENCE_EXPONENTIATION, associativity: Associativity::Right, implementation: Value::pow },
		];

		let relational_operators = vec![
			BinaryOperator { symbol: "<".to_owned(), precedence: PRECEDENCE_RELATIONAL, associativity: Associativity::Left, implementation: Value::lt },
			BinaryOperator { symbol: "<=".to_owned(), precedence: PRECEDENCE_RELATIONAL, associativity: Associativity::Left, implementation: Value::lteq },
			BinaryOperator { symbol: ">".to_owned(), precedence: PRECEDENCE_RELATIONAL, associativity: Associativity::Left, implementation: Value::gt },
			BinaryOperator { symbol: ">=".to_owned(), precedence: PRECEDENCE_RELATIONAL, associativity: Associativity::Left, implementation: Value::gteq },
			BinaryOperator { symbol: "=".to_owned(), precedence: PRECEDENCE_EQUALITY, associativity: Associativity::Left, implementation: Value::equals },
			BinaryOperator { symbol: "==".to_owned(), precedence: PRECEDENCE_EQUALITY, associativity: Associativity::Left, implementation: Value::equals },
			BinaryOperator { symbol: "!=".to_owned(), precedence: PRECEDENCE_EQUALITY, associativity: Associativity::Left, implementation: Value::nequals },
		];

		let unary_logic_operators = vec![UnaryOperator {
			symbol: "!".to_owned(),
			precedence: PRECEDENCE_UNARY,
			associativity: Associativity::Right,
			implementation: Value::not,
		}];

		let binary_logic_operators = vec![
			BinaryOperator { symbol: "&&".to_owned(), precedence: PRECEDENCE_LOGIC_AND, associativity: Associativity::Left, implementation: Value::and },
			BinaryOperator { symbol: "||".to_owned(), precedence: PRECEDENCE_LOGIC_OR, associativity: Associativity::Left, implementation: Value::or },
		];

		let unary_functions = UNARY_TRIG_BINDINGS
			.iter()
			.map(|(name, radians, _)| UnaryFunction { name: (*name).to_owned(), implementation: *radians })
			.chain([
				UnaryFunction { name: "log".to_owned(), implementation: Value::log },
				UnaryFunction { name: "ln".to_owned(), implementation: Value::ln },
				UnaryFunction { name: "exp".to_owned(), implementation: Value::exp },
				UnaryFunction { name: "sqrt".to_owned(), implementation: Value::sqrt },
				UnaryFunction { name: "cbrt".to_owned(), implementation: Value::cbrt },
				UnaryFunction { name: "ceil".to_owned(), implementation: Value::ceil },
				UnaryFunction { name: "floor".to_owned(), implementation: Value::floor },
				UnaryFunction { name: "round".to_owned(), implementation: Value::round },
				UnaryFunction { name: "abs".to_owned(), implementation: Value::abs },
			])
			.collect();

		let binary_functions = BINARY_TRIG_BINDINGS
			.iter()
			.map(|(name, radians, _)| BinaryFunction { name: (*name).to_owned(), implementation: *radians })
			.chain([BinaryFunction { name: "pow".to_owned(), implementation: Value::pow }])
			.collect();

		Self {
			variables,
			unary_functions,
			binary_functions,
			unary_operators,
			binary_operators,
			relational_operators,
			unary_logic_operators,
			binary_logic_operators,
			degrees_mode: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Associativity, Context, PRECEDENCE_UNARY};
	use crate::value::Value;

	#[test]
	fn default_context_has_reserved_identifiers() {
		let context = Context::default();
		assert_eq!(context.get_variable("pi"), Some(Value::Number(std::f64::consts::PI)));
		assert!(context.is_function("sin"));
		assert!(!context.is_function("pi"));
	}

	#[test]
	fn plus_is_both_unary_and_binary() {
		let context = Context::default();
		assert!(context.has_unary_op("+"));
		assert!(context.has_binary_op("+"));
	}

	#[test]
	fn rejects_cross_category_symbol_collision() {
		let mut context = Context::default();
		let result = context.add_rel_op("+", super::PRECEDENCE_RELATIONAL, Associativity::Left, Value::lt);
		assert!(result.is_err());
	}

	#[test]
	fn rejects_duplicate_identifier_across_categories() {
		let mut context = Context::default();
		let result = context.add_unary_func("pi", Value::sin);
		assert!(result.is_err());
	}

	#[test]
	fn degrees_mode_round_trips() {
		let mut context = Context::default();
		let ninety_degrees = Value::Number(90.0);
		context.set_degrees_mode(true);
		let sine = (context.get_unary_func("sin").unwrap())(ninety_degrees).unwrap();
		assert_eq!(sine, Value::Number(1.0));

		context.set_degrees_mode(false);
		assert!(!context.is_degrees_mode());
		let sine_of_ninety_radians = (context.get_unary_func("sin").unwrap())(ninety_degrees).unwrap();
		assert_ne!(sine_of_ninety_radians, Value::Number(1.0));
	}

	#[test]
	fn degrees_toggle_is_idempotent() {
		let mut context = Context::default();
		context.set_degrees_mode(true);
		let before = context.get_unary_func("cos").unwrap();
		context.set_degrees_mode(true);
		let after = context.get_unary_func("cos").unwrap();
		assert_eq!(before as usize, after as usize);
	}

	#[test]
	fn unary_precedence_matches_spec_literal() {
		assert_eq!(PRECEDENCE_UNARY, 3);
	}
}
