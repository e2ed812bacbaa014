use crate::error::{Error, ErrorKind};
use crate::num;

/// A discriminated union of everything the engine can produce: a number or a boolean. Values are
/// `Copy` and never own heap memory; no variant is ever silently coerced into another, a mismatch
/// always surfaces as [`ErrorKind::BadCast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
	Number(f64),
	Boolean(bool),
}

impl Value {
	pub fn as_number(self) -> Result<f64, Error> {
		match self {
			Self::Number(number) => Ok(number),
			Self::Boolean(_) => Err(Error::new(ErrorKind::BadCast)),
		}
	}

	pub fn as_boolean(self) -> Result<bool, Error> {
		match self {
			Self::Boolean(boolean) => Ok(boolean),
			Self::Number(_) => Err(Error::new(ErrorKind::BadCast)),
		}
	}

	pub const fn is_number(self) -> bool {
		matches!(self, Self::Number(_))
	}

	pub const fn is_boolean(self) -> bool {
		matches!(self, Self::Boolean(_))
	}

	fn unary_numeric(self, op: impl FnOnce(f64) -> Result<f64, ErrorKind>) -> Result<Self, Error> {
		let a = self.as_number()?;
		op(a).map(Self::Number).map_err(Error::new)
	}

	fn binary_numeric(self, other: Self, op: impl FnOnce(f64, f64) -> Result<f64, ErrorKind>) -> Result<Self, Error> {
		let a = self.as_number()?;
		let b = other.as_number()?;
		op(a, b).map(Self::Number).map_err(Error::new)
	}

	fn binary_relational(self, other: Self, op: impl FnOnce(f64, f64) -> bool) -> Result<Self, Error> {
		let a = self.as_number()?;
		let b = other.as_number()?;
		Ok(Self::Boolean(op(a, b)))
	}

	fn unary_logic(self, op: impl FnOnce(bool) -> bool) -> Result<Self, Error> {
		let a = self.as_boolean()?;
		Ok(Self::Boolean(op(a)))
	}

	fn binary_logic(self, other: Self, op: impl FnOnce(bool, bool) -> bool) -> Result<Self, Error> {
		let a = self.as_boolean()?;
		let b = other.as_boolean()?;
		Ok(Self::Boolean(op(a, b)))
	}

	// Arithmetic (binary operators)
	pub fn add(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::add)
	}

	pub fn subtract(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::subtract)
	}

	pub fn multiply(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::multiply)
	}

	pub fn divide(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::divide)
	}

	pub fn modulo(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::modulo)
	}

	pub fn pow(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::pow)
	}

	// Arithmetic (unary operators)
	pub fn unary_plus(self) -> Result<Self, Error> {
		self.unary_numeric(num::unary_plus)
	}

	pub fn unary_minus(self) -> Result<Self, Error> {
		self.unary_numeric(num::unary_minus)
	}

	// Relational / equality (always numeric operands, boolean result)
	pub fn equals(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::equals)
	}

	pub fn nequals(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::nequals)
	}

	pub fn lt(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::lt)
	}

	pub fn lteq(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::lteq)
	}

	pub fn gt(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::gt)
	}

	pub fn gteq(self, other: Self) -> Result<Self, Error> {
		self.binary_relational(other, num::gteq)
	}

	// Logic (always boolean operands and result)
	pub fn not(self) -> Result<Self, Error> {
		self.unary_logic(|a| !a)
	}

	pub fn and(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a && b)
	}

	pub fn or(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a || b)
	}

	pub fn nand(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| !(a && b))
	}

	pub fn nor(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| !(a || b))
	}

	pub fn xor(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a != b)
	}

	pub fn xnor(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a == b)
	}

	/// Material implication: `¬a ∨ b`.
	pub fn matcond(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| !a || b)
	}

	pub fn equals_l(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a == b)
	}

	pub fn nequals_l(self, other: Self) -> Result<Self, Error> {
		self.binary_logic(other, |a, b| a != b)
	}

	// Unary functions
	pub fn ceil(self) -> Result<Self, Error> {
		self.unary_numeric(num::ceil)
	}

	pub fn floor(self) -> Result<Self, Error> {
		self.unary_numeric(num::floor)
	}

	pub fn round(self) -> Result<Self, Error> {
		self.unary_numeric(num::round)
	}

	pub fn abs(self) -> Result<Self, Error> {
		self.unary_numeric(num::abs)
	}

	pub fn log(self) -> Result<Self, Error> {
		self.unary_numeric(num::log)
	}

	pub fn ln(self) -> Result<Self, Error> {
		self.unary_numeric(num::ln)
	}

	pub fn exp(self) -> Result<Self, Error> {
		self.unary_numeric(num::exp)
	}

	pub fn sqrt(self) -> Result<Self, Error> {
		self.unary_numeric(num::sqrt)
	}

	pub fn cbrt(self) -> Result<Self, Error> {
		self.unary_numeric(num::cbrt)
	}

	pub fn sin(self) -> Result<Self, Error> {
		self.unary_numeric(num::sin)
	}

	pub fn cos(self) -> Result<Self, Error> {
		self.unary_numeric(num::cos)
	}

	pub fn tan(self) -> Result<Self, Error> {
		self.unary_numeric(num::tan)
	}

	pub fn sec(self) -> Result<Self, Error> {
		self.unary_numeric(num::sec)
	}

	pub fn csc(self) -> Result<Self, Error> {
		self.unary_numeric(num::csc)
	}

	pub fn cot(self) -> Result<Self, Error> {
		self.unary_numeric(num::cot)
	}

	pub fn asin(self) -> Result<Self, Error> {
		self.unary_numeric(num::asin)
	}

	pub fn acos(self) -> Result<Self, Error> {
		self.unary_numeric(num::acos)
	}

	pub fn atan(self) -> Result<Self, Error> {
		self.unary_numeric(num::atan)
	}

	pub fn asec(self) -> Result<Self, Error> {
		self.unary_numeric(num::asec)
	}

	pub fn acsc(self) -> Result<Self, Error> {
		self.unary_numeric(num::acsc)
	}

	pub fn acot(self) -> Result<Self, Error> {
		self.unary_numeric(num::acot)
	}

	pub fn sinh(self) -> Result<Self, Error> {
		self.unary_numeric(num::sinh)
	}

	pub fn cosh(self) -> Result<Self, Error> {
		self.unary_numeric(num::cosh)
	}

	pub fn tanh(self) -> Result<Self, Error> {
		self.unary_numeric(num::tanh)
	}

	pub fn asinh(self) -> Result<Self, Error> {
		self.unary_numeric(num::asinh)
	}

	pub fn acosh(self) -> Result<Self, Error> {
		self.unary_numeric(num::acosh)
	}

	pub fn atanh(self) -> Result<Self, Error> {
		self.unary_numeric(num::atanh)
	}

	pub fn sin_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::sin_deg)
	}

	pub fn cos_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::cos_deg)
	}

	pub fn tan_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::tan_deg)
	}

	pub fn sec_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::sec_deg)
	}

	pub fn csc_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::csc_deg)
	}

	pub fn cot_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::cot_deg)
	}

	pub fn asin_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::asin_deg)
	}

	pub fn acos_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::acos_deg)
	}

	pub fn atan_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::atan_deg)
	}

	pub fn asec_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::asec_deg)
	}

	pub fn acsc_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::acsc_deg)
	}

	pub fn acot_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::acot_deg)
	}

	pub fn sinh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::sinh_deg)
	}

	pub fn cosh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::cosh_deg)
	}

	pub fn tanh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::tanh_deg)
	}

	pub fn asinh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::asinh_deg)
	}

	pub fn acosh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::acosh_deg)
	}

	pub fn atanh_deg(self) -> Result<Self, Error> {
		self.unary_numeric(num::atanh_deg)
	}

	// Binary functions
	pub fn atan2(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::atan2)
	}

	pub fn atan2_deg(self, other: Self) -> Result<Self, Error> {
		self.binary_numeric(other, num::atan2_deg)
	}
}

#[cfg(test)]
mod tests {
	use super::Value;
	use crate::error::ErrorKind;

	#[test]
	fn arithmetic_on_booleans_is_bad_cast() {
		let result = Value::Boolean(true).add(Value::Number(1.0));
		assert_eq!(result.unwrap_err().kind(), ErrorKind::BadCast);
	}

	#[test]
	fn logic_on_numbers_is_bad_cast() {
		let result = Value::Number(1.0).and(Value::Boolean(true));
		assert_eq!(result.unwrap_err().kind(), ErrorKind::BadCast);
	}

	#[test]
	fn division_by_zero_is_div_by_zero() {
		let result = Value::Number(1.0).divide(Value::Number(0.0));
		assert_eq!(result.unwrap_err().kind(), ErrorKind::DivByZero);
	}

	#[test]
	fn matcond_is_material_implication() {
		assert_eq!(Value::Boolean(true).matcond(Value::Boolean(false)).unwrap(), Value::Boolean(false));
		assert_eq!(Value::Boolean(false).matcond(Value::Boolean(false)).unwrap(), Value::Boolean(true));
	}

	#[test]
	fn lteq_is_consistent_with_equals() {
		let a = Value::Number(1.0);
		let b = Value::Number(1.0);
		assert_eq!(a.lteq(b).unwrap(), Value::Boolean(true));
		assert_eq!(a.equals(b).unwrap(), Value::Boolean(true));
	}
}
