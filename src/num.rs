//! Pure, untyped numeric implementations behind the typed wrappers in [`crate::value`].
//!
//! Every domain/range rule here is grounded on the reference implementation's function library
//! (`tcalc_func.c`); see `DESIGN.md` for the two places this crate's behavior departs from a
//! literal reading of the distilled domain-rule table.

use crate::error::ErrorKind;

const EPSILON: f64 = 1e-9;
const DEG_PER_RAD: f64 = 180.0 / std::f64::consts::PI;
const RAD_PER_DEG: f64 = std::f64::consts::PI / 180.0;

pub fn equals(a: f64, b: f64) -> bool {
	(a - b).abs() < EPSILON
}

pub fn nequals(a: f64, b: f64) -> bool {
	!equals(a, b)
}

pub fn lt(a: f64, b: f64) -> bool {
	a < b && !equals(a, b)
}

pub fn lteq(a: f64, b: f64) -> bool {
	a < b || equals(a, b)
}

pub fn gt(a: f64, b: f64) -> bool {
	a > b && !equals(a, b)
}

pub fn gteq(a: f64, b: f64) -> bool {
	a > b || equals(a, b)
}

pub fn unary_plus(a: f64) -> Result<f64, ErrorKind> {
	Ok(a)
}

pub fn unary_minus(a: f64) -> Result<f64, ErrorKind> {
	Ok(-a)
}

pub fn add(a: f64, b: f64) -> Result<f64, ErrorKind> {
	Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64, ErrorKind> {
	Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64, ErrorKind> {
	Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, ErrorKind> {
	if equals(b, 0.0) {
		return Err(ErrorKind::DivByZero);
	}
	Ok(a / b)
}

pub fn modulo(a: f64, b: f64) -> Result<f64, ErrorKind> {
	if equals(b, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a % b)
}

pub fn pow(a: f64, b: f64) -> Result<f64, ErrorKind> {
	if equals(a, 0.0) && equals(b, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	if equals(a, 0.0) && lt(b, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	let result = a.powf(b);
	if result.is_infinite() {
		return Err(ErrorKind::Overflow);
	}
	Ok(result)
}

pub fn ceil(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.ceil())
}

pub fn floor(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.floor())
}

pub fn round(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.round())
}

pub fn abs(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.abs())
}

pub fn sin(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.sin())
}

pub fn cos(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.cos())
}

/// `tan` is undefined at `pi/2 + k*pi`. The reference implementation detects this with
/// `equals(fmod(a - pi/2, pi), 0.0)`, but C's `fmod` only reports distance to the *lower* edge of
/// each `pi`-wide interval (the same sign as its dividend), so an `a` that sits just below an
/// asymptote — e.g. barely under `3*pi/2` — produces a remainder near `pi`, not near `0`, and the
/// check misses it. This rounds to the nearest asymptote directly and checks distance to that,
/// which is symmetric and catches both edges; see `DESIGN.md` for why the original's gap is
/// treated as a C quirk rather than a domain rule worth reproducing.
pub fn tan(a: f64) -> Result<f64, ErrorKind> {
	let offset = a - std::f64::consts::FRAC_PI_2;
	let nearest_asymptote = (offset / std::f64::consts::PI).round() * std::f64::consts::PI;
	if equals(offset - nearest_asymptote, 0.0) {
		return Err(ErrorKind::Overflow);
	}
	Ok(a.tan())
}

pub fn sec(a: f64) -> Result<f64, ErrorKind> {
	divide(1.0, cos(a)?)
}

pub fn csc(a: f64) -> Result<f64, ErrorKind> {
	divide(1.0, sin(a)?)
}

pub fn cot(a: f64) -> Result<f64, ErrorKind> {
	divide(1.0, tan(a)?)
}

pub fn asin(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, -1.0) || gt(a, 1.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a.asin())
}

pub fn acos(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, -1.0) || gt(a, 1.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a.acos())
}

pub fn atan(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.atan())
}

pub fn asec(a: f64) -> Result<f64, ErrorKind> {
	if equals(a, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	acos(1.0 / a)
}

pub fn acsc(a: f64) -> Result<f64, ErrorKind> {
	if equals(a, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	asin(1.0 / a)
}

/// `acot(0)` is defined as `0.0` rather than erroring. The negative branch intentionally mirrors
/// the reference implementation's literal formula (`atan(1/a + pi)`, adding `pi` to the
/// reciprocal rather than to the result) — preserved as-is per `DESIGN.md`.
pub fn acot(a: f64) -> Result<f64, ErrorKind> {
	if equals(a, 0.0) {
		return Ok(0.0);
	}
	if a > 0.0 {
		atan(1.0 / a)
	} else {
		atan(1.0 / a + std::f64::consts::PI)
	}
}

pub fn sinh(a: f64) -> Result<f64, ErrorKind> {
	let result = a.sinh();
	if result.is_infinite() {
		return Err(ErrorKind::Overflow);
	}
	Ok(result)
}

pub fn cosh(a: f64) -> Result<f64, ErrorKind> {
	let result = a.cosh();
	if result.is_infinite() {
		return Err(ErrorKind::Overflow);
	}
	Ok(result)
}

pub fn tanh(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.tanh())
}

pub fn asinh(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.asinh())
}

pub fn acosh(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, 1.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a.acosh())
}

/// See `DESIGN.md`: the strictly-beyond-range case is a domain violation, the singularity at
/// `|a| == 1` is a range blow-up (`Overflow`).
pub fn atanh(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, -1.0) || gt(a, 1.0) {
		return Err(ErrorKind::NotInDomain);
	}
	if equals(a, -1.0) || equals(a, 1.0) {
		return Err(ErrorKind::Overflow);
	}
	Ok(a.atanh())
}

/// Base-10 logarithm. See `DESIGN.md`: unlike `ln`, the zero boundary is `Overflow`, not
/// `NotInDomain`.
pub fn log(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	if equals(a, 0.0) {
		return Err(ErrorKind::Overflow);
	}
	Ok(a.log10())
}

pub fn sqrt(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a.sqrt())
}

pub fn cbrt(a: f64) -> Result<f64, ErrorKind> {
	Ok(a.cbrt())
}

/// Natural logarithm. See `DESIGN.md`: the zero boundary is `NotInDomain` here, unlike `log`.
pub fn ln(a: f64) -> Result<f64, ErrorKind> {
	if lt(a, 0.0) || equals(a, 0.0) {
		return Err(ErrorKind::NotInDomain);
	}
	Ok(a.ln())
}

pub fn exp(a: f64) -> Result<f64, ErrorKind> {
	let result = a.exp();
	if result.is_infinite() {
		return Err(ErrorKind::Overflow);
	}
	Ok(result)
}

pub fn atan2(y: f64, x: f64) -> Result<f64, ErrorKind> {
	Ok(y.atan2(x))
}

// Degree variants. Forward trig functions take an angle, so the input is converted degrees to
// radians before delegating; inverse trig functions return an angle, so the radian result is
// converted to degrees afterward. The reference implementation applies the same pattern uniformly
// across the hyperbolic family too, despite hyperbolic functions not naturally taking/returning an
// angle; this crate follows that for consistency with `original_source`.

pub fn sin_deg(a: f64) -> Result<f64, ErrorKind> {
	sin(a * RAD_PER_DEG)
}

pub fn cos_deg(a: f64) -> Result<f64, ErrorKind> {
	cos(a * RAD_PER_DEG)
}

pub fn tan_deg(a: f64) -> Result<f64, ErrorKind> {
	tan(a * RAD_PER_DEG)
}

pub fn sec_deg(a: f64) -> Result<f64, ErrorKind> {
	sec(a * RAD_PER_DEG)
}

pub fn csc_deg(a: f64) -> Result<f64, ErrorKind> {
	csc(a * RAD_PER_DEG)
}

pub fn cot_deg(a: f64) -> Result<f64, ErrorKind> {
	cot(a * RAD_PER_DEG)
}

pub fn sinh_deg(a: f64) -> Result<f64, ErrorKind> {
	sinh(a * RAD_PER_DEG)
}

pub fn cosh_deg(a: f64) -> Result<f64, ErrorKind> {
	cosh(a * RAD_PER_DEG)
}

pub fn tanh_deg(a: f64) -> Result<f64, ErrorKind> {
	tanh(a * RAD_PER_DEG)
}

pub fn asin_deg(a: f64) -> Result<f64, ErrorKind> {
	asin(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn acos_deg(a: f64) -> Result<f64, ErrorKind> {
	acos(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn atan_deg(a: f64) -> Result<f64, ErrorKind> {
	atan(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn asec_deg(a: f64) -> Result<f64, ErrorKind> {
	asec(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn acsc_deg(a: f64) -> Result<f64, ErrorKind> {
	acsc(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn acot_deg(a: f64) -> Result<f64, ErrorKind> {
	acot(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn asinh_deg(a: f64) -> Result<f64, ErrorKind> {
	asinh(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn acosh_deg(a: f64) -> Result<f64, ErrorKind> {
	acosh(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn atanh_deg(a: f64) -> Result<f64, ErrorKind> {
	atanh(a).map(|radians| radians * DEG_PER_RAD)
}

pub fn atan2_deg(y: f64, x: f64) -> Result<f64, ErrorKind> {
	atan2(y, x).map(|radians| radians * DEG_PER_RAD)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn equals_uses_tolerance() {
		assert!(equals(1.000_000_000_1, 1.0));
		assert!(!equals(1.1, 1.0));
	}

	#[test]
	fn divide_by_near_zero_errors() {
		assert_eq!(divide(1.0, 1e-12), Err(ErrorKind::DivByZero));
	}

	#[test]
	fn pow_zero_to_negative_is_not_in_domain() {
		assert_eq!(pow(0.0, -1.0), Err(ErrorKind::NotInDomain));
		assert_eq!(pow(0.0, 0.0), Err(ErrorKind::NotInDomain));
	}

	#[test]
	fn atanh_boundary_matches_original() {
		assert_eq!(atanh(1.0), Err(ErrorKind::Overflow));
		assert_eq!(atanh(1.5), Err(ErrorKind::NotInDomain));
		assert!(atanh(0.5).is_ok());
	}

	#[test]
	fn log_and_ln_disagree_at_zero() {
		assert_eq!(log(0.0), Err(ErrorKind::Overflow));
		assert_eq!(ln(0.0), Err(ErrorKind::NotInDomain));
	}

	#[test]
	fn acot_of_zero_is_zero() {
		assert_eq!(acot(0.0), Ok(0.0));
	}

	#[test]
	fn tan_errors_at_asymptote() {
		assert_eq!(tan(std::f64::consts::FRAC_PI_2), Err(ErrorKind::Overflow));
	}

	#[test]
	fn tan_errors_approaching_asymptote_from_either_side() {
		let three_halves_pi = 3.0 * std::f64::consts::FRAC_PI_2;
		assert_eq!(tan(three_halves_pi - 1e-10), Err(ErrorKind::Overflow));
		assert_eq!(tan(three_halves_pi + 1e-10), Err(ErrorKind::Overflow));
	}
}
