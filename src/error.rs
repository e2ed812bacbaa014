use std::fmt::Display;

/// The taxonomy of everything that can go wrong while tokenizing, parsing, or evaluating an
/// expression. One variant per distinct, user-meaningful cause; a handful (`StopIter`, `NotFound`,
/// `Unimplemented`) exist only for internal bookkeeping and should never reach a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	OutOfBounds,
	BadAlloc,
	InvalidArg,
	InvalidOp,
	Overflow,
	Underflow,
	DivByZero,
	NotInDomain,
	UnknownId,
	UnknownToken,
	UnbalancedGroupSymbols,
	WrongArity,
	UncalledFunc,
	UnclosedFunc,
	MalformedBinexp,
	MalformedUnexp,
	MalformedInput,
	BadCast,
	UnprocessedInput,
	StopIter,
	NotFound,
	Unimplemented,
}

impl ErrorKind {
	pub const fn message(self) -> &'static str {
		match self {
			Self::OutOfBounds => "internal index arithmetic invariant violated",
			Self::BadAlloc => "memory allocation failed",
			Self::InvalidArg => "disallowed character or invalid argument",
			Self::InvalidOp => "operation is semantically impossible on these operands",
			Self::Overflow => "numeric range exceeded (overflow)",
			Self::Underflow => "numeric range exceeded (underflow)",
			Self::DivByZero => "division by zero",
			Self::NotInDomain => "argument outside the operation's mathematical domain",
			Self::UnknownId => "identifier is not known to this context",
			Self::UnknownToken => "lexer produced a token the parser cannot use here",
			Self::UnbalancedGroupSymbols => "unbalanced parentheses",
			Self::WrongArity => "function called with the wrong number of arguments",
			Self::UncalledFunc => "function identifier not followed by '('",
			Self::UnclosedFunc => "function call is missing its closing ')'",
			Self::MalformedBinexp => "binary operator is missing an operand",
			Self::MalformedUnexp => "unary operator is missing an operand",
			Self::MalformedInput => "input is structurally invalid",
			Self::BadCast => "value has the wrong variant for this operation",
			Self::UnprocessedInput => "input was not fully consumed by the parser",
			Self::StopIter => "iterator protocol terminator",
			Self::NotFound => "lookup miss",
			Self::Unimplemented => "unimplemented",
		}
	}
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.message())
	}
}

/// Diagnostic stacks never grow past this many frames; pushing past capacity drops the oldest
/// (outermost) frame.
pub const DIAGNOSTIC_STACK_CAPACITY: usize = 16;

/// Frames are truncated to this many bytes. Matches the bound on the reference implementation's
/// error strings.
pub const DIAGNOSTIC_FRAME_MAX_LEN: usize = 256;

/// A single layer of human-readable context pushed by one component as an error propagates
/// upward, e.g. `"parser::primary: unknown identifier 'unknownid'"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticFrame(String);

impl DiagnosticFrame {
	pub fn new(message: impl Into<String>) -> Self {
		let mut message = message.into();
		if message.len() > DIAGNOSTIC_FRAME_MAX_LEN {
			message.truncate(DIAGNOSTIC_FRAME_MAX_LEN);
		}
		Self(message)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for DiagnosticFrame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A bounded stack of diagnostic frames, owned per call (or per caller-held state) rather than
/// global — two contexts processing expressions on two threads each get their own. The top of the
/// stack (last pushed) is the innermost cause; iterating yields frames innermost-first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<DiagnosticFrame>);

impl Diagnostics {
	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn push(&mut self, frame: DiagnosticFrame) {
		if self.0.len() == DIAGNOSTIC_STACK_CAPACITY {
			let _ = self.0.remove(0);
		}
		self.0.push(frame);
	}

	pub fn peek(&self) -> Option<&DiagnosticFrame> {
		self.0.last()
	}

	pub fn pop(&mut self) -> Option<DiagnosticFrame> {
		self.0.pop()
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Iterator for Diagnostics {
	type Item = DiagnosticFrame;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.pop()
	}
}

impl Display for Diagnostics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for frame in self.0.iter().rev() {
			writeln!(f, "  ...while {frame}")?;
		}
		Ok(())
	}
}

/// The error type returned by every fallible public operation: a single tagged `kind` plus the
/// diagnostic trail that was accumulated while propagating it upward.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}\n{diagnostics}")]
pub struct Error {
	kind: ErrorKind,
	diagnostics: Diagnostics,
}

impl Error {
	pub fn new(kind: ErrorKind) -> Self {
		Self { kind, diagnostics: Diagnostics::empty() }
	}

	/// Pushes a diagnostic frame and returns `self`, for use in `.map_err(|error| error.with_frame(...))` chains.
	pub fn with_frame(mut self, message: impl Into<String>) -> Self {
		self.diagnostics.push(DiagnosticFrame::new(message));
		self
	}

	pub const fn kind(&self) -> ErrorKind {
		self.kind
	}

	pub const fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Self {
		Self::new(kind)
	}
}

#[cfg(test)]
mod tests {
	use super::{DiagnosticFrame, Diagnostics, Error, ErrorKind};

	#[test]
	fn diagnostics_iterate_innermost_first() {
		let mut diagnostics = Diagnostics::empty();
		diagnostics.push(DiagnosticFrame::new("outer"));
		diagnostics.push(DiagnosticFrame::new("inner"));

		let frames: Vec<_> = diagnostics.map(|frame| frame.as_str().to_owned()).collect();
		assert_eq!(frames, vec!["inner".to_owned(), "outer".to_owned()]);
	}

	#[test]
	fn diagnostics_stack_is_bounded() {
		let mut diagnostics = Diagnostics::empty();
		for index in 0..32 {
			diagnostics.push(DiagnosticFrame::new(format!("frame {index}")));
		}
		assert_eq!(diagnostics.len(), super::DIAGNOSTIC_STACK_CAPACITY);
		assert_eq!(diagnostics.peek().unwrap().as_str(), "frame 31");
	}

	#[test]
	fn error_carries_kind_and_frames() {
		let error = Error::new(ErrorKind::DivByZero).with_frame("eval::binary: dividing");
		assert_eq!(error.kind(), ErrorKind::DivByZero);
		assert_eq!(error.diagnostics().len(), 1);
	}
}
