#![no_main]

use libfuzzer_sys::fuzz_target;
use reckon::{evaluate, Context};

// Never panics: a non-UTF-8 input or any lexer/parser/evaluator rejection is an ordinary `Err`,
// not a bug. Only a panic (assertion failure, arithmetic overflow in debug builds, etc.) is.
fuzz_target!(|data: &[u8]| {
	let Ok(source) = std::str::from_utf8(data) else {
		return;
	};
	let context = Context::default();
	let _ = evaluate(source, &context);
});
