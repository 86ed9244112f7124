//! Prefix number scanning used by the lenient numeric policy.
//!
//! Authoring tools read numbers by taking the longest numeric prefix of the
//! attribute text and ignoring the rest, so `"12px"` is `12` and `"abc"` is
//! not a number at all.

/// Scans a base-10 integer prefix, skipping leading whitespace.
///
/// Returns `None` when no digit follows the optional sign. Values outside the
/// `i64` range saturate.
pub(crate) fn int_prefix(text: &str) -> Option<i64> {
	let text = text.trim_start();
	let (negative, digits) = split_sign(text);

	let end = digits.bytes().take_while(u8::is_ascii_digit).count();
	if end == 0 {
		return None;
	}

	let magnitude = digits[..end].bytes().fold(0i64, |value, digit| {
		value.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
	});
	Some(if negative { -magnitude } else { magnitude })
}

/// Scans a decimal floating-point prefix, skipping leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and the literal `Infinity`. Returns `None` when no number starts
/// the text.
pub(crate) fn float_prefix(text: &str) -> Option<f64> {
	let text = text.trim_start();
	let (negative, rest) = split_sign(text);

	if rest.starts_with("Infinity") {
		return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
	}

	let bytes = rest.as_bytes();
	let mut end = 0;
	let integer_digits = count_digits(&bytes[end..]);
	end += integer_digits;

	let mut fraction_digits = 0;
	if bytes.get(end) == Some(&b'.') {
		fraction_digits = count_digits(&bytes[end + 1..]);
		if integer_digits > 0 || fraction_digits > 0 {
			end += 1 + fraction_digits;
		}
	}

	if integer_digits == 0 && fraction_digits == 0 {
		return None;
	}

	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut cursor = end + 1;
		if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
			cursor += 1;
		}
		let exponent_digits = count_digits(&bytes[cursor.min(bytes.len())..]);
		if exponent_digits > 0 {
			end = cursor + exponent_digits;
		}
	}

	let magnitude: f64 = rest[..end].parse().ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

fn split_sign(text: &str) -> (bool, &str) {
	if let Some(rest) = text.strip_prefix('-') {
		(true, rest)
	} else if let Some(rest) = text.strip_prefix('+') {
		(false, rest)
	} else {
		(false, text)
	}
}

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_int_prefix() {
		assert_eq!(int_prefix("42"), Some(42));
		assert_eq!(int_prefix("  -7"), Some(-7));
		assert_eq!(int_prefix("+3"), Some(3));
		assert_eq!(int_prefix("12px"), Some(12));
		assert_eq!(int_prefix("3.9"), Some(3));
		assert_eq!(int_prefix("abc"), None);
		assert_eq!(int_prefix("-"), None);
		assert_eq!(int_prefix(""), None);
		assert_eq!(int_prefix("99999999999999999999999"), Some(i64::MAX));
	}

	#[test]
	fn test_float_prefix() {
		assert_eq!(float_prefix("1.5"), Some(1.5));
		assert_eq!(float_prefix("-0.25"), Some(-0.25));
		assert_eq!(float_prefix(".5"), Some(0.5));
		assert_eq!(float_prefix("5."), Some(5.0));
		assert_eq!(float_prefix("1e3"), Some(1000.0));
		assert_eq!(float_prefix("2.5E-1x"), Some(0.25));
		assert_eq!(float_prefix("7e"), Some(7.0));
		assert_eq!(float_prefix("10px"), Some(10.0));
		assert_eq!(float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
		assert_eq!(float_prefix("."), None);
		assert_eq!(float_prefix("abc"), None);
		assert_eq!(float_prefix(""), None);
	}
}
