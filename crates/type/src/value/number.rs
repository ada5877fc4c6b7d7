// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::{
	cmp::Ordering,
	fmt::{self, Display, Formatter},
	hash::{Hash, Hasher},
	str::FromStr,
};

use bigdecimal::BigDecimal;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Most significant digits a number may carry.
pub const MAX_DIGITS: u64 = 38;
/// Decimal exponent range of non-zero numbers, in scientific notation.
pub const MIN_EXPONENT: i64 = -130;
pub const MAX_EXPONENT: i64 = 125;
/// Longest textual form accepted by [`Number::parse`].
pub const MAX_INPUT_LENGTH: usize = 256;

/// A decimal number of at most [`MAX_DIGITS`] significant digits.
///
/// Equality, ordering and hashing are numeric: `1`, `1.0` and `1.00` are the
/// same number.
#[derive(Clone, Debug)]
pub struct Number(BigDecimal);

/// Returned when a string does not hold a representable number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNumberError {
	#[error("'{input}' is not a valid number")]
	Invalid {
		input: String,
	},

	#[error("number text is {length} bytes long, the maximum is {max}", max = MAX_INPUT_LENGTH)]
	TooLong {
		length: usize,
	},

	#[error("'{input}' has {digits} significant digits, the maximum is {max}", max = MAX_DIGITS)]
	TooPrecise {
		input: String,
		digits: u64,
	},

	#[error("'{input}' is outside the range 1e{min} to 1e{max}", min = MIN_EXPONENT, max = MAX_EXPONENT + 1)]
	OutOfRange {
		input: String,
	},
}

impl Number {
	pub fn parse(raw: &str) -> Result<Self, ParseNumberError> {
		let value = raw.trim();
		if value.len() > MAX_INPUT_LENGTH {
			return Err(ParseNumberError::TooLong {
				length: value.len(),
			});
		}

		let invalid = || ParseNumberError::Invalid {
			input: raw.to_string(),
		};
		if value.is_empty() {
			return Err(invalid());
		}

		let number = BigDecimal::from_str(value).map_err(|_| invalid())?.normalized();
		if number.is_zero() {
			return Ok(Self(number));
		}

		let digits = number.digits();
		if digits > MAX_DIGITS {
			return Err(ParseNumberError::TooPrecise {
				input: value.to_string(),
				digits,
			});
		}

		// value = unscaled * 10^-scale, with `digits` digits in unscaled
		let (_, scale) = number.as_bigint_and_exponent();
		let exponent = digits as i64 - 1 - scale;
		if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
			return Err(ParseNumberError::OutOfRange {
				input: value.to_string(),
			});
		}

		Ok(Self(number))
	}

	pub fn inner(&self) -> &BigDecimal {
		&self.0
	}

	pub fn is_integer(&self) -> bool {
		self.0.is_integer()
	}

	pub fn to_i64(&self) -> Option<i64> {
		if self.is_integer() {
			self.0.to_i64()
		} else {
			None
		}
	}

	pub fn to_f64(&self) -> Option<f64> {
		self.0.to_f64()
	}
}

impl FromStr for Number {
	type Err = ParseNumberError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Display for Number {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let normalized = self.0.normalized();
		// normalized integers carry a negative scale; render them without an exponent
		let (_, scale) = normalized.as_bigint_and_exponent();
		if scale < 0 {
			Display::fmt(&normalized.with_scale(0), f)
		} else {
			Display::fmt(&normalized, f)
		}
	}
}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Number {}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Number {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.cmp(&other.0)
	}
}

impl Hash for Number {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.normalized().as_bigint_and_exponent().hash(state)
	}
}

macro_rules! impl_from_primitive {
	($($t:ty),*) => {
		$(
			impl From<$t> for Number {
				fn from(value: $t) -> Self {
					Self(BigDecimal::from(value))
				}
			}
		)*
	};
}

impl_from_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Serialize for Number {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Number {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Number::parse(&raw).map_err(de::Error::custom)
	}
}
