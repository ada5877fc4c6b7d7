// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{Number, Value};

/// Declared type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
	#[serde(rename = "S")]
	String,
	#[serde(rename = "N")]
	Number,
}

impl ScalarType {
	pub fn as_code(&self) -> &'static str {
		match self {
			ScalarType::String => "S",
			ScalarType::Number => "N",
		}
	}

	pub fn from_code(code: &str) -> Option<Self> {
		match code {
			"S" => Some(ScalarType::String),
			"N" => Some(ScalarType::Number),
			_ => None,
		}
	}
}

impl Display for ScalarType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_code())
	}
}

/// The value of a key attribute.
///
/// Within one key schema every value has the same [`ScalarType`], so the
/// derived cross-variant order never decides a comparison in practice.
/// Strings compare byte-wise, numbers numerically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyValue {
	String(String),
	Number(Number),
}

impl KeyValue {
	pub fn string(value: impl Into<String>) -> Self {
		KeyValue::String(value.into())
	}

	pub fn number(value: impl Into<Number>) -> Self {
		KeyValue::Number(value.into())
	}

	pub fn scalar_type(&self) -> ScalarType {
		match self {
			KeyValue::String(_) => ScalarType::String,
			KeyValue::Number(_) => ScalarType::Number,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			KeyValue::String(s) => Some(s.as_str()),
			KeyValue::Number(_) => None,
		}
	}

	pub fn begins_with(&self, prefix: &str) -> bool {
		self.as_str().is_some_and(|s| s.starts_with(prefix))
	}
}

impl Display for KeyValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			KeyValue::String(s) => write!(f, "\"{}\"", s),
			KeyValue::Number(n) => Display::fmt(n, f),
		}
	}
}

impl From<&str> for KeyValue {
	fn from(value: &str) -> Self {
		KeyValue::String(value.to_string())
	}
}

impl From<String> for KeyValue {
	fn from(value: String) -> Self {
		KeyValue::String(value)
	}
}

impl From<Number> for KeyValue {
	fn from(value: Number) -> Self {
		KeyValue::Number(value)
	}
}

impl From<i64> for KeyValue {
	fn from(value: i64) -> Self {
		KeyValue::Number(Number::from(value))
	}
}

impl From<i32> for KeyValue {
	fn from(value: i32) -> Self {
		KeyValue::Number(Number::from(value))
	}
}

impl From<KeyValue> for Value {
	fn from(value: KeyValue) -> Self {
		match value {
			KeyValue::String(s) => Value::String(s),
			KeyValue::Number(n) => Value::Number(n),
		}
	}
}
