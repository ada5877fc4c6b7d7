// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod item;
mod key;
pub mod number;

pub use item::Item;
pub use key::{KeyValue, ScalarType};
pub use number::Number;

/// An attribute value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// A UTF-8 string.
	String(String),
	/// An arbitrary-precision decimal.
	Number(Number),
	/// A boolean: true or false.
	Boolean(bool),
	/// An explicit null.
	Null,
	/// An ordered list of values.
	List(Vec<Value>),
	/// A nested document.
	Map(IndexMap<String, Value>),
}

/// The tag of a [`Value`], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
	String,
	Number,
	Boolean,
	Null,
	List,
	Map,
}

impl ValueKind {
	pub fn as_code(&self) -> &'static str {
		match self {
			ValueKind::String => "S",
			ValueKind::Number => "N",
			ValueKind::Boolean => "BOOL",
			ValueKind::Null => "NULL",
			ValueKind::List => "L",
			ValueKind::Map => "M",
		}
	}
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_code())
	}
}

impl From<ScalarType> for ValueKind {
	fn from(value: ScalarType) -> Self {
		match value {
			ScalarType::String => ValueKind::String,
			ScalarType::Number => ValueKind::Number,
		}
	}
}

impl Value {
	pub fn string(v: impl Into<String>) -> Self {
		Value::String(v.into())
	}

	pub fn number(v: impl Into<Number>) -> Self {
		Value::Number(v.into())
	}

	pub fn bool(v: bool) -> Self {
		Value::Boolean(v)
	}

	pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
		Value::List(values.into_iter().collect())
	}

	pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
		Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}

	pub fn kind(&self) -> ValueKind {
		match self {
			Value::String(_) => ValueKind::String,
			Value::Number(_) => ValueKind::Number,
			Value::Boolean(_) => ValueKind::Boolean,
			Value::Null => ValueKind::Null,
			Value::List(_) => ValueKind::List,
			Value::Map(_) => ValueKind::Map,
		}
	}

	/// Returns the key form of this value if it is a scalar of the given type.
	pub fn to_key(&self, expected: ScalarType) -> Option<KeyValue> {
		match (self, expected) {
			(Value::String(s), ScalarType::String) => Some(KeyValue::String(s.clone())),
			(Value::Number(n), ScalarType::Number) => Some(KeyValue::Number(n.clone())),
			_ => None,
		}
	}

	/// Returns the key form of this value if it is a string or a number.
	pub fn as_key(&self) -> Option<KeyValue> {
		match self {
			Value::String(s) => Some(KeyValue::String(s.clone())),
			Value::Number(n) => Some(KeyValue::Number(n.clone())),
			_ => None,
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Boolean(value)
	}
}

impl From<Number> for Value {
	fn from(value: Number) -> Self {
		Value::Number(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(Number::from(value))
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(Number::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_to_key_matches_declared_type() {
		assert_eq!(Value::from("u1").to_key(ScalarType::String), Some(KeyValue::from("u1")));
		assert_eq!(Value::from(7).to_key(ScalarType::Number), Some(KeyValue::from(7)));
		assert_eq!(Value::from(7).to_key(ScalarType::String), None);
		assert_eq!(Value::bool(true).to_key(ScalarType::String), None);
	}

	#[test]
	fn test_nested_document_equality() {
		let a = Value::map([("hey", Value::from("ho")), ("lets", Value::list([1.into(), 2.into(), 3.into()]))]);
		let b = Value::map([("lets", Value::list([1.into(), 2.into(), 3.into()])), ("hey", Value::from("ho"))]);
		assert_eq!(a, b);
		assert_eq!(a.kind(), ValueKind::Map);
	}
}
