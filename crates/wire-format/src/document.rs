// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Conversion between items and plain JSON documents, for callers that do not
//! speak the attribute-value dialect.

use serde_json::{Map, Number as JsonNumber, Value as Json};
use tabula_type::{Item, Number, Value};

use crate::WireError;

pub fn to_value(json: Json) -> Result<Value, WireError> {
	Ok(match json {
		Json::Null => Value::Null,
		Json::Bool(b) => Value::Boolean(b),
		Json::Number(n) => {
			Value::Number(Number::parse(&n.to_string()).map_err(|err| WireError::malformed(err.to_string()))?)
		}
		Json::String(s) => Value::String(s),
		Json::Array(values) => Value::List(values.into_iter().map(to_value).collect::<Result<_, _>>()?),
		Json::Object(entries) => Value::Map(
			entries.into_iter().map(|(name, value)| Ok((name, to_value(value)?))).collect::<Result<_, WireError>>()?,
		),
	})
}

/// Numbers that fit neither `i64` nor `f64` are rendered as strings.
pub fn from_value(value: Value) -> Json {
	match value {
		Value::Null => Json::Null,
		Value::Boolean(b) => Json::Bool(b),
		Value::Number(n) => from_number(&n),
		Value::String(s) => Json::String(s),
		Value::List(values) => Json::Array(values.into_iter().map(from_value).collect()),
		Value::Map(entries) => Json::Object(entries.into_iter().map(|(name, value)| (name, from_value(value))).collect()),
	}
}

fn from_number(n: &Number) -> Json {
	if let Some(i) = n.to_i64().filter(|_| n.is_integer()) {
		return Json::Number(i.into());
	}
	match n.to_f64().and_then(JsonNumber::from_f64) {
		Some(f) => Json::Number(f),
		None => Json::String(n.to_string()),
	}
}

pub fn to_item(json: Json) -> Result<Item, WireError> {
	match to_value(json)? {
		Value::Map(entries) => Ok(Item::from(entries)),
		other => Err(WireError::malformed(format!("expected a JSON object for an item, got {}", other.kind()))),
	}
}

pub fn from_item(item: Item) -> Json {
	Json::Object(item.into_iter().map(|(name, value)| (name, from_value(value))).collect::<Map<_, _>>())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_document_round_trip() {
		let document = json!({
			"pk": "prim key",
			"sk": "a sort key",
			"bool": true,
			"numberArray": [1, 2],
			"stringArray": ["hey", "ho"],
			"nestedJSON": {"hey": "ho", "lets": [1, 2, 3]}
		});
		let item = to_item(document.clone()).unwrap();
		assert_eq!(item.get("numberArray"), Some(&Value::list([Value::from(1), Value::from(2)])));
		assert_eq!(from_item(item), document);
	}

	#[test]
	fn test_fractional_number() {
		let value = to_value(json!(2.5)).unwrap();
		assert_eq!(from_value(value), json!(2.5));
	}

	#[test]
	fn test_item_must_be_object() {
		assert!(to_item(json!([1, 2])).is_err());
	}
}
