// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! The attribute-value JSON dialect: every value is a single-key object whose
//! key names the type, e.g. `{"S": "x"}` or `{"N": "1.5"}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabula_type::{Item, Number, Value};

use crate::WireError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
	#[serde(rename = "S")]
	S(String),
	/// Numbers travel as strings to keep their precision.
	#[serde(rename = "N")]
	N(String),
	#[serde(rename = "BOOL")]
	Bool(bool),
	#[serde(rename = "NULL")]
	Null(bool),
	#[serde(rename = "L")]
	L(Vec<AttributeValue>),
	#[serde(rename = "M")]
	M(IndexMap<String, AttributeValue>),
}

pub type AttributeMap = IndexMap<String, AttributeValue>;

impl TryFrom<AttributeValue> for Value {
	type Error = WireError;

	fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
		Ok(match value {
			AttributeValue::S(s) => Value::String(s),
			AttributeValue::N(n) => {
				Value::Number(Number::parse(&n).map_err(|err| WireError::malformed(err.to_string()))?)
			}
			AttributeValue::Bool(b) => Value::Boolean(b),
			AttributeValue::Null(true) => Value::Null,
			AttributeValue::Null(false) => return Err(WireError::malformed("NULL must be true")),
			AttributeValue::L(values) => {
				Value::List(values.into_iter().map(Value::try_from).collect::<Result<_, _>>()?)
			}
			AttributeValue::M(entries) => Value::Map(decode_entries(entries)?),
		})
	}
}

impl From<Value> for AttributeValue {
	fn from(value: Value) -> Self {
		match value {
			Value::String(s) => AttributeValue::S(s),
			Value::Number(n) => AttributeValue::N(n.to_string()),
			Value::Boolean(b) => AttributeValue::Bool(b),
			Value::Null => AttributeValue::Null(true),
			Value::List(values) => AttributeValue::L(values.into_iter().map(AttributeValue::from).collect()),
			Value::Map(entries) => {
				AttributeValue::M(entries.into_iter().map(|(name, value)| (name, value.into())).collect())
			}
		}
	}
}

fn decode_entries(entries: AttributeMap) -> Result<IndexMap<String, Value>, WireError> {
	entries.into_iter().map(|(name, value)| Ok((name, Value::try_from(value)?))).collect()
}

pub fn decode_item(map: AttributeMap) -> Result<Item, WireError> {
	Ok(Item::from(decode_entries(map)?))
}

pub fn encode_item(item: Item) -> AttributeMap {
	item.into_iter().map(|(name, value)| (name, value.into())).collect()
}
