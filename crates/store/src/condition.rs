// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::{collections::BTreeMap, ops::Bound};

use tabula_type::{ConditionViolation, Error, KeyValue, ScalarType, ValueKind};

use crate::{
	key::type_mismatch,
	schema::{AttributeDefinition, KeySchema},
};

/// A comparison applied to one key attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
	Eq(KeyValue),
	Lt(KeyValue),
	Le(KeyValue),
	Gt(KeyValue),
	Ge(KeyValue),
	/// Inclusive on both ends.
	Between(KeyValue, KeyValue),
	BeginsWith(KeyValue),
}

impl Comparison {
	pub fn eq(value: impl Into<KeyValue>) -> Self {
		Comparison::Eq(value.into())
	}

	pub fn lt(value: impl Into<KeyValue>) -> Self {
		Comparison::Lt(value.into())
	}

	pub fn le(value: impl Into<KeyValue>) -> Self {
		Comparison::Le(value.into())
	}

	pub fn gt(value: impl Into<KeyValue>) -> Self {
		Comparison::Gt(value.into())
	}

	pub fn ge(value: impl Into<KeyValue>) -> Self {
		Comparison::Ge(value.into())
	}

	pub fn between(lower: impl Into<KeyValue>, upper: impl Into<KeyValue>) -> Self {
		Comparison::Between(lower.into(), upper.into())
	}

	pub fn begins_with(prefix: impl Into<String>) -> Self {
		Comparison::BeginsWith(KeyValue::String(prefix.into()))
	}

	fn values(&self) -> Vec<&KeyValue> {
		match self {
			Comparison::Eq(v)
			| Comparison::Lt(v)
			| Comparison::Le(v)
			| Comparison::Gt(v)
			| Comparison::Ge(v)
			| Comparison::BeginsWith(v) => vec![v],
			Comparison::Between(lower, upper) => vec![lower, upper],
		}
	}

	/// Range bounds over the sort dimension of a bucket.
	fn bounds(&self) -> (Bound<Option<KeyValue>>, Bound<Option<KeyValue>>) {
		use Bound::*;

		match self {
			Comparison::Eq(v) => (Included(Some(v.clone())), Included(Some(v.clone()))),
			Comparison::Lt(v) => (Excluded(None), Excluded(Some(v.clone()))),
			Comparison::Le(v) => (Excluded(None), Included(Some(v.clone()))),
			Comparison::Gt(v) => (Excluded(Some(v.clone())), Unbounded),
			Comparison::Ge(v) => (Included(Some(v.clone())), Unbounded),
			Comparison::Between(lower, upper) => (Included(Some(lower.clone())), Included(Some(upper.clone()))),
			Comparison::BeginsWith(prefix) => (Included(Some(prefix.clone())), Unbounded),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyTerm {
	pub attribute: String,
	pub comparison: Comparison,
}

/// A conjunction of key terms, as written by the caller.
///
/// Nothing is checked on construction; [`KeyCondition::resolve`] validates the
/// terms against the key schema being queried.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyCondition {
	terms: Vec<KeyTerm>,
}

impl KeyCondition {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a condition with an equality test on the partition key.
	pub fn partition(attribute: impl Into<String>, value: impl Into<KeyValue>) -> Self {
		Self::new().and(attribute, Comparison::Eq(value.into()))
	}

	pub fn and(mut self, attribute: impl Into<String>, comparison: Comparison) -> Self {
		self.terms.push(KeyTerm {
			attribute: attribute.into(),
			comparison,
		});
		self
	}

	pub fn push(&mut self, term: KeyTerm) {
		self.terms.push(term);
	}

	pub fn terms(&self) -> &[KeyTerm] {
		&self.terms
	}

	pub(crate) fn resolve(self, table: &str, schema: &KeySchema) -> crate::Result<ResolvedCondition> {
		let reject = |violation: ConditionViolation| Error::condition(table, violation);

		let mut partition: Option<KeyValue> = None;
		let mut sort: Option<Comparison> = None;

		for KeyTerm {
			attribute,
			comparison,
		} in self.terms
		{
			if attribute == schema.partition.name {
				if partition.is_some() {
					return Err(reject(ConditionViolation::MultiplePartitionConditions {
						attribute,
					}));
				}
				let Comparison::Eq(value) = comparison else {
					return Err(reject(ConditionViolation::PartitionConditionNotEquality {
						attribute,
					}));
				};
				check_type(table, &schema.partition, &value)?;
				partition = Some(value);
				continue;
			}

			let Some(definition) = schema.sort.as_ref().filter(|sort| sort.name == attribute) else {
				return Err(reject(ConditionViolation::NotAKeyAttribute {
					attribute,
				}));
			};
			if sort.is_some() {
				return Err(reject(ConditionViolation::MultipleSortConditions {
					attribute,
				}));
			}
			if matches!(comparison, Comparison::BeginsWith(_)) && definition.r#type == ScalarType::Number {
				return Err(reject(ConditionViolation::BeginsWithOnNumber {
					attribute,
				}));
			}
			for value in comparison.values() {
				check_type(table, definition, value)?;
			}
			if let Comparison::Between(lower, upper) = &comparison {
				if lower > upper {
					return Err(reject(ConditionViolation::InvertedRange {
						attribute,
					}));
				}
			}
			sort = Some(comparison);
		}

		let Some(partition) = partition else {
			return Err(reject(ConditionViolation::MissingPartitionCondition {
				attribute: schema.partition.name.clone(),
			}));
		};

		Ok(ResolvedCondition {
			partition,
			sort,
		})
	}
}

fn check_type(table: &str, definition: &AttributeDefinition, value: &KeyValue) -> crate::Result<()> {
	if value.scalar_type() == definition.r#type {
		Ok(())
	} else {
		Err(type_mismatch(table, definition, ValueKind::from(value.scalar_type())))
	}
}

/// A key condition validated against one key schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedCondition {
	pub partition: KeyValue,
	pub sort: Option<Comparison>,
}

impl ResolvedCondition {
	/// Selects the entries of a bucket that satisfy the sort comparison, in
	/// ascending sort order.
	pub fn select<'a, V>(&self, bucket: &'a BTreeMap<Option<KeyValue>, V>) -> Vec<&'a V> {
		let Some(comparison) = &self.sort else {
			return bucket.values().collect();
		};

		let range = bucket.range(comparison.bounds());
		match comparison {
			Comparison::BeginsWith(KeyValue::String(prefix)) => range
				.take_while(|(key, _)| key.as_ref().is_some_and(|key| key.begins_with(prefix)))
				.map(|(_, value)| value)
				.collect(),
			_ => range.map(|(_, value)| value).collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::ErrorKind;

	use super::*;

	fn schema() -> KeySchema {
		KeySchema {
			partition: AttributeDefinition::string("pk"),
			sort: Some(AttributeDefinition::string("sk")),
		}
	}

	fn violation(condition: KeyCondition) -> ConditionViolation {
		match condition.resolve("t", &schema()).unwrap_err() {
			Error::ConditionInvalid {
				violation,
				..
			} => violation,
			other => panic!("expected ConditionInvalid, got {other:?}"),
		}
	}

	fn bucket(keys: &[&str]) -> BTreeMap<Option<KeyValue>, String> {
		keys.iter().map(|k| (Some(KeyValue::from(*k)), k.to_string())).collect()
	}

	#[test]
	fn test_resolve_partition_and_sort() {
		let resolved = KeyCondition::partition("pk", "u1")
			.and("sk", Comparison::ge("2024-01-15"))
			.resolve("t", &schema())
			.unwrap();
		assert_eq!(resolved.partition, KeyValue::from("u1"));
		assert_eq!(resolved.sort, Some(Comparison::ge("2024-01-15")));
	}

	#[test]
	fn test_term_order_does_not_matter() {
		let resolved =
			KeyCondition::new().and("sk", Comparison::lt("b")).and("pk", Comparison::eq("u1")).resolve("t", &schema());
		assert!(resolved.is_ok());
	}

	#[test]
	fn test_missing_partition() {
		assert_eq!(
			violation(KeyCondition::new().and("sk", Comparison::eq("a"))),
			ConditionViolation::MissingPartitionCondition {
				attribute: "pk".to_string()
			}
		);
	}

	#[test]
	fn test_partition_must_be_equality() {
		assert!(matches!(
			violation(KeyCondition::new().and("pk", Comparison::gt("a"))),
			ConditionViolation::PartitionConditionNotEquality { .. }
		));
	}

	#[test]
	fn test_two_partition_terms() {
		assert!(matches!(
			violation(KeyCondition::partition("pk", "a").and("pk", Comparison::eq("b"))),
			ConditionViolation::MultiplePartitionConditions { .. }
		));
	}

	#[test]
	fn test_two_sort_terms() {
		assert!(matches!(
			violation(
				KeyCondition::partition("pk", "a").and("sk", Comparison::gt("a")).and("sk", Comparison::lt("z"))
			),
			ConditionViolation::MultipleSortConditions { .. }
		));
	}

	#[test]
	fn test_non_key_attribute() {
		assert_eq!(
			violation(KeyCondition::partition("pk", "a").and("status", Comparison::eq("open"))),
			ConditionViolation::NotAKeyAttribute {
				attribute: "status".to_string()
			}
		);
	}

	#[test]
	fn test_inverted_between() {
		assert!(matches!(
			violation(KeyCondition::partition("pk", "a").and("sk", Comparison::between("z", "a"))),
			ConditionViolation::InvertedRange { .. }
		));
	}

	#[test]
	fn test_begins_with_on_number_key() {
		let schema = KeySchema {
			partition: AttributeDefinition::string("pk"),
			sort: Some(AttributeDefinition::number("n")),
		};
		let err = KeyCondition::partition("pk", "a")
			.and("n", Comparison::begins_with("1"))
			.resolve("t", &schema)
			.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::ConditionInvalid);
	}

	#[test]
	fn test_value_type_mismatch() {
		let err = KeyCondition::partition("pk", 1).resolve("t", &schema()).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::TypeMismatch);
	}

	#[test]
	fn test_select_without_sort_returns_bucket_in_order() {
		let resolved = KeyCondition::partition("pk", "u1").resolve("t", &schema()).unwrap();
		let bucket = bucket(&["c", "a", "b"]);
		assert_eq!(resolved.select(&bucket), vec!["a", "b", "c"]);
	}

	#[test]
	fn test_select_comparisons() {
		let bucket = bucket(&["a", "ab", "abc", "b", "c"]);
		let select = |comparison: Comparison| -> Vec<String> {
			KeyCondition::partition("pk", "u1")
				.and("sk", comparison)
				.resolve("t", &schema())
				.unwrap()
				.select(&bucket)
				.into_iter()
				.cloned()
				.collect()
		};

		assert_eq!(select(Comparison::eq("ab")), vec!["ab"]);
		assert_eq!(select(Comparison::lt("b")), vec!["a", "ab", "abc"]);
		assert_eq!(select(Comparison::le("b")), vec!["a", "ab", "abc", "b"]);
		assert_eq!(select(Comparison::gt("abc")), vec!["b", "c"]);
		assert_eq!(select(Comparison::ge("abc")), vec!["abc", "b", "c"]);
		assert_eq!(select(Comparison::between("ab", "b")), vec!["ab", "abc", "b"]);
		assert_eq!(select(Comparison::begins_with("ab")), vec!["ab", "abc"]);
		assert!(select(Comparison::eq("zz")).is_empty());
	}
}
