// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Key condition expressions such as `#pk = :id AND begins_with(sk, :prefix)`.

use indexmap::IndexMap;
use tabula_store::KeyCondition;
use tabula_type::{ConditionViolation, Value};

mod parse;
mod token;

pub use token::{Operator, Token, TokenKind, tokenize};

/// Parses a key condition expression, substituting `#name` and `:value`
/// placeholders.
///
/// Every placeholder used must be bound and every binding must be used.
pub fn parse_key_condition(
	expression: &str,
	names: &IndexMap<String, String>,
	values: &IndexMap<String, Value>,
) -> Result<KeyCondition, ConditionViolation> {
	let tokens = tokenize(expression)?;
	parse::Parser::new(tokens, expression.len(), parse::Placeholders::new(names, values)).parse()
}

#[cfg(test)]
mod tests {
	use tabula_store::Comparison;
	use tabula_type::KeyValue;

	use super::*;

	fn names(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
	}

	fn values(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
		pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
	}

	fn terms(condition: &KeyCondition) -> Vec<(String, Comparison)> {
		condition.terms().iter().map(|term| (term.attribute.clone(), term.comparison.clone())).collect()
	}

	#[test]
	fn test_placeholders() {
		let condition = parse_key_condition(
			"#p = :i AND #s >= :o",
			&names(&[("#p", "pk"), ("#s", "sk")]),
			&values(&[(":i", Value::from("prim key")), (":o", Value::from("a sort"))]),
		)
		.unwrap();
		assert_eq!(
			terms(&condition),
			vec![("pk".to_string(), Comparison::eq("prim key")), ("sk".to_string(), Comparison::ge("a sort"))]
		);
	}

	#[test]
	fn test_bare_names_and_functions() {
		let condition = parse_key_condition(
			"(user_id = :u) and begins_with(ts, :p)",
			&IndexMap::new(),
			&values(&[(":u", Value::from("u1")), (":p", Value::from("2024-"))]),
		)
		.unwrap();
		assert_eq!(
			terms(&condition),
			vec![("user_id".to_string(), Comparison::eq("u1")), ("ts".to_string(), Comparison::begins_with("2024-"))]
		);
	}

	#[test]
	fn test_between() {
		let condition = parse_key_condition(
			"pk = :p AND n BETWEEN :lo AND :hi",
			&IndexMap::new(),
			&values(&[(":p", Value::from("a")), (":lo", Value::from(1)), (":hi", Value::from(5))]),
		)
		.unwrap();
		assert_eq!(terms(&condition)[1], ("n".to_string(), Comparison::Between(KeyValue::from(1), KeyValue::from(5))));
	}

	#[test]
	fn test_unsupported_operators() {
		let bound = values(&[(":a", Value::from("a")), (":b", Value::from("b"))]);
		for expression in ["pk = :a OR pk = :b", "NOT pk = :a", "pk <> :a"] {
			let err = parse_key_condition(expression, &IndexMap::new(), &bound).unwrap_err();
			assert!(matches!(err, ConditionViolation::UnsupportedOperator { .. }), "{expression}: {err:?}");
		}
	}

	#[test]
	fn test_unbound_and_unused_placeholders() {
		let err = parse_key_condition("#p = :v", &IndexMap::new(), &values(&[(":v", Value::from("a"))])).unwrap_err();
		assert_eq!(
			err,
			ConditionViolation::UnboundName {
				name: "#p".to_string()
			}
		);

		let err = parse_key_condition("pk = :v", &IndexMap::new(), &IndexMap::new()).unwrap_err();
		assert!(matches!(err, ConditionViolation::UnboundValue { .. }));

		let err = parse_key_condition("pk = :v", &names(&[("#x", "x")]), &values(&[(":v", Value::from("a"))]))
			.unwrap_err();
		assert!(matches!(err, ConditionViolation::UnusedName { .. }));

		let err = parse_key_condition(
			"pk = :v",
			&IndexMap::new(),
			&values(&[(":v", Value::from("a")), (":w", Value::from("b"))]),
		)
		.unwrap_err();
		assert!(matches!(err, ConditionViolation::UnusedValue { .. }));
	}

	#[test]
	fn test_non_scalar_value() {
		let err = parse_key_condition("pk = :v", &IndexMap::new(), &values(&[(":v", Value::Boolean(true))]))
			.unwrap_err();
		assert!(matches!(err, ConditionViolation::NonScalarValue { .. }));
	}

	#[test]
	fn test_nesting_limit() {
		let bound = values(&[(":v", Value::from("a"))]);
		let nested = |depth: usize| format!("{}pk = :v{}", "(".repeat(depth), ")".repeat(depth));

		let condition = parse_key_condition(&nested(32), &IndexMap::new(), &bound).unwrap();
		assert_eq!(terms(&condition), vec![("pk".to_string(), Comparison::eq("a"))]);

		for depth in [33, 200_000] {
			let err = parse_key_condition(&nested(depth), &IndexMap::new(), &bound).unwrap_err();
			assert_eq!(
				err,
				ConditionViolation::Syntax {
					position: 32,
					message: "parentheses nested deeper than 32 levels".to_string()
				}
			);
		}
	}

	#[test]
	fn test_syntax_errors() {
		let bound = values(&[(":v", Value::from("a"))]);
		for expression in ["", "pk", "pk =", "pk = :v AND", "(pk = :v", "pk = :v)", "= :v", "pk :v"] {
			let err = parse_key_condition(expression, &IndexMap::new(), &bound).unwrap_err();
			assert!(matches!(err, ConditionViolation::Syntax { .. }), "{expression:?}: {err:?}");
		}
	}
}
