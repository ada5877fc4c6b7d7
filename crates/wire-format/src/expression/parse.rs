// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::collections::HashSet;

use indexmap::IndexMap;
use tabula_store::{Comparison, KeyCondition, KeyTerm};
use tabula_type::{ConditionViolation, KeyValue, Value};

use super::token::{Operator, Token, TokenKind, syntax};

const RESERVED: [&str; 4] = ["AND", "OR", "NOT", "BETWEEN"];

/// Deepest parenthesis nesting accepted in a key condition.
const MAX_NESTING: usize = 32;

/// Placeholder bindings, with the set of placeholders actually referenced.
pub(crate) struct Placeholders<'a> {
	names: &'a IndexMap<String, String>,
	values: &'a IndexMap<String, Value>,
	used_names: HashSet<String>,
	used_values: HashSet<String>,
}

impl<'a> Placeholders<'a> {
	pub fn new(names: &'a IndexMap<String, String>, values: &'a IndexMap<String, Value>) -> Self {
		Self {
			names,
			values,
			used_names: HashSet::new(),
			used_values: HashSet::new(),
		}
	}

	fn name(&mut self, placeholder: &str) -> Result<String, ConditionViolation> {
		let name = self.names.get(placeholder).ok_or_else(|| ConditionViolation::UnboundName {
			name: placeholder.to_string(),
		})?;
		self.used_names.insert(placeholder.to_string());
		Ok(name.clone())
	}

	fn value(&mut self, placeholder: &str) -> Result<KeyValue, ConditionViolation> {
		let value = self.values.get(placeholder).ok_or_else(|| ConditionViolation::UnboundValue {
			name: placeholder.to_string(),
		})?;
		self.used_values.insert(placeholder.to_string());
		value.as_key().ok_or_else(|| ConditionViolation::NonScalarValue {
			name: placeholder.to_string(),
		})
	}

	pub fn check_unused(&self) -> Result<(), ConditionViolation> {
		if let Some(name) = self.names.keys().find(|name| !self.used_names.contains(*name)) {
			return Err(ConditionViolation::UnusedName {
				name: name.clone(),
			});
		}
		if let Some(name) = self.values.keys().find(|name| !self.used_values.contains(*name)) {
			return Err(ConditionViolation::UnusedValue {
				name: name.clone(),
			});
		}
		Ok(())
	}
}

pub(crate) struct Parser<'a> {
	tokens: Vec<Token>,
	position: usize,
	/// Byte length of the expression, reported for errors at its end.
	end: usize,
	/// Parentheses currently open.
	depth: usize,
	placeholders: Placeholders<'a>,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token>, end: usize, placeholders: Placeholders<'a>) -> Self {
		Self {
			tokens,
			position: 0,
			end,
			depth: 0,
			placeholders,
		}
	}

	pub fn parse(mut self) -> Result<KeyCondition, ConditionViolation> {
		let mut condition = KeyCondition::new();
		self.parse_conjunction(&mut condition)?;

		if let Some(token) = self.peek() {
			return Err(syntax(token.position, "unexpected token after key condition"));
		}
		self.placeholders.check_unused()?;

		Ok(condition)
	}

	fn parse_conjunction(&mut self, condition: &mut KeyCondition) -> Result<(), ConditionViolation> {
		loop {
			self.parse_term(condition)?;

			match self.peek() {
				Some(token) if token.is_keyword("AND") => {
					self.position += 1;
				}
				Some(token) if token.is_keyword("OR") => {
					return Err(ConditionViolation::UnsupportedOperator {
						operator: "OR".to_string(),
					});
				}
				_ => return Ok(()),
			}
		}
	}

	fn parse_term(&mut self, condition: &mut KeyCondition) -> Result<(), ConditionViolation> {
		let token = self.advance("a key condition")?;

		if token.is_operator(Operator::OpenParen) {
			if self.depth == MAX_NESTING {
				return Err(syntax(token.position, format!("parentheses nested deeper than {MAX_NESTING} levels")));
			}
			self.depth += 1;
			self.parse_conjunction(condition)?;
			self.depth -= 1;
			return self.expect(Operator::CloseParen);
		}
		if token.is_keyword("NOT") {
			return Err(ConditionViolation::UnsupportedOperator {
				operator: "NOT".to_string(),
			});
		}
		if token.kind == TokenKind::Identifier("begins_with".to_string())
			&& self.peek().is_some_and(|next| next.is_operator(Operator::OpenParen))
		{
			self.position += 1;
			let attribute = self.parse_operand()?;
			self.expect(Operator::Comma)?;
			let prefix = self.parse_value()?;
			self.expect(Operator::CloseParen)?;
			condition.push(KeyTerm {
				attribute,
				comparison: Comparison::BeginsWith(prefix),
			});
			return Ok(());
		}

		let attribute = self.operand(&token)?;
		let operator = self.advance("a comparison operator")?;
		let comparison = match &operator.kind {
			TokenKind::Operator(Operator::Equal) => Comparison::Eq(self.parse_value()?),
			TokenKind::Operator(Operator::LeftAngle) => Comparison::Lt(self.parse_value()?),
			TokenKind::Operator(Operator::LeftAngleEqual) => Comparison::Le(self.parse_value()?),
			TokenKind::Operator(Operator::RightAngle) => Comparison::Gt(self.parse_value()?),
			TokenKind::Operator(Operator::RightAngleEqual) => Comparison::Ge(self.parse_value()?),
			TokenKind::Operator(Operator::NotEqual) => {
				return Err(ConditionViolation::UnsupportedOperator {
					operator: Operator::NotEqual.as_str().to_string(),
				});
			}
			_ if operator.is_keyword("BETWEEN") => {
				let lower = self.parse_value()?;
				let and = self.advance("AND")?;
				if !and.is_keyword("AND") {
					return Err(syntax(and.position, "expected AND between the bounds of BETWEEN"));
				}
				let upper = self.parse_value()?;
				Comparison::Between(lower, upper)
			}
			TokenKind::Identifier(word) if word.eq_ignore_ascii_case("IN") => {
				return Err(ConditionViolation::UnsupportedOperator {
					operator: "IN".to_string(),
				});
			}
			_ => return Err(syntax(operator.position, "expected a comparison operator")),
		};

		condition.push(KeyTerm {
			attribute,
			comparison,
		});
		Ok(())
	}

	fn parse_operand(&mut self) -> Result<String, ConditionViolation> {
		let token = self.advance("an attribute name")?;
		self.operand(&token)
	}

	fn operand(&mut self, token: &Token) -> Result<String, ConditionViolation> {
		match &token.kind {
			TokenKind::Name(placeholder) => self.placeholders.name(placeholder),
			TokenKind::Identifier(word) if !RESERVED.iter().any(|reserved| word.eq_ignore_ascii_case(reserved)) => {
				Ok(word.clone())
			}
			_ => Err(syntax(token.position, "expected an attribute name")),
		}
	}

	fn parse_value(&mut self) -> Result<KeyValue, ConditionViolation> {
		let token = self.advance("a value placeholder")?;
		match &token.kind {
			TokenKind::Value(placeholder) => self.placeholders.value(placeholder),
			_ => Err(syntax(token.position, "expected a value placeholder")),
		}
	}

	fn expect(&mut self, operator: Operator) -> Result<(), ConditionViolation> {
		let token = self.advance(operator.as_str())?;
		if token.is_operator(operator) {
			Ok(())
		} else {
			Err(syntax(token.position, format!("expected '{}'", operator.as_str())))
		}
	}

	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	fn advance(&mut self, expected: &str) -> Result<Token, ConditionViolation> {
		let token = self
			.tokens
			.get(self.position)
			.cloned()
			.ok_or_else(|| syntax(self.end, format!("expected {expected}, found end of expression")))?;
		self.position += 1;
		Ok(token)
	}
}
