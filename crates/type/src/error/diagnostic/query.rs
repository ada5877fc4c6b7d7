// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use crate::error::{ConditionViolation, diagnostic::Diagnostic};

pub fn condition_invalid(table: &str, violation: ConditionViolation) -> Diagnostic {
	let (code, help) = match &violation {
		ConditionViolation::MissingPartitionCondition {
			..
		} => ("CONDITION_001", "add an equality test on the partition key"),
		ConditionViolation::PartitionConditionNotEquality {
			..
		} => ("CONDITION_002", "compare the partition key with '='"),
		ConditionViolation::MultiplePartitionConditions {
			..
		} => ("CONDITION_003", "test the partition key exactly once"),
		ConditionViolation::MultipleSortConditions {
			..
		} => ("CONDITION_004", "combine the sort key tests into one, e.g. BETWEEN"),
		ConditionViolation::NotAKeyAttribute {
			..
		} => ("CONDITION_005", "key conditions may only reference the partition and sort key of the target"),
		ConditionViolation::BeginsWithOnNumber {
			..
		} => ("CONDITION_006", "use a range comparison on number keys"),
		ConditionViolation::InvertedRange {
			..
		} => ("CONDITION_007", "swap the BETWEEN bounds"),
		ConditionViolation::Syntax {
			..
		} => ("CONDITION_008", "check the key condition expression syntax"),
		ConditionViolation::UnsupportedOperator {
			..
		} => ("CONDITION_009", "key conditions only combine terms with AND"),
		ConditionViolation::UnboundName {
			..
		} => ("CONDITION_010", "add the placeholder to the expression attribute names"),
		ConditionViolation::UnboundValue {
			..
		} => ("CONDITION_011", "add the placeholder to the expression attribute values"),
		ConditionViolation::UnusedName {
			..
		} => ("CONDITION_012", "remove unused expression attribute names"),
		ConditionViolation::UnusedValue {
			..
		} => ("CONDITION_013", "remove unused expression attribute values"),
		ConditionViolation::NonScalarValue {
			..
		} => ("CONDITION_014", "key conditions compare against string or number values"),
	};

	Diagnostic {
		code: code.to_string(),
		message: format!("invalid key condition on table '{}': {}", table, violation),
		label: Some("key condition rejected".to_string()),
		help: Some(help.to_string()),
		notes: vec![],
	}
}
