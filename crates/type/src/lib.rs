// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Shared value model for tabula.
//!
//! Items are maps of attribute names to [`Value`]s. Key attributes are
//! restricted to the scalar types in [`ScalarType`] and are compared through
//! [`KeyValue`], which carries the total order used by partitions and indexes.

pub mod error;
pub mod value;

pub use error::{
	ConditionViolation, Error, ErrorKind, SchemaViolation,
	diagnostic::{Diagnostic, IntoDiagnostic},
};
pub use value::{Item, KeyValue, Number, ScalarType, Value, ValueKind};

pub type Result<T> = std::result::Result<T, Error>;
