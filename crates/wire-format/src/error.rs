// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};
use tabula_type::IntoDiagnostic;

/// Errors raised while decoding or dispatching a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
	#[error(transparent)]
	Store(#[from] tabula_type::Error),

	#[error("malformed request: {message}")]
	Malformed {
		message: String,
	},

	#[error("unknown operation '{operation}'")]
	UnknownOperation {
		operation: String,
	},
}

impl WireError {
	pub fn malformed(message: impl Into<String>) -> Self {
		WireError::Malformed {
			message: message.into(),
		}
	}

	/// The `__type` reported to clients.
	pub fn error_type(&self) -> &'static str {
		match self {
			WireError::Store(err) => err.kind().as_str(),
			WireError::Malformed {
				..
			} => "SerializationException",
			WireError::UnknownOperation {
				..
			} => "UnknownOperationException",
		}
	}
}

impl From<serde_json::Error> for WireError {
	fn from(err: serde_json::Error) -> Self {
		WireError::malformed(err.to_string())
	}
}

/// JSON error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
	#[serde(rename = "__type")]
	pub error_type: String,
	pub message: String,
	/// Machine-readable error code.
	pub code: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub help: Option<String>,
}

impl From<WireError> for ErrorResponse {
	fn from(err: WireError) -> Self {
		let error_type = err.error_type().to_string();
		match err {
			WireError::Store(err) => {
				let diagnostic = err.into_diagnostic();
				Self {
					error_type,
					message: diagnostic.message,
					code: diagnostic.code,
					help: diagnostic.help,
				}
			}
			WireError::Malformed {
				message,
			} => Self {
				error_type,
				message,
				code: "WIRE_001".to_string(),
				help: None,
			},
			WireError::UnknownOperation {
				operation,
			} => Self {
				error_type,
				message: format!("unknown operation '{operation}'"),
				code: "WIRE_002".to_string(),
				help: Some(
					"supported operations are CreateTable, PutItem, GetItem, Query, DescribeTable and ListTables"
						.to_string(),
				),
			},
		}
	}
}
