// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
	#[error("invalid filter directive '{directive}': {message}")]
	InvalidFilter {
		directive: String,
		message: String,
	},

	#[error("a global tracing subscriber is already installed: {message}")]
	AlreadyInstalled {
		message: String,
	},
}
