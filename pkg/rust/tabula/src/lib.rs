// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Embedded table store.
//!
//! ```ignore
//! let db = tabula::embedded().build()?;
//! db.execute("ListTables", "{}");
//! ```

mod builder;
mod database;

pub use builder::TabulaBuilder;
pub use database::{Response, Tabula};
pub use tabula_store as store;
#[cfg(feature = "sub_tracing")]
pub use tabula_sub_tracing as sub_tracing;
pub use tabula_type as r#type;
pub use tabula_type::{Error as StoreError, Item, Value};
pub use tabula_wire_format as wire;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[cfg(feature = "sub_tracing")]
	#[error(transparent)]
	Tracing(#[from] tabula_sub_tracing::TracingError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Starts building an in-process store.
pub fn embedded() -> TabulaBuilder {
	TabulaBuilder::new()
}
