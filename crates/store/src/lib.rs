// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! In-memory table store with composite primary keys, global and local
//! secondary indexes, and key-condition queries.

pub use condition::{Comparison, KeyCondition, KeyTerm};
pub use config::StoreConfig;
pub use key::PrimaryKey;
pub use query::QueryRequest;
pub use schema::{
	AttributeDefinition, GlobalIndexToCreate, IndexDef, IndexKind, KeySchema, LocalIndexToCreate, Projection,
	ProjectionType, TableDef, TableToCreate,
};
pub use store::TableStore;
pub use table::{IndexStats, TableStats};

pub mod condition;
pub mod config;
mod index;
pub mod key;
pub mod query;
pub mod schema;
mod store;
mod table;

pub type Result<T> = tabula_type::Result<T>;
