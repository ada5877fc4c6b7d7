// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value as Json;
use tabula_store::TableStore;
use tabula_type::{Error, Value};
use tracing::{debug, instrument};

use crate::{
	WireError,
	expression::parse_key_condition,
	request::{
		CreateTableRequest, DescribeTableRequest, GetItemRequest, ListTablesRequest, PutItemRequest, QueryRequest,
		ReturnValues,
	},
	response::{
		CreateTableResponse, DescribeTableResponse, GetItemResponse, ListTablesResponse, PutItemResponse,
		QueryResponse, TableDescription,
	},
	value::{decode_item, encode_item},
};

/// Prefix clients put in front of the operation name in the target header.
pub const TARGET_PREFIX: &str = "DynamoDB_20120810.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	CreateTable,
	PutItem,
	GetItem,
	Query,
	DescribeTable,
	ListTables,
}

impl Operation {
	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::CreateTable => "CreateTable",
			Operation::PutItem => "PutItem",
			Operation::GetItem => "GetItem",
			Operation::Query => "Query",
			Operation::DescribeTable => "DescribeTable",
			Operation::ListTables => "ListTables",
		}
	}
}

impl Display for Operation {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Operation {
	type Err = WireError;

	/// Accepts bare names and names carrying [`TARGET_PREFIX`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.strip_prefix(TARGET_PREFIX).unwrap_or(s) {
			"CreateTable" => Ok(Operation::CreateTable),
			"PutItem" => Ok(Operation::PutItem),
			"GetItem" => Ok(Operation::GetItem),
			"Query" => Ok(Operation::Query),
			"DescribeTable" => Ok(Operation::DescribeTable),
			"ListTables" => Ok(Operation::ListTables),
			_ => Err(WireError::UnknownOperation {
				operation: s.to_string(),
			}),
		}
	}
}

/// Decodes `body`, runs `operation` against `store` and encodes the response.
#[instrument(name = "wire::handle", level = "debug", skip(store, body))]
pub fn handle(store: &TableStore, operation: &str, body: &str) -> Result<Json, WireError> {
	let result = operation.parse::<Operation>().and_then(|operation| match operation {
		Operation::CreateTable => respond(create_table(store, decode(body)?)),
		Operation::PutItem => respond(put_item(store, decode(body)?)),
		Operation::GetItem => respond(get_item(store, decode(body)?)),
		Operation::Query => respond(query(store, decode(body)?)),
		Operation::DescribeTable => respond(describe_table(store, decode(body)?)),
		Operation::ListTables => respond(list_tables(store, decode(body)?)),
	});

	if let Err(err) = &result {
		debug!(error = %err, "request rejected");
	}
	result
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, WireError> {
	let body = body.trim();
	Ok(serde_json::from_str(if body.is_empty() { "{}" } else { body })?)
}

fn respond<T: Serialize>(response: Result<T, WireError>) -> Result<Json, WireError> {
	Ok(serde_json::to_value(response?)?)
}

fn create_table(store: &TableStore, request: CreateTableRequest) -> Result<CreateTableResponse, WireError> {
	let def = store.create_table(request.into_table()?)?;
	Ok(CreateTableResponse {
		table_description: TableDescription::new(&def, None),
	})
}

fn put_item(store: &TableStore, request: PutItemRequest) -> Result<PutItemResponse, WireError> {
	let previous = store.put_item(&request.table_name, decode_item(request.item)?)?;
	Ok(PutItemResponse {
		attributes: match request.return_values {
			ReturnValues::AllOld => previous.map(encode_item),
			ReturnValues::None => None,
		},
	})
}

fn get_item(store: &TableStore, request: GetItemRequest) -> Result<GetItemResponse, WireError> {
	let item = store.get_item(&request.table_name, &decode_item(request.key)?)?;
	Ok(GetItemResponse {
		item: item.map(encode_item),
	})
}

fn query(store: &TableStore, request: QueryRequest) -> Result<QueryResponse, WireError> {
	if request.limit == Some(0) {
		return Err(WireError::malformed("Limit must be at least 1"));
	}

	let values = request
		.expression_attribute_values
		.into_iter()
		.map(|(name, value)| Ok((name, Value::try_from(value)?)))
		.collect::<Result<IndexMap<_, _>, WireError>>()?;
	let condition =
		parse_key_condition(&request.key_condition_expression, &request.expression_attribute_names, &values)
			.map_err(|violation| Error::condition(&request.table_name, violation))?;

	let items = store.query(
		&request.table_name,
		tabula_store::QueryRequest {
			condition,
			index: request.index_name,
			limit: request.limit,
			scan_forward: request.scan_index_forward.unwrap_or(true),
		},
	)?;

	let count = items.len();
	Ok(QueryResponse {
		items: items.into_iter().map(encode_item).collect(),
		count,
		scanned_count: count,
	})
}

fn describe_table(store: &TableStore, request: DescribeTableRequest) -> Result<DescribeTableResponse, WireError> {
	let def = store.describe_table(&request.table_name)?;
	let stats = store.table_stats(&request.table_name)?;
	Ok(DescribeTableResponse {
		table: TableDescription::new(&def, Some(&stats)),
	})
}

fn list_tables(store: &TableStore, request: ListTablesRequest) -> Result<ListTablesResponse, WireError> {
	if request.limit == Some(0) {
		return Err(WireError::malformed("Limit must be at least 1"));
	}

	let mut names: Vec<String> = store
		.list_tables()
		.into_iter()
		.filter(|name| request.exclusive_start_table_name.as_ref().is_none_or(|start| name > start))
		.collect();

	let mut last_evaluated_table_name = None;
	if let Some(limit) = request.limit {
		if names.len() > limit {
			names.truncate(limit);
			last_evaluated_table_name = names.last().cloned();
		}
	}

	Ok(ListTablesResponse {
		table_names: names,
		last_evaluated_table_name,
	})
}
