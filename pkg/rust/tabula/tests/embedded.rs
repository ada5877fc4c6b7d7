// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde_json::json;
use tabula::{
	Item, Value,
	store::{Comparison, KeyCondition, QueryRequest, StoreConfig, TableToCreate},
	r#type::ScalarType,
};

#[test]
fn test_typed_and_json_access_share_the_store() {
	let db = tabula::embedded().build().unwrap();

	db.store()
		.create_table(
			TableToCreate::new("events", "user_id")
				.with_sort_key("ts")
				.with_attribute("user_id", ScalarType::String)
				.with_attribute("ts", ScalarType::String),
		)
		.unwrap();
	db.store().put_item("events", Item::new().with("user_id", "u1").with("ts", "2024-01-20")).unwrap();

	let response = db.execute_json(
		"PutItem",
		&json!({"TableName": "events", "Item": {"user_id": {"S": "u1"}, "ts": {"S": "2024-01-10"}}}),
	);
	assert!(response.ok, "{:?}", response.body);

	let items = db
		.store()
		.query(
			"events",
			QueryRequest::new(KeyCondition::partition("user_id", "u1").and("ts", Comparison::lt("2024-01-15"))),
		)
		.unwrap();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].get("ts"), Some(&Value::from("2024-01-10")));
}

#[test]
fn test_failed_request_returns_error_body() {
	let db = tabula::embedded().build().unwrap();
	let response = db.execute("DescribeTable", r#"{"TableName": "missing"}"#);
	assert!(!response.ok);
	assert_eq!(response.body["__type"], "TableNotFound");
	assert_eq!(response.body["code"], "TABLE_002");
}

#[test]
fn test_store_config_is_applied() {
	let db = tabula::embedded().with_config(StoreConfig::new().with_max_global_indexes(0)).build().unwrap();
	let response = db.execute_json(
		"CreateTable",
		&json!({
			"TableName": "t",
			"KeySchema": [{"AttributeName": "pk", "KeyType": "HASH"}],
			"AttributeDefinitions": [
				{"AttributeName": "pk", "AttributeType": "S"},
				{"AttributeName": "g", "AttributeType": "S"}
			],
			"GlobalSecondaryIndexes": [{
				"IndexName": "by_g",
				"KeySchema": [{"AttributeName": "g", "KeyType": "HASH"}],
				"Projection": {"ProjectionType": "ALL"}
			}]
		}),
	);
	assert!(!response.ok);
	assert_eq!(response.body["__type"], "SchemaInvalid");
}

#[cfg(feature = "sub_tracing")]
#[test]
fn test_tracing_can_be_installed_repeatedly() {
	for _ in 0..2 {
		let db = tabula::embedded().with_tracing(|builder| builder.with_env(false).with_filter("warn")).build();
		assert!(db.is_ok());
	}
}
