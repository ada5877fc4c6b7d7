// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::{
	sync::{Arc, Barrier},
	thread,
};

use tabula_store::{
	Comparison, GlobalIndexToCreate, KeyCondition, LocalIndexToCreate, QueryRequest, StoreConfig, TableStore,
	TableToCreate,
};
use tabula_type::{ErrorKind, Item, Number, ScalarType, Value};

fn events() -> TableToCreate {
	TableToCreate::new("events", "user_id")
		.with_sort_key("ts")
		.with_attribute("user_id", ScalarType::String)
		.with_attribute("ts", ScalarType::String)
}

fn event(user: &str, ts: &str) -> Item {
	Item::new().with("user_id", user).with("ts", ts)
}

fn sort_values(items: &[Item], attribute: &str) -> Vec<Value> {
	items.iter().map(|item| item.get(attribute).cloned().unwrap_or(Value::Null)).collect()
}

fn strings(values: &[&str]) -> Vec<Value> {
	values.iter().map(|v| Value::from(*v)).collect()
}

#[test]
fn test_create_twice_fails() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();
	let err = store.create_table(events()).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);
	assert_eq!(store.list_tables(), vec!["events".to_string()]);
}

#[test]
fn test_concurrent_create_has_one_winner() {
	let store = TableStore::default();
	let threads = 8;
	let barrier = Arc::new(Barrier::new(threads));

	let handles: Vec<_> = (0..threads)
		.map(|_| {
			let store = store.clone();
			let barrier = barrier.clone();
			thread::spawn(move || {
				barrier.wait();
				store.create_table(events())
			})
		})
		.collect();

	let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	let created = results.iter().filter(|r| r.is_ok()).count();
	assert_eq!(created, 1);
	for err in results.into_iter().filter_map(Result::err) {
		assert_eq!(err.kind(), ErrorKind::TableAlreadyExists);
	}
}

#[test]
fn test_get_returns_stored_item() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();

	let item = event("u1", "2024-01-01")
		.with("count", 3)
		.with("tags", Value::list([Value::from("a"), Value::from("b")]))
		.with("meta", Value::map([("ok", Value::bool(true)), ("none", Value::Null)]));
	store.put_item("events", item.clone()).unwrap();

	let found = store.get_item("events", &event("u1", "2024-01-01")).unwrap();
	assert_eq!(found, Some(item));
	assert_eq!(store.get_item("events", &event("u1", "2099-01-01")).unwrap(), None);
}

#[test]
fn test_put_is_idempotent() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();

	let item = event("u1", "a").with("n", 1);
	store.put_item("events", item.clone()).unwrap();
	let previous = store.put_item("events", item.clone()).unwrap();
	assert_eq!(previous, Some(item.clone()));

	let items = store.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1"))).unwrap();
	assert_eq!(items, vec![item]);
	assert_eq!(store.table_stats("events").unwrap().item_count, 1);
}

#[test]
fn test_overwrite_replaces_whole_item() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();

	store.put_item("events", event("u1", "a").with("x", 1)).unwrap();
	store.put_item("events", event("u1", "a").with("y", 2)).unwrap();

	let found = store.get_item("events", &event("u1", "a")).unwrap().unwrap();
	assert!(!found.contains("x"));
	assert_eq!(found.get("y"), Some(&Value::from(2)));
}

#[test]
fn test_query_returns_sort_order() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();
	for ts in ["c", "a", "b"] {
		store.put_item("events", event("u1", ts)).unwrap();
	}
	store.put_item("events", event("u2", "0")).unwrap();

	let items = store.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1"))).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["a", "b", "c"]));

	let items =
		store.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1")).descending()).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["c", "b", "a"]));

	let items = store
		.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1")).descending().with_limit(2))
		.unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["c", "b"]));
}

#[test]
fn test_sort_range_query() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();
	for ts in ["2024-01-10", "2024-01-15", "2024-01-20"] {
		store.put_item("events", event("u1", ts)).unwrap();
	}

	let request =
		QueryRequest::new(KeyCondition::partition("user_id", "u1").and("ts", Comparison::ge("2024-01-15")));
	let items = store.query("events", request).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["2024-01-15", "2024-01-20"]));

	let request = QueryRequest::new(
		KeyCondition::partition("user_id", "u1").and("ts", Comparison::between("2024-01-11", "2024-01-15")),
	);
	let items = store.query("events", request).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["2024-01-15"]));

	let request =
		QueryRequest::new(KeyCondition::partition("user_id", "u1").and("ts", Comparison::begins_with("2024-01-1")));
	let items = store.query("events", request).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["2024-01-10", "2024-01-15"]));
}

#[test]
fn test_number_sort_key_orders_numerically() {
	let store = TableStore::default();
	store.create_table(
		TableToCreate::new("scores", "player")
			.with_sort_key("score")
			.with_attribute("player", ScalarType::String)
			.with_attribute("score", ScalarType::Number),
	)
	.unwrap();

	for score in ["10", "9", "100", "-1", "2.5"] {
		let item = Item::new().with("player", "p").with("score", Number::parse(score).unwrap());
		store.put_item("scores", item).unwrap();
	}

	let items = store.query("scores", QueryRequest::new(KeyCondition::partition("player", "p"))).unwrap();
	let scores: Vec<String> = items.iter().map(|item| format!("{:?}", item.get("score"))).collect();
	let expected: Vec<String> = ["-1", "2.5", "9", "10", "100"]
		.iter()
		.map(|s| format!("{:?}", Some(&Value::Number(Number::parse(s).unwrap()))))
		.collect();
	assert_eq!(scores, expected);

	let same = Item::new().with("player", "p").with("score", Number::parse("10.0").unwrap());
	assert!(store.get_item("scores", &same).unwrap().is_some());
}

#[test]
fn test_global_index_visibility() {
	let store = TableStore::default();
	store.create_table(
		TableToCreate::new("single", "PK")
			.with_sort_key("SK")
			.with_attribute("PK", ScalarType::String)
			.with_attribute("SK", ScalarType::String)
			.with_attribute("GSI1PK", ScalarType::String)
			.with_attribute("GSI1SK", ScalarType::String)
			.with_global_index(GlobalIndexToCreate::new("GSI1", "GSI1PK").with_sort_key("GSI1SK")),
	)
	.unwrap();

	store.put_item(
		"single",
		Item::new().with("PK", "USER#1").with("SK", "PROFILE").with("GSI1PK", "ORG#1").with("GSI1SK", "USER#1"),
	)
	.unwrap();
	store.put_item("single", Item::new().with("PK", "USER#2").with("SK", "PROFILE")).unwrap();

	let index_query = |org: &str| {
		store.query("single", QueryRequest::new(KeyCondition::partition("GSI1PK", org)).with_index("GSI1")).unwrap()
	};

	let items = index_query("ORG#1");
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].get("PK"), Some(&Value::from("USER#1")));

	let unindexed = Item::new().with("PK", "USER#2").with("SK", "PROFILE");
	assert!(store.get_item("single", &unindexed).unwrap().is_some());

	let stats = store.table_stats("single").unwrap();
	assert_eq!(stats.item_count, 2);
	assert_eq!(stats.indexes[0].item_count, 1);
}

#[test]
fn test_overwrite_moves_index_entry() {
	let store = TableStore::default();
	store.create_table(
		TableToCreate::new("tickets", "id")
			.with_attribute("id", ScalarType::String)
			.with_attribute("status", ScalarType::String)
			.with_global_index(GlobalIndexToCreate::new("by_status", "status")),
	)
	.unwrap();

	store.put_item("tickets", Item::new().with("id", "t1").with("status", "open")).unwrap();
	store.put_item("tickets", Item::new().with("id", "t1").with("status", "closed")).unwrap();

	let by_status = |status: &str| {
		store.query("tickets", QueryRequest::new(KeyCondition::partition("status", status)).with_index("by_status"))
			.unwrap()
	};
	assert!(by_status("open").is_empty());
	assert_eq!(by_status("closed").len(), 1);

	store.put_item("tickets", Item::new().with("id", "t1")).unwrap();
	assert!(by_status("closed").is_empty());
	assert_eq!(store.table_stats("tickets").unwrap().indexes[0].item_count, 0);
}

#[test]
fn test_shared_index_key_orders_by_primary_key() {
	let store = TableStore::default();
	store.create_table(
		TableToCreate::new("tickets", "id")
			.with_attribute("id", ScalarType::String)
			.with_attribute("status", ScalarType::String)
			.with_global_index(GlobalIndexToCreate::new("by_status", "status")),
	)
	.unwrap();
	for id in ["t3", "t1", "t2"] {
		store.put_item("tickets", Item::new().with("id", id).with("status", "open")).unwrap();
	}

	let items = store
		.query("tickets", QueryRequest::new(KeyCondition::partition("status", "open")).with_index("by_status"))
		.unwrap();
	assert_eq!(sort_values(&items, "id"), strings(&["t1", "t2", "t3"]));
}

#[test]
fn test_descending_page_comes_from_the_end() {
	let store = TableStore::new(StoreConfig::default().with_default_query_limit(2));
	store.create_table(
		TableToCreate::new("tickets", "id")
			.with_attribute("id", ScalarType::String)
			.with_attribute("status", ScalarType::String)
			.with_global_index(GlobalIndexToCreate::new("by_status", "status")),
	)
	.unwrap();
	for id in ["t3", "t1", "t5", "t2", "t4"] {
		store.put_item("tickets", Item::new().with("id", id).with("status", "open")).unwrap();
	}

	let open = || QueryRequest::new(KeyCondition::partition("status", "open")).with_index("by_status");

	let items = store.query("tickets", open().descending().with_limit(1)).unwrap();
	assert_eq!(sort_values(&items, "id"), strings(&["t5"]));

	let items = store.query("tickets", open().descending()).unwrap();
	assert_eq!(sort_values(&items, "id"), strings(&["t5", "t4"]));

	let items = store.query("tickets", open().with_limit(10)).unwrap();
	assert_eq!(sort_values(&items, "id"), strings(&["t1", "t2", "t3", "t4", "t5"]));

	let items = store.query("tickets", QueryRequest::new(KeyCondition::partition("id", "t4")).descending()).unwrap();
	assert_eq!(sort_values(&items, "id"), strings(&["t4"]));
}

#[test]
fn test_local_index_orders_by_alternate_sort_key() {
	let store = TableStore::default();
	store.create_table(
		events().with_attribute("amount", ScalarType::Number).with_local_index(LocalIndexToCreate::new("by_amount", "amount")),
	)
	.unwrap();

	store.put_item("events", event("u1", "a").with("amount", 30)).unwrap();
	store.put_item("events", event("u1", "b").with("amount", 10)).unwrap();
	store.put_item("events", event("u1", "c").with("amount", 20)).unwrap();
	store.put_item("events", event("u2", "a").with("amount", 5)).unwrap();

	let request = QueryRequest::new(KeyCondition::partition("user_id", "u1").and("amount", Comparison::gt(10)))
		.with_index("by_amount");
	let items = store.query("events", request).unwrap();
	assert_eq!(sort_values(&items, "ts"), strings(&["c", "a"]));
}

#[test]
fn test_put_rejects_bad_keys() {
	let store = TableStore::default();
	store.create_table(events().with_attribute("status", ScalarType::String).with_global_index(
		GlobalIndexToCreate::new("by_status", "status"),
	))
	.unwrap();

	let err = store.put_item("events", Item::new().with("user_id", "u1")).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::KeyMissing);

	let err = store.put_item("events", event("u1", "a").with("status", 1)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::TypeMismatch);

	let err = store.put_item("events", Item::new().with("user_id", 1).with("ts", "a")).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::TypeMismatch);

	assert_eq!(store.table_stats("events").unwrap().item_count, 0);
}

#[test]
fn test_query_errors() {
	let store = TableStore::default();
	store.create_table(events()).unwrap();

	let err = store
		.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1")).with_index("nope"))
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::IndexNotFound);

	let err = store.query("events", QueryRequest::new(KeyCondition::new().and("ts", Comparison::eq("a")))).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::ConditionInvalid);

	let err = store.query("nope", QueryRequest::new(KeyCondition::partition("user_id", "u1"))).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::TableNotFound);
}

#[test]
fn test_default_query_limit() {
	let store = TableStore::new(StoreConfig::default().with_default_query_limit(2));
	store.create_table(events()).unwrap();
	for ts in ["a", "b", "c"] {
		store.put_item("events", event("u1", ts)).unwrap();
	}

	let items = store.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1"))).unwrap();
	assert_eq!(items.len(), 2);

	let items =
		store.query("events", QueryRequest::new(KeyCondition::partition("user_id", "u1")).with_limit(3)).unwrap();
	assert_eq!(items.len(), 3);
}

#[test]
fn test_describe_and_list() {
	let store = TableStore::default();
	store.create_table(TableToCreate::new("zeta", "id").with_attribute("id", ScalarType::String)).unwrap();
	let created = store.create_table(events()).unwrap();

	assert_eq!(store.describe_table("events").unwrap(), created);
	assert_eq!(store.list_tables(), vec!["events".to_string(), "zeta".to_string()]);
	assert_eq!(store.describe_table("nope").unwrap_err().kind(), ErrorKind::TableNotFound);
}

#[test]
fn test_concurrent_puts_keep_indexes_consistent() {
	let store = TableStore::default();
	store.create_table(
		TableToCreate::new("tickets", "id")
			.with_attribute("id", ScalarType::String)
			.with_attribute("status", ScalarType::String)
			.with_global_index(GlobalIndexToCreate::new("by_status", "status")),
	)
	.unwrap();

	let handles: Vec<_> = (0..4)
		.map(|worker| {
			let store = store.clone();
			thread::spawn(move || {
				for round in 0..50 {
					let status = if (worker + round) % 2 == 0 { "open" } else { "closed" };
					let item = Item::new().with("id", format!("t{}", round % 5)).with("status", status);
					store.put_item("tickets", item).unwrap();
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	let stats = store.table_stats("tickets").unwrap();
	assert_eq!(stats.item_count, 5);
	assert_eq!(stats.indexes[0].item_count, 5);
}
