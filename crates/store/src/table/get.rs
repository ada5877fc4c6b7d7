// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use tabula_type::Item;

use super::Table;
use crate::key::extract_primary_key;

impl Table {
	pub fn get(&self, key: &Item) -> crate::Result<Option<Item>> {
		let key = extract_primary_key(&self.def.name, &self.def.key, key)?;
		Ok(self.data.read().lookup(&key).cloned())
	}
}
