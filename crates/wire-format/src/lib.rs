// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! JSON request boundary of the table store.
//!
//! Requests and responses use the attribute-value dialect, in which every
//! value is tagged with its type. [`handle`] decodes a request body, runs the
//! named operation and encodes the response; failures map to an
//! [`ErrorResponse`].

pub use dispatch::{Operation, TARGET_PREFIX, handle};
pub use error::{ErrorResponse, WireError};
pub use value::{AttributeMap, AttributeValue};

pub mod dispatch;
pub mod document;
mod error;
pub mod expression;
pub mod request;
pub mod response;
pub mod value;
