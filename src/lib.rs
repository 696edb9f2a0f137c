//! DNS TXT domain-ownership verification for multi-tenant SaaS organizations.
//!
//! An organization proves control of an e-mail domain by publishing
//! `<record-identifier>=<token>` as a TXT record at the domain root. The [`verify::Verifier`]
//! looks the record up and compares it with the token kept in the organization's metadata.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod claim;
pub mod config;
pub mod dns;
pub mod error;
pub mod obs;
pub mod org;
pub mod store;
pub mod tokens;
pub mod verify;

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "hickory")] pub use hickory_resolver;
#[cfg(test)] use color_eyre as _;
