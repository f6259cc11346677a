//! binstream - schema-driven binary message codec
//!
//! Messages are described by a [`Schema`]: an ordered table of fields, each
//! with a declared kind (scalar, string, nested message, array or map). The
//! codec writes fields in registration order with explicit byte order and
//! `u32` length prefixes; nothing on the wire names a field.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//! use binstream::{FieldKind, Message, ScalarKind, Schema};
//!
//! static LOGIN: LazyLock<Arc<Schema>> = LazyLock::new(|| {
//!     Schema::message("Login")
//!         .field("name", "name", FieldKind::string())
//!         .field("level", "level", FieldKind::scalar(ScalarKind::U16))
//!         .build()
//!         .expect("valid schema")
//! });
//!
//! let mut msg = Message::with_cmd(&LOGIN, 1, 3)?;
//! msg.set("name", "ok")?;
//!
//! // Encode to bytes
//! let bytes = msg.encode()?;
//! assert_eq!(bytes.len(), 8 + 4 + 2 + 2);
//!
//! // Decode from bytes
//! let mut decoded = Message::new(&LOGIN);
//! assert!(decoded.decode(bytes));
//! assert_eq!(decoded.get_str("name"), Some("ok"));
//! # Ok::<(), binstream::Error>(())
//! ```
//!
//! # Features
//!
//! - **Tagged field kinds** - dispatch is decided when a field is registered
//! - **Inherited schemas** - a derived table copies its base and appends
//! - **Checked cursors** - overruns are errors, never out-of-bounds access
//! - **Configurable byte order** - big-endian by default

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Codec, CodecConfig, ElementKind, Endianness, Error, FieldDescriptor, FieldKind, HEADER_SIZE,
    MapKey, MapKeyKind, Message, MessageHeader, Result, ScalarKind, Schema, SchemaBuilder,
    StreamMap, Value,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
