//! Field descriptor tables
//!
//! A [`Schema`] is the ordered list of fields a message type puts on the
//! wire. The format carries no tags, so producer and consumer must build
//! identical schemas: same fields, same kinds, same registration order.
//!
//! Schemas are built once, usually inside a `LazyLock`, and are immutable
//! afterwards. A derived schema starts from a copy of its base table and
//! appends its own fields after the inherited ones.

use std::slice;
use std::sync::Arc;

use tracing::trace;

use super::{Error, FieldKind, Result};

/// One registered field: wire key, storage name and declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    key: String,
    storage: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub(crate) fn new(key: &str, storage: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_owned(),
            storage: storage.to_owned(),
            kind,
        }
    }

    /// Wire key the field was registered under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the message slot holding the value
    #[must_use]
    pub fn storage(&self) -> &str {
        &self.storage
    }

    /// Declared kind
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Ordered, immutable descriptor table of a message type.
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub(crate) fn from_parts(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.to_owned(),
            fields,
        }
    }

    /// Start an empty table
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            error: None,
        }
    }

    /// Start a table from a copy of `base`'s fields
    pub fn extend(name: impl Into<String>, base: &Self) -> SchemaBuilder {
        let name = name.into();
        trace!(schema = %name, base = %base.name, inherited = base.len(), "copying base descriptors");
        SchemaBuilder {
            name,
            fields: base.fields.clone(),
            error: None,
        }
    }

    /// Start a wire message table; the command header fields come first.
    pub fn message(name: impl Into<String>) -> SchemaBuilder {
        Self::extend(name, super::header::envelope())
    }

    /// Type name used in diagnostics
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the table has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in registration (wire) order
    pub fn fields(&self) -> slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Look up a field by wire key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Position of the field stored under `storage`
    #[must_use]
    pub fn position(&self, storage: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.storage == storage)
    }
}

/// Mutable table under construction.
///
/// Registration errors are latched: the first one is returned by
/// [`SchemaBuilder::build`], so declarations can be chained.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    error: Option<Error>,
}

impl SchemaBuilder {
    /// Register a field, chaining style
    #[must_use]
    pub fn field(mut self, key: &str, storage: &str, kind: FieldKind) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = self.register(key, storage, kind).map(|_| ()) {
            self.error = Some(err);
        }
        self
    }

    /// Register a field, failing immediately on a duplicate
    pub fn register(&mut self, key: &str, storage: &str, kind: FieldKind) -> Result<&mut Self> {
        if self.fields.iter().any(|f| f.key == key) {
            return Err(Error::DuplicateField {
                schema: self.name.clone(),
                key: key.to_owned(),
            });
        }
        if self.fields.iter().any(|f| f.storage == storage) {
            return Err(Error::DuplicateStorage {
                schema: self.name.clone(),
                storage: storage.to_owned(),
            });
        }
        self.fields.push(FieldDescriptor::new(key, storage, kind));
        Ok(self)
    }

    /// Number of fields registered so far, inherited ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Freeze the table
    pub fn build(self) -> Result<Arc<Schema>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        trace!(schema = %self.name, fields = self.fields.len(), "schema built");
        Ok(Arc::new(Schema {
            name: self.name,
            fields: self.fields,
        }))
    }
}
