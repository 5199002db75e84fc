//! Rows of a [`ListSource`](super::ListSource) and the field storage they
//! share with tree nodes.

use std::fmt;
use std::sync::{Arc, Weak};

use arbor_core::Notification;
use parking_lot::RwLock;

use super::list::ListShared;
use super::value::{RowData, Value};

/// Ordered named fields behind a lock.
#[derive(Default)]
pub(crate) struct Fields {
    values: RwLock<Vec<(String, Value)>>,
}

impl Fields {
    pub(crate) fn new(accessors: &[String], data: &RowData) -> Self {
        let fields = Self::default();
        for (name, value) in data.fields(accessors) {
            fields.set(&name, value);
        }
        fields
    }

    pub(crate) fn get(&self, name: &str) -> Option<Value> {
        self.values
            .read()
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
    }

    /// Replace a field, appending it if the name is new.
    pub(crate) fn set(&self, name: &str, value: Value) {
        let mut values = self.values.write();
        match values.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => values.push((name.to_owned(), value)),
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<(String, Value)> {
        self.values.read().clone()
    }

    /// Every pair must be present with an equal value.
    pub(crate) fn matches(&self, pairs: &[(String, Value)]) -> bool {
        let values = self.values.read();
        pairs.iter().all(|(name, wanted)| {
            values
                .iter()
                .any(|(field, value)| field == name && value == wanted)
        })
    }

    /// Render as `<Kind 0x... a=1 b="x">` with fields sorted by name.
    pub(crate) fn describe(&self, f: &mut fmt::Formatter<'_>, kind: &str, addr: *const ()) -> fmt::Result {
        let mut values = self.snapshot();
        values.sort_by(|(a, _), (b, _)| a.cmp(b));

        write!(f, "<{kind} {addr:p}")?;
        for (name, value) in &values {
            write!(f, " {name}={}", value.literal())?;
        }
        f.write_str(">")
    }
}

/// A single entry of a [`ListSource`](super::ListSource).
///
/// Rows are shared handles. Setting a field on a row that still belongs to a
/// source notifies that source's listeners of a `change`.
pub struct Row {
    me: Weak<Row>,
    fields: Fields,
    source: RwLock<Weak<ListShared>>,
}

impl Row {
    pub(crate) fn new(accessors: &[String], data: &RowData, source: Weak<ListShared>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            fields: Fields::new(accessors, data),
            source: RwLock::new(source),
        })
    }

    /// The value of a field, if the row has it.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.get(name)
    }

    /// Set a field and notify the owning source.
    ///
    /// Unknown names become new fields.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        self.fields.set(name, value.into());

        let source = self.source.read().upgrade();
        if let (Some(source), Some(me)) = (source, self.me.upgrade()) {
            source.listeners.notify(Notification::Change { item: &me });
        }
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> Vec<(String, Value)> {
        self.fields.snapshot()
    }

    /// Whether the row still belongs to a source.
    pub fn is_attached(&self) -> bool {
        self.source.read().strong_count() > 0
    }

    pub(crate) fn matches(&self, pairs: &[(String, Value)]) -> bool {
        self.fields.matches(pairs)
    }

    pub(crate) fn belongs_to(&self, shared: &Arc<ListShared>) -> bool {
        std::ptr::eq(self.source.read().as_ptr(), Arc::as_ptr(shared))
    }

    pub(crate) fn detach(&self) {
        *self.source.write() = Weak::new();
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.describe(f, "Row", self as *const Self as *const ())
    }
}

static_assertions::assert_impl_all!(Row: Send, Sync);
