//! Flat observable data source.

use std::fmt;
use std::sync::Arc;

use arbor_core::logging::targets;
use arbor_core::{Listener, ListenerId, Notification, Source};
use parking_lot::RwLock;

use super::accessors::{owned, validate_accessors};
use super::error::{Result, SourceError};
use super::normalize_index;
use super::row::Row;
use super::value::RowData;

pub(crate) struct ListShared {
    accessors: Vec<String>,
    rows: RwLock<Vec<Arc<Row>>>,
    pub(crate) listeners: Source<Arc<Row>>,
}

/// An ordered, observable list of [`Row`]s.
///
/// Every row is built from a [`RowData`] literal mapped onto the source's
/// accessors. Structural changes notify listeners synchronously, after the
/// source has been updated.
///
/// # Example
///
/// ```
/// use arbor::sources::{ListSource, Value};
///
/// let source = ListSource::from_data(["name", "age"], [("Ada", 36), ("Alan", 41)]).unwrap();
/// assert_eq!(source.len(), 2);
/// assert_eq!(source.get(1).unwrap().get("age"), Some(Value::Int(41)));
///
/// let row = source.find(("Ada",), None).unwrap();
/// assert_eq!(source.index(&row).unwrap(), 0);
/// ```
pub struct ListSource {
    shared: Arc<ListShared>,
}

impl ListSource {
    /// Create an empty source.
    pub fn new<S: AsRef<str>>(accessors: impl IntoIterator<Item = S>) -> Result<Self> {
        let accessors = owned(accessors);
        validate_accessors(&accessors)?;
        Ok(Self {
            shared: Arc::new(ListShared {
                accessors,
                rows: RwLock::new(Vec::new()),
                listeners: Source::new(),
            }),
        })
    }

    /// Create a source populated from `data`, without notifying.
    pub fn from_data<S, D>(
        accessors: impl IntoIterator<Item = S>,
        data: impl IntoIterator<Item = D>,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        D: Into<RowData>,
    {
        let source = Self::new(accessors)?;
        let rows: Vec<_> = data
            .into_iter()
            .map(|item| source.create_row(&item.into()))
            .collect();
        *source.shared.rows.write() = rows;
        Ok(source)
    }

    fn create_row(&self, data: &RowData) -> Arc<Row> {
        Row::new(&self.shared.accessors, data, Arc::downgrade(&self.shared))
    }

    /// The accessor names, in declaration order.
    pub fn accessors(&self) -> &[String] {
        &self.shared.accessors
    }

    pub fn len(&self) -> usize {
        self.shared.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.rows.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Arc<Row>> {
        self.shared.rows.read().get(index).cloned()
    }

    /// A snapshot of every row.
    pub fn rows(&self) -> Vec<Arc<Row>> {
        self.shared.rows.read().clone()
    }

    pub fn iter(&self) -> std::vec::IntoIter<Arc<Row>> {
        self.rows().into_iter()
    }

    /// Insert a row built from `data` at `index`.
    ///
    /// Negative indices count from the end; out-of-range indices clamp.
    pub fn insert(&self, index: isize, data: impl Into<RowData>) -> Arc<Row> {
        let row = self.create_row(&data.into());
        let index = {
            let mut rows = self.shared.rows.write();
            let index = normalize_index(index, rows.len());
            rows.insert(index, row.clone());
            index
        };

        tracing::trace!(target: targets::SOURCES, index, "row inserted");
        self.shared.listeners.notify(Notification::Insert {
            parent: None,
            index,
            item: &row,
        });
        row
    }

    /// Append a row built from `data`.
    pub fn append(&self, data: impl Into<RowData>) -> Arc<Row> {
        self.insert(isize::MAX, data)
    }

    /// Replace the row at `index`.
    ///
    /// Listeners are told of an `insert` at `index`, not a `change`.
    pub fn set(&self, index: usize, data: impl Into<RowData>) -> Result<Arc<Row>> {
        let row = self.create_row(&data.into());
        let old = {
            let mut rows = self.shared.rows.write();
            let len = rows.len();
            let slot = rows
                .get_mut(index)
                .ok_or(SourceError::out_of_range(index, len))?;
            std::mem::replace(slot, row.clone())
        };
        old.detach();

        self.shared.listeners.notify(Notification::Insert {
            parent: None,
            index,
            item: &row,
        });
        Ok(row)
    }

    /// Remove `row`, located by identity.
    pub fn remove(&self, row: &Arc<Row>) -> Result<Arc<Row>> {
        let index = self.index(row)?;
        self.remove_at(index)
    }

    /// Remove the row at `index`.
    pub fn remove_at(&self, index: usize) -> Result<Arc<Row>> {
        let row = {
            let mut rows = self.shared.rows.write();
            if index >= rows.len() {
                return Err(SourceError::out_of_range(index, rows.len()));
            }
            rows.remove(index)
        };
        row.detach();

        tracing::trace!(target: targets::SOURCES, index, "row removed");
        self.shared.listeners.notify(Notification::Remove {
            parent: None,
            index,
            item: &row,
        });
        Ok(row)
    }

    /// Position of `row`, compared by identity.
    pub fn index(&self, row: &Arc<Row>) -> Result<usize> {
        self.shared
            .rows
            .read()
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, row))
            .ok_or_else(|| SourceError::not_found(row))
    }

    /// First row after `start` (or from the beginning) whose fields match
    /// every value in `data`.
    pub fn find(&self, data: impl Into<RowData>, start: Option<&Arc<Row>>) -> Result<Arc<Row>> {
        let data = data.into();
        let pairs = data.fields(&self.shared.accessors);
        let from = match start {
            Some(start) => self.index(start)? + 1,
            None => 0,
        };

        self.shared
            .rows
            .read()
            .iter()
            .skip(from)
            .find(|row| row.matches(&pairs))
            .cloned()
            .ok_or_else(|| SourceError::no_match(&data))
    }

    /// Remove every row.
    pub fn clear(&self) {
        let rows = std::mem::take(&mut *self.shared.rows.write());
        for row in &rows {
            row.detach();
        }

        tracing::trace!(target: targets::SOURCES, removed = rows.len(), "list cleared");
        self.shared.listeners.notify(Notification::Clear);
    }

    /// Whether `row` currently belongs to this source.
    pub fn contains(&self, row: &Arc<Row>) -> bool {
        row.belongs_to(&self.shared)
    }

    pub fn add_listener<L>(&self, listener: &Arc<L>) -> ListenerId
    where
        L: Listener<Arc<Row>> + 'static,
    {
        self.shared.listeners.add_listener(listener)
    }

    pub fn remove_listener<L>(&self, listener: &Arc<L>) -> bool
    where
        L: Listener<Arc<Row>> + 'static,
    {
        self.shared.listeners.remove_listener(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.listener_count()
    }
}

impl<'a> IntoIterator for &'a ListSource {
    type Item = Arc<Row>;
    type IntoIter = std::vec::IntoIter<Arc<Row>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSource")
            .field("accessors", &self.shared.accessors)
            .field("len", &self.len())
            .field("listeners", &self.shared.listeners)
            .finish()
    }
}

static_assertions::assert_impl_all!(ListSource: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::Value;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Events(Mutex<Vec<String>>);

    impl Listener<Arc<Row>> for Events {
        fn change(&self, item: &Arc<Row>) {
            self.0.lock().push(format!("change {}", item.get("v").unwrap_or_default()));
        }

        fn insert(&self, _parent: Option<&Arc<Row>>, index: usize, item: &Arc<Row>) {
            self.0
                .lock()
                .push(format!("insert {index} {}", item.get("v").unwrap_or_default()));
        }

        fn remove(&self, _parent: Option<&Arc<Row>>, index: usize, item: &Arc<Row>) {
            self.0
                .lock()
                .push(format!("remove {index} {}", item.get("v").unwrap_or_default()));
        }

        fn clear(&self) {
            self.0.lock().push("clear".into());
        }
    }

    fn values(source: &ListSource) -> Vec<Value> {
        source.iter().filter_map(|row| row.get("v")).collect()
    }

    #[test]
    fn test_rejects_bad_accessors() {
        assert_eq!(
            ListSource::new(Vec::<String>::new()).unwrap_err(),
            SourceError::EmptyAccessors
        );
        assert!(matches!(
            ListSource::new(["a", "a"]),
            Err(SourceError::DuplicateAccessor { .. })
        ));
    }

    #[test]
    fn test_insert_normalizes_index() {
        let source = ListSource::from_data(["v"], [1, 2, 3]).unwrap();
        source.insert(-1, 10);
        source.insert(-100, 0);
        source.insert(99, 4);
        assert_eq!(
            values(&source),
            [0, 1, 2, 10, 3, 4].map(Value::from).to_vec()
        );
    }

    #[test]
    fn test_notifications() {
        let source = ListSource::from_data(["v"], [1, 2]).unwrap();
        let events = Arc::new(Events::default());
        source.add_listener(&events);

        source.append(3);
        let row = source.get(0).unwrap();
        row.set("v", 5);
        source.set(1, 7).unwrap();
        source.remove(&row).unwrap();
        source.clear();

        assert_eq!(
            *events.0.lock(),
            vec!["insert 2 3", "change 5", "insert 1 7", "remove 0 5", "clear"]
        );
    }

    #[test]
    fn test_removed_rows_are_detached() {
        let source = ListSource::from_data(["v"], [1, 2]).unwrap();
        let events = Arc::new(Events::default());
        source.add_listener(&events);

        let row = source.remove_at(0).unwrap();
        assert!(!row.is_attached());
        assert!(!source.contains(&row));
        row.set("v", 9);

        let replaced = source.get(0).unwrap();
        source.set(0, 3).unwrap();
        assert!(!replaced.is_attached());

        assert_eq!(*events.0.lock(), vec!["remove 0 1", "insert 0 3"]);
    }

    #[test]
    fn test_index_is_by_identity() {
        let source = ListSource::from_data(["v"], [1]).unwrap();
        let other = ListSource::from_data(["v"], [1]).unwrap();
        let stranger = other.get(0).unwrap();

        assert!(matches!(
            source.index(&stranger),
            Err(SourceError::NotFound { .. })
        ));
        assert!(source.remove(&stranger).is_err());
        assert_eq!(source.find(1, None).unwrap().get("v"), Some(Value::Int(1)));
    }

    #[test]
    fn test_find_after_start() {
        let source = ListSource::from_data(["k", "v"], [("a", 1), ("b", 1), ("c", 2)]).unwrap();
        let first = source.find(RowData::mapping([("v", 1)]), None).unwrap();
        assert_eq!(first.get("k"), Some(Value::from("a")));

        let second = source.find(RowData::mapping([("v", 1)]), Some(&first)).unwrap();
        assert_eq!(second.get("k"), Some(Value::from("b")));

        assert!(matches!(
            source.find(RowData::mapping([("v", 1)]), Some(&second)),
            Err(SourceError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_set_out_of_range() {
        let source = ListSource::new(["v"]).unwrap();
        assert_eq!(
            source.set(0, 1).unwrap_err(),
            SourceError::IndexOutOfRange { index: 0, len: 0 }
        );
    }
}
