//! A single observable value.

use std::fmt;

use arbor_core::{Listener, ListenerId, Notification, Source};
use parking_lot::RwLock;

use super::value::Value;

/// Accessor used when none is given.
pub const DEFAULT_ACCESSOR: &str = "value";

/// An observable holder for one [`Value`].
///
/// Every [`set`](Self::set) notifies `change` with the new value.
///
/// ```
/// use arbor::sources::ValueSource;
///
/// let source = ValueSource::new(42);
/// assert_eq!(source.accessor(), "value");
/// source.set("hello");
/// assert_eq!(source.to_string(), "hello");
/// ```
pub struct ValueSource {
    accessor: String,
    value: RwLock<Value>,
    listeners: Source<Value>,
}

impl ValueSource {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_accessor(value, DEFAULT_ACCESSOR)
    }

    pub fn with_accessor(value: impl Into<Value>, accessor: impl Into<String>) -> Self {
        Self {
            accessor: accessor.into(),
            value: RwLock::new(value.into()),
            listeners: Source::new(),
        }
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    pub fn value(&self) -> Value {
        self.value.read().clone()
    }

    /// Replace the value and notify listeners.
    pub fn set(&self, value: impl Into<Value>) {
        let value = value.into();
        *self.value.write() = value.clone();
        self.listeners.notify(Notification::Change { item: &value });
    }

    pub fn add_listener<L>(&self, listener: &std::sync::Arc<L>) -> ListenerId
    where
        L: Listener<Value> + 'static,
    {
        self.listeners.add_listener(listener)
    }

    pub fn remove_listener<L>(&self, listener: &std::sync::Arc<L>) -> bool
    where
        L: Listener<Value> + 'static,
    {
        self.listeners.remove_listener(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.listener_count()
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        Self::new(Value::None)
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.value.read(), f)
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSource")
            .field("accessor", &self.accessor)
            .field("value", &*self.value.read())
            .finish()
    }
}

static_assertions::assert_impl_all!(ValueSource: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Changes(Mutex<Vec<Value>>);

    impl Listener<Value> for Changes {
        fn change(&self, item: &Value) {
            self.0.lock().push(item.clone());
        }
    }

    #[test]
    fn test_set_notifies_new_value() {
        let source = ValueSource::with_accessor(1, "count");
        let changes = Arc::new(Changes::default());
        source.add_listener(&changes);

        source.set(2);
        source.set(Value::None);

        assert_eq!(source.accessor(), "count");
        assert_eq!(*changes.0.lock(), vec![Value::Int(2), Value::None]);
        assert_eq!(source.to_string(), "");
    }

    #[test]
    fn test_default_is_empty() {
        let source = ValueSource::default();
        assert!(source.value().is_none());
        assert_eq!(source.accessor(), DEFAULT_ACCESSOR);
    }
}
