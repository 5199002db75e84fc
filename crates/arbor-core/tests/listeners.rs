//! Integration tests for the listener registry.

use std::sync::Arc;

use arbor_core::{Listener, Notification, Source};
use parking_lot::Mutex;

type EventLog = Arc<Mutex<Vec<String>>>;

struct Widget {
    name: &'static str,
    log: EventLog,
}

impl Listener<String> for Widget {
    fn insert(&self, _parent: Option<&String>, index: usize, item: &String) {
        self.log
            .lock()
            .push(format!("{}: insert {index} {item}", self.name));
    }

    fn clear(&self) {
        self.log.lock().push(format!("{}: clear", self.name));
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn dropped_widget_stops_receiving_notifications() {
    init_tracing();
    let source = Source::<String>::new();
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));

    let table = Arc::new(Widget {
        name: "table",
        log: log.clone(),
    });
    let tree = Arc::new(Widget {
        name: "tree",
        log: log.clone(),
    });
    source.add_listener(&table);
    source.add_listener(&tree);

    source.notify(Notification::Insert {
        parent: None,
        index: 0,
        item: &"alpha".to_string(),
    });

    drop(table);
    source.notify(Notification::Clear);

    assert_eq!(
        *log.lock(),
        vec![
            "table: insert 0 alpha",
            "tree: insert 0 alpha",
            "tree: clear",
        ]
    );
    assert_eq!(source.listener_count(), 1);
}

#[test]
fn listeners_snapshot_is_in_registration_order() {
    let source = Source::<String>::new();
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let widgets: Vec<Arc<Widget>> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            Arc::new(Widget {
                name,
                log: log.clone(),
            })
        })
        .collect();

    for widget in &widgets {
        source.add_listener(widget);
    }
    // Re-adding does not duplicate.
    source.add_listener(&widgets[1]);

    let snapshot = source.listeners();
    assert_eq!(snapshot.len(), 3);
    for listener in &snapshot {
        listener.clear();
    }
    assert_eq!(*log.lock(), vec!["a: clear", "b: clear", "c: clear"]);
}

#[test]
fn notification_dispatch_targets_single_listener() {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let widget = Widget {
        name: "solo",
        log: log.clone(),
    };
    let item = "x".to_string();
    Notification::Insert {
        parent: None,
        index: 4,
        item: &item,
    }
    .dispatch(&widget);
    assert_eq!(*log.lock(), vec!["solo: insert 4 x"]);
}

/// Counts every notification, whatever its kind.
#[derive(Default)]
struct Counter(Mutex<usize>);

impl Listener<String> for Counter {
    fn change(&self, _item: &String) {
        *self.0.lock() += 1;
    }

    fn clear(&self) {
        *self.0.lock() += 1;
    }
}

#[test]
fn listeners_of_different_types_share_one_source() {
    let source = Source::<String>::new();
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let widget = Arc::new(Widget {
        name: "list",
        log: log.clone(),
    });
    let counter = Arc::new(Counter::default());

    let widget_id = source.add_listener(&widget);
    let counter_id = source.add_listener(&counter);
    assert_ne!(widget_id, counter_id);
    assert_eq!(source.add_listener(&counter), counter_id);

    source.notify(Notification::Change {
        item: &"row".to_string(),
    });
    source.notify(Notification::Clear);

    assert_eq!(*counter.0.lock(), 2);
    assert_eq!(*log.lock(), vec!["list: clear"]);
    assert!(source.remove_listener(&counter));
    assert_eq!(source.listener_count(), 1);
}
