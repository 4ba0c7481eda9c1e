use std::cell::RefCell;
use std::rc::Rc;

use sash_core::{Cursor, DocumentHost, ListenerId, SashError};

/// Document shared between a host and its splitters.
///
/// Hosts must not hold a borrow of the document while dropping or feeding
/// events to a splitter: the drag capture needs a mutable borrow to remove
/// its listeners and restore the cursor, and if it cannot get one the
/// listeners stay installed and the document keeps reporting busy.
pub type SharedDocument = Rc<RefCell<dyn DocumentHost>>;

// ──────────────────────────────────────────────
// DocumentCapture
// ──────────────────────────────────────────────

/// Exclusive hold on the document for the length of one drag. Installs the
/// move/end listeners and the resize cursor on acquire; dropping it removes
/// the listeners and puts the previous cursor back, whichever way the drag
/// ends.
pub struct DocumentCapture {
    document: SharedDocument,
    listeners: ListenerId,
    previous_cursor: Cursor,
}

impl DocumentCapture {
    pub fn acquire(document: &SharedDocument, cursor: Cursor) -> Result<Self, SashError> {
        let mut doc = document.borrow_mut();
        if doc.drag_listeners_installed() {
            return Err(SashError::DocumentBusy);
        }
        let previous_cursor = doc.cursor();
        let listeners = doc.add_drag_listeners();
        doc.set_cursor(cursor);
        drop(doc);

        Ok(Self {
            document: Rc::clone(document),
            listeners,
            previous_cursor,
        })
    }
}

impl Drop for DocumentCapture {
    fn drop(&mut self) {
        if let Ok(mut doc) = self.document.try_borrow_mut() {
            doc.remove_drag_listeners(self.listeners);
            doc.set_cursor(self.previous_cursor);
        } else {
            log::error!(
                "document borrowed while releasing drag capture, listeners {} left installed",
                self.listeners
            );
        }
    }
}

// ──────────────────────────────────────────────
// Document
// ──────────────────────────────────────────────

/// In-memory document host: tracks the cursor and which drag listener sets
/// are installed.
#[derive(Debug, Default)]
pub struct Document {
    cursor: Cursor,
    listeners: Vec<ListenerId>,
    next_id: ListenerId,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<RefCell<Document>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl DocumentHost for Document {
    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn add_drag_listeners(&mut self) -> ListenerId {
        self.next_id += 1;
        self.listeners.push(self.next_id);
        self.next_id
    }

    fn remove_drag_listeners(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }

    fn drag_listeners_installed(&self) -> bool {
        !self.listeners.is_empty()
    }
}
