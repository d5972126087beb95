//! Synchronous change notifications.
//!
//! A [`Signal`] calls its slots in connection order on the emitting thread.
//! Dispatch runs over a copy of the slot list taken before the first call, so
//! a slot is free to query the model that emitted, emit again, or change the
//! connections. Slots connected mid-dispatch first run on the next emission.
//!
//! ```
//! use voxroster_core::Signal;
//!
//! let rows_inserted = Signal::<(usize, usize)>::new();
//! let id = rows_inserted.connect(|(first, last)| println!("rows {first}..={last} inserted"));
//!
//! rows_inserted.emit((0, 0));
//! assert!(rows_inserted.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of slots taking `&Args`. Multi-value payloads are tuples.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Returns `false` if `id` was already disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn emit(&self, args: Args) {
        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        if snapshot.is_empty() {
            return;
        }
        tracing::trace!(target: targets::SIGNAL, slots = snapshot.len(), "dispatch");
        for slot in &snapshot {
            slot(&args);
        }
    }
}
