use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::{ResizeCallback, ResizeObservable, ResizeSubscription};

type Listener = Rc<RefCell<ResizeCallback>>;

#[derive(Default)]
struct HubInner {
    listeners: RefCell<IndexMap<u64, Listener>>,
    next_id: Cell<u64>,
    rejecting: Cell<bool>,
}

/// Container-side fan-out for resize notifications.
///
/// Hosts own one hub per container and call [`ResizeHub::notify`] whenever
/// its layout size changes. Listeners may disconnect (or subscribe) while a
/// notification is being delivered.
#[derive(Clone, Default)]
pub struct ResizeHub {
    inner: Rc<HubInner>,
}

impl ResizeHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hub that refuses every observation, for hosts without resize support.
    #[must_use]
    pub fn rejecting() -> Self {
        let hub = Self::default();
        hub.set_rejecting(true);
        hub
    }

    pub fn set_rejecting(&self, rejecting: bool) {
        self.inner.rejecting.set(rejecting);
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Delivers one notification to every connected listener. Returns the
    /// number of listeners invoked.
    pub fn notify(&self) -> usize {
        let snapshot: Vec<(u64, Listener)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.inner.listeners.borrow().contains_key(&id) {
                continue;
            }
            // A listener that is already running is not re-entered.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)();
                delivered += 1;
            }
        }
        trace!(delivered, "resize notification delivered");
        delivered
    }
}

impl fmt::Debug for ResizeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeHub")
            .field("listeners", &self.listener_count())
            .field("rejecting", &self.inner.rejecting.get())
            .finish()
    }
}

impl ResizeObservable for ResizeHub {
    fn observe(&self, callback: ResizeCallback) -> ChartResult<Box<dyn ResizeSubscription>> {
        if self.inner.rejecting.get() {
            return Err(ChartError::ResizeUnsupported);
        }
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        Ok(Box::new(HubSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
            connected: true,
        }))
    }
}

struct HubSubscription {
    hub: Weak<HubInner>,
    id: u64,
    connected: bool,
}

impl ResizeSubscription for HubSubscription {
    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        if let Some(hub) = self.hub.upgrade() {
            hub.listeners.borrow_mut().shift_remove(&self.id);
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Drop for HubSubscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}
