//! Single-mount bookkeeping for the page: at most one live hero, and a
//! deferred mount overtaken by a newer request or an unmount never lands.
//!
//! The mounted value tears itself down on drop, so releasing a mount is just
//! taking it out of its shared slot.

use std::cell::RefCell;
use std::rc::Rc;

/// Slot shared between the registry and any handle given out for a mount.
pub type SharedMount<T> = Rc<RefCell<Option<T>>>;

/// Proof that a mount request is still the latest one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountTicket(u64);

pub struct MountRegistry<T> {
    generation: u64,
    current: Option<SharedMount<T>>,
}

impl<T> Default for MountRegistry<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            current: None,
        }
    }
}

impl<T> MountRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a mount requested now.
    pub fn ticket(&self) -> MountTicket {
        MountTicket(self.generation)
    }

    pub fn is_current(&self, ticket: MountTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Invalidate outstanding tickets and hand back the live mount, if any.
    /// The caller drops it once the registry is no longer borrowed.
    pub fn release(&mut self) -> Option<T> {
        self.generation += 1;
        self.current.take().and_then(|slot| slot.borrow_mut().take())
    }

    /// Store `value` as the live mount. A stale ticket gives the value back
    /// for disposal instead.
    pub fn install(&mut self, ticket: MountTicket, value: T) -> Result<SharedMount<T>, T> {
        if !self.is_current(ticket) {
            return Err(value);
        }
        let slot = Rc::new(RefCell::new(Some(value)));
        self.current = Some(slot.clone());
        Ok(slot)
    }

    pub fn is_mounted(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|slot| slot.borrow().is_some())
    }
}
