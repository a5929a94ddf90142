//! Interceptor chains
//!
//! Interceptors are plain closures held behind `Rc`; the client lives on a
//! single UI thread, so no synchronization is involved. Each registration
//! returns an [`InterceptorId`] that ejects it again.

use super::error::ClientError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Hook run on every outgoing request, after default headers are applied
pub type RequestInterceptor = Rc<dyn Fn(&mut reqwest::Request)>;

/// Hook run on every request that failed at the transport or status level
pub type ResponseInterceptor = Rc<dyn Fn(&ClientError)>;

/// Handle returned when registering an interceptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterceptorId(u64);

/// Ordered list of interceptors with ejectable registrations
pub(crate) struct InterceptorChain<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(InterceptorId, T)>>,
}

impl<T: Clone> InterceptorChain<T> {
    pub(crate) fn register(&self, interceptor: T) -> InterceptorId {
        let id = InterceptorId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, interceptor));
        id
    }

    /// Remove a registration; returns `false` if it was already gone
    pub(crate) fn eject(&self, id: InterceptorId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Copy of the chain in registration order.
    ///
    /// Callers iterate the copy so an interceptor may register or eject
    /// interceptors while the chain runs.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, interceptor)| interceptor.clone())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl<T> Default for InterceptorChain<T> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}
