use std::fmt;
use std::sync::{Arc, Weak};

/// Something that can be named as the originator of a debug shape.
///
/// Only used for attribution in log output.
pub trait DebugOwner: Send + Sync {
    fn debug_name(&self) -> String;
}

impl DebugOwner for String {
    fn debug_name(&self) -> String {
        self.clone()
    }
}

impl DebugOwner for &'static str {
    fn debug_name(&self) -> String {
        (*self).to_owned()
    }
}

/// Non-owning reference to a [`DebugOwner`].
///
/// The registry never keeps the owner alive. If the owner has been dropped by
/// the time a shape is logged, [`name`](Self::name) returns `None` and the
/// entry is recorded without attribution.
#[derive(Clone)]
pub struct OwnerHandle {
    owner: Weak<dyn DebugOwner>,
}

impl OwnerHandle {
    pub fn new<T: DebugOwner + 'static>(owner: &Arc<T>) -> Self {
        let owner: Arc<dyn DebugOwner> = owner.clone();
        Self {
            owner: Arc::downgrade(&owner),
        }
    }

    /// Current name of the owner, or `None` if it no longer exists.
    pub fn name(&self) -> Option<String> {
        self.owner.upgrade().map(|owner| owner.debug_name())
    }

    pub fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

impl fmt::Debug for OwnerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "OwnerHandle({name})"),
            None => write!(f, "OwnerHandle(<dropped>)"),
        }
    }
}
