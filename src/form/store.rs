//! The state-update primitive a form is driven through

use crate::state::FormState;
use parking_lot::RwLock;
use std::sync::Arc;

/// Transition from the current snapshot to the next
pub type Transition<'a> = dyn Fn(&FormState) -> FormState + 'a;

/// Host state primitive holding the current snapshot of one form
///
/// Handlers hand the store a transition from the current snapshot to the
/// next. Implementations must run read, transition and publish as one step:
/// a transition always observes the result of the previous one, and readers
/// see either the previous snapshot or the next, never a mix.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    /// Latest committed snapshot
    fn snapshot(&self) -> FormState;

    /// Apply `transition` to the current snapshot and commit the result
    ///
    /// Returns the committed snapshot.
    fn update<'a>(&self, transition: &'a Transition<'a>) -> FormState;
}

/// Default in-process store
#[derive(Debug)]
pub struct FormStore {
    current: RwLock<Arc<FormState>>,
}

impl FormStore {
    pub fn new(initial: FormState) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Shared handle to the current snapshot without cloning the map
    pub fn current(&self) -> Arc<FormState> {
        Arc::clone(&self.current.read())
    }
}

impl StateStore for FormStore {
    fn snapshot(&self) -> FormState {
        FormState::clone(&self.current.read())
    }

    fn update(&self, transition: &dyn Fn(&FormState) -> FormState) -> FormState {
        let mut current = self.current.write();
        let next = transition(&current);
        *current = Arc::new(next.clone());
        next
    }
}
