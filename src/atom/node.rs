//! The node traits behind atom handles.

use std::rc::Rc;

use super::broadcast::Observer;
use super::subscription::Subscription;

/// Something that can be read and observed.
pub(crate) trait Source<T> {
    /// The current value.
    fn get(&self) -> T;

    /// Registers `observer` and immediately replays the current value to it.
    fn subscribe(self: Rc<Self>, observer: Observer<T>) -> Subscription;

    /// Depth in the derivation graph: 0 for roots, one more than the deepest
    /// source otherwise.
    fn rank(&self) -> usize;

    /// Number of observers currently registered.
    fn observer_count(&self) -> usize;

    /// Incremented every time the value changes.
    fn version(&self) -> u64;

    /// `false` while this node's value lags behind its sources during a
    /// propagation pass.
    fn is_settled(&self) -> bool {
        true
    }
}

/// A source that can also be written.
pub(crate) trait Store<T>: Source<T> {
    /// Replaces the value with `update(current)` and notifies observers if
    /// it changed.
    fn modify(&self, update: Box<dyn FnOnce(T) -> T + '_>);
}
