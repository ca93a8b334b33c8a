//! Propagation passes.
//!
//! A root commit runs its notifications inside a pass. Nodes with more than
//! one source do not recompute when notified during a pass; they queue
//! themselves and are flushed, lowest rank first, when the outermost pass
//! finishes. A node therefore recomputes once per pass, after all of its
//! sources have settled.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Weak;

/// A node that postponed its recomputation until the end of the pass.
pub(crate) trait Deferred {
    /// Recomputes and notifies.
    fn flush(&self);

    /// The pass was abandoned (a callback panicked); forget the queued flush.
    fn cancel(&self);
}

#[derive(Default)]
struct Pass {
    depth: usize,
    sequence: u64,
    queue: BTreeMap<(usize, u64), Weak<dyn Deferred>>,
}

thread_local! {
    static PASS: RefCell<Pass> = RefCell::new(Pass::default());
}

struct PassGuard {
    outermost: bool,
}

impl PassGuard {
    fn enter() -> Self {
        PASS.with_borrow_mut(|pass| {
            pass.depth += 1;
            Self {
                outermost: pass.depth == 1,
            }
        })
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        let abandoned = PASS.with_borrow_mut(|pass| {
            pass.depth -= 1;
            if pass.depth == 0 {
                std::mem::take(&mut pass.queue)
            } else {
                BTreeMap::new()
            }
        });
        for node in abandoned.into_values().filter_map(|node| node.upgrade()) {
            node.cancel();
        }
    }
}

/// Runs `body` inside a pass, flushing deferred nodes if this is the
/// outermost one.
pub(crate) fn run<R>(body: impl FnOnce() -> R) -> R {
    let guard = PassGuard::enter();
    let result = body();
    if guard.outermost {
        drain();
    }
    result
}

/// Returns `true` while a pass is running on this thread.
pub(crate) fn in_pass() -> bool {
    PASS.with_borrow(|pass| pass.depth > 0)
}

/// Queues `node` to be flushed at the end of the current pass.
pub(crate) fn defer(rank: usize, node: Weak<dyn Deferred>) {
    PASS.with_borrow_mut(|pass| {
        pass.sequence += 1;
        let key = (rank, pass.sequence);
        pass.queue.insert(key, node);
    });
}

fn drain() {
    let mut flushed = 0_usize;
    while let Some((_, node)) = PASS.with_borrow_mut(|pass| pass.queue.pop_first()) {
        if let Some(node) = node.upgrade() {
            node.flush();
            flushed += 1;
        }
    }
    if flushed > 0 {
        tracing::trace!(target: "atomlens", flushed, "propagation pass drained");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        cancelled: Cell<bool>,
    }

    impl Deferred for Recorder {
        fn flush(&self) {
            self.log.borrow_mut().push(self.name);
        }

        fn cancel(&self) {
            self.cancelled.set(true);
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<Recorder> {
        Rc::new(Recorder {
            name,
            log: Rc::clone(log),
            cancelled: Cell::new(false),
        })
    }

    #[test]
    fn test_flushes_by_rank_then_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let high = recorder("high", &log);
        let low_first = recorder("low-first", &log);
        let low_second = recorder("low-second", &log);

        run(|| {
            assert!(in_pass());
            defer(3, Rc::downgrade(&high) as Weak<dyn Deferred>);
            defer(1, Rc::downgrade(&low_first) as Weak<dyn Deferred>);
            run(|| defer(1, Rc::downgrade(&low_second) as Weak<dyn Deferred>));
            assert!(log.borrow().is_empty());
        });

        assert!(!in_pass());
        assert_eq!(*log.borrow(), ["low-first", "low-second", "high"]);
    }

    #[test]
    fn test_panicking_pass_cancels_queue() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let node = recorder("node", &log);
        let queued = Rc::clone(&node);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run(|| {
                defer(1, Rc::downgrade(&queued) as Weak<dyn Deferred>);
                panic!("observer failed");
            });
        }));

        assert!(outcome.is_err());
        assert!(node.cancelled.get());
        assert!(log.borrow().is_empty());
        assert!(!in_pass());
    }
}
