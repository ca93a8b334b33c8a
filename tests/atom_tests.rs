//! Tests for atoms.
//!
//! - Root atoms: get, set, modify, distinct notifications
//! - Lensed atoms, views and combined atoms: shared behavior of derived atoms
//! - Caching: recompute while unsubscribed, cache while subscribed
//! - Propagation: one recompute per write for combined atoms
//! - Logging and developer warnings

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use atomlens::atom::{Atom, ReadOnlyAtom, Subscription, combine_all, combine2, combine3};
use atomlens::equality::StructEq;
use atomlens::lens;
use atomlens::optics::{Lens, Optic, json, vec, with_default};
use rstest::rstest;
use serde_json::json;
use tracing_test::traced_test;

// =============================================================================
// Helpers
// =============================================================================

/// Records every value an observer receives.
fn record<T: Clone + 'static>(atom: &ReadOnlyAtom<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let subscription = atom.subscribe(move |value: &T| log.borrow_mut().push(value.clone()));
    (seen, subscription)
}

fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    (Rc::clone(&calls), calls)
}

#[derive(Clone, PartialEq, Debug, StructEq)]
struct Inner {
    c: i32,
}

#[derive(Clone, PartialEq, Debug, StructEq)]
struct Middle {
    b: Inner,
}

#[derive(Clone, PartialEq, Debug, StructEq)]
struct Outer {
    a: Middle,
}

fn nested(value: i32) -> Outer {
    Outer {
        a: Middle {
            b: Inner { c: value },
        },
    }
}

// =============================================================================
// Writable atoms of every kind
// =============================================================================

fn plain(value: i32) -> Atom<i32> {
    Atom::create(value)
}

fn lensed_field(value: i32) -> Atom<i32> {
    Atom::create(nested(value))
        .lens(lens!(Outer, a))
        .lens(lens!(Middle, b))
        .lens(lens!(Inner, c))
}

fn lensed_composed(value: i32) -> Atom<i32> {
    let path = lens!(Outer, a).compose(lens!(Middle, b)).compose(lens!(Inner, c));
    Atom::create(nested(value)).lens(path)
}

fn lensed_json(value: i32) -> Atom<i32> {
    let source = Atom::create(json!({"a": {"b": {"c": value}}}));
    let as_number = Lens::new(
        |value: &Option<serde_json::Value>| {
            value
                .as_ref()
                .and_then(serde_json::Value::as_i64)
                .and_then(|number| i32::try_from(number).ok())
                .unwrap_or_default()
        },
        |_: Option<serde_json::Value>, value: i32| Some(json!(value)),
    );
    source
        .lens_path(["a", "b", "c"])
        .expect("non-empty path")
        .lens(as_number)
}

fn lensed_index(value: i32) -> Atom<i32> {
    let first = vec::index(0).compose_lens(Lens::new(
        |value: &Option<i32>| value.unwrap_or_default(),
        |_: Option<i32>, value: i32| Some(value),
    ));
    Atom::create(vec![value, 2, 3]).lens(first)
}

#[rstest]
#[case::plain(plain)]
#[case::lensed_field(lensed_field)]
#[case::lensed_composed(lensed_composed)]
#[case::lensed_json(lensed_json)]
#[case::lensed_index(lensed_index)]
fn test_atom_basic(#[case] create: fn(i32) -> Atom<i32>) {
    let atom = create(1);
    let expected = Rc::new(Cell::new(1));

    let reader = atom.clone();
    let wanted = Rc::clone(&expected);
    let _subscription = atom.subscribe(move |value| {
        assert_eq!(*value, wanted.get());
        assert_eq!(reader.get(), wanted.get());
    });

    assert_eq!(atom.get(), 1);

    expected.set(2);
    atom.modify(|value| value + 1);

    expected.set(500);
    atom.set(500);
    assert_eq!(atom.get(), 500);
}

#[rstest]
#[case::plain(plain)]
#[case::lensed_field(lensed_field)]
#[case::lensed_composed(lensed_composed)]
#[case::lensed_json(lensed_json)]
#[case::lensed_index(lensed_index)]
fn test_atom_distinct_values(#[case] create: fn(i32) -> Atom<i32>) {
    let atom = create(1);
    let (seen, _subscription) = record(&atom);

    for value in [2, 3, 3, 3, 1] {
        atom.set(value);
    }

    assert_eq!(*seen.borrow(), [1, 2, 3, 1]);
}

// =============================================================================
// Derived atoms of every kind
// =============================================================================

type Derive = fn(&Atom<i32>, Rc<RefCell<Vec<i32>>>) -> ReadOnlyAtom<i32>;

fn derive_view(atom: &Atom<i32>, calls: Rc<RefCell<Vec<i32>>>) -> ReadOnlyAtom<i32> {
    atom.view(move |value| {
        calls.borrow_mut().push(*value);
        value + 1
    })
}

fn derive_lens(atom: &Atom<i32>, calls: Rc<RefCell<Vec<i32>>>) -> ReadOnlyAtom<i32> {
    let plus_one = Lens::new(
        move |value: &i32| {
            calls.borrow_mut().push(*value);
            value + 1
        },
        |_: i32, value: i32| value,
    );
    atom.lens(plus_one).read_only()
}

fn derive_combine(atom: &Atom<i32>, calls: Rc<RefCell<Vec<i32>>>) -> ReadOnlyAtom<i32> {
    let other = Atom::create(0);
    combine2(&atom.read_only(), &other.read_only(), move |value, _| {
        calls.borrow_mut().push(*value);
        value + 1
    })
}

#[rstest]
#[case::view(derive_view)]
#[case::lens(derive_lens)]
#[case::combine(derive_combine)]
fn test_derived_unsubscribe_inside_modify(#[case] derive: Derive) {
    let atom = Atom::create(5);
    let calls = Rc::new(RefCell::new(Vec::new()));
    let derived = derive(&atom, Rc::clone(&calls));

    assert!(calls.borrow().is_empty());

    let (seen, subscription) = record(&derived);
    assert_eq!(*calls.borrow(), [5]);
    assert_eq!(*seen.borrow(), [6]);

    atom.modify(|value| value + 1);
    assert_eq!(*calls.borrow(), [5, 6]);
    assert_eq!(*seen.borrow(), [6, 7]);

    let mut subscription = Some(subscription);
    atom.modify(|_| {
        drop(subscription.take());
        0
    });
    assert_eq!(*calls.borrow(), [5, 6]);
    assert_eq!(*seen.borrow(), [6, 7]);
}

#[rstest]
#[case::view(derive_view)]
#[case::lens(derive_lens)]
#[case::combine(derive_combine)]
fn test_derived_chain_keeps_shared_upstream(#[case] derive: Derive) {
    let atom = Atom::create(5);
    let first_calls = Rc::new(RefCell::new(Vec::new()));
    let second_calls = Rc::new(RefCell::new(Vec::new()));

    let first = derive(&atom, Rc::clone(&first_calls));
    let log = Rc::clone(&second_calls);
    let second = first.view(move |value| {
        log.borrow_mut().push(*value);
        value + 5
    });

    let (first_seen, first_subscription) = record(&first);
    let (second_seen, _second_subscription) = record(&second);

    assert_eq!(*first_calls.borrow(), [5]);
    assert_eq!(*second_calls.borrow(), [6]);
    assert_eq!(*second_seen.borrow(), [11]);

    atom.modify(|value| value + 1);
    assert_eq!(*first_calls.borrow(), [5, 6]);
    assert_eq!(*second_calls.borrow(), [6, 7]);
    assert_eq!(*second_seen.borrow(), [11, 12]);

    let mut first_subscription = Some(first_subscription);
    atom.modify(|_| {
        drop(first_subscription.take());
        0
    });

    assert_eq!(*first_calls.borrow(), [5, 6, 0]);
    assert_eq!(*second_calls.borrow(), [6, 7, 1]);
    assert_eq!(*first_seen.borrow(), [6, 7]);
    assert_eq!(*second_seen.borrow(), [11, 12, 6]);
}

#[rstest]
#[case::view(derive_view)]
#[case::lens(derive_lens)]
#[case::combine(derive_combine)]
fn test_derived_resubscribe(#[case] derive: Derive) {
    let atom = Atom::create(5);
    let derived = derive(&atom, Rc::new(RefCell::new(Vec::new())));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let mut first = derived.subscribe(move |value| log.borrow_mut().push(*value));
    assert_eq!(*seen.borrow(), [6]);

    atom.modify(|value| value + 1);
    assert_eq!(*seen.borrow(), [6, 7]);

    first.unsubscribe();
    atom.modify(|value| value + 1);
    assert_eq!(*seen.borrow(), [6, 7]);

    let log = Rc::clone(&seen);
    let mut second = derived.subscribe(move |value| log.borrow_mut().push(*value));
    assert_eq!(*seen.borrow(), [6, 7, 8]);

    atom.modify(|value| value + 1);
    assert_eq!(*seen.borrow(), [6, 7, 8, 9]);

    second.unsubscribe();
    atom.modify(|value| value + 1);
    assert_eq!(*seen.borrow(), [6, 7, 8, 9]);
}

#[rstest]
#[case::view(derive_view)]
#[case::lens(derive_lens)]
#[case::combine(derive_combine)]
fn test_derived_multiple_subscriptions(#[case] derive: Derive) {
    let atom = Atom::create(5);
    let derived = derive(&atom, Rc::new(RefCell::new(Vec::new())));

    let (first_seen, mut first) = record(&derived);
    let (second_seen, mut second) = record(&derived);
    assert_eq!(*first_seen.borrow(), *second_seen.borrow());

    atom.set(6);
    assert_eq!(*first_seen.borrow(), *second_seen.borrow());

    first.unsubscribe();
    atom.set(7);
    assert_eq!(*first_seen.borrow(), [6, 7]);
    assert_eq!(*second_seen.borrow(), [6, 7, 8]);

    second.unsubscribe();
    atom.set(8);
    assert_eq!(*first_seen.borrow(), [6, 7]);
    assert_eq!(*second_seen.borrow(), [6, 7, 8]);
}

// =============================================================================
// Lensed atoms
// =============================================================================

#[test]
fn test_lensed_chain_with_value_transform() {
    let source = Atom::create(nested(5));
    let shifted = source
        .lens(lens!(Outer, a))
        .lens(lens!(Middle, b))
        .lens(lens!(Inner, c))
        .lens(Lens::new(|value: &i32| value + 1, |_: i32, value: i32| value - 1));

    assert_eq!(shifted.get(), 6);
    shifted.set(6);
    assert_eq!(shifted.get(), 6);
    assert_eq!(source.get(), nested(5));
}

#[test]
fn test_lens_then_view() {
    let source = Atom::create(json!({"a": {"b": 5}}));
    let plus_one = source
        .lens_key("a")
        .view(|a| a.as_ref().and_then(|a| a.get("b")).and_then(serde_json::Value::as_i64))
        .view(|b| b.map(|b| b + 1));
    let b = source.lens_path(["a", "b"]).expect("non-empty path");

    assert_eq!(b.get(), Some(json!(5)));
    assert_eq!(plus_one.get(), Some(6));

    b.set(Some(json!(6)));

    assert_eq!(b.get(), Some(json!(6)));
    assert_eq!(plus_one.get(), Some(7));
    assert_eq!(source.get(), json!({"a": {"b": 6}}));
}

#[test]
fn test_index_lens_follows_source() {
    let source = Atom::create(vec![1, 2, 3]);
    let first = source.lens_prism(vec::index(0));

    assert_eq!(first.get(), Some(1));

    first.set(Some(10));
    assert_eq!(first.get(), Some(10));
    assert_eq!(source.get(), vec![10, 2, 3]);

    source.set(vec![100, 2, 3]);
    assert_eq!(first.get(), Some(100));

    source.set(vec![2, 3]);
    assert_eq!(first.get(), Some(2));

    source.set(Vec::new());
    assert_eq!(first.get(), None);
}

#[test]
fn test_observing_index_lens() {
    let source = Atom::create(vec![1, 2, 3]);
    let first = source.lens_prism(vec::index(0));
    let (seen, _subscription) = record(&first);

    first.set(Some(10));
    source.set(vec![100, 2, 3]);
    source.set(vec![2, 3]);
    source.set(vec![1000, 2, 3]);

    assert_eq!(*seen.borrow(), [Some(1), Some(10), Some(100), Some(2), Some(1000)]);
}

#[test]
fn test_defaulted_index_lens_writes_default_to_source() {
    let source = Atom::create(vec![5, 6]);
    let first = source.lens(vec::index(0).compose_lens(with_default(0)));

    first.set(0);
    assert_eq!(source.get(), vec![0, 6]);
    assert_eq!(first.get(), 0);

    first.set(7);
    assert_eq!(source.get(), vec![7, 6]);
}

#[test]
fn test_lens_key_set_and_remove() {
    let state = Atom::create(json!({"a": 1}));
    let b = state.lens_key("b");

    assert_eq!(b.get(), None);

    b.set(Some(json!(2)));
    assert_eq!(state.get(), json!({"a": 1, "b": 2}));

    b.set(None);
    assert_eq!(state.get(), json!({"a": 1}));
}

#[test]
fn test_write_through_absent_focus_is_noop() {
    let state = Atom::create(json!({"a": 1}));
    let deep = state.lens_path(["missing", "child"]).expect("non-empty path");
    let (seen, _subscription) = record(&state);

    deep.set(Some(json!(5)));

    assert_eq!(state.get(), json!({"a": 1}));
    assert_eq!(seen.borrow().len(), 1);
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_view_simple() {
    let source = Atom::create(5);
    let view = source.view(|value| value + 1);

    assert_eq!(view.get(), 6);
    source.modify(|value| value + 1);
    assert_eq!(source.get(), 6);
    assert_eq!(view.get(), 7);
}

#[test]
fn test_view_key_and_path() {
    let source = Atom::create(json!({"a": {"b": {"c": 5}}}));
    let a = source.view_key("a");
    let c = source.view_path(["a", "b", "c"]).expect("non-empty path");

    assert_eq!(c.get(), Some(json!(5)));
    source.modify(|_| json!({"a": {"b": {"c": 6}}}));
    assert_eq!(c.get(), Some(json!(6)));
    assert_eq!(a.get(), Some(json!({"b": {"c": 6}})));
}

#[test]
fn test_view_notifies_distinct_values_only() {
    let source = Atom::create(1);
    let view = source.view(|value| value + 1);

    let (source_seen, _source_subscription) = record(&source);
    let (view_seen, _view_subscription) = record(&view);

    for value in [2, 2, 2, 3, 3, 3, 1, 1, 1] {
        source.set(value);
    }

    assert_eq!(*view_seen.borrow(), [2, 3, 4, 2]);
    assert_eq!(*source_seen.borrow(), [1, 2, 3, 1]);
}

#[test]
fn test_view_suppresses_equal_results() {
    let source = Atom::create(5);
    let positive = source.view(|value| *value > 0);
    let (seen, _subscription) = record(&positive);

    source.set(6);
    source.set(7);
    source.set(-5);

    assert_eq!(*seen.borrow(), [true, false]);
}

#[test]
fn test_view_lens_and_view_prism() {
    let source = Atom::create(nested(3));
    let c = source.view_lens(lens!(Outer, a).compose(lens!(Middle, b)).compose(lens!(Inner, c)));
    let items = Atom::create(vec![1, 2]);
    let third = items.view_prism(vec::index(2));

    assert_eq!(c.get(), 3);
    assert_eq!(third.get(), None);

    items.set(vec![1, 2, 3]);
    assert_eq!(third.get(), Some(3));
}

#[test]
fn test_read_only_handles_share_the_atom() {
    let atom = Atom::create(1);
    let first = atom.read_only();
    let second: ReadOnlyAtom<i32> = atom.clone().into();

    assert!(first.ptr_eq(&second));
    assert!(first.ptr_eq(&first.read_only()));
    assert!(!first.ptr_eq(&Atom::create(1).read_only()));
}

// =============================================================================
// Caching
// =============================================================================

#[test]
fn test_unsubscribed_views_recompute_on_get() {
    let source = Atom::create(-1);

    let (called1, count1) = counter();
    let a1 = source.view(move |value| {
        count1.set(count1.get() + 1);
        value + 1
    });
    let (called2, count2) = counter();
    let a2 = a1.view(move |value| {
        count2.set(count2.get() + 1);
        -value
    });
    let (called3, count3) = counter();
    let a3 = a2.view(move |value| {
        count3.set(count3.get() + 1);
        format!("Hi {value}")
    });
    let (called4, count4) = counter();
    let a4 = a2.view(move |value| {
        count4.set(count4.get() + 1);
        format!("Ho {value}")
    });

    let calls = || [called1.get(), called2.get(), called3.get(), called4.get()];

    source.set(0);
    assert_eq!(calls(), [0, 0, 0, 0]);

    assert_eq!(a3.get(), "Hi -1");
    assert_eq!(calls(), [1, 1, 1, 0]);

    assert_eq!(a4.get(), "Ho -1");
    assert_eq!(calls(), [2, 2, 1, 1]);

    source.set(1);
    assert_eq!(calls(), [2, 2, 1, 1]);
}

#[test]
fn test_subscribed_views_compute_once_per_change() {
    let source = Atom::create(0);

    let (called1, count1) = counter();
    let a1 = source.view(move |value| {
        count1.set(count1.get() + 1);
        value + 1
    });
    let (called2, count2) = counter();
    let a2 = a1.view(move |value| {
        count2.set(count2.get() + 1);
        -value
    });
    let (called3, count3) = counter();
    let a3 = a2.view(move |value| {
        count3.set(count3.get() + 1);
        value * 2
    });

    let leaves: Vec<ReadOnlyAtom<String>> = ["Hi", "Ho", "HU"]
        .into_iter()
        .map(|prefix| a3.view(move |value| format!("{prefix} {value}")))
        .collect();

    let calls = || [called1.get(), called2.get(), called3.get()];
    assert_eq!(calls(), [0, 0, 0]);

    let observations = Rc::new(RefCell::new(Vec::new()));
    let _subscriptions: Vec<Subscription> = leaves
        .iter()
        .map(|leaf| {
            let log = Rc::clone(&observations);
            leaf.subscribe(move |value: &String| log.borrow_mut().push(value.clone()))
        })
        .collect();
    assert_eq!(calls(), [1, 1, 1]);

    source.set(1);
    assert_eq!(calls(), [2, 2, 2]);

    source.set(2);
    assert_eq!(calls(), [3, 3, 3]);

    // reads of subscribed atoms come from the cache
    assert_eq!(a3.get(), -6);
    assert_eq!(calls(), [3, 3, 3]);

    assert_eq!(
        *observations.borrow(),
        [
            "Hi -2", "Ho -2", "HU -2", "Hi -4", "Ho -4", "HU -4", "Hi -6", "Ho -6", "HU -6"
        ]
    );
}

#[test]
fn test_unsubscribed_combine_reads_every_source() {
    let source = Atom::create(0);

    let (called1, count1) = counter();
    let a1 = source.view(move |value| {
        count1.set(count1.get() + 1);
        value + 1
    });
    let a2 = a1.view(|value| -value);
    let a3 = a2.view(|value| value * 2);

    let (called4, count4) = counter();
    let a4 = a3.view(move |value| {
        count4.set(count4.get() + 1);
        format!("Hi {value}")
    });
    let a5 = a3.view(|value| format!("Ho {value}"));
    let a6 = a3.view(|value| format!("HU {value}"));

    let combined = combine3(&a4, &a5, &a6, |x, y, z| [x.clone(), y.clone(), z.clone()]);
    assert_eq!([called1.get(), called4.get()], [0, 0]);

    assert_eq!(combined.get(), ["Hi -2", "Ho -2", "HU -2"]);
    assert_eq!([called1.get(), called4.get()], [3, 1]);

    source.set(1);
    assert_eq!([called1.get(), called4.get()], [3, 1]);

    assert_eq!(a4.get(), "Hi -4");
    assert_eq!([called1.get(), called4.get()], [4, 2]);
}

#[test]
fn test_derived_atom_holds_one_upstream_subscription() {
    let source = Atom::create(1);
    let view = source.view(|value| value * 2);

    assert_eq!(source.observer_count(), 0);

    let first = view.subscribe(|_| {});
    let second = view.subscribe(|_| {});
    assert_eq!(view.observer_count(), 2);
    assert_eq!(source.observer_count(), 1);

    drop(first);
    assert_eq!(source.observer_count(), 1);

    drop(second);
    assert_eq!(view.observer_count(), 0);
    assert_eq!(source.observer_count(), 0);
}

#[test]
fn test_unsubscribed_view_is_not_retained_by_source() {
    let source = Atom::create(1);
    let view = source.view(|value| value + 1);
    let (seen, mut subscription) = record(&view);

    subscription.unsubscribe();
    drop(view);

    source.set(2);
    assert_eq!(*seen.borrow(), [2]);
    assert_eq!(source.observer_count(), 0);
}

// =============================================================================
// Combine
// =============================================================================

#[allow(clippy::ptr_arg)]
fn shout(number: &i32, enabled: &bool, text: &String) -> String {
    if *enabled && *number < 0 {
        text.to_uppercase()
    } else {
        "NO".to_string()
    }
}

#[test]
fn test_combine_constant() {
    let combined = combine3(
        &Atom::create(1).read_only(),
        &Atom::create(false).read_only(),
        &Atom::create("test".to_string()).read_only(),
        shout,
    );

    assert_eq!(combined.get(), "NO");
}

#[rstest]
#[case::unsubscribed(false)]
#[case::subscribed(true)]
fn test_combine_dynamic(#[case] subscribed: bool) {
    let number = Atom::create(1);
    let enabled = Atom::create(false);
    let text = Atom::create("test".to_string());

    let combined = combine3(&number, &enabled, &text, shout);
    let recorded = subscribed.then(|| record(&combined));

    assert_eq!(combined.get(), "NO");

    number.set(-1);
    assert_eq!(combined.get(), "NO");

    enabled.set(true);
    assert_eq!(combined.get(), "TEST");

    text.set("heLLo".to_string());
    assert_eq!(combined.get(), "HELLO");

    number.set(100);
    assert_eq!(combined.get(), "NO");

    if let Some((seen, _subscription)) = recorded {
        assert_eq!(*seen.borrow(), ["NO", "TEST", "HELLO", "NO"]);
    }
}

#[test]
fn test_combine_macro_and_combine_all() {
    let first = Atom::create(1);
    let second = Atom::create(2);
    let third = Atom::create(3);

    let sum = atomlens::combine!(first, second, third, |a: &i32, b: &i32, c: &i32| a + b + c);
    let product = combine_all(
        [first.read_only(), second.read_only(), third.read_only()],
        |values| values.iter().product::<i32>(),
    );

    assert_eq!(sum.get(), 6);
    assert_eq!(product.get(), 6);

    third.set(4);
    assert_eq!(sum.get(), 7);
    assert_eq!(product.get(), 8);
}

#[test]
fn test_diamond_recomputes_once_per_write() {
    let root = Atom::create((1, 2));
    let left = root.view(|pair| pair.0);
    let right = root.view(|pair| pair.1);

    let (runs, count) = counter();
    let sum = combine2(&left, &right, move |left, right| {
        count.set(count.get() + 1);
        left + right
    });
    let (seen, _subscription) = record(&sum);
    assert_eq!(runs.get(), 1);

    root.set((10, 20));
    assert_eq!(runs.get(), 2);
    assert_eq!(*seen.borrow(), [3, 30]);

    // the combined atom never observes the half-updated state (10, 2)
    root.set((20, 10));
    assert_eq!(runs.get(), 3);
    assert_eq!(*seen.borrow(), [3, 30]);
}

#[test]
fn test_read_during_pass_sees_committed_value() {
    let root = Atom::create((1, 2));
    let left = root.view(|pair| pair.0);
    let right = root.view(|pair| pair.1);
    let total = combine2(&left, &right, |left, right| left + right).view(|sum| *sum);
    let (totals, _total_subscription) = record(&total);

    let reads = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&reads);
    let reader = total.clone();
    let _left_subscription = left.subscribe(move |_| log.borrow_mut().push(reader.get()));

    root.set((10, 20));

    assert_eq!(*reads.borrow(), [3, 30]);
    assert_eq!(*totals.borrow(), [3, 30]);
    assert_eq!(total.get(), 30);
}

#[test]
fn test_nested_diamonds_settle_in_dependency_order() {
    let root = Atom::create(1);
    let double = root.view(|value| value * 2);
    let triple = root.view(|value| value * 3);
    let sum = combine2(&double, &triple, |a, b| a + b);
    let report = combine2(&sum, &root.read_only(), |sum, root| format!("{root}: {sum}"));

    let (seen, _subscription) = record(&report);
    root.set(2);
    root.set(3);

    assert_eq!(*seen.borrow(), ["1: 5", "2: 10", "3: 15"]);
}

// =============================================================================
// Root atoms with custom equality
// =============================================================================

#[test]
fn test_create_with_equality() {
    let atom = Atom::create_with_equality(10_i32, |a: &i32, b: &i32| a / 10 == b / 10);
    let (seen, _subscription) = record(&atom);

    atom.set(15);
    atom.set(21);

    assert_eq!(*seen.borrow(), [10, 21]);
    assert_eq!(atom.get(), 21);
}

// =============================================================================
// Logging and warnings
// =============================================================================

#[test]
fn test_log_with_reports_previous_and_next() {
    let atom = Atom::create("bar");
    let calls = Rc::new(RefCell::new(Vec::new()));

    let log = Rc::clone(&calls);
    let _logging = atom.log_with(move |previous, next| log.borrow_mut().push((*previous, *next)));
    atom.set("foo");

    assert_eq!(*calls.borrow(), [("bar", "bar"), ("bar", "foo")]);
}

#[traced_test]
#[test]
fn test_log_emits_tracing_events() {
    let atom = Atom::create(1);
    let _logging = atom.log("counter");
    atom.set(2);

    assert!(logs_contain("atom updated"));
    assert!(logs_contain("counter"));
}

#[traced_test]
#[test]
fn test_modify_inside_own_update_warns() {
    let atom = Atom::create(1);
    let inner = atom.clone();

    atom.modify(move |value| {
        inner.set(100);
        value + 1
    });

    assert_eq!(atom.get(), 2);
    assert!(logs_contain("inside its own update function"));
}

// =============================================================================
// Subscriptions
// =============================================================================

#[test]
fn test_subscription_unsubscribe_is_idempotent() {
    let atom = Atom::create(1);
    let (seen, mut subscription) = record(&atom);

    assert!(!subscription.is_closed());
    subscription.unsubscribe();
    assert!(subscription.is_closed());
    subscription.unsubscribe();

    atom.set(2);
    assert_eq!(*seen.borrow(), [1]);
}

#[test]
fn test_subscription_detach_keeps_observer() {
    let atom = Atom::create(1);
    let (seen, subscription) = record(&atom);

    subscription.detach();
    atom.set(2);

    assert_eq!(*seen.borrow(), [1, 2]);
}

#[test]
fn test_optic_is_usable_with_atom_values() {
    let x = Lens::new(|pair: &(i32, i32)| pair.0, |pair: (i32, i32), value| (value, pair.1));
    let pair = Atom::create((1, 2));

    pair.modify(|value| x.set(value, 5));
    assert_eq!(pair.get(), (5, 2));
    assert_eq!(x.get(&pair.get()), 5);
    assert!(json::key("a").get(&json!({})).is_none());
}
