use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

use causal_clocks::testing::{async_clock, sync_clock};
use causal_clocks::{rendezvous, AsyncVectorClock, CausalClock, ClockError, ClockOrder, SyncVectorClock};

const POOL: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

/// Two value vectors over the same set of nodes, plus an owner index for each.
#[derive(Debug, Clone)]
struct SharedKeys {
    keys: Vec<&'static str>,
    left: Vec<u64>,
    right: Vec<u64>,
    left_owner: usize,
    right_owner: usize,
}

impl SharedKeys {
    fn left_entries(&self) -> Vec<(&'static str, u64)> {
        self.keys.iter().copied().zip(self.left.iter().copied()).collect()
    }

    fn right_entries(&self) -> Vec<(&'static str, u64)> {
        self.keys.iter().copied().zip(self.right.iter().copied()).collect()
    }

    fn async_pair(&self) -> (AsyncVectorClock, AsyncVectorClock) {
        (
            async_clock(self.keys[self.left_owner], &self.left_entries()).unwrap(),
            async_clock(self.keys[self.right_owner], &self.right_entries()).unwrap(),
        )
    }

    fn sync_pair(&self) -> (SyncVectorClock, SyncVectorClock) {
        (
            sync_clock(self.keys[self.left_owner], &self.left_entries()).unwrap(),
            sync_clock(self.keys[self.right_owner], &self.right_entries()).unwrap(),
        )
    }
}

fn shared_keys() -> impl Strategy<Value = SharedKeys> {
    subsequence(POOL.to_vec(), 1..=POOL.len()).prop_flat_map(|keys| {
        let n = keys.len();
        (Just(keys), vec(0u64..20, n), vec(0u64..20, n), 0..n, 0..n).prop_map(
            |(keys, left, right, left_owner, right_owner)| SharedKeys { keys, left, right, left_owner, right_owner },
        )
    })
}

/// Owner plus arbitrary entries drawn from the pool.
fn loose_entries() -> impl Strategy<Value = (&'static str, Vec<(&'static str, u64)>)> {
    (select(POOL.to_vec()), vec((select(POOL.to_vec()), 0u64..20), 0..6))
}

fn numeric_name() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i32>().prop_map(|n| n.to_string()),
        (any::<i16>(), 0u16..1000).prop_map(|(a, b)| format!("{a}.{b}")),
        (1u8..100, 0u8..20).prop_map(|(m, e)| format!("{m}e{e}")),
        any::<u16>().prop_map(|n| format!(" {n}")),
    ]
}

proptest! {
    /// A clock compared with its own clone is identical.
    #[test]
    fn prop_reflexive((owner, entries) in loose_entries()) {
        let a = async_clock(owner, &entries).unwrap();
        prop_assert_eq!(a.compare(&a.clone()), ClockOrder::Identical);
        prop_assert_eq!(a.is_identical_to(&a), Ok(true));

        let s = sync_clock(owner, &entries).unwrap();
        prop_assert_eq!(s.compare(&s.clone()), ClockOrder::Identical);
    }

    /// Comparability does not depend on the operand order, for both vector clocks.
    #[test]
    fn prop_comparability_symmetric(left in loose_entries(), right in loose_entries()) {
        let a = async_clock(left.0, &left.1).unwrap();
        let b = async_clock(right.0, &right.1).unwrap();
        prop_assert_eq!(a.can_be_compared_with(&b), b.can_be_compared_with(&a));

        if !a.can_be_compared_with(&b) {
            prop_assert_eq!(a.compare(&b), ClockOrder::NotComparable);
            prop_assert_eq!(a.happen_before(&b), Err(ClockError::Incomparable));
            prop_assert_eq!(b.is_concurrent_with(&a), Err(ClockError::Incomparable));
        }

        let s = sync_clock(left.0, &left.1).unwrap();
        let t = sync_clock(right.0, &right.1).unwrap();
        prop_assert_eq!(s.can_be_compared_with(&t), t.can_be_compared_with(&s));
        prop_assert_eq!(s.can_be_compared_with(&t), a.can_be_compared_with(&b));

        if !s.can_be_compared_with(&t) {
            prop_assert_eq!(s.compare(&t), ClockOrder::NotComparable);
            prop_assert_eq!(t.compare(&s), ClockOrder::NotComparable);
            prop_assert_eq!(s.happen_after(&t), Err(ClockError::Incomparable));
            prop_assert_eq!(t.is_identical_to(&s), Err(ClockError::Incomparable));
        }
    }

    /// Exactly one relation holds for comparable clocks, and `Identical`
    /// means every entry agrees.
    #[test]
    fn prop_single_relation(pair in shared_keys()) {
        let (a, b) = pair.async_pair();
        if a.can_be_compared_with(&b) {
            let holds = [
                a.is_identical_to(&b).unwrap(),
                a.happen_before(&b).unwrap(),
                a.happen_after(&b).unwrap(),
                a.is_concurrent_with(&b).unwrap(),
            ];
            prop_assert_eq!(holds.iter().filter(|h| **h).count(), 1);
            prop_assert_eq!(a.compare(&b) == ClockOrder::Identical, pair.left == pair.right);
        }

        let (a, b) = pair.sync_pair();
        if a.can_be_compared_with(&b) {
            prop_assert_eq!(a.compare(&b) == ClockOrder::Identical, pair.left == pair.right);
        }
    }

    /// Under rendezvous semantics `a < b` exactly when `b > a`.
    #[test]
    fn prop_sync_antisymmetric(pair in shared_keys()) {
        let (a, b) = pair.sync_pair();
        prop_assume!(a.can_be_compared_with(&b));
        prop_assert_eq!(b.compare(&a), a.compare(&b).reverse());
    }

    /// Every local event makes the previous state of the same clock happen before.
    #[test]
    fn prop_local_events_monotonic((owner, entries) in loose_entries(), steps in 1usize..16) {
        let mut a = async_clock(owner, &entries).unwrap();
        let mut s = sync_clock(owner, &entries).unwrap();
        for _ in 0..steps {
            let (a0, s0) = (a.clone(), s.clone());
            a.apply_local_event().unwrap();
            s.apply_local_event().unwrap();
            prop_assert_eq!(a0.compare(&a), ClockOrder::HappenBefore);
            prop_assert_eq!(s0.compare(&s), ClockOrder::HappenBefore);
            prop_assert_eq!(a.compare(&a0), ClockOrder::HappenAfter);
        }
    }

    /// A receive never lowers an entry and covers the sender's view of shared nodes.
    #[test]
    fn prop_async_receive_dominates(pair in shared_keys()) {
        let (mut receiver, sender) = pair.async_pair();
        let before = receiver.clone();
        receiver.apply_receive_event(&sender).unwrap();

        for node in &pair.keys {
            let now = receiver.value_of(node).unwrap();
            prop_assert!(now >= before.value_of(node).unwrap());
            prop_assert!(now >= sender.value_of(node).unwrap());
        }
        prop_assert!(receiver.value_of(receiver.node()).unwrap() > before.value_of(before.node()).unwrap());
    }

    /// Merging the same message twice leaves every third-party entry alone.
    #[test]
    fn prop_async_merge_idempotent(pair in shared_keys()) {
        let (mut receiver, sender) = pair.async_pair();
        receiver.apply_receive_event(&sender).unwrap();
        let once = receiver.clone();
        receiver.apply_receive_event(&sender).unwrap();

        for node in &pair.keys {
            if *node == receiver.node().as_str() || *node == sender.node().as_str() {
                continue;
            }
            prop_assert_eq!(receiver.value_of(node), once.value_of(node));
        }
    }

    /// Sync receive is a plain component-wise maximum after the idle tick.
    #[test]
    fn prop_sync_merge_idempotent(pair in shared_keys()) {
        let (mut receiver, sender) = pair.sync_pair();
        receiver.apply_receive_event(&sender).unwrap();
        let once = receiver.clone();
        receiver.apply_receive_event(&sender).unwrap();

        for node in &pair.keys {
            let expected = once.value_of(node).map(|v| if *node == once.node().as_str() { v + 1 } else { v });
            prop_assert_eq!(receiver.value_of(node), expected);
        }
    }

    /// After a rendezvous both parties hold the same vector.
    #[test]
    fn prop_rendezvous_converges(pair in shared_keys()) {
        let (mut sender, mut receiver) = pair.sync_pair();
        prop_assume!(pair.left_owner != pair.right_owner);

        rendezvous(&mut sender, &mut receiver).unwrap();
        prop_assert!(sender.is_idle());
        prop_assert!(receiver.is_idle());
        prop_assert_eq!(sender.timestamps(), receiver.timestamps());
        prop_assert_eq!(sender.compare(&receiver), ClockOrder::Identical);
    }

    /// The own node can never be removed.
    #[test]
    fn prop_own_node_protected((owner, entries) in loose_entries()) {
        let mut a = async_clock(owner, &entries).unwrap();
        prop_assert!(!a.remove_node(owner));
        prop_assert!(a.has_node(owner));

        let mut s = sync_clock(owner, &entries).unwrap();
        prop_assert!(!s.remove_node(owner));
        prop_assert!(s.has_node(owner));
    }

    /// Names that read as numbers are rejected everywhere a name is accepted.
    #[test]
    fn prop_numeric_names_rejected(name in numeric_name()) {
        let expected = Err(ClockError::NumericNodeName(name.clone()));
        prop_assert_eq!(AsyncVectorClock::new(&name).map(|_| ()), expected.clone());
        prop_assert_eq!(SyncVectorClock::new(&name).map(|_| ()), expected.clone());

        let mut clock = AsyncVectorClock::new("alpha").unwrap();
        prop_assert_eq!(clock.add_node(&name).map(|_| ()), expected);
    }
}
