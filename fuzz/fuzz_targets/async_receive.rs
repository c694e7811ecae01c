#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: async_receive
// Builds two asynchronous clocks from arbitrary counters and merges
// one into the other.
// ────────────────────────────────────────────────────────────
// Checks: the receiver's previous state happens before its new
// state, and no shared entry falls below either input.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use causal_clocks::{AsyncVectorClock, ClockOrder, LogicalTimestamp};

const NODES: [&str; 4] = ["p1", "p2", "p3", "p4"];

#[derive(Arbitrary, Debug, Clone)]
struct Frame {
    receiver: [u32; 4],
    sender: [u32; 4],
    sender_owner: u8,
}

fn clock(owner: &str, counters: [u32; 4]) -> AsyncVectorClock {
    let entries = NODES
        .iter()
        .zip(counters)
        .map(|(node, c)| (*node, LogicalTimestamp::new(u64::from(c))));
    AsyncVectorClock::with_timestamps(owner, entries).unwrap()
}

fuzz_target!(|frame: Frame| {
    let before = clock(NODES[0], frame.receiver);
    let sender = clock(NODES[usize::from(frame.sender_owner) % NODES.len()], frame.sender);

    let mut receiver = before.clone();
    receiver.apply_receive_event(&sender).unwrap();

    assert_eq!(before.compare(&receiver), ClockOrder::HappenBefore);
    for node in NODES {
        let now = receiver.value_of(node).unwrap();
        assert!(now >= before.value_of(node).unwrap());
        assert!(now >= sender.value_of(node).unwrap());
    }
});
