#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: sync_protocol
// Drives three synchronous clocks through arbitrary local, send,
// receive and rendezvous steps.
// ────────────────────────────────────────────────────────────
// Checks: a rejected step leaves the clock unchanged, own counters
// never decrease, and a clock is communicating exactly while it
// has a pending peer.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use causal_clocks::{rendezvous, SyncClockState, SyncVectorClock};

const NODES: [&str; 3] = ["p1", "p2", "p3"];

#[derive(Arbitrary, Debug, Clone)]
enum Step {
    Local(u8),
    Send { from: u8, to: u8 },
    Receive { at: u8, from: u8 },
    Rendezvous { sender: u8, receiver: u8 },
    Forget { at: u8, node: u8 },
}

fn idx(i: u8) -> usize {
    usize::from(i) % NODES.len()
}

fn own(clock: &SyncVectorClock) -> u64 {
    clock.value_of(clock.node()).unwrap_or_default()
}

fn check_state(clock: &SyncVectorClock) {
    assert_eq!(
        clock.communication_state() == SyncClockState::Communicating,
        clock.communicating_node().is_some()
    );
}

fuzz_target!(|steps: Vec<Step>| {
    let mut clocks: Vec<SyncVectorClock> = NODES
        .iter()
        .map(|owner| {
            let mut clock = SyncVectorClock::new(owner).unwrap();
            for peer in NODES {
                clock.add_node(peer).unwrap();
            }
            clock
        })
        .collect();

    for step in steps.into_iter().take(256) {
        let before = clocks.clone();
        match step {
            Step::Local(at) => {
                let at = idx(at);
                if clocks[at].apply_local_event().is_err() {
                    assert_eq!(clocks[at], before[at]);
                }
            }
            Step::Send { from, to } => {
                let from = idx(from);
                if clocks[from].apply_send_event(NODES[idx(to)]).is_err() {
                    assert_eq!(clocks[from], before[from]);
                }
            }
            Step::Receive { at, from } => {
                let (at, from) = (idx(at), idx(from));
                let message = clocks[from].clone();
                if clocks[at].apply_receive_event(&message).is_err() {
                    assert_eq!(clocks[at], before[at]);
                }
            }
            Step::Rendezvous { sender, receiver } => {
                let (s, r) = (idx(sender), idx(receiver));
                if s != r {
                    let (mut a, mut b) = (clocks[s].clone(), clocks[r].clone());
                    if rendezvous(&mut a, &mut b).is_ok() {
                        assert_eq!(a.timestamps(), b.timestamps());
                        clocks[s] = a;
                        clocks[r] = b;
                    } else {
                        assert_eq!((&a, &b), (&before[s], &before[r]));
                    }
                }
            }
            Step::Forget { at, node } => {
                let at = idx(at);
                let removed = clocks[at].remove_node(NODES[idx(node)]);
                if clocks[at].is_communicating() {
                    assert!(!removed);
                }
                if removed {
                    clocks[at].add_node(NODES[idx(node)]).unwrap();
                }
            }
        }

        for (clock, old) in clocks.iter().zip(&before) {
            assert!(own(clock) >= own(old));
            check_state(clock);
        }
    }
});
