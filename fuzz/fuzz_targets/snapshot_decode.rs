#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: snapshot_decode
// Feeds arbitrary bytes to the snapshot decoder.
// ────────────────────────────────────────────────────────────
// Checks: decoding never panics, any accepted snapshot
// re-encodes to a snapshot that decodes to the same clock, and a
// local event on the decoded clock either ticks or fails with
// CounterOverflow leaving the clock untouched.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;

use causal_clocks::{AsyncVectorClock, ClockError, ClockOrder, SyncVectorClock, VectorClockSnapshot};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = VectorClockSnapshot::from_json(text) else {
        return;
    };

    let decoded = AsyncVectorClock::from_snapshot(&snapshot);
    assert_eq!(decoded.is_ok(), SyncVectorClock::from_snapshot(&snapshot).is_ok());

    if let Ok(clock) = decoded {
        let again = AsyncVectorClock::from_snapshot(&clock.snapshot()).unwrap();
        assert_eq!(again, clock);
        assert!(clock.has_node(clock.node()));

        let mut ticked = clock.clone();
        let outcome = ticked.apply_local_event().map(|_| ());
        match outcome {
            Ok(_) => assert_eq!(clock.compare(&ticked), ClockOrder::HappenBefore),
            Err(ClockError::CounterOverflow { .. }) => assert_eq!(ticked, clock),
            Err(other) => panic!("unexpected local event error: {other}"),
        }
    }
});
