//! Unit tests for the register scoreboard and operand-forwarding network.

use apex_sim::core::arch::gpr::{Gpr, Scoreboard};
use apex_sim::core::pipeline::hazards::{resolve_source, ForwardingTable, Resolution};

fn assert_ready(res: Resolution, expected: i32) {
    match res {
        Resolution::Ready(v) => assert_eq!(v, expected),
        Resolution::Stall => panic!("expected Ready({expected}), got Stall"),
    }
}

/// A valid register is read straight out of the register file, regardless
/// of what the forwarding table holds.
#[test]
fn valid_register_reads_directly() {
    let mut regs = Gpr::new();
    regs.write(3, 42);
    let scoreboard = Scoreboard::new();
    let fwd = ForwardingTable::new();

    let res = resolve_source(3, &regs, &scoreboard, &fwd, -1);
    assert_ready(res, 42);
}

/// An invalid register with no forwarded result yet must stall.
#[test]
fn pending_register_without_forwarding_stalls() {
    let regs = Gpr::new();
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(5);
    let fwd = ForwardingTable::new();

    assert!(matches!(
        resolve_source(5, &regs, &scoreboard, &fwd, -1),
        Resolution::Stall
    ));
}

/// Once a result has been published, a pending register resolves to the
/// forwarded value as long as its producer isn't still sitting in EX1.
#[test]
fn pending_register_resolves_from_forwarding_table() {
    let regs = Gpr::new();
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(5);
    let mut fwd = ForwardingTable::new();
    fwd.publish(5, 99);

    let res = resolve_source(5, &regs, &scoreboard, &fwd, -1);
    assert_ready(res, 99);
}

/// Forwarding is unavailable for a value whose producer is still in
/// Execute-1 this cycle, even if some other result was already published.
#[test]
fn forwarding_blocked_while_producer_is_in_execute1() {
    let regs = Gpr::new();
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(5);
    let mut fwd = ForwardingTable::new();
    fwd.publish(5, 99);

    let res = resolve_source(5, &regs, &scoreboard, &fwd, 5);
    assert!(matches!(res, Resolution::Stall));
}

/// Publishing with `rd < 0` (STORE/STR, which have no destination) marks
/// forwarding available without touching any register slot.
#[test]
fn publish_with_no_destination_only_sets_availability() {
    let regs = Gpr::new();
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(2);
    let mut fwd = ForwardingTable::new();
    fwd.publish(-1, 123);

    let res = resolve_source(2, &regs, &scoreboard, &fwd, -1);
    assert_ready(res, 0);
}

/// `clear_available` reopens the load-use stall window: a pending register
/// that was forwardable a moment ago stalls again once a LOAD/LDR reaches
/// Execute-2 or Memory-1.
#[test]
fn clear_available_reinstates_stall() {
    let regs = Gpr::new();
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(7);
    let mut fwd = ForwardingTable::new();
    fwd.publish(7, 1);
    fwd.clear_available();

    assert!(matches!(
        resolve_source(7, &regs, &scoreboard, &fwd, -1),
        Resolution::Stall
    ));
}

/// `mark_valid` releases a scoreboard claim; after it, the register reads
/// straight from the register file again even with forwarding unavailable.
#[test]
fn mark_valid_releases_scoreboard_claim() {
    let mut regs = Gpr::new();
    regs.write(9, 7);
    let mut scoreboard = Scoreboard::new();
    scoreboard.mark_pending(9);
    assert!(!scoreboard.is_valid(9));

    scoreboard.mark_valid(9);
    assert!(scoreboard.is_valid(9));

    let fwd = ForwardingTable::new();
    assert_ready(resolve_source(9, &regs, &scoreboard, &fwd, -1), 7);
}
