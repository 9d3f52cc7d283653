//! Integration test: laws every settled board obeys.

use gatesim_components::{Gate, GateKind};
use gatesim_core::{ComponentId, SocketId};
use gatesim_engine::{Board, BoardConfig, PropagationMode};
use proptest::prelude::*;

fn config(mode: PropagationMode) -> BoardConfig {
    BoardConfig {
        mode,
        ..BoardConfig::default()
    }
}

fn any_mode() -> impl Strategy<Value = PropagationMode> {
    prop_oneof![Just(PropagationMode::Recursive), Just(PropagationMode::Queued)]
}

fn any_two_input_gate() -> impl Strategy<Value = GateKind> {
    prop::sample::select(
        GateKind::ALL
            .iter()
            .copied()
            .filter(|k| k.arity() == 2)
            .collect::<Vec<_>>(),
    )
}

/// One OR gate driving `fanout` NOT gates through a single connection.
fn fan_out(board: &mut Board, fanout: usize) -> (ComponentId, Vec<SocketId>) {
    let driver = board.create(Gate::or()).unwrap();
    let mut members = vec![board.output(driver, 0).unwrap()];
    let mut readers = Vec::new();
    for _ in 0..fanout {
        let not = board.create(Gate::not()).unwrap();
        members.push(board.input(not, 0).unwrap());
        readers.push(not);
    }
    board.connect(&members).unwrap();
    board.add_components(&readers).unwrap();
    (driver, members)
}

proptest! {
    #[test]
    fn connection_members_agree(
        mode in any_mode(),
        fanout in 1usize..12,
        toggles in prop::collection::vec(any::<bool>(), 1..10),
    ) {
        let mut board = Board::new(config(mode)).unwrap();
        let (driver, members) = fan_out(&mut board, fanout);
        let a = board.input(driver, 0).unwrap();
        for value in toggles {
            board.set_socket_state(a, value).unwrap();
            for &m in &members {
                prop_assert_eq!(board.socket_state(m), Some(value));
            }
            let conn = board.socket(members[0]).unwrap().connection().unwrap();
            prop_assert_eq!(board.connection(conn).unwrap().state(), value);
        }
    }

    #[test]
    fn settled_gate_output_is_its_function(
        mode in any_mode(),
        kind in any_two_input_gate(),
        a in any::<bool>(),
        b in any::<bool>(),
    ) {
        let mut board = Board::new(config(mode)).unwrap();
        let gate = board.create(Gate::new(kind)).unwrap();
        board.add_components(&[gate]).unwrap();
        let ia = board.input(gate, 0).unwrap();
        let ib = board.input(gate, 1).unwrap();
        board.set_socket_state(ia, a).unwrap();
        board.set_socket_state(ib, b).unwrap();
        let out = board.output(gate, 0).unwrap();
        prop_assert_eq!(board.socket_state(out), kind.eval(&[a, b]));
    }

    #[test]
    fn repeated_update_is_quiet(
        mode in any_mode(),
        kind in any_two_input_gate(),
        a in any::<bool>(),
    ) {
        let mut board = Board::new(config(mode)).unwrap();
        let gate = board.create(Gate::new(kind)).unwrap();
        board.add_components(&[gate]).unwrap();
        board.set_socket_state(board.input(gate, 0).unwrap(), a).unwrap();
        let out = board.output(gate, 0).unwrap();
        let before = board.socket_state(out);
        let stats = board.update_component(gate).unwrap();
        prop_assert!(stats.is_quiet());
        prop_assert_eq!(board.socket_state(out), before);
    }
}

#[test]
fn dangling_inputs_read_low() {
    for mode in [PropagationMode::Recursive, PropagationMode::Queued] {
        let mut board = Board::new(config(mode)).unwrap();
        let nor = board.create(Gate::nor()).unwrap();
        let or = board.create(Gate::or()).unwrap();
        board.add_components(&[nor, or]).unwrap();
        assert_eq!(board.socket_state(board.output(nor, 0).unwrap()), Some(true));
        assert_eq!(board.socket_state(board.output(or, 0).unwrap()), Some(false));
    }
}

#[test]
fn wiring_does_not_sync_until_a_change() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    let nand = board.create(Gate::nand()).unwrap();
    let reader = board.create(Gate::or()).unwrap();
    board.add_components(&[nand, reader]).unwrap();
    let out = board.output(nand, 0).unwrap();
    let r = board.input(reader, 0).unwrap();

    // Output is already high; connecting does not push it.
    let conn = board.connect(&[out, r]).unwrap();
    assert_eq!(board.socket_state(r), Some(false));
    assert!(!board.connection(conn).unwrap().state());

    // An explicit broadcast of the current value syncs the net.
    board.broadcast(conn, true).unwrap();
    assert_eq!(board.socket_state(r), Some(true));
    assert_eq!(
        board.socket_state(board.output(reader, 0).unwrap()),
        Some(true)
    );
}

#[test]
fn broadcast_with_current_state_is_a_no_op() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    let (driver, members) = fan_out(&mut board, 3);
    let conn = board.socket(members[0]).unwrap().connection().unwrap();
    let stats = board.broadcast(conn, false).unwrap();
    assert_eq!(stats.broadcasts, 0);
    assert!(stats.is_quiet());
    assert!(!board.is_registered(driver));
}

#[test]
fn modes_settle_to_the_same_state() {
    // Chain of XORs with the second input left low: each one buffers.
    let build = |mode| {
        let mut board = Board::new(config(mode)).unwrap();
        let mut gates = Vec::new();
        for _ in 0..8 {
            gates.push(board.create(Gate::xor()).unwrap());
        }
        for pair in gates.windows(2) {
            let out = board.output(pair[0], 0).unwrap();
            let a = board.input(pair[1], 0).unwrap();
            board.connect(&[out, a]).unwrap();
        }
        board.add_components(&gates).unwrap();
        let head = board.input(gates[0], 0).unwrap();
        board.set_socket_state(head, true).unwrap();
        gates
            .iter()
            .map(|&g| board.socket_state(board.output(g, 0).unwrap()))
            .collect::<Vec<_>>()
    };
    let recursive = build(PropagationMode::Recursive);
    let queued = build(PropagationMode::Queued);
    assert_eq!(recursive, queued);
    assert!(recursive.iter().all(|s| *s == Some(true)));
}
