use flownet::{Algorithm, Network};

const CLRS: &[(usize, usize, i64)] = &[
    (0, 1, 16),
    (0, 2, 13),
    (1, 3, 12),
    (2, 1, 4),
    (2, 4, 14),
    (3, 2, 9),
    (3, 5, 20),
    (4, 3, 7),
    (4, 5, 4),
];

fn clrs() -> Network<i64> {
    let mut net = Network::new(6);
    for &(u, v, c) in CLRS {
        net.add_edge(u, v, c);
    }
    net
}

/// Solves a copy of `net` from scratch.
fn fresh_value(net: &Network<i64>) -> i64 {
    net.clone().edmonds_karp().unwrap()
}

#[test]
fn increment_then_decrement_back_edge() {
    for algo in Algorithm::ALL {
        let mut net = clrs();
        assert_eq!(net.run(algo), Ok(23));

        net.increment_edge(3, 2);
        assert_eq!(net.capacity(3, 2), 10);
        assert_eq!(net.max_flow_value(), fresh_value(&net), "{algo:?}");
        assert_eq!(net.check(), Ok(()));

        net.decrement_edge(3, 2);
        assert_eq!(net.capacity(3, 2), 9);
        assert_eq!(net.max_flow_value(), 23, "{algo:?}");
        assert_eq!(net.check(), Ok(()));
    }
}

#[test]
fn increment_cut_edge_grows_by_bottleneck() {
    let mut net = clrs();
    net.relabel_to_front().unwrap();

    net.increment_edge(1, 3);
    assert_eq!(net.max_flow_value(), 24);
    assert_eq!(net.max_flow_value(), fresh_value(&net));

    net.decrement_edge(1, 3);
    assert_eq!(net.max_flow_value(), 23);
    assert_eq!(net.check(), Ok(()));
}

#[test]
fn unit_steps_on_blocking_edge() {
    // the second path is blocked by a zero capacity edge with slack around it
    let mut net = Network::<i64>::new(4);
    net.add_edge(0, 1, 5);
    net.add_edge(1, 2, 0);
    net.add_edge(2, 3, 5);
    net.add_edge(1, 3, 2);
    assert_eq!(net.generic_push_relabel(), Ok(2));

    net.increment_edge(1, 2);
    assert_eq!(net.max_flow_value(), 3);
    net.increment_edge(1, 2);
    assert_eq!(net.max_flow_value(), 4);
    net.decrement_edge(1, 2);
    net.decrement_edge(1, 2);
    assert_eq!(net.max_flow_value(), 2);
    assert_eq!(net.flow(1, 2), 0);
    assert_eq!(net.check(), Ok(()));
}

#[test]
fn repeated_edits_match_fresh_solves() {
    let mut net = clrs();
    net.edmonds_karp().unwrap();

    let edits = [
        (true, 4, 5),
        (true, 4, 5),
        (false, 3, 5),
        (true, 1, 3),
        (false, 0, 2),
        (false, 4, 5),
        (true, 2, 1),
        (false, 1, 3),
        (false, 1, 3),
    ];
    for (up, u, v) in edits {
        if up {
            net.increment_edge(u, v);
        } else {
            net.decrement_edge(u, v);
        }
        assert_eq!(net.check(), Ok(()), "after editing ({u}, {v})");
        assert_eq!(
            net.max_flow_value(),
            fresh_value(&net),
            "after editing ({u}, {v})"
        );
        assert!(net.is_solved());
    }
}

#[test]
fn decrement_edge_out_of_source_and_into_sink() {
    let mut net = clrs();
    net.relabel_to_front().unwrap();

    net.decrement_edge(4, 5);
    assert_eq!(net.max_flow_value(), 22);
    net.decrement_edge(0, 1);
    assert_eq!(net.max_flow_value(), fresh_value(&net));
    assert_eq!(net.check(), Ok(()));
}

#[test]
#[should_panic]
fn decrement_missing_edge_panics() {
    let mut net = clrs();
    net.edmonds_karp().unwrap();
    net.decrement_edge(5, 3);
}

#[test]
#[should_panic]
fn edit_after_structural_change_panics() {
    let mut net = clrs();
    net.edmonds_karp().unwrap();
    net.add_edge(1, 4, 3);
    net.increment_edge(1, 3);
}
