// Property tests over arbitrary inputs

use algoscope::algorithms::{binary_search, bubble_sort, dijkstra};
use algoscope::graph::{Edge, Graph};
use algoscope::playback::PlaybackController;
use proptest::prelude::*;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
enum Op {
    Play,
    Pause,
    Reset,
    Forward,
    Backward,
    Seek(usize),
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Reset),
        Just(Op::Forward),
        Just(Op::Backward),
        (0usize..80).prop_map(Op::Seek),
        (0u64..3000).prop_map(Op::Tick),
    ]
}

fn values_and_permutation() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::vec(any::<i64>(), 0..12)
        .prop_flat_map(|values| (Just(values.clone()), Just(values).prop_shuffle()))
}

proptest! {
    #[test]
    fn test_binary_search_ignores_input_order(
        (values, shuffled) in values_and_permutation(),
        pick in any::<prop::sample::Index>(),
        miss in any::<i64>(),
    ) {
        let target = if values.is_empty() { miss } else { values[pick.index(values.len())] };
        prop_assert_eq!(
            binary_search::generate(&values, target),
            binary_search::generate(&shuffled, target)
        );
    }

    #[test]
    fn test_dijkstra_handles_any_weights(weights in prop::collection::vec(any::<u64>(), 7)) {
        let sample = Graph::sample();
        let edges = sample
            .edges
            .iter()
            .zip(&weights)
            .map(|(edge, &w)| Edge::weighted(edge.source.clone(), edge.target.clone(), w))
            .collect();
        let graph = Graph::new(sample.nodes, edges);

        let trace = dijkstra::generate(&graph, "A", "F").unwrap();
        prop_assert!(trace.terminal().is_some());
        let path = &trace.terminal().unwrap().graph_view().unwrap().path_nodes;
        if !path.is_empty() {
            prop_assert!(graph.path_weight(path.as_slice()).is_some());
        }
    }


    #[test]
    fn test_bubble_sort_terminal_is_sorted_permutation(values in prop::collection::vec(-50i64..50, 0..12)) {
        let trace = bubble_sort::generate(&values);
        let mut expected = values.clone();
        expected.sort();

        let terminal = trace.terminal().unwrap();
        prop_assert_eq!(&terminal.array_view().unwrap().array, &expected);
        prop_assert_eq!(trace.iter().filter(|f| f.complete).count(), 1);
        for (i, frame) in trace.iter().enumerate() {
            prop_assert_eq!(frame.index, i);
            let view = frame.array_view().unwrap();
            prop_assert_eq!(view.array.len(), values.len());
            // Equal neighbours are never swapped
            if let &[a, b] = view.swapping.as_slice() {
                prop_assert!(view.array[a] < view.array[b]);
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic(values in prop::collection::vec(-50i64..50, 0..10), target in -50i64..50) {
        prop_assert_eq!(bubble_sort::generate(&values), bubble_sort::generate(&values));
        prop_assert_eq!(
            binary_search::generate(&values, target),
            binary_search::generate(&values, target)
        );
    }

    #[test]
    fn test_binary_search_agrees_with_contains(
        values in prop::collection::vec(-20i64..20, 0..15),
        target in -25i64..25,
    ) {
        let trace = binary_search::generate(&values, target);
        let view = trace.terminal().unwrap().array_view().unwrap();
        match view.found {
            Some(idx) => prop_assert_eq!(view.array[idx], target),
            None => prop_assert!(!values.contains(&target)),
        }
    }

    #[test]
    fn test_playback_index_stays_in_bounds(
        values in prop::collection::vec(0i64..10, 0..6),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut controller = PlaybackController::new(bubble_sort::generate(&values));
        let mut now = Instant::now();
        for op in ops {
            match op {
                Op::Play => controller.play_at(now),
                Op::Pause => controller.pause(),
                Op::Reset => controller.reset(),
                Op::Forward => { controller.step_forward(); }
                Op::Backward => { controller.step_backward(); }
                Op::Seek(i) => { controller.seek(i); }
                Op::Tick(ms) => {
                    now += Duration::from_millis(ms);
                    controller.tick_at(now);
                }
            }
            prop_assert!(controller.index() < controller.len());
            prop_assert!(controller.current_frame().is_some());
        }
    }
}
