//! Binary search step generator
//!
//! The input is sorted before the first frame is recorded, so the trace depends
//! only on the multiset of values and the target. The search itself is recursive over
//! an inclusive `[low, high]` window; `high` may drop to `-1`, so the window
//! bounds are signed and only in-range bounds are highlighted.

use super::{AlgorithmId, AlgorithmInfo, Category, Complexity};
use crate::trace::{ArrayView, Trace, TraceRecorder};
use tracing::debug;

pub const INFO: AlgorithmInfo = AlgorithmInfo {
    id: AlgorithmId::BinarySearch,
    name: "Binary Search",
    category: Category::Searching,
    time: Complexity {
        best: "O(1)",
        average: "O(log n)",
        worst: "O(log n)",
    },
    space: "O(1)",
    stable: true,
    description: "Finds an item in a sorted list by repeatedly halving the portion that \
                  could contain it, until the item is found or the portion is empty. \
                  Requires the list to be sorted before searching begins.",
    pseudocode: &[
        "function binarySearch(A, target, low, high):",
        "    if high < low then",
        "        return -1",
        "    mid := low + floor((high - low) / 2)",
        "    if A[mid] > target then",
        "        return binarySearch(A, target, low, mid - 1)",
        "    else if A[mid] < target then",
        "        return binarySearch(A, target, mid + 1, high)",
        "    else",
        "        return mid",
    ],
};

enum Outcome {
    Found(usize),
    NotFound,
}

/// Record a binary search for `target` in `values`
pub fn generate(values: &[i64], target: i64) -> Trace {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mut recorder = TraceRecorder::new();
    recorder.emit(
        &[1],
        format!("Start binary search for target {}", target),
        ArrayView::of(&sorted),
    );

    let high = sorted.len() as isize - 1;
    let trace = match search(&sorted, target, 0, high, &mut recorder) {
        Outcome::Found(mid) => recorder.finish(
            &[9, 10],
            format!(
                "{} = {}, target found at index {}",
                sorted[mid], target, mid
            ),
            ArrayView::of(&sorted).current(mid).comparing([mid]).found(mid),
        ),
        Outcome::NotFound => recorder.finish(
            &[3],
            format!("Target {} not found in array", target),
            ArrayView::of(&sorted),
        ),
    };

    debug!(
        len = values.len(),
        target,
        frames = trace.len(),
        "generated binary search trace"
    );
    trace
}

fn search(
    array: &[i64],
    target: i64,
    low: isize,
    high: isize,
    recorder: &mut TraceRecorder,
) -> Outcome {
    recorder.emit(
        &[2],
        format!("Check if high ({}) < low ({})", high, low),
        ArrayView::of(array).comparing(window(low, high, array.len())),
    );

    if high < low {
        return Outcome::NotFound;
    }

    let mid = low + (high - low) / 2;
    let m = mid as usize;
    recorder.emit(
        &[4],
        format!("Calculate mid = {}", mid),
        ArrayView::of(array)
            .current(m)
            .comparing(window(low, high, array.len())),
    );
    recorder.emit(
        &[5],
        format!("Compare {} with target {}", array[m], target),
        ArrayView::of(array).current(m).comparing([m]),
    );

    if array[m] > target {
        recorder.emit(
            &[6],
            format!("{} > {}, search in left half", array[m], target),
            ArrayView::of(array)
                .current(m)
                .comparing(window(low, mid - 1, array.len())),
        );
        search(array, target, low, mid - 1, recorder)
    } else if array[m] < target {
        recorder.emit(
            &[7, 8],
            format!("{} < {}, search in right half", array[m], target),
            ArrayView::of(array)
                .current(m)
                .comparing(window(mid + 1, high, array.len())),
        );
        search(array, target, mid + 1, high, recorder)
    } else {
        Outcome::Found(m)
    }
}

/// In-range window bounds, deduplicated
fn window(low: isize, high: isize, len: usize) -> Vec<usize> {
    let mut bounds: Vec<usize> = [low, high]
        .into_iter()
        .filter(|&b| b >= 0 && (b as usize) < len)
        .map(|b| b as usize)
        .collect();
    bounds.dedup();
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [i64; 10] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50];

    #[test]
    fn test_finds_target() {
        let trace = generate(&VALUES, 25);
        let terminal = trace.terminal().unwrap();
        assert_eq!(terminal.array_view().unwrap().found, Some(4));
        assert_eq!(terminal.message, "25 = 25, target found at index 4");
    }

    #[test]
    fn test_reports_missing_target() {
        let trace = generate(&VALUES, 26);
        let terminal = trace.terminal().unwrap();
        assert_eq!(terminal.array_view().unwrap().found, None);
        assert_eq!(terminal.message, "Target 26 not found in array");
        assert_eq!(terminal.highlighted_lines, vec![3]);
    }

    #[test]
    fn test_trace_ignores_input_order() {
        let trace = generate(&[30, 10, 20], 20);
        assert_eq!(trace.frames()[0].array_view().unwrap().array, vec![10, 20, 30]);
        assert_eq!(trace, generate(&[10, 20, 30], 20));
        assert_eq!(trace, generate(&[20, 30, 10], 20));
    }

    #[test]
    fn test_left_half_highlights_recursive_call() {
        let trace = generate(&VALUES, 10);
        let left = trace
            .iter()
            .find(|f| f.message.ends_with("search in left half"))
            .unwrap();
        assert_eq!(left.highlighted_lines, vec![6]);
    }

    #[test]
    fn test_empty_array_terminates() {
        let trace = generate(&[], 3);
        let messages: Vec<&str> = trace.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Start binary search for target 3",
                "Check if high (-1) < low (0)",
                "Target 3 not found in array",
            ]
        );
        assert!(trace.frames()[1].array_view().unwrap().comparing.is_empty());
    }

    #[test]
    fn test_window_filters_out_of_range() {
        assert_eq!(window(0, -1, 0), Vec::<usize>::new());
        assert_eq!(window(0, -1, 4), vec![0]);
        assert_eq!(window(2, 2, 4), vec![2]);
        assert_eq!(window(3, 4, 4), vec![3]);
    }
}
