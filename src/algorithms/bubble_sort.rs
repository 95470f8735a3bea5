//! Bubble sort step generator

use super::{AlgorithmId, AlgorithmInfo, Category, Complexity};
use crate::trace::{ArrayView, Trace, TraceRecorder};
use tracing::debug;

pub const INFO: AlgorithmInfo = AlgorithmInfo {
    id: AlgorithmId::BubbleSort,
    name: "Bubble Sort",
    category: Category::Sorting,
    time: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
    },
    space: "O(1)",
    stable: true,
    description: "Repeatedly steps through the list, compares adjacent elements and swaps \
                  them when they are out of order. Larger elements bubble towards the end, \
                  so each pass can stop one position earlier. A pass without swaps means \
                  the list is sorted.",
    pseudocode: &[
        "procedure bubbleSort(A: list of sortable items)",
        "    n := length(A)",
        "    repeat",
        "        swapped := false",
        "        for i := 1 to n-1 inclusive do",
        "            if A[i-1] > A[i] then",
        "                swap(A[i-1], A[i])",
        "                swapped := true",
        "            end if",
        "        end for",
        "        n := n - 1",
        "    until not swapped",
        "end procedure",
    ],
};

/// Record a full bubble sort of `values`
///
/// Equal neighbours are never swapped, so the sort is stable.
pub fn generate(values: &[i64]) -> Trace {
    let mut working = values.to_vec();
    let mut recorder = TraceRecorder::new();

    if working.len() < 2 {
        debug!(len = working.len(), "bubble sort input needs no passes");
        return recorder.finish(
            &[1, 2],
            "Array has fewer than two elements, it is already sorted",
            ArrayView::of(&working),
        );
    }

    recorder.emit(&[1], "Start bubble sort algorithm", ArrayView::of(&working));

    let mut n = working.len();
    recorder.emit(&[2], format!("Set n = {}", n), ArrayView::of(&working));

    let mut passes = 0;
    loop {
        passes += 1;
        recorder.emit(
            &[3, 4],
            "Start a new pass through the array",
            ArrayView::of(&working),
        );

        let mut swapped = false;
        for i in 1..n {
            let (left, right) = (working[i - 1], working[i]);
            recorder.emit(
                &[5],
                format!("Compare {} and {}", left, right),
                ArrayView::of(&working).current(i).comparing([i - 1, i]),
            );

            if left > right {
                recorder.emit(
                    &[6],
                    format!("{} > {}, need to swap", left, right),
                    ArrayView::of(&working).current(i).comparing([i - 1, i]),
                );
                working.swap(i - 1, i);
                swapped = true;
                recorder.emit(
                    &[7, 8],
                    format!("Swap {} and {}, set swapped = true", left, right),
                    ArrayView::of(&working).current(i).swapping([i - 1, i]),
                );
            } else {
                recorder.emit(
                    &[5, 6],
                    format!("{} <= {}, no swap needed", left, right),
                    ArrayView::of(&working).current(i).comparing([i - 1, i]),
                );
            }
        }

        if !swapped {
            recorder.emit(
                &[11, 12],
                "No swaps during this pass, stop repeating",
                ArrayView::of(&working),
            );
            break;
        }

        recorder.emit(
            &[11],
            format!("Decrement n: {} -> {}", n, n - 1),
            ArrayView::of(&working),
        );
        n -= 1;
    }

    let trace = recorder.finish(&[12, 13], "Array is sorted", ArrayView::of(&working));
    debug!(
        len = values.len(),
        passes,
        frames = trace.len(),
        "generated bubble sort trace"
    );
    trace
}
