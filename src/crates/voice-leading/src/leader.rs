//! Nearest-voicing resolution of consecutive triads
//!
//! Each member of the new chord may be moved by up to two octaves. For every
//! (new member, old pitch) pair the closest placement is recorded in a 3x3
//! cost matrix, and members are then committed greedily: the globally
//! cheapest remaining cell first, removing its row and column each time.
//! Greedy commitment is not a minimum-cost perfect matching and can lose to
//! one on adversarial inputs; the greedy order is kept so that output is
//! reproducible.

use crate::key::Key;
use crate::scale::DEGREES_PER_OCTAVE;
use crate::triad::{AbstractTriad, Triad};
use log::trace;

/// Octave shifts tried for every chord member, in tie-breaking order
pub const OCTAVE_SHIFTS: [i32; 5] = [-2, -1, 0, 1, 2];

/// Closest placement of one new chord member relative to one old pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Semitones between the placement and the old pitch
    pub distance: u32,
    /// The placement itself
    pub pitch: i32,
}

/// Rows are the new chord's members, columns the previous chord's pitches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    cells: [[Cell; 3]; 3],
}

impl CostMatrix {
    pub fn build(target: &AbstractTriad, previous: &Triad, key: &Key) -> Self {
        let old_pitches = previous.pitches();
        CostMatrix {
            cells: target
                .degrees()
                .map(|degree| old_pitches.map(|old| nearest_placement(degree, old, key))),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn distances(&self) -> Vec<Vec<u32>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.distance).collect())
            .collect()
    }
}

/// Octave placement of `degree` closest to `old`; the lowest shift wins ties
fn nearest_placement(degree: i32, old: i32, key: &Key) -> Cell {
    let place = |&shift: &i32| {
        let pitch = key.pitch(degree.saturating_add(DEGREES_PER_OCTAVE * shift));
        Cell {
            distance: pitch.abs_diff(old),
            pitch,
        }
    };

    let first = place(&OCTAVE_SHIFTS[0]);
    OCTAVE_SHIFTS[1..]
        .iter()
        .map(place)
        .fold(first, |best, cell| if cell.distance < best.distance { cell } else { best })
}

/// Greedy assignment over a square cost matrix
///
/// Returns `(row, col)` pairs in commit order. Each round scans the remaining
/// cells row-major and keeps the first strictly smaller cost, so the earliest
/// minimal cell wins. The last remaining cell is committed without a scan.
pub fn greedy_assign(costs: &[Vec<u32>]) -> Vec<(usize, usize)> {
    let mut rows: Vec<usize> = (0..costs.len()).collect();
    let mut cols: Vec<usize> = (0..costs.len()).collect();
    let mut assignment = Vec::with_capacity(costs.len());

    while rows.len() > 1 {
        let mut best: Option<(u32, usize, usize)> = None;
        for (ri, &row) in rows.iter().enumerate() {
            for (ci, &col) in cols.iter().enumerate() {
                let cost = costs[row][col];
                if best.map_or(true, |(lowest, _, _)| cost < lowest) {
                    best = Some((cost, ri, ci));
                }
            }
        }

        let Some((_, ri, ci)) = best else { break };
        assignment.push((rows.remove(ri), cols.remove(ci)));
    }

    if let (Some(&row), Some(&col)) = (rows.first(), cols.first()) {
        assignment.push((row, col));
    }
    assignment
}

/// Resolve the triad on `root` against the previous chord
///
/// Without a previous chord the degrees are placed as they are. Otherwise
/// every member is moved to the octave closest to the previous pitches, with
/// members committed in greedy order.
pub fn resolve_triad(root: i32, previous: Option<&Triad>, key: &Key) -> Triad {
    let target = AbstractTriad::on_root(root);
    let Some(previous) = previous else {
        return target.resolve_in(key);
    };

    let matrix = CostMatrix::build(&target, previous, key);
    let order = greedy_assign(&matrix.distances());

    let mut pitches = [0; 3];
    for (slot, (row, col)) in pitches.iter_mut().zip(order) {
        *slot = matrix.cell(row, col).pitch;
    }

    let resolved = Triad::new(pitches);
    trace!(
        "Degree {} {:?} after {}: costs {:?} -> {}",
        root,
        target.degrees(),
        previous,
        matrix.distances(),
        resolved
    );
    resolved
}

/// Untyped entry point
///
/// Only a slice of exactly three pitches counts as a previous chord; any
/// other length resolves as the first chord of a piece.
pub fn resolve_triad_from_slice(root: i32, previous: &[i32], key: &Key) -> Triad {
    let previous = Triad::try_from(previous).ok();
    resolve_triad(root, previous.as_ref(), key)
}

/// Resolve a whole sequence of roots, each chord against the one before
pub fn progression(roots: impl IntoIterator<Item = i32>, key: &Key) -> Vec<Triad> {
    roots
        .into_iter()
        .scan(None, |previous: &mut Option<Triad>, root| {
            let triad = resolve_triad(root, previous.as_ref(), key);
            *previous = Some(triad);
            Some(triad)
        })
        .collect()
}
