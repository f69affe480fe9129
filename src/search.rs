use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::board::{Board, Move, CELLS, SIDE};

struct Node {
    board: Board,
    parent: Option<usize>,
    action: Option<Move>,
    depth: usize,
    score: usize, // depth + manhattan
}

// Min-heap entry: lowest score pops first, earliest insertion on equal scores.
struct OpenEntry {
    score: usize,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.score.cmp(&self.score) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ord => ord,
        }
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn tile_positions(board: &Board) -> [usize; CELLS] {
    let mut at = [0; CELLS];
    for (index, &value) in board.cells().iter().enumerate() {
        at[value as usize] = index;
    }
    at
}

/// Sum of per-tile Manhattan distances between `board` and `goal`; the blank
/// is not counted.
pub fn manhattan(board: &Board, goal: &Board) -> usize {
    manhattan_to(board, &tile_positions(goal))
}

fn manhattan_to(board: &Board, goal_at: &[usize; CELLS]) -> usize {
    let mut distance = 0;
    for (index, &value) in board.cells().iter().enumerate() {
        if value != 0 {
            let target = goal_at[value as usize];
            distance += ((index / SIDE) as isize - (target / SIDE) as isize).unsigned_abs();
            distance += ((index % SIDE) as isize - (target % SIDE) as isize).unsigned_abs();
        }
    }
    distance
}

/// A* over the 8-puzzle move graph. Returns the move sequence from `start`
/// to `goal`, or `None` once the frontier is exhausted without reaching it.
pub fn solve(start: &Board, goal: &Board) -> Option<Vec<Move>> {
    let goal_at = tile_positions(goal);

    let mut nodes = vec![Node {
        board: *start,
        parent: None,
        action: None,
        depth: 0,
        score: manhattan_to(start, &goal_at),
    }];
    let mut frontier = BinaryHeap::new();
    let mut visited: FxHashSet<Board> = FxHashSet::default();
    let mut seq = 0u64;

    frontier.push(OpenEntry {
        score: nodes[0].score,
        seq,
        node: 0,
    });

    while let Some(entry) = frontier.pop() {
        let current = entry.node;
        let board = nodes[current].board;

        if board == *goal {
            debug!(
                expanded = visited.len(),
                generated = nodes.len(),
                depth = nodes[current].depth,
                "goal reached"
            );
            return Some(reconstruct(&nodes, current));
        }

        // States become visited when popped; stale duplicates of a state may
        // still sit in the frontier and are dropped here.
        if !visited.insert(board) {
            continue;
        }

        let depth = nodes[current].depth + 1;
        for (movement, child) in board.successors() {
            if visited.contains(&child) {
                continue;
            }
            let score = depth + manhattan_to(&child, &goal_at);
            nodes.push(Node {
                board: child,
                parent: Some(current),
                action: Some(movement),
                depth,
                score,
            });
            seq += 1;
            frontier.push(OpenEntry {
                score,
                seq,
                node: nodes.len() - 1,
            });
        }
    }

    debug!(
        expanded = visited.len(),
        generated = nodes.len(),
        "frontier exhausted"
    );
    None
}

fn reconstruct(nodes: &[Node], goal_index: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut index = goal_index;

    while let (Some(parent), Some(action)) = (nodes[index].parent, nodes[index].action) {
        moves.push(action);
        index = parent;
    }

    moves.reverse();
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [u8; CELLS]) -> Board {
        Board::new(cells).expect("valid board")
    }

    #[test]
    fn manhattan_is_zero_only_at_the_goal() {
        let goal = Board::solved_goal();
        assert_eq!(manhattan(&goal, &goal), 0);

        let off_by_two = board([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        assert_eq!(manhattan(&off_by_two, &off_by_two), 0);
        assert_eq!(manhattan(&off_by_two, &goal), 2);
    }

    #[test]
    fn manhattan_handles_arbitrary_goals() {
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let goal = board([1, 2, 3, 8, 0, 4, 7, 6, 5]);
        assert_eq!(manhattan(&start, &goal), 5);
    }

    #[test]
    fn already_solved_start_yields_an_empty_path() {
        let goal = Board::solved_goal();
        assert_eq!(solve(&goal, &goal), Some(Vec::new()));
    }

    #[test]
    fn two_move_instance_solves_right_then_down() {
        let start = board([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        let goal = Board::solved_goal();
        assert_eq!(solve(&start, &goal), Some(vec![Move::Right, Move::Down]));
    }

    #[test]
    fn textbook_instance_is_solved_optimally() {
        let start = board([2, 8, 3, 1, 6, 4, 7, 0, 5]);
        let goal = board([1, 2, 3, 8, 0, 4, 7, 6, 5]);

        let moves = solve(&start, &goal).expect("instance is solvable");
        assert_eq!(moves.len(), 5);

        let mut replay = start;
        for movement in &moves {
            replay = replay
                .try_move(*movement)
                .expect("solution moves are applicable");
        }
        assert_eq!(replay, goal);
    }

    #[test]
    fn shuffled_instances_replay_to_the_goal() {
        let goal = Board::solved_goal();
        for _ in 0..5 {
            let start = Board::shuffled();
            let moves = solve(&start, &goal).expect("shuffled boards stay solvable");

            let mut replay = start;
            for movement in &moves {
                replay = replay
                    .try_move(*movement)
                    .expect("solution moves are applicable");
            }
            assert_eq!(replay, goal);
        }
    }

    #[test]
    fn parity_flipped_start_has_no_solution() {
        let start = board([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(solve(&start, &Board::solved_goal()), None);
    }
}
