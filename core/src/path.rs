use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Per-cell bookkeeping for one search run.
#[derive(Copy, Clone, Debug, Default)]
struct Node {
    g: CellCount,
    h: CellCount,
    f: CellCount,
    parent: Option<Coord2>,
    opened: bool,
    closed: bool,
}

const fn manhattan(a: Coord2, b: Coord2) -> CellCount {
    a.0.abs_diff(b.0) as CellCount + a.1.abs_diff(b.1) as CellCount
}

/// Shortest 4-connected walk through empty cells from `from` to `to`.
///
/// Returns the cells after the origin up to and including the destination,
/// or `None` when no corridor exists. The origin itself is never
/// obstacle-checked, the search starts from it directly.
pub fn find_path(board: &Board, from: Coord2, to: Coord2) -> Option<Vec<Coord2>> {
    let mut nodes: Array2<Node> = Array2::default(board.size().to_nd_index());
    let mut open: Vec<Coord2> = Vec::new();

    nodes[from.to_nd_index()].opened = true;
    open.push(from);

    while !open.is_empty() {
        // First strict minimum wins. Removal keeps insertion order so later
        // ties resolve the same way on every run.
        let mut index = 0;
        for i in 1..open.len() {
            if nodes[open[i].to_nd_index()].f < nodes[open[index].to_nd_index()].f {
                index = i;
            }
        }
        let current = open.remove(index);

        if current == to {
            return Some(reconstruct(&nodes, current));
        }
        nodes[current.to_nd_index()].closed = true;

        for neighbor in board.iter_neighbors(current) {
            if nodes[neighbor.to_nd_index()].closed || !board.is_empty_at(neighbor) {
                continue;
            }

            let tentative = nodes[current.to_nd_index()].g + 1;
            let opened = nodes[neighbor.to_nd_index()].opened;
            if !opened {
                let node = &mut nodes[neighbor.to_nd_index()];
                node.opened = true;
                node.h = manhattan(neighbor, to);
                open.push(neighbor);
            }

            let node = &mut nodes[neighbor.to_nd_index()];
            if !opened || tentative < node.g {
                node.parent = Some(current);
                node.g = tentative;
                node.f = tentative + node.h;
            }
        }
    }

    None
}

/// Follows parent links back to the origin and reverses.
fn reconstruct(nodes: &Array2<Node>, mut current: Coord2) -> Vec<Coord2> {
    let mut path = Vec::new();
    while let Some(parent) = nodes[current.to_nd_index()].parent {
        path.push(current);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use rand::prelude::*;

    fn assert_valid_path(board: &Board, from: Coord2, to: Coord2, path: &[Coord2]) {
        let mut previous = from;
        for &coords in path {
            assert!(board.is_empty_at(coords));
            let step = previous.0.abs_diff(coords.0) + previous.1.abs_diff(coords.1);
            assert_eq!(step, 1);
            previous = coords;
        }
        assert_eq!(previous, to);
    }

    fn bfs_distance(board: &Board, from: Coord2, to: Coord2) -> Option<usize> {
        if from == to {
            return Some(0);
        }
        let mut dist: Array2<Option<usize>> = Array2::default(board.size().to_nd_index());
        dist[from.to_nd_index()] = Some(0);
        let mut to_visit = VecDeque::from([from]);

        while let Some(coords) = to_visit.pop_front() {
            let here = dist[coords.to_nd_index()].unwrap();
            for neighbor in board.iter_neighbors(coords) {
                if !board.is_empty_at(neighbor) || dist[neighbor.to_nd_index()].is_some() {
                    continue;
                }
                dist[neighbor.to_nd_index()] = Some(here + 1);
                if neighbor == to {
                    return Some(here + 1);
                }
                to_visit.push_back(neighbor);
            }
        }

        None
    }

    #[test]
    fn origin_ball_does_not_block_the_search() {
        let mut board = Board::new();
        board[(0, 0)] = Cell::Ball(Color::Blue);

        let path = find_path(&board, (0, 0), (2, 0)).unwrap();

        assert_eq!(path, [(1, 0), (2, 0)]);
    }

    #[test]
    fn detour_around_a_wall_stays_shortest() {
        let mut board = Board::new();
        for y in 0..8 {
            board[(4, y)] = Cell::Ball(Color::Red);
        }

        let path = find_path(&board, (0, 0), (8, 0)).unwrap();

        assert_eq!(path.len(), 24);
        assert_valid_path(&board, (0, 0), (8, 0), &path);
    }

    #[test]
    fn enclosed_origin_is_unreachable() {
        let mut board = Board::new();
        board[(0, 0)] = Cell::Ball(Color::Blue);
        board[(1, 0)] = Cell::Ball(Color::Red);
        board[(0, 1)] = Cell::Ball(Color::Red);

        assert_eq!(find_path(&board, (0, 0), (5, 5)), None);
    }

    #[test]
    fn path_length_matches_bfs_distance_on_random_boards() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut board = Board::new();
            let (x_end, y_end) = board.size();
            for y in 0..y_end {
                for x in 0..x_end {
                    if rng.random_range(0..100) < 35 {
                        board[(x, y)] = Cell::Ball(Color::random(&mut rng));
                    }
                }
            }

            let from = (rng.random_range(0..x_end), rng.random_range(0..y_end));
            let to = (rng.random_range(0..x_end), rng.random_range(0..y_end));
            if from == to {
                continue;
            }
            board[from] = Cell::Ball(Color::Blue);
            board[to] = Cell::Empty;

            match find_path(&board, from, to) {
                Some(path) => {
                    assert_eq!(Some(path.len()), bfs_distance(&board, from, to));
                    assert_valid_path(&board, from, to, &path);
                }
                None => assert_eq!(bfs_distance(&board, from, to), None),
            }
        }
    }
}
