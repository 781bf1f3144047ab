#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Path validation system that walks the finished board from start to end.

use log::debug;
use track_builder_core::{BoardView, CellCoord, Command, Direction, Event, Path, PathValidation};

/// Candidates tried when the start cell unexpectedly holds no piece.
const START_FALLBACK: [Direction; 2] = [Direction::Right, Direction::Bottom];

/// Pure system that validates the board once the build phase ends.
#[derive(Debug, Default)]
pub struct Validation;

impl Validation {
    /// Creates a new validation system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and emits a run request when building finishes.
    ///
    /// The board is validated at most once per call, and only when the events
    /// contain [`Event::BuildPhaseEnded`].
    pub fn handle(&mut self, events: &[Event], board: BoardView<'_>, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::BuildPhaseEnded))
        {
            return;
        }

        let validation = validate(board);
        out.push(Command::BeginRun { validation });
    }
}

/// Walks the track from the start cell and reports whether it reaches the end.
///
/// The walk is greedy and deterministic. From each cell it tries the piece's
/// connections in declared order, skipping the edge it entered through, and
/// follows the first neighbour that either is the end cell or holds a piece
/// connecting back. The walk stops as incomplete when no candidate is
/// accepted, when it re-enters a visited cell, or when the path grows longer
/// than the board has cells.
#[must_use]
pub fn validate(board: BoardView<'_>) -> PathValidation {
    let start = board.start();
    let end = board.end();
    let ceiling = board.cell_count();
    let mut visited = VisitedCells::new(board.side());
    let mut path = Path::new(vec![start]);
    let mut current = start;
    let mut entered_through: Option<Direction> = None;

    loop {
        if !visited.insert(current) {
            return finish(false, path, "walk re-entered a visited cell");
        }

        if current == end {
            return finish(true, path, "walk reached the end cell");
        }

        let candidates: &[Direction] = match board.piece(current) {
            Some(piece) => piece.connections(),
            None if current == start => &START_FALLBACK,
            None => &[],
        };

        let accepted = candidates
            .iter()
            .copied()
            .filter(|direction| Some(*direction) != entered_through)
            .find_map(|direction| {
                accept_neighbor(board, current, direction).map(|next| (direction, next))
            });

        let Some((direction, next)) = accepted else {
            return finish(false, path, "walk found no connected neighbour");
        };

        path.push(next);
        current = next;
        entered_through = Some(direction.opposite());

        if path.len() > ceiling {
            return finish(false, path, "walk exceeded the board cell count");
        }
    }
}

fn accept_neighbor(board: BoardView<'_>, from: CellCoord, direction: Direction) -> Option<CellCoord> {
    let neighbor = from.neighbor(direction)?;
    if !board.contains(neighbor) {
        return None;
    }

    if neighbor == board.end() {
        return Some(neighbor);
    }

    let cell = board.cell(neighbor)?;
    if cell.connects(direction.opposite()) {
        Some(neighbor)
    } else {
        None
    }
}

fn finish(complete: bool, path: Path, reason: &str) -> PathValidation {
    debug!(
        "validation finished: complete = {complete}, length = {}, {reason}",
        path.len()
    );
    PathValidation { complete, path }
}

/// Dense row-major visited flags sized to the board.
#[derive(Debug)]
struct VisitedCells {
    side: u32,
    flags: Vec<bool>,
}

impl VisitedCells {
    fn new(side: u32) -> Self {
        let capacity_u64 = u64::from(side) * u64::from(side);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            side,
            flags: vec![false; capacity],
        }
    }

    /// Marks the cell visited, returning `false` when it already was.
    fn insert(&mut self, cell: CellCoord) -> bool {
        let Some(flag) = self.index(cell).and_then(|index| self.flags.get_mut(index)) else {
            return false;
        };

        let fresh = !*flag;
        *flag = true;
        fresh
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.side && cell.row() < self.side {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.side).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_builder_core::{Cell, CellKind, PieceId, TrackPiece, TrackShape};

    /// Row-major board fixture: start and end fixed, everything else empty.
    struct Layout {
        side: u32,
        cells: Vec<Cell>,
    }

    impl Layout {
        fn new(side: u32) -> Self {
            let last = side - 1;
            let mut cells = Vec::new();
            for row in 0..side {
                for column in 0..side {
                    let cell = if column == 0 && row == 0 {
                        Cell::with_piece(
                            CellKind::Start,
                            TrackPiece::new(PieceId::START, TrackShape::Horizontal),
                        )
                    } else if column == last && row == last {
                        Cell::new(CellKind::End)
                    } else {
                        Cell::new(CellKind::Empty)
                    };
                    cells.push(cell);
                }
            }
            Self { side, cells }
        }

        fn set(&mut self, column: u32, row: u32, cell: Cell) -> &mut Self {
            let index = (row * self.side + column) as usize;
            self.cells[index] = cell;
            self
        }

        fn lay(&mut self, column: u32, row: u32, shape: TrackShape) -> &mut Self {
            let kind = self.cells[(row * self.side + column) as usize].kind();
            let id = PieceId::new(row * self.side + column + 1);
            self.set(column, row, Cell::with_piece(kind, TrackPiece::new(id, shape)))
        }

        fn view(&self) -> BoardView<'_> {
            BoardView::new(&self.cells, self.side)
        }
    }

    fn coords(pairs: &[(u32, u32)]) -> Vec<CellCoord> {
        pairs
            .iter()
            .map(|&(column, row)| CellCoord::new(column, row))
            .collect()
    }

    #[test]
    fn bare_board_stops_at_start() {
        let layout = Layout::new(12);
        let result = validate(layout.view());

        assert!(!result.complete);
        assert_eq!(result.path.cells(), &[CellCoord::new(0, 0)]);
    }

    #[test]
    fn staircase_reaches_end_on_every_board_size() {
        for side in 2..=12 {
            let mut layout = Layout::new(side);
            let last = side - 1;
            for column in 1..last {
                let _ = layout.lay(column, 0, TrackShape::Horizontal);
            }
            if last > 0 {
                let _ = layout.lay(last, 0, TrackShape::CurveBottomLeft);
            }
            for row in 1..last {
                let _ = layout.lay(last, row, TrackShape::Vertical);
            }

            let result = validate(layout.view());
            assert!(result.complete, "staircase on {side}x{side} should validate");
            assert_eq!(result.path.len() as u32, 2 * side - 1);
            assert_eq!(result.path.last(), Some(CellCoord::new(last, last)));
        }
    }

    #[test]
    fn zigzag_staircase_reaches_end() {
        let mut layout = Layout::new(4);
        let _ = layout
            .lay(1, 0, TrackShape::CurveBottomLeft)
            .lay(1, 1, TrackShape::CurveTopRight)
            .lay(2, 1, TrackShape::CurveBottomLeft)
            .lay(2, 2, TrackShape::CurveTopRight)
            .lay(3, 2, TrackShape::CurveBottomLeft);

        let result = validate(layout.view());

        assert!(result.complete);
        assert_eq!(
            result.path.cells(),
            coords(&[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2), (3, 2), (3, 3)]).as_slice()
        );
    }

    #[test]
    fn non_reciprocating_piece_stops_path() {
        let mut layout = Layout::new(6);
        let _ = layout
            .lay(1, 0, TrackShape::Horizontal)
            .lay(2, 0, TrackShape::Horizontal)
            .lay(3, 0, TrackShape::Vertical)
            .lay(4, 0, TrackShape::Horizontal);

        let result = validate(layout.view());

        assert!(!result.complete);
        assert_eq!(result.path.cells(), coords(&[(0, 0), (1, 0), (2, 0)]).as_slice());
    }

    #[test]
    fn end_cell_accepted_without_track() {
        let mut layout = Layout::new(3);
        let _ = layout
            .lay(1, 0, TrackShape::Horizontal)
            .lay(2, 0, TrackShape::CurveBottomLeft)
            .lay(2, 1, TrackShape::Vertical);

        let result = validate(layout.view());

        assert!(result.complete);
        assert_eq!(result.path.last(), Some(CellCoord::new(2, 2)));
    }

    #[test]
    fn obstacles_never_join_the_path() {
        let mut layout = Layout::new(4);
        let _ = layout
            .set(1, 0, Cell::new(CellKind::Rock))
            .lay(0, 1, TrackShape::Vertical);

        let result = validate(layout.view());

        assert!(!result.complete);
        assert_eq!(result.path.cells(), &[CellCoord::new(0, 0)]);
    }

    #[test]
    fn first_declared_connection_wins_ties() {
        let mut layout = Layout::new(5);
        let _ = layout
            .lay(1, 0, TrackShape::Cross)
            .lay(2, 0, TrackShape::Horizontal)
            .lay(1, 1, TrackShape::Vertical);

        let result = validate(layout.view());

        assert_eq!(result.path.cells()[2], CellCoord::new(2, 0));
    }

    #[test]
    fn loop_back_into_visited_cell_is_incomplete() {
        let mut layout = Layout::new(4);
        let _ = layout
            .lay(1, 0, TrackShape::Cross)
            .lay(2, 0, TrackShape::CurveBottomLeft)
            .lay(2, 1, TrackShape::CurveTopLeft)
            .lay(1, 1, TrackShape::Cross);

        let result = validate(layout.view());

        assert!(!result.complete);
        assert_eq!(
            result.path.cells(),
            coords(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (1, 0)]).as_slice()
        );
    }

    #[test]
    fn pieceless_start_falls_back_to_right_then_bottom() {
        // Dead-path coverage: boards always lay a piece on the start cell.
        let mut layout = Layout::new(3);
        let _ = layout
            .set(0, 0, Cell::new(CellKind::Start))
            .lay(0, 1, TrackShape::Vertical);

        let result = validate(layout.view());
        assert_eq!(
            result.path.cells(),
            coords(&[(0, 0), (0, 1)]).as_slice(),
            "bottom is tried after right finds no piece",
        );

        let _ = layout.lay(1, 0, TrackShape::Horizontal);
        let result = validate(layout.view());
        assert_eq!(result.path.cells()[1], CellCoord::new(1, 0));
    }

    #[test]
    fn handle_validates_only_when_build_phase_ends() {
        let layout = Layout::new(4);
        let mut validation = Validation::new();
        let mut commands = Vec::new();

        validation.handle(&[Event::BuildPhaseEnded], layout.view(), &mut commands);
        validation.handle(&[Event::TrainStepDue], layout.view(), &mut commands);

        assert_eq!(
            commands,
            vec![Command::BeginRun {
                validation: PathValidation {
                    complete: false,
                    path: Path::new(vec![CellCoord::new(0, 0)]),
                },
            }]
        );
    }
}
