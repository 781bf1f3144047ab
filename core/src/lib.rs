#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Track Builder engine.
//!
//! This crate defines the connectivity model for track pieces and the message
//! surface that connects adapters, the authoritative world, and pure systems.
//! Adapters submit [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values for systems to react to deterministically. Systems consume
//! event streams, query immutable views such as [`BoardView`], and respond
//! exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Track Builder. Lay the line from A to B!";

/// Points awarded for every cell the train advances.
pub const STEP_REWARD: u32 = 10;

/// Points awarded instead of [`STEP_REWARD`] when the train enters a bonus cell.
pub const BONUS_REWARD: u32 = 50;

/// Points awarded for every piece placed during the build phase.
pub const PLACEMENT_REWARD: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current round and starts over at the first level.
    NewGame,
    /// Advances to the next level after a won round.
    NextLevel,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Places the current piece into the provided cell.
    PlacePiece {
        /// Cell that should receive the current piece.
        cell: CellCoord,
    },
    /// Moves the current piece into storage and draws the next one.
    StorePiece,
    /// Exchanges the current piece with the stored piece.
    SwapStored,
    /// Ends the build phase before the build clock expires.
    EndBuildPhase,
    /// Starts the run phase using the outcome of path validation.
    BeginRun {
        /// Result of validating the board at the end of the build phase.
        validation: PathValidation,
    },
    /// Applies a train step computed by the train simulator.
    ResolveTrainStep {
        /// Transition the train should undergo.
        step: TrainStep,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fresh round is ready for building.
    RoundStarted {
        /// Level of the round that started.
        level: u32,
    },
    /// Reports the build time left after a tick.
    BuildClockAdvanced {
        /// Build time remaining before the run starts.
        remaining: Duration,
    },
    /// Announces that the build phase is over and the board must be validated.
    BuildPhaseEnded,
    /// Confirms that a piece was placed onto the board.
    PiecePlaced {
        /// Piece that was placed.
        piece: TrackPiece,
        /// Cell that received the piece.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that the current piece was moved into storage.
    PieceStored {
        /// Piece that now occupies storage.
        piece: TrackPiece,
    },
    /// Confirms that the current and stored pieces traded places.
    PiecesSwapped {
        /// Piece that became current.
        current: TrackPiece,
        /// Piece that moved into storage.
        stored: TrackPiece,
    },
    /// Reports that a store or swap request was rejected.
    QueueRejected {
        /// Specific reason the queue operation failed.
        reason: QueueError,
    },
    /// Reports that a round transition request was rejected.
    RoundRejected {
        /// Specific reason the transition failed.
        reason: RoundError,
    },
    /// Announces that the train departed from the start cell.
    RunStarted {
        /// Whether validation found a complete path to the end cell.
        complete: bool,
        /// Number of cells on the validated path.
        path_len: usize,
    },
    /// Requests that the train simulator compute the next step.
    TrainStepDue,
    /// Confirms that the train moved between two cells.
    TrainAdvanced {
        /// Cell the train occupied before moving.
        from: CellCoord,
        /// Cell the train occupies after moving.
        to: CellCoord,
        /// Points awarded for the move.
        reward: u32,
    },
    /// Announces that the run reached a terminal outcome.
    RunConcluded {
        /// Outcome of the run.
        outcome: RunOutcome,
    },
}

/// Compass-relative edges a track piece may connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Edge toward decreasing row indices.
    Top,
    /// Edge toward increasing column indices.
    Right,
    /// Edge toward increasing row indices.
    Bottom,
    /// Edge toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting at the top edge.
    pub const ALL: [Direction; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns the direction facing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

/// Fixed geometries a track piece can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackShape {
    /// Straight piece joining the left and right edges.
    Horizontal,
    /// Straight piece joining the top and bottom edges.
    Vertical,
    /// Curve joining the top and left edges.
    CurveTopLeft,
    /// Curve joining the top and right edges.
    CurveTopRight,
    /// Curve joining the bottom and left edges.
    CurveBottomLeft,
    /// Curve joining the bottom and right edges.
    CurveBottomRight,
    /// Crossing joining all four edges.
    Cross,
}

const HORIZONTAL: [Direction; 2] = [Direction::Left, Direction::Right];
const VERTICAL: [Direction; 2] = [Direction::Top, Direction::Bottom];
const CURVE_TOP_LEFT: [Direction; 2] = [Direction::Top, Direction::Left];
const CURVE_TOP_RIGHT: [Direction; 2] = [Direction::Top, Direction::Right];
const CURVE_BOTTOM_LEFT: [Direction; 2] = [Direction::Bottom, Direction::Left];
const CURVE_BOTTOM_RIGHT: [Direction; 2] = [Direction::Bottom, Direction::Right];
const CROSS: [Direction; 4] = Direction::ALL;

impl TrackShape {
    /// Every shape, in the order generators index them.
    pub const ALL: [TrackShape; 7] = [
        Self::Horizontal,
        Self::Vertical,
        Self::CurveTopLeft,
        Self::CurveTopRight,
        Self::CurveBottomLeft,
        Self::CurveBottomRight,
        Self::Cross,
    ];

    /// Edges joined by the shape, in declared order.
    ///
    /// The order is significant: the path validator tries candidates in this
    /// order and the first reciprocated neighbour wins.
    #[must_use]
    pub const fn connections(self) -> &'static [Direction] {
        match self {
            Self::Horizontal => &HORIZONTAL,
            Self::Vertical => &VERTICAL,
            Self::CurveTopLeft => &CURVE_TOP_LEFT,
            Self::CurveTopRight => &CURVE_TOP_RIGHT,
            Self::CurveBottomLeft => &CURVE_BOTTOM_LEFT,
            Self::CurveBottomRight => &CURVE_BOTTOM_RIGHT,
            Self::Cross => &CROSS,
        }
    }

    /// Reports whether the shape joins the provided edge.
    #[must_use]
    pub fn connects(self, direction: Direction) -> bool {
        self.connections().contains(&direction)
    }
}

/// Unique identifier assigned to a track piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    /// Identifier reserved for the piece laid on the start cell.
    pub const START: PieceId = PieceId(0);

    /// Creates a new piece identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable track piece drawn from the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackPiece {
    id: PieceId,
    shape: TrackShape,
}

impl TrackPiece {
    /// Creates a piece with the provided identifier and shape.
    #[must_use]
    pub const fn new(id: PieceId, shape: TrackShape) -> Self {
        Self { id, shape }
    }

    /// Identifier assigned to the piece.
    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    /// Geometry of the piece.
    #[must_use]
    pub const fn shape(&self) -> TrackShape {
        self.shape
    }

    /// Edges joined by the piece, derived from its shape.
    #[must_use]
    pub const fn connections(&self) -> &'static [Direction] {
        self.shape.connections()
    }

    /// Reports whether the piece joins the provided edge.
    #[must_use]
    pub fn connects(&self, direction: Direction) -> bool {
        self.shape.connects(direction)
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Offsets the coordinate one cell toward the provided edge.
    ///
    /// No board extents are consulted; callers must bounds-check the result
    /// against the board. Offsets that would leave the unsigned coordinate
    /// space return `None`.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::Top => Some(Self::new(self.column, self.row.checked_sub(1)?)),
            Direction::Right => Some(Self::new(self.column.checked_add(1)?, self.row)),
            Direction::Bottom => Some(Self::new(self.column, self.row.checked_add(1)?)),
            Direction::Left => Some(Self::new(self.column.checked_sub(1)?, self.row)),
        }
    }

    /// Direction of a single orthogonal step from `self` to `other`.
    ///
    /// Returns `None` for any delta other than one cell horizontally or
    /// vertically.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        let column_diff = self.column.abs_diff(other.column);
        let row_diff = self.row.abs_diff(other.row);

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column > self.column {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if other.row > self.row {
            Some(Direction::Bottom)
        } else {
            Some(Direction::Top)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Classification of a board cell, fixed for the lifetime of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open ground that accepts a piece.
    Empty,
    /// Impassable rock.
    Rock,
    /// Impassable tree.
    Tree,
    /// Open ground that accepts a piece and pays a bonus when the train enters.
    Bonus,
    /// Departure cell in the top-left corner.
    Start,
    /// Destination cell in the bottom-right corner.
    End,
}

impl CellKind {
    /// Reports whether players may place pieces onto cells of this kind.
    #[must_use]
    pub const fn accepts_piece(self) -> bool {
        matches!(self, Self::Empty | Self::Bonus)
    }
}

/// Ground a generator may lay on an interior cell.
///
/// Start and end cells are fixed by the board and cannot be generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open ground.
    Open,
    /// Impassable rock.
    Rock,
    /// Impassable tree.
    Tree,
    /// Open ground paying a bonus.
    Bonus,
}

impl From<Terrain> for CellKind {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Open => CellKind::Empty,
            Terrain::Rock => CellKind::Rock,
            Terrain::Tree => CellKind::Tree,
            Terrain::Bonus => CellKind::Bonus,
        }
    }
}

/// Single board cell: its fixed kind plus the piece placed on it, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
    piece: Option<TrackPiece>,
}

impl Cell {
    /// Creates a cell of the provided kind without a piece.
    #[must_use]
    pub const fn new(kind: CellKind) -> Self {
        Self { kind, piece: None }
    }

    /// Creates a cell of the provided kind holding a piece.
    #[must_use]
    pub const fn with_piece(kind: CellKind, piece: TrackPiece) -> Self {
        Self {
            kind,
            piece: Some(piece),
        }
    }

    /// Kind of the cell.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Piece placed on the cell, if any.
    #[must_use]
    pub const fn piece(&self) -> Option<TrackPiece> {
        self.piece
    }

    /// Reports whether the cell's piece joins the provided edge.
    ///
    /// Cells without a piece join nothing.
    #[must_use]
    pub fn connects(&self, direction: Direction) -> bool {
        self.piece.is_some_and(|piece| piece.connects(direction))
    }
}

/// Read-only view into a square, row-major board of cells.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    cells: &'a [Cell],
    side: u32,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided cell slice.
    ///
    /// The slice must hold exactly `side * side` cells in row-major order.
    #[must_use]
    pub fn new(cells: &'a [Cell], side: u32) -> Self {
        debug_assert_eq!(
            Some(cells.len()),
            usize::try_from(side).ok().and_then(|side| side.checked_mul(side)),
            "board slice must hold side * side cells",
        );
        Self { cells, side }
    }

    /// Number of cells along each board edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Departure cell, always the top-left corner.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        CellCoord::new(0, 0)
    }

    /// Destination cell, always the bottom-right corner.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        let last = self.side.saturating_sub(1);
        CellCoord::new(last, last)
    }

    /// Reports whether the coordinate lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.side && cell.row() < self.side
    }

    /// Returns the cell stored at the coordinate, if it lies on the board.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&'a Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Returns the piece placed at the coordinate, if any.
    #[must_use]
    pub fn piece(&self, cell: CellCoord) -> Option<TrackPiece> {
        self.cell(cell).and_then(Cell::piece)
    }

    /// Reports whether a piece may be placed at the coordinate.
    ///
    /// Placement requires an in-bounds empty or bonus cell that does not hold
    /// a piece yet.
    #[must_use]
    pub fn can_place(&self, cell: CellCoord) -> bool {
        self.placement_error(cell).is_none()
    }

    /// Explains why a piece may not be placed at the coordinate.
    ///
    /// Returns `None` when placement is permitted. The build phase is not
    /// consulted here; the world rejects placements outside it separately.
    #[must_use]
    pub fn placement_error(&self, cell: CellCoord) -> Option<PlacementError> {
        let Some(target) = self.cell(cell) else {
            return Some(PlacementError::OutOfBounds);
        };

        if !target.kind().accepts_piece() {
            return Some(PlacementError::Blocked);
        }

        if target.piece().is_some() {
            return Some(PlacementError::Occupied);
        }

        None
    }

    /// Iterator over every coordinate and cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &'a Cell)> + 'a {
        let side = self.side;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            (CellCoord::new(index % side, index / side), cell)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.side).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Ordered sequence of cells followed by the train.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Creates a path visiting the provided cells in order.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }

    /// Cells composing the path.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of cells on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the path holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First position at or after `from` where the path records the cell.
    #[must_use]
    pub fn position_from(&self, from: usize, cell: CellCoord) -> Option<usize> {
        self.cells
            .get(from..)?
            .iter()
            .position(|candidate| *candidate == cell)
            .map(|offset| from + offset)
    }

    /// Cell recorded after the provided position, if any.
    #[must_use]
    pub fn after(&self, position: usize) -> Option<CellCoord> {
        self.cells.get(position.checked_add(1)?).copied()
    }

    /// Appends a cell to the end of the path.
    pub fn push(&mut self, cell: CellCoord) {
        self.cells.push(cell);
    }

    /// Last cell of the path, if any.
    #[must_use]
    pub fn last(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }
}

/// Result of walking the board from the start cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathValidation {
    /// Whether the walk reached the end cell.
    pub complete: bool,
    /// Cells visited by the walk, starting at the start cell.
    pub path: Path,
}

/// Lifecycle of the train across a single run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainStatus {
    /// The train has not departed yet.
    #[default]
    Idle,
    /// The train is travelling along the path.
    Running,
    /// The train reached the end cell.
    Won,
    /// The train derailed or ran out of track.
    Lost,
}

impl TrainStatus {
    /// Reports whether the status no longer accepts steps.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reasons the train may leave the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerailCause {
    /// The occupied cell has no connection toward the next path cell.
    MissingExit,
    /// The next path cell has no connection back toward the train.
    MissingEntry,
    /// The next path cell is not a single orthogonal step away.
    NotAdjacent,
    /// The path ended before the end cell.
    PathExhausted,
}

/// Single transition computed by the train simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainStep {
    /// The train moved one cell along the path.
    Advanced {
        /// Cell the train left.
        from: CellCoord,
        /// Cell the train entered.
        to: CellCoord,
        /// Points awarded for the move.
        reward: u32,
    },
    /// The train stands on the end cell with no further path, so the run is won.
    Arrived,
    /// The train could not continue, so the run is lost.
    Derailed {
        /// Cell the train occupied when it derailed.
        at: CellCoord,
        /// Reason the train derailed.
        cause: DerailCause,
    },
    /// The train is idle or already finished and does not move.
    Stalled,
}

/// Position and progress of the train along a validated path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainState {
    position: Option<CellCoord>,
    progress: usize,
    path: Path,
    status: TrainStatus,
}

impl TrainState {
    /// Creates an idle train that will follow the provided path.
    #[must_use]
    pub fn new(path: Path) -> Self {
        Self {
            position: None,
            progress: 0,
            path,
            status: TrainStatus::Idle,
        }
    }

    /// Cell currently occupied by the train, if it departed.
    #[must_use]
    pub const fn position(&self) -> Option<CellCoord> {
        self.position
    }

    /// Index along the path of the cell the train last reached.
    ///
    /// Paths ending in a loop record one cell twice; the train locates itself
    /// at or after this index so it never travels a loop more than once.
    #[must_use]
    pub const fn progress(&self) -> usize {
        self.progress
    }

    /// Path the train follows.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Current lifecycle status of the train.
    #[must_use]
    pub const fn status(&self) -> TrainStatus {
        self.status
    }

    /// Places the train on the start cell and begins running.
    ///
    /// Returns `false` without changes unless the train is idle.
    pub fn depart(&mut self, start: CellCoord) -> bool {
        if self.status != TrainStatus::Idle {
            return false;
        }

        self.position = Some(start);
        self.progress = 0;
        self.status = TrainStatus::Running;
        true
    }

    /// Applies a step, mutating position and status.
    ///
    /// Steps are ignored unless the train is running.
    pub fn apply(&mut self, step: &TrainStep) {
        if self.status != TrainStatus::Running {
            return;
        }

        match *step {
            TrainStep::Advanced { to, .. } => {
                if let Some(index) = self.path.position_from(self.progress, to) {
                    self.progress = index;
                }
                self.position = Some(to);
            }
            TrainStep::Arrived => self.status = TrainStatus::Won,
            TrainStep::Derailed { .. } => self.status = TrainStatus::Lost,
            TrainStep::Stalled => {}
        }
    }
}

/// Phase of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// The build clock is running and pieces may be placed.
    Building,
    /// The board is frozen and the train is travelling.
    Running,
    /// The run finished with the provided outcome.
    Concluded(RunOutcome),
}

/// Terminal result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The train reached the end cell.
    Won,
    /// The train derailed or ran out of track.
    Lost,
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The round is not in the build phase.
    InvalidPhase,
    /// The requested cell lies outside the board.
    OutOfBounds,
    /// The requested cell is an obstacle, the start, or the end.
    Blocked,
    /// The requested cell already holds a piece.
    Occupied,
}

/// Reasons a store or swap request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueError {
    /// The round is not in the build phase.
    InvalidPhase,
    /// A piece is already held in storage.
    StorageOccupied,
    /// No piece is held in storage.
    StorageEmpty,
}

/// Reasons a round transition may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundError {
    /// The current round has not been won.
    NotWon,
}

/// Source of randomness the world consumes for pieces and terrain.
///
/// The world treats implementations as black boxes: any shape is valid and
/// obstacle density may scale with the level.
pub trait TrackGenerator: fmt::Debug {
    /// Draws the shape of the next piece entering the queue.
    fn next_shape(&mut self) -> TrackShape;

    /// Chooses the ground for an interior cell of a board at the given level.
    fn terrain(&mut self, cell: CellCoord, level: u32) -> Terrain;
}
