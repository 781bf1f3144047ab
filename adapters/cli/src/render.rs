//! Text rendering of the board, the status line and notable events.

use std::fmt::Write as _;

use track_builder_core::{
    BoardView, Cell, CellKind, Event, PlacementError, QueueError, RoundError, RoundPhase,
    RunOutcome, TrackPiece, TrackShape, TrainState,
};
use track_builder_world::{query, World};

const TRAIN_GLYPH: char = '@';

/// Draws the board with column and row labels, the train drawn over its cell.
pub(crate) fn board(view: BoardView<'_>, train: &TrainState) -> String {
    let mut out = String::from("   ");
    for column in 0..view.side() {
        let _ = write!(out, "{}", column % 10);
    }
    out.push('\n');

    let mut row = None;
    for (coord, cell) in view.iter() {
        if row != Some(coord.row()) {
            if row.is_some() {
                out.push('\n');
            }
            row = Some(coord.row());
            let _ = write!(out, "{:>2} ", coord.row());
        }

        let glyph = if train.position() == Some(coord) {
            TRAIN_GLYPH
        } else {
            cell_glyph(cell)
        };
        out.push(glyph);
    }

    out
}

/// Summarises phase, level, score, clock and piece queue on one line.
pub(crate) fn status(world: &World) -> String {
    let phase = match query::phase(world) {
        RoundPhase::Building => format!(
            "building, {:.1}s left",
            query::build_time_remaining(world).as_secs_f64()
        ),
        RoundPhase::Running => "train running".to_owned(),
        RoundPhase::Concluded(RunOutcome::Won) => "won, type `next`".to_owned(),
        RoundPhase::Concluded(RunOutcome::Lost) => "lost, type `new`".to_owned(),
    };

    let upcoming: String = query::upcoming_pieces(world)
        .iter()
        .map(|piece| shape_glyph(piece.shape()))
        .collect();
    let stored = query::stored_piece(world).map_or('-', |piece| shape_glyph(piece.shape()));

    format!(
        "level {} | score {} | {phase} | piece {} | stored {stored} | next {upcoming}",
        query::level(world),
        query::score(world),
        shape_glyph(query::current_piece(world).shape()),
    )
}

/// Describes events worth telling the player about.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::RoundStarted { level } => format!("Level {level}: lay track from S to E."),
        Event::BuildPhaseEnded => "Build phase over.".to_owned(),
        Event::PiecePlaced { piece, cell } => format!("Placed {} at {cell}.", piece_name(piece)),
        Event::PlacementRejected { cell, reason } => {
            format!("Cannot place at {cell}: {}.", placement_reason(*reason))
        }
        Event::PieceStored { piece } => format!("Stored {}.", piece_name(piece)),
        Event::PiecesSwapped { current, .. } => {
            format!("Swapped, now holding {}.", piece_name(current))
        }
        Event::QueueRejected { reason } => format!("{}.", queue_reason(*reason)),
        Event::RoundRejected {
            reason: RoundError::NotWon,
        } => "Win the round before moving on.".to_owned(),
        Event::RunStarted { complete, path_len } => {
            let verdict = if *complete { "a complete" } else { "an incomplete" };
            format!("Train departs on {verdict} track of {path_len} cells.")
        }
        Event::TrainAdvanced { to, reward, .. } => format!("Train reaches {to} (+{reward})."),
        Event::RunConcluded {
            outcome: RunOutcome::Won,
        } => "The train arrived. Round won!".to_owned(),
        Event::RunConcluded {
            outcome: RunOutcome::Lost,
        } => "The train derailed. Round lost.".to_owned(),
        Event::TimeAdvanced { .. }
        | Event::BuildClockAdvanced { .. }
        | Event::TrainStepDue => return None,
    };
    Some(text)
}

fn cell_glyph(cell: &Cell) -> char {
    match (cell.kind(), cell.piece()) {
        (CellKind::Start, _) => 'S',
        (CellKind::End, _) => 'E',
        (_, Some(piece)) => shape_glyph(piece.shape()),
        (CellKind::Rock, None) => '^',
        (CellKind::Tree, None) => 'T',
        (CellKind::Bonus, None) => '*',
        (CellKind::Empty, None) => '.',
    }
}

const fn shape_glyph(shape: TrackShape) -> char {
    match shape {
        TrackShape::Horizontal => '─',
        TrackShape::Vertical => '│',
        TrackShape::CurveTopLeft => '┘',
        TrackShape::CurveTopRight => '└',
        TrackShape::CurveBottomLeft => '┐',
        TrackShape::CurveBottomRight => '┌',
        TrackShape::Cross => '┼',
    }
}

fn piece_name(piece: &TrackPiece) -> String {
    format!("{} #{}", shape_glyph(piece.shape()), piece.id().get())
}

const fn placement_reason(reason: PlacementError) -> &'static str {
    match reason {
        PlacementError::InvalidPhase => "the build phase is over",
        PlacementError::OutOfBounds => "outside the board",
        PlacementError::Blocked => "the cell does not take track",
        PlacementError::Occupied => "the cell already holds track",
    }
}

const fn queue_reason(reason: QueueError) -> &'static str {
    match reason {
        QueueError::InvalidPhase => "Pieces can only be handled while building",
        QueueError::StorageOccupied => "Storage is already full",
        QueueError::StorageEmpty => "Storage is empty",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_builder_core::{CellCoord, Path, PieceId, TrainStep};

    fn cells() -> Vec<Cell> {
        vec![
            Cell::with_piece(
                CellKind::Start,
                TrackPiece::new(PieceId::START, TrackShape::Horizontal),
            ),
            Cell::with_piece(
                CellKind::Bonus,
                TrackPiece::new(PieceId::new(4), TrackShape::CurveBottomLeft),
            ),
            Cell::new(CellKind::Rock),
            Cell::new(CellKind::End),
        ]
    }

    #[test]
    fn board_labels_rows_and_columns() {
        let cells = cells();
        let view = BoardView::new(&cells, 2);

        assert_eq!(board(view, &TrainState::default()), "   01\n 0 S┐\n 1 ^E");
    }

    #[test]
    fn train_is_drawn_over_its_cell() {
        let cells = cells();
        let view = BoardView::new(&cells, 2);
        let mut train = TrainState::new(Path::new(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
        ]));
        assert!(train.depart(CellCoord::new(0, 0)));
        train.apply(&TrainStep::Advanced {
            from: CellCoord::new(0, 0),
            to: CellCoord::new(1, 0),
            reward: 50,
        });

        assert_eq!(board(view, &train), "   01\n 0 S@\n 1 ^E");
    }

    #[test]
    fn clock_events_stay_quiet() {
        assert_eq!(describe(&Event::TrainStepDue), None);
        assert_eq!(
            describe(&Event::PlacementRejected {
                cell: CellCoord::new(3, 1),
                reason: PlacementError::Occupied,
            }),
            Some("Cannot place at (3, 1): the cell already holds track.".to_owned())
        );
    }
}
