#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Train simulator that advances the train one cell per due step.
//!
//! The transition logic is a pure function of the train and the board so it
//! can be exercised without any clock. The [`TrainSimulator`] system only
//! decides *when* to evaluate it: the world announces [`Event::TrainStepDue`]
//! on its own cadence and the system answers with a single
//! [`Command::ResolveTrainStep`].

use log::debug;
use track_builder_core::{
    BoardView, CellCoord, CellKind, Command, DerailCause, Event, TrainState, TrainStatus, TrainStep,
    BONUS_REWARD, STEP_REWARD,
};

/// Pure system that reacts to due steps by computing the next train transition.
#[derive(Debug, Default)]
pub struct TrainSimulator;

impl TrainSimulator {
    /// Creates a new train simulator system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and emits the next train step when one is due.
    pub fn handle(
        &mut self,
        events: &[Event],
        train: &TrainState,
        board: BoardView<'_>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TrainStepDue))
        {
            return;
        }

        out.push(Command::ResolveTrainStep {
            step: step(train, board),
        });
    }
}

/// Computes the transition the train undergoes on its next tick.
///
/// A running train looks up its cell on the path and tries to move to the
/// following cell. The move succeeds only when the occupied piece connects
/// toward the next cell and the next cell connects back, with the end cell
/// exempt from the second check. A train with nowhere left to go has arrived
/// when it stands on the end cell and has derailed otherwise. Idle and
/// finished trains stall.
#[must_use]
pub fn step(train: &TrainState, board: BoardView<'_>) -> TrainStep {
    if train.status() != TrainStatus::Running {
        return TrainStep::Stalled;
    }

    let Some(current) = train.position() else {
        return TrainStep::Stalled;
    };

    let path = train.path();
    let next = path
        .position_from(train.progress(), current)
        .and_then(|index| path.after(index));

    let Some(next) = next else {
        if current == board.end() {
            return TrainStep::Arrived;
        }
        return derail(current, DerailCause::PathExhausted);
    };

    let Some(direction) = current.direction_to(next) else {
        debug_assert!(false, "path step {current} -> {next} is not a unit step");
        return derail(current, DerailCause::NotAdjacent);
    };

    let leaves = board
        .cell(current)
        .is_some_and(|cell| cell.connects(direction));
    if !leaves {
        return derail(current, DerailCause::MissingExit);
    }

    let Some(destination) = board.cell(next) else {
        return derail(current, DerailCause::MissingEntry);
    };

    let enters =
        destination.kind() == CellKind::End || destination.connects(direction.opposite());
    if !enters {
        return derail(current, DerailCause::MissingEntry);
    }

    let reward = if destination.kind() == CellKind::Bonus {
        BONUS_REWARD
    } else {
        STEP_REWARD
    };

    TrainStep::Advanced {
        from: current,
        to: next,
        reward,
    }
}

/// Returns the train as it stands after its next tick.
#[must_use]
pub fn tick(train: &TrainState, board: BoardView<'_>) -> TrainState {
    let mut next = train.clone();
    next.apply(&step(train, board));
    next
}

fn derail(at: CellCoord, cause: DerailCause) -> TrainStep {
    debug!("train derails at {at}: {cause:?}");
    TrainStep::Derailed { at, cause }
}
