#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Track Builder.

mod board;
mod queue;

use std::time::Duration;

use log::{debug, info};
use track_builder_core::{
    Command, Event, Path, PlacementError, QueueError, RoundError, RoundPhase, RunOutcome,
    TrackGenerator, TrainState, TrainStatus, TrainStep, PLACEMENT_REWARD, WELCOME_BANNER,
};

use crate::{board::Board, queue::PieceQueue};

const DEFAULT_BOARD_SIDE: u32 = 12;
const MIN_BOARD_SIDE: u32 = 2;
const DEFAULT_BUILD_TIME: Duration = Duration::from_secs(60);
const DEFAULT_QUEUE_LENGTH: usize = 5;
const DEFAULT_RUN_STEP_BASE: Duration = Duration::from_millis(500);
const DEFAULT_RUN_STEP_PER_LEVEL: Duration = Duration::from_millis(50);
const DEFAULT_RUN_STEP_FLOOR: Duration = Duration::from_millis(200);
const FIRST_LEVEL: u32 = 1;

/// Tunable parameters for a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of cells along each board edge. Values below two are raised to two.
    pub board_side: u32,
    /// Length of the build phase.
    pub build_time: Duration,
    /// Number of upcoming pieces shown after the current piece.
    pub queue_length: usize,
    /// Train step interval at level zero.
    pub run_step_base: Duration,
    /// Reduction of the train step interval per level.
    pub run_step_per_level: Duration,
    /// Shortest train step interval regardless of level.
    pub run_step_floor: Duration,
}

impl GameConfig {
    /// Interval between train steps at the provided level.
    #[must_use]
    pub fn run_step_interval(&self, level: u32) -> Duration {
        self.run_step_base
            .saturating_sub(self.run_step_per_level.saturating_mul(level))
            .max(self.run_step_floor)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_side: DEFAULT_BOARD_SIDE,
            build_time: DEFAULT_BUILD_TIME,
            queue_length: DEFAULT_QUEUE_LENGTH,
            run_step_base: DEFAULT_RUN_STEP_BASE,
            run_step_per_level: DEFAULT_RUN_STEP_PER_LEVEL,
            run_step_floor: DEFAULT_RUN_STEP_FLOOR,
        }
    }
}

/// Represents the authoritative Track Builder world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    generator: Box<dyn TrackGenerator>,
    board: Board,
    queue: PieceQueue,
    score: u32,
    level: u32,
    phase: RoundPhase,
    build_remaining: Duration,
    run_accumulator: Duration,
    step_pending: bool,
    validated_path: Path,
    train: TrainState,
}

impl World {
    /// Creates a world at the first level, ready for building.
    #[must_use]
    pub fn new(mut config: GameConfig, generator: impl TrackGenerator + 'static) -> Self {
        config.board_side = config.board_side.max(MIN_BOARD_SIDE);
        let mut generator: Box<dyn TrackGenerator> = Box::new(generator);
        let board = Board::generate(config.board_side, FIRST_LEVEL, generator.as_mut());
        let queue = PieceQueue::new(config.queue_length, generator.as_mut());
        Self {
            banner: WELCOME_BANNER,
            build_remaining: config.build_time,
            config,
            generator,
            board,
            queue,
            score: 0,
            level: FIRST_LEVEL,
            phase: RoundPhase::Building,
            run_accumulator: Duration::ZERO,
            step_pending: false,
            validated_path: Path::default(),
            train: TrainState::default(),
        }
    }

    fn reset_round(&mut self, out_events: &mut Vec<Event>) {
        self.board = Board::generate(self.config.board_side, self.level, self.generator.as_mut());
        self.queue.reset(self.generator.as_mut());
        self.phase = RoundPhase::Building;
        self.build_remaining = self.config.build_time;
        self.run_accumulator = Duration::ZERO;
        self.step_pending = false;
        self.validated_path = Path::default();
        self.train = TrainState::default();
        info!("round started at level {}", self.level);
        out_events.push(Event::RoundStarted { level: self.level });
    }

    fn end_build_phase(&mut self, out_events: &mut Vec<Event>) {
        self.phase = RoundPhase::Running;
        self.build_remaining = Duration::ZERO;
        info!("build phase ended at level {}", self.level);
        out_events.push(Event::BuildPhaseEnded);
    }

    fn conclude(&mut self, outcome: RunOutcome, out_events: &mut Vec<Event>) {
        self.phase = RoundPhase::Concluded(outcome);
        info!(
            "run concluded at level {}: {:?} with score {}",
            self.level, outcome, self.score
        );
        out_events.push(Event::RunConcluded { outcome });
    }

    fn advance_build_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.build_remaining = self.build_remaining.saturating_sub(dt);
        out_events.push(Event::BuildClockAdvanced {
            remaining: self.build_remaining,
        });

        if self.build_remaining.is_zero() {
            self.end_build_phase(out_events);
        }
    }

    fn advance_run_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.train.status() != TrainStatus::Running || self.step_pending {
            return;
        }

        self.run_accumulator = self.run_accumulator.saturating_add(dt);
        let interval = self.config.run_step_interval(self.level);
        if self.run_accumulator >= interval {
            self.run_accumulator -= interval;
            self.step_pending = true;
            out_events.push(Event::TrainStepDue);
        }
    }

    fn resolve_train_step(&mut self, step: TrainStep, out_events: &mut Vec<Event>) {
        if self.phase != RoundPhase::Running || !self.step_pending {
            return;
        }

        self.step_pending = false;
        self.train.apply(&step);
        debug!("train step resolved: {step:?}");

        match step {
            TrainStep::Advanced { from, to, reward } => {
                self.score = self.score.saturating_add(reward);
                out_events.push(Event::TrainAdvanced { from, to, reward });
            }
            TrainStep::Arrived => self.conclude(RunOutcome::Won, out_events),
            TrainStep::Derailed { at, cause } => {
                info!("train derailed at {at}: {cause:?}");
                self.conclude(RunOutcome::Lost, out_events);
            }
            TrainStep::Stalled => {}
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame => {
            world.level = FIRST_LEVEL;
            world.score = 0;
            world.reset_round(out_events);
        }
        Command::NextLevel => {
            if world.phase == RoundPhase::Concluded(RunOutcome::Won) {
                world.level = world.level.saturating_add(1);
                world.reset_round(out_events);
            } else {
                out_events.push(Event::RoundRejected {
                    reason: RoundError::NotWon,
                });
            }
        }
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            match world.phase {
                RoundPhase::Building => world.advance_build_clock(dt, out_events),
                RoundPhase::Running => world.advance_run_clock(dt, out_events),
                RoundPhase::Concluded(_) => {}
            }
        }
        Command::PlacePiece { cell } => {
            if world.phase != RoundPhase::Building {
                out_events.push(Event::PlacementRejected {
                    cell,
                    reason: PlacementError::InvalidPhase,
                });
                return;
            }

            if let Some(reason) = world.board.view().placement_error(cell) {
                out_events.push(Event::PlacementRejected { cell, reason });
                return;
            }

            let piece = world.queue.take_current(world.generator.as_mut());
            match world.board.place(cell, piece) {
                Ok(()) => {
                    world.score = world.score.saturating_add(PLACEMENT_REWARD);
                    debug!("placed {:?} at {cell}", piece.shape());
                    out_events.push(Event::PiecePlaced { piece, cell });
                }
                Err(reason) => out_events.push(Event::PlacementRejected { cell, reason }),
            }
        }
        Command::StorePiece => {
            if world.phase != RoundPhase::Building {
                out_events.push(Event::QueueRejected {
                    reason: QueueError::InvalidPhase,
                });
                return;
            }

            if world.queue.store(world.generator.as_mut()) {
                if let Some(piece) = world.queue.stored() {
                    out_events.push(Event::PieceStored { piece });
                }
            } else {
                out_events.push(Event::QueueRejected {
                    reason: QueueError::StorageOccupied,
                });
            }
        }
        Command::SwapStored => {
            if world.phase != RoundPhase::Building {
                out_events.push(Event::QueueRejected {
                    reason: QueueError::InvalidPhase,
                });
                return;
            }

            if world.queue.swap() {
                if let Some(stored) = world.queue.stored() {
                    out_events.push(Event::PiecesSwapped {
                        current: world.queue.current(),
                        stored,
                    });
                }
            } else {
                out_events.push(Event::QueueRejected {
                    reason: QueueError::StorageEmpty,
                });
            }
        }
        Command::EndBuildPhase => {
            if world.phase == RoundPhase::Building {
                world.end_build_phase(out_events);
            }
        }
        Command::BeginRun { validation } => {
            if world.phase != RoundPhase::Running || world.train.status() != TrainStatus::Idle {
                return;
            }

            let start = world.board.view().start();
            let path_len = validation.path.len();
            world.validated_path = validation.path;
            world.train = TrainState::new(world.validated_path.clone());
            let _ = world.train.depart(start);
            world.run_accumulator = Duration::ZERO;
            world.step_pending = false;
            info!(
                "run started: complete = {}, path length = {path_len}",
                validation.complete
            );
            out_events.push(Event::RunStarted {
                complete: validation.complete,
                path_len,
            });
        }
        Command::ResolveTrainStep { step } => world.resolve_train_step(step, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use track_builder_core::{BoardView, Path, RoundPhase, TrackPiece, TrainState};

    use super::{GameConfig, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the session configuration.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Captures a read-only view of the board.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        world.board.view()
    }

    /// Phase of the current round.
    #[must_use]
    pub fn phase(world: &World) -> RoundPhase {
        world.phase
    }

    /// Points accumulated across the session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Level of the current round, starting at one.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Build time left before the run starts.
    #[must_use]
    pub fn build_time_remaining(world: &World) -> Duration {
        world.build_remaining
    }

    /// Piece the player places next.
    #[must_use]
    pub fn current_piece(world: &World) -> TrackPiece {
        world.queue.current()
    }

    /// Piece held in storage, if any.
    #[must_use]
    pub fn stored_piece(world: &World) -> Option<TrackPiece> {
        world.queue.stored()
    }

    /// Pieces queued after the current piece, in draw order.
    #[must_use]
    pub fn upcoming_pieces(world: &World) -> Vec<TrackPiece> {
        world.queue.upcoming().collect()
    }

    /// Path validated at the end of the build phase; empty while building.
    #[must_use]
    pub fn validated_path(world: &World) -> &Path {
        &world.validated_path
    }

    /// Train travelling the validated path.
    #[must_use]
    pub fn train(world: &World) -> &TrainState {
        &world.train
    }

    /// Interval between train steps at the current level.
    #[must_use]
    pub fn run_step_interval(world: &World) -> Duration {
        world.config.run_step_interval(world.level)
    }
}
