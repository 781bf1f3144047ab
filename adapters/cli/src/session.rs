//! Owns the world and its systems and pumps events between them.

use std::time::Duration;

use log::warn;
use track_builder_core::{Command, Event, RoundPhase, TrackGenerator};
use track_builder_system_train::TrainSimulator;
use track_builder_system_validation::Validation;
use track_builder_world::{self as world, query, GameConfig, World};

/// Upper bound on ticks spent in one `run`, far above any reachable path.
const RUN_TICK_LIMIT: usize = 100_000;

/// Interactive game session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    validation: Validation,
    train: TrainSimulator,
}

impl Session {
    pub(crate) fn new(config: GameConfig, generator: impl TrackGenerator + 'static) -> Self {
        Self {
            world: World::new(config, generator),
            validation: Validation::new(),
            train: TrainSimulator::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies a command, then feeds the resulting events to every system
    /// until none of them has anything left to say.
    pub(crate) fn execute(&mut self, command: Command) -> Vec<Event> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        loop {
            log.extend(events.iter().cloned());

            let mut commands = Vec::new();
            self.validation
                .handle(&events, query::board_view(&self.world), &mut commands);
            self.train.handle(
                &events,
                query::train(&self.world),
                query::board_view(&self.world),
                &mut commands,
            );

            if commands.is_empty() {
                return log;
            }

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }

    /// Lets `dt` pass in slices no longer than one train step.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<Event> {
        let mut log = Vec::new();
        let mut remaining = dt;

        while !remaining.is_zero() && !self.concluded() {
            let slice = match self.slice_length() {
                limit if limit.is_zero() => remaining,
                limit => remaining.min(limit),
            };
            remaining -= slice;
            log.extend(self.execute(Command::Tick { dt: slice }));
        }

        log
    }

    /// Ends the build phase if needed and ticks until the round concludes.
    pub(crate) fn run_to_conclusion(&mut self) -> Vec<Event> {
        let mut log = self.execute(Command::EndBuildPhase);

        for _ in 0..RUN_TICK_LIMIT {
            if self.concluded() {
                return log;
            }
            let dt = query::run_step_interval(&self.world);
            log.extend(self.execute(Command::Tick { dt }));
        }

        warn!("run did not conclude within {RUN_TICK_LIMIT} ticks");
        log
    }

    fn concluded(&self) -> bool {
        matches!(query::phase(&self.world), RoundPhase::Concluded(_))
    }

    fn slice_length(&self) -> Duration {
        match query::phase(&self.world) {
            RoundPhase::Building => query::build_time_remaining(&self.world),
            _ => query::run_step_interval(&self.world),
        }
    }
}
