use std::collections::VecDeque;

use proptest::prelude::*;
use track_builder_core::{
    BoardView, Cell, CellCoord, CellKind, Command, Event, PieceId, RoundPhase, Terrain,
    TrackGenerator, TrackPiece, TrackShape, TrainStatus,
};
use track_builder_system_validation::{validate, Validation};
use track_builder_world::{self as world, query, GameConfig, World};

/// Generator that hands out a fixed script of shapes and open terrain.
#[derive(Debug)]
struct Script {
    shapes: VecDeque<TrackShape>,
}

impl Script {
    fn new(shapes: &[TrackShape]) -> Self {
        Self {
            shapes: shapes.iter().copied().collect(),
        }
    }
}

impl TrackGenerator for Script {
    fn next_shape(&mut self) -> TrackShape {
        self.shapes.pop_front().unwrap_or(TrackShape::Cross)
    }

    fn terrain(&mut self, _cell: CellCoord, _level: u32) -> Terrain {
        Terrain::Open
    }
}

fn world_with_script(side: u32, shapes: &[TrackShape]) -> World {
    World::new(
        GameConfig {
            board_side: side,
            ..GameConfig::default()
        },
        Script::new(shapes),
    )
}

fn place_all(world: &mut World, cells: &[(u32, u32)]) {
    for &(column, row) in cells {
        let mut events = Vec::new();
        world::apply(
            world,
            Command::PlacePiece {
                cell: CellCoord::new(column, row),
            },
            &mut events,
        );
        assert!(
            matches!(events.as_slice(), [Event::PiecePlaced { .. }]),
            "placement at ({column}, {row}) failed: {events:?}"
        );
    }
}

fn pump_validation(world: &mut World, validation: &mut Validation, mut events: Vec<Event>) {
    loop {
        let mut commands = Vec::new();
        validation.handle(&events, query::board_view(world), &mut commands);
        if commands.is_empty() {
            break;
        }
        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
}

#[test]
fn build_phase_end_starts_run_on_validated_path() {
    let mut world = world_with_script(
        4,
        &[
            TrackShape::Horizontal,
            TrackShape::Horizontal,
            TrackShape::CurveBottomLeft,
            TrackShape::Vertical,
            TrackShape::Vertical,
        ],
    );
    place_all(&mut world, &[(1, 0), (2, 0), (3, 0), (3, 1), (3, 2)]);

    let mut validation = Validation::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::EndBuildPhase, &mut events);
    pump_validation(&mut world, &mut validation, events);

    assert_eq!(query::phase(&world), RoundPhase::Running);
    let path = query::validated_path(&world);
    assert_eq!(path.len(), 7);
    assert_eq!(path.last(), Some(CellCoord::new(3, 3)));
    assert_eq!(query::train(&world).status(), TrainStatus::Running);
    assert_eq!(query::train(&world).position(), Some(CellCoord::new(0, 0)));
}

#[test]
fn expired_build_clock_validates_bare_board() {
    let mut world = world_with_script(12, &[]);
    let mut validation = Validation::default();
    let mut events = Vec::new();
    let dt = query::build_time_remaining(&world);

    world::apply(&mut world, Command::Tick { dt }, &mut events);
    assert!(events.contains(&Event::BuildPhaseEnded));
    pump_validation(&mut world, &mut validation, events);

    assert_eq!(
        query::validated_path(&world).cells(),
        &[CellCoord::new(0, 0)]
    );
}

#[test]
fn validation_ignores_events_during_build() {
    let world = world_with_script(4, &[]);
    let mut validation = Validation::default();
    let mut commands = Vec::new();

    validation.handle(
        &[Event::RoundStarted { level: 1 }],
        query::board_view(&world),
        &mut commands,
    );

    assert!(commands.is_empty());
}

fn random_board() -> impl Strategy<Value = (u32, Vec<Cell>)> {
    (2u32..8).prop_flat_map(|side| {
        let count = (side * side) as usize;
        let cell = (0u8..4, prop::option::of(prop::sample::select(TrackShape::ALL.to_vec())));
        prop::collection::vec(cell, count).prop_map(move |raw| {
            let last = side - 1;
            let cells = raw
                .into_iter()
                .enumerate()
                .map(|(index, (kind, shape))| {
                    let index = index as u32;
                    let (column, row) = (index % side, index / side);
                    if column == 0 && row == 0 {
                        return Cell::with_piece(
                            CellKind::Start,
                            TrackPiece::new(PieceId::START, TrackShape::Horizontal),
                        );
                    }
                    if column == last && row == last {
                        return Cell::new(CellKind::End);
                    }
                    let kind = match kind {
                        0 => CellKind::Rock,
                        1 => CellKind::Bonus,
                        _ => CellKind::Empty,
                    };
                    match shape {
                        Some(shape) if kind.accepts_piece() => {
                            Cell::with_piece(kind, TrackPiece::new(PieceId::new(index + 1), shape))
                        }
                        _ => Cell::new(kind),
                    }
                })
                .collect();
            (side, cells)
        })
    })
}

proptest! {
    #[test]
    fn validated_paths_follow_reciprocated_track((side, cells) in random_board()) {
        let board = BoardView::new(&cells, side);
        let result = validate(board);
        let path = result.path.cells();

        prop_assert!(!path.is_empty());
        prop_assert_eq!(path[0], board.start());
        prop_assert!(path.len() <= board.cell_count() + 1);
        prop_assert_eq!(result.complete, path.last() == Some(&board.end()));

        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            prop_assert!(board.contains(to));
            let direction = from.direction_to(to);
            prop_assert!(direction.is_some(), "{} -> {} is not a unit step", from, to);
            let direction = direction.unwrap();
            let exit = board.cell(from).unwrap();
            prop_assert!(exit.connects(direction));
            if to != board.end() {
                prop_assert!(board.cell(to).unwrap().connects(direction.opposite()));
            }
        }

        let (body, tail) = path.split_at(path.len() - 1);
        for (index, cell) in body.iter().enumerate() {
            prop_assert!(!body[index + 1..].contains(cell), "{} repeats mid-path", cell);
        }
        if body.contains(&tail[0]) {
            prop_assert!(!result.complete);
        }
    }
}
