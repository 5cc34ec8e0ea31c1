use game_core::{
    Command, CommandOutcome, Direction, GameConfig, LayoutKind, MapConfig, Session,
};

fn small_config() -> GameConfig {
    GameConfig::default().with_map(MapConfig::new(40, 30))
}

const SCRIPT: [Command; 8] = [
    Command::Move(Direction::Up),
    Command::Move(Direction::Right),
    Command::Move(Direction::Right),
    Command::Noop,
    Command::Move(Direction::Down),
    Command::Move(Direction::Left),
    Command::Move(Direction::Down),
    Command::Move(Direction::Down),
];

#[test]
fn same_seed_same_world() {
    let first = Session::generate(small_config(), 42).expect("session should generate");
    let second = Session::generate(small_config(), 42).expect("session should generate");

    assert_eq!(first.grid().to_ascii(), second.grid().to_ascii());
    assert_eq!(first.state().entities, second.state().entities);
    assert_eq!(first.rng_state(), second.rng_state());
    assert_eq!(first.visibility(), second.visibility());
}

#[test]
fn different_seeds_differ() {
    let first = Session::generate(small_config(), 1).unwrap();
    let second = Session::generate(small_config(), 2).unwrap();

    assert_ne!(first.grid().to_ascii(), second.grid().to_ascii());
}

#[test]
fn maze_layout_is_deterministic_too() {
    let config =
        GameConfig::default().with_map(MapConfig::new(31, 21).with_layout(LayoutKind::Maze));
    let first = Session::generate(config.clone(), 9).unwrap();
    let second = Session::generate(config, 9).unwrap();

    assert_eq!(first.grid(), second.grid());
    assert_eq!(first.state().entities, second.state().entities);
}

#[test]
fn replaying_commands_replays_the_game() {
    let mut first = Session::generate(small_config(), 77).unwrap();
    let mut second = Session::generate(small_config(), 77).unwrap();

    for command in SCRIPT {
        let left = first.handle(command).unwrap();
        let right = second.handle(command).unwrap();
        assert_eq!(left, right);
    }
    assert_eq!(first.state(), second.state());
}

#[test]
fn reset_is_idempotent() {
    let mut session = Session::generate(small_config(), 5).unwrap();
    let start = session.snapshot().clone();
    let start_visibility = session.visibility().clone();

    for round in 0..3 {
        for command in SCRIPT {
            session.handle(command).unwrap();
        }
        assert_eq!(
            session.handle(Command::Reset).unwrap(),
            CommandOutcome::Reset,
            "round {round}"
        );
        assert_eq!(session.state().entities, start.entities);
        assert_eq!(session.rng_state(), start.rng);
        assert_eq!(session.visibility(), &start_visibility);
    }

    session.reset();
    session.reset();
    assert_eq!(session.state().entities, start.entities);
    assert_eq!(session.rng_state(), start.rng);
    assert_eq!(session.grid(), start.grid.as_ref());
}
