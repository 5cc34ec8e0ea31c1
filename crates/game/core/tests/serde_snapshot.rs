#![cfg(feature = "serde")]

use game_core::{
    GameConfig, Grid, MapConfig, Position, Session, SessionSnapshot, VisibilityResult,
};

#[test]
fn snapshot_survives_json() {
    let session = Session::generate(GameConfig::default().with_map(MapConfig::new(20, 16)), 3)
        .expect("session should generate");

    let json = serde_json::to_string(session.snapshot()).expect("snapshot serializes");
    let restored: SessionSnapshot = serde_json::from_str(&json).expect("snapshot deserializes");

    assert_eq!(&restored, session.snapshot());
}

#[test]
fn grid_and_config_round_trip() {
    let grid = Grid::from_ascii("..#\n.T.\n").unwrap();
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(serde_json::from_value::<Grid>(json).unwrap(), grid);

    let config = GameConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
}

#[test]
fn visibility_round_trips_as_cell_pairs() {
    let grid = Grid::from_ascii(".....\n.....\n.....\n.....\n.....\n").unwrap();
    let seen = VisibilityResult::compute(&grid, Position::new(2, 2), 2);

    let json = serde_json::to_value(&seen).expect("visibility serializes");
    assert!(json["cells"].is_array());

    let restored: VisibilityResult = serde_json::from_value(json).expect("visibility deserializes");
    assert_eq!(restored.observer(), seen.observer());
    assert_eq!(restored.radius(), seen.radius());
    assert_eq!(restored.len(), seen.len());
    for ((position, sight), (back_position, back_sight)) in seen.iter().zip(restored.iter()) {
        assert_eq!(position, back_position);
        assert!((sight.distance - back_sight.distance).abs() < 1e-12);
        assert!((sight.intensity - back_sight.intensity).abs() < 1e-12);
    }
}
