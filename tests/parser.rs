use glam::IVec2;
use tileclash::constants::DEMO_LEVEL;
use tileclash::error::ParseError;
use tileclash::map::parser::{LevelTile, Spawn};
use tileclash::map::{LevelParser, TileKind};

#[test]
fn test_parse_demo_level() {
    let result = LevelParser::parse_level(&DEMO_LEVEL);
    assert!(result.is_ok());

    let parsed = result.unwrap();
    assert_eq!(parsed.tiles.len(), DEMO_LEVEL.len());
    assert_eq!(parsed.tiles[0].len(), DEMO_LEVEL[0].len());
    assert_eq!(parsed.player_start, IVec2::new(3, 7));
    assert!(parsed.spawns.contains(&(Spawn::Archer, IVec2::new(26, 3))));
    assert!(parsed.spawns.contains(&(Spawn::Bow, IVec2::new(11, 7))));
    assert_eq!(parsed.tiles[7][6], LevelTile::Sign);
    assert_eq!(parsed.tiles[10][6], LevelTile::Terrain(TileKind::empty()));
}

#[test]
fn test_short_rows_are_padded() {
    let parsed = LevelParser::parse_level(&["####", "P", "##"]).unwrap();

    assert_eq!(parsed.width, 4);
    assert_eq!(parsed.height, 3);
    assert_eq!(parsed.tiles[1][3], LevelTile::Empty);
    assert_eq!(parsed.tiles[2][2], LevelTile::Empty);
    assert_eq!(parsed.placed_tiles().count(), 6);
}

#[test]
fn test_parse_invalid_character() {
    let result = LevelParser::parse_level(&["#P#", "#Z#"]);
    assert_eq!(
        result.unwrap_err(),
        ParseError::UnknownCharacter { character: 'Z', x: 1, y: 1 }
    );
}

#[test]
fn test_player_spawn_count() {
    assert_eq!(
        LevelParser::parse_level(&["###"]).unwrap_err(),
        ParseError::InvalidPlayerSpawnCount(0)
    );
    assert_eq!(
        LevelParser::parse_level(&["P P"]).unwrap_err(),
        ParseError::InvalidPlayerSpawnCount(2)
    );
}

#[test]
fn test_empty_level() {
    assert_eq!(LevelParser::parse_level(&[]).unwrap_err(), ParseError::Empty);
    assert_eq!(LevelParser::parse_level(&["", ""]).unwrap_err(), ParseError::Empty);
}
