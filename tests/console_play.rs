use std::io::Cursor;

use detective_quest::console::{self, LineInput};
use detective_quest::game::{
    ClueLink, Game, GameOptions, GamePhase, LeafPolicy, RoomPlan, Ruling, Scenario,
};

fn hall_and_library() -> Scenario {
    Scenario {
        title: "Small Case".to_string(),
        synopsis: String::new(),
        entrance: RoomPlan::new("Hall").left(RoomPlan::new("Library").clue("Old Diary")),
        testimony: vec![ClueLink::new("Old Diary", "Housekeeper")],
        buckets: 10,
    }
}

fn play(scenario: &Scenario, options: GameOptions, script: &str) -> (Game, String, Ruling, usize) {
    let mut game = Game::new(scenario, options).unwrap();
    let mut input = LineInput::new(Cursor::new(script.to_string()));
    let mut out = Vec::new();
    let verdict = console::run(&mut game, &mut input, &mut out).unwrap();
    (game, String::from_utf8(out).unwrap(), verdict.ruling, verdict.matches)
}

#[test]
fn test_blocked_then_library() {
    let (game, out, ruling, matches) =
        play(&hall_and_library(), GameOptions::default(), "d\ne\ns\nHousekeeper\n");

    assert!(out.contains("You are in: Hall"));
    assert!(out.contains("Path blocked!"));
    assert!(out.contains("You found a clue: Old Diary"));
    assert!(out.contains("  - Old Diary"));
    assert!(out.contains("A dead end."));
    assert_eq!(game.clues().collect::<Vec<_>>(), vec!["Old Diary"]);
    assert_eq!(matches, 1);
    assert_eq!(ruling, Ruling::Insufficient);
}

#[test]
fn test_only_offered_exits_are_listed() {
    let (_, out, _, _) = play(&hall_and_library(), GameOptions::default(), "s\nButler\n");
    assert!(out.contains("(e) Go left"));
    assert!(!out.contains("(d) Go right"));
    assert!(out.contains("(none)"));
}

#[test]
fn test_keys_on_one_line() {
    let (game, _, _, _) = play(&hall_and_library(), GameOptions::default(), "x E s\nButler\n");
    assert_eq!(game.stats.invalid_commands, 1);
    assert_eq!(game.current_room().name(), "Library");
}

#[test]
fn test_gardener_path_sustains() {
    let (game, out, ruling, matches) =
        play(&Scenario::mansion(), GameOptions::default(), "d\ne\nd\ns\nGardener\n");

    assert_eq!(
        game.clues().collect::<Vec<_>>(),
        vec!["Old Diary", "Pruning Shears", "Stopped Pocket Watch"]
    );
    assert_eq!(matches, 2);
    assert_eq!(ruling, Ruling::Sustained);
    assert!(out.contains("Old Diary -> Housekeeper"));
    assert!(out.contains("case closed"));
}

#[test]
fn test_dead_end_policy_ends_without_quit() {
    let options = GameOptions {
        leaf_policy: LeafPolicy::EndAtDeadEnd,
        buckets: None,
    };
    let (game, out, ruling, matches) = play(&Scenario::mansion(), options, "e\ne\ne\nButler\n");

    assert!(out.contains("no more exits"));
    assert_eq!(matches, 3);
    assert_eq!(ruling, Ruling::Sustained);
    assert!(matches!(game.phase, GamePhase::CaseClosed(_)));
}

#[test]
fn test_exhausted_input_quits() {
    let (game, _, ruling, matches) = play(&hall_and_library(), GameOptions::default(), "e\n");
    assert_eq!(game.notebook().len(), 1);
    assert_eq!(matches, 0);
    assert_eq!(ruling, Ruling::Insufficient);
}

#[test]
fn test_bundled_scenario_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/country_house.json");
    let scenario = Scenario::load(path).unwrap();
    assert!(scenario.lint().is_empty());

    let (game, _, ruling, matches) =
        play(&scenario, GameOptions::default(), "e\nd\nd\ns\nColonel\n");
    assert_eq!(game.suspect_table().bucket_count(), 7);
    assert_eq!(game.current_room().name(), "Gun Room");
    assert_eq!(matches, 2);
    assert_eq!(ruling, Ruling::Sustained);
}
