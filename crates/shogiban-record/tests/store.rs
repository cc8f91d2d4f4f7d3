use std::fs;
use std::path::Path;

use shogiban_core::Move;
use shogiban_record::{PersistenceError, RecordStore, StorageConfig, StoredGame};
use tempfile::tempdir;

fn game(second: u64, elapsed_seconds: u64) -> StoredGame {
    StoredGame::new(
        format!("2024-05-01 10:{:02}:{:02}", second / 60, second % 60),
        elapsed_seconds,
        vec!["7g7f".parse::<Move>().unwrap()],
    )
}

fn json_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".json"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_save_creates_directory_and_loads_back() {
    let tmp = tempdir().unwrap();
    let config = StorageConfig {
        ranked_dir: tmp.path().join("nested").join("Top10"),
        ..StorageConfig::under(tmp.path())
    };
    let store = RecordStore::new(config);

    let original = game(5, 42);
    let path = store.save(&original).unwrap();
    assert_eq!(path.file_name().unwrap(), "game_2024-05-01 10-00-05.json");
    assert_eq!(store.load("game_2024-05-01 10-00-05").unwrap(), original);
    assert_eq!(store.load("game_2024-05-01 10-00-05.json").unwrap(), original);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n    \"date\": \"2024-05-01 10:00:05\",\n    \"time\": 42,"));
}

#[test]
fn test_save_never_overwrites() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    let first = store.save(&game(1, 10)).unwrap();
    let second = store.save(&game(1, 20)).unwrap();
    assert_ne!(first, second);
    assert_eq!(second.file_name().unwrap(), "game_2024-05-01 10-00-01_2.json");
    assert_eq!(RecordStore::load_file(&first).unwrap().elapsed_seconds, 10);
    assert_eq!(json_names(&store.config().ranked_dir).len(), 2);
}

#[test]
fn test_load_errors() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    assert!(matches!(store.load("missing"), Err(PersistenceError::NotFound(_))));

    let dir = &store.config().ranked_dir;
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("broken.json"), r#"{"date": "2024-05-01 10:00:00", "moves": []}"#).unwrap();
    fs::write(dir.join("garbage.json"), "not json").unwrap();
    assert!(matches!(store.load("broken"), Err(PersistenceError::MalformedRecord { .. })));
    assert!(matches!(store.load("garbage"), Err(PersistenceError::MalformedRecord { .. })));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_rank_twelve_records_keeps_ten() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    for i in 1..=12 {
        store.save(&game(i, i)).unwrap();
    }

    let report = store.rank_and_prune().unwrap();
    assert_eq!(report.ranked.len(), 10);
    assert_eq!(report.relocated.len(), 2);
    assert!(report.skipped.is_empty());

    let config = store.config();
    let expected: Vec<String> = {
        let mut names: Vec<String> = (1..=10).map(|n| format!("TOP {n}.json")).collect();
        names.sort();
        names
    };
    assert_eq!(json_names(&config.ranked_dir), expected);
    assert_eq!(json_names(&config.history_dir), vec!["game1.json", "game2.json"]);

    assert_eq!(store.load("TOP 1").unwrap().elapsed_seconds, 12);
    assert_eq!(store.load("TOP 10").unwrap().elapsed_seconds, 3);
    let history = RecordStore::load_file(&config.history_dir.join("game1.json")).unwrap();
    assert_eq!(history.elapsed_seconds, 2);

    let listed: Vec<u64> = store.list().unwrap().iter().map(|e| e.game.elapsed_seconds).collect();
    assert_eq!(listed, (3..=12).rev().collect::<Vec<_>>());
}

#[test]
fn test_ranking_is_idempotent() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    for i in 1..=12 {
        store.save(&game(i, 30 - i % 4)).unwrap();
    }

    let first = store.rank_and_prune().unwrap();
    let ranked_before: Vec<_> =
        store.list().unwrap().into_iter().map(|e| (e.identifier, e.game)).collect();
    let history_before = json_names(&store.config().history_dir);

    let second = store.rank_and_prune().unwrap();
    let ranked_after: Vec<_> =
        store.list().unwrap().into_iter().map(|e| (e.identifier, e.game)).collect();

    assert_eq!(first.ranked, second.ranked);
    assert!(second.relocated.is_empty());
    assert_eq!(ranked_before, ranked_after);
    assert_eq!(history_before, json_names(&store.config().history_dir));
}

#[test]
fn test_new_record_permutes_labels() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    for i in 1..=12 {
        store.save(&game(i, i)).unwrap();
    }
    store.rank_and_prune().unwrap();

    let mut newer = game(0, 5);
    newer.date = "2024-05-02 09:00:00".to_string();
    store.save(&newer).unwrap();
    let report = store.rank_and_prune().unwrap();

    assert_eq!(report.relocated.len(), 1);
    assert_eq!(report.relocated[0].file_name().unwrap(), "game3.json");
    assert_eq!(RecordStore::load_file(&report.relocated[0]).unwrap().elapsed_seconds, 3);
    assert_eq!(store.load("TOP 8").unwrap().elapsed_seconds, 5);
    assert_eq!(store.load("TOP 9").unwrap(), newer);
    assert_eq!(store.load("TOP 10").unwrap().elapsed_seconds, 4);
}

#[test]
fn test_corrupt_record_on_needed_label_is_quarantined() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    let dir = store.config().ranked_dir.clone();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("TOP 1.json"), "{").unwrap();
    fs::write(dir.join("stray.json"), "[]").unwrap();
    store.save(&game(1, 7)).unwrap();
    store.save(&game(2, 9)).unwrap();

    let report = store.rank_and_prune().unwrap();
    assert_eq!(report.ranked.len(), 2);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.contains(&dir.join("TOP 1.corrupt")));
    assert!(report.skipped.contains(&dir.join("stray.json")));

    assert_eq!(store.load("TOP 1").unwrap().elapsed_seconds, 9);
    assert_eq!(store.load("TOP 2").unwrap().elapsed_seconds, 7);
    assert!(dir.join("TOP 1.corrupt").exists());
    assert!(dir.join("stray.json").exists());
}

#[test]
fn test_records_stranded_in_staging_are_ranked() {
    let tmp = tempdir().unwrap();
    let store = RecordStore::new(StorageConfig::under(tmp.path()));
    let dir = store.config().ranked_dir.clone();
    store.save(&game(1, 7)).unwrap();
    // Left behind by a pass that stopped between its two rename phases
    fs::write(dir.join(".staging-1.tmp"), game(2, 99).to_json().unwrap()).unwrap();
    fs::write(dir.join(".staging-2.tmp"), game(3, 30).to_json().unwrap()).unwrap();

    let report = store.rank_and_prune().unwrap();
    assert_eq!(report.recovered.len(), 2);
    assert_eq!(report.ranked.len(), 3);
    assert_eq!(store.load("TOP 1").unwrap().elapsed_seconds, 99);
    assert_eq!(store.load("TOP 2").unwrap().elapsed_seconds, 30);
    assert_eq!(store.load("TOP 3").unwrap().elapsed_seconds, 7);

    let leftovers: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with('.'))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
    assert_eq!(json_names(&dir), ["TOP 1.json", "TOP 2.json", "TOP 3.json"]);
}
