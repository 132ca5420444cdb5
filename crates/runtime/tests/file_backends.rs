//! File backends survive a restart and hand configuration back unchanged.

use std::path::Path;
use std::sync::Arc;

use hunt_content::DefaultContent;
use hunt_core::{DirectorySet, LevelTable, OutcomeKind, PlayerId, SurveyAnswer, SurveySet};
use hunt_runtime::repository::{decode_blob, encode_blob};
use hunt_runtime::{
    ActionLogRepository, ConfigKey, ConfigStore, FileActionLog, FileConfigStore,
    FilePlayerRepository, GameService, PlayerRepository,
};
use tempfile::TempDir;

fn open_service(dir: &Path) -> GameService {
    GameService::builder()
        .config_store(Arc::new(FileConfigStore::new(dir).expect("config store opens")))
        .players(Arc::new(FilePlayerRepository::open(dir).expect("players open")))
        .actions(Arc::new(FileActionLog::open(dir).expect("action log opens")))
        .seed_content(DefaultContent::load().expect("embedded content parses"))
        .build()
        .expect("service builds")
}

#[test]
fn test_progress_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let content = DefaultContent::load().unwrap();
    let first = &content.directory.entries[0];
    let code = first.scan_code.clone();
    let player_id = first.player_id.clone();

    // Level 1 of the bundled hunt is answered by the first directory entry
    let state = {
        let service = open_service(temp_dir.path());
        service
            .register("token-1", &code, &[SurveyAnswer::new(1, Some(true))])
            .unwrap();
        let report = service.scan_with_seed("token-1", &code, 7).unwrap();
        assert_eq!(report.step.outcome, OutcomeKind::Progress);
        report.step.state
    };

    let service = open_service(temp_dir.path());
    let record = service
        .leaderboard()
        .unwrap()
        .into_iter()
        .find(|record| record.player_id() == &player_id)
        .expect("player persisted");
    assert_eq!(record.state, state);
    assert_eq!(record.token.as_deref(), Some("token-1"));
    assert!(record.profile.answer_to(1));

    let history = service.history(&player_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].new_state, state);

    assert_eq!(service.current_clue("token-1").unwrap(), {
        let levels = service.config().levels().unwrap();
        levels.levels[1].clue_html.clone()
    });
}

#[test]
fn test_blobs_round_trip_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileConfigStore::new(temp_dir.path()).unwrap();
    let content = DefaultContent::load().unwrap();

    let blobs = [
        (ConfigKey::Questions, encode_blob(ConfigKey::Questions, &content.levels).unwrap()),
        (ConfigKey::Survey, encode_blob(ConfigKey::Survey, &content.survey).unwrap()),
        (ConfigKey::Directory, encode_blob(ConfigKey::Directory, &content.directory).unwrap()),
    ];
    for (key, bytes) in &blobs {
        store.write_blob(*key, bytes).unwrap();
    }

    let reopened = FileConfigStore::new(temp_dir.path()).unwrap();
    for (key, bytes) in &blobs {
        assert_eq!(reopened.read_blob(*key).unwrap().as_ref(), Some(bytes));
    }

    let levels: LevelTable =
        decode_blob(ConfigKey::Questions, &reopened.read_blob(ConfigKey::Questions).unwrap().unwrap())
            .unwrap();
    let survey: SurveySet =
        decode_blob(ConfigKey::Survey, &reopened.read_blob(ConfigKey::Survey).unwrap().unwrap())
            .unwrap();
    let directory: DirectorySet =
        decode_blob(ConfigKey::Directory, &reopened.read_blob(ConfigKey::Directory).unwrap().unwrap())
            .unwrap();
    assert_eq!(levels, content.levels);
    assert_eq!(survey, content.survey);
    assert_eq!(directory, content.directory);
}

#[test]
fn test_seeding_keeps_operator_config() {
    let temp_dir = TempDir::new().unwrap();
    let custom = LevelTable::new(Vec::new());

    {
        let store = FileConfigStore::new(temp_dir.path()).unwrap();
        store
            .write_blob(
                ConfigKey::Questions,
                &encode_blob(ConfigKey::Questions, &custom).unwrap(),
            )
            .unwrap();
    }

    let service = open_service(temp_dir.path());
    assert!(service.config().levels().unwrap().is_empty());
    assert!(!service.config().directory().unwrap().is_empty());
}

#[test]
fn test_action_log_reopens_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let content = DefaultContent::load().unwrap();
    let code = content.directory.entries[0].scan_code.clone();
    let player_id = content.directory.entries[0].player_id.clone();

    {
        let service = open_service(temp_dir.path());
        service.register("t", &code, &[]).unwrap();
        for seed in 0..3 {
            service.scan_with_seed("t", "nobody-at-all", seed).unwrap();
        }
    }

    let log = FileActionLog::open(temp_dir.path()).unwrap();
    let entries = log.entries_for(&player_id).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|entry| entry.outcome == OutcomeKind::LostLife));
    assert_eq!(entries[2].new_state.lives, 2);

    let recent = log.recent(1).unwrap();
    assert_eq!(recent[0].new_state, entries[2].new_state);
    assert!(log.entries_for(&PlayerId::from("someone-else")).unwrap().is_empty());

    let players = FilePlayerRepository::open(temp_dir.path()).unwrap();
    assert_eq!(players.list().unwrap().len(), 1);
}

#[test]
fn test_scans_after_a_torn_log_entry_stay_readable() {
    let temp_dir = TempDir::new().unwrap();
    let content = DefaultContent::load().unwrap();
    let code = content.directory.entries[0].scan_code.clone();
    let player_id = content.directory.entries[0].player_id.clone();

    {
        let service = open_service(temp_dir.path());
        service.register("t", &code, &[]).unwrap();
        service.scan_with_seed("t", "nobody-at-all", 0).unwrap();
    }

    // Crash halfway through the next append
    let log_path = temp_dir.path().join("actions.log");
    let mut bytes = std::fs::read(&log_path).unwrap();
    bytes.extend_from_slice(&200u32.to_le_bytes());
    bytes.extend_from_slice(b"partial");
    std::fs::write(&log_path, bytes).unwrap();

    let service = open_service(temp_dir.path());
    let report = service.scan_with_seed("t", "nobody-at-all", 1).unwrap();
    assert!(report.logged);

    let history = service.history(&player_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].new_state, *report.state());
    assert_eq!(service.recent_actions(5).unwrap().len(), 2);
}
