use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use oak_bot::{
    commands::{Invocation, Oak},
    config::Settings,
    models::{BattleClaim, BattleRecord, OakError, Result, Tier},
    ranking::{build_row_from_raw, classify, to_level, validate_matchup, Leaderboard},
    services::SheetSource,
    verification::{BattleValidator, FormAuditor, ReplayFetcher, ValidationPolicy},
};
use std::{collections::HashMap, sync::Arc};

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap()
}

/// Replays keyed by URL.
struct FakeReplays(HashMap<String, BattleRecord>);

#[async_trait]
impl ReplayFetcher for FakeReplays {
    async fn fetch_record(&self, url: &str) -> Result<BattleRecord> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| OakError::ReplayFetchError(format!("{} answered 404 Not Found", url)))
    }
}

/// Spreadsheet ranges keyed by A1 range.
struct FakeSheet(HashMap<String, Vec<Vec<String>>>);

#[async_trait]
impl SheetSource for FakeSheet {
    async fn fetch_range(&self, _spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        Ok(self.0.get(range).cloned().unwrap_or_default())
    }
}

fn record(winner: &str, loser: &str, date: &str) -> BattleRecord {
    BattleRecord {
        winner: winner.to_string(),
        loser: loser.to_string(),
        recorded_at: at(date),
        format: "gen8ou".to_string(),
    }
}

fn ranked_rows() -> Vec<Vec<String>> {
    vec![
        row(&["Nome", "Nick", "Vitórias", "Derrotas", "Pontos", "Batalhas"]),
        row(&["Ash Ketchum", "Ash", "10", "2", "520", "12"]),
        row(&["Gary Oak", "Gary", "8", "4", "480", "12"]),
        row(&["Misty", "Misty", "6", "6", "310", "12"]),
    ]
}

#[test]
fn test_classify_boundaries() {
    for score in 0..100 {
        assert_eq!(classify(score), Tier::Straggler);
    }

    let boundaries = [
        (100, Tier::Bronze),
        (300, Tier::Silver),
        (500, Tier::Gold),
        (750, Tier::Platinum),
        (850, Tier::Diamond),
        (950, Tier::Master),
        (1000, Tier::GrandMaster),
    ];
    for (boundary, tier) in boundaries {
        assert_eq!(classify(boundary), tier);
        assert_eq!(classify(boundary - 1).level() + 1, tier.level());
    }
}

#[test]
fn test_to_level_is_injective_under_accents_and_case() {
    let names = [
        "RETARDATÁRIO",
        "bronze",
        "Prata",
        "ouro",
        "PLATINA",
        "Diamante",
        "mestre",
        "grão mestre",
    ];
    let levels: Vec<u8> = names.iter().map(|n| to_level(n).unwrap()).collect();
    assert_eq!(levels, vec![0, 1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(to_level("Grand Master").unwrap(), 7);
    assert_eq!(to_level("GRAOMESTRE").unwrap(), 7);
    assert!(matches!(to_level("Wood"), Err(OakError::TierNotFound(_))));
}

#[test]
fn test_to_level_accepts_decomposed_accents() {
    assert_eq!(to_level("Retardata\u{0301}rio").unwrap(), 0);
    assert_eq!(to_level("GRA\u{0303}O MESTRE").unwrap(), 7);
}

#[test]
fn test_matchup_rule() {
    assert!(validate_matchup(Tier::Straggler.level(), Tier::Bronze.level()));
    assert!(!validate_matchup(Tier::Straggler.level(), Tier::Silver.level()));
    assert!(validate_matchup(Tier::Gold.level(), Tier::Diamond.level()));
    assert!(!validate_matchup(Tier::Bronze.level(), Tier::GrandMaster.level()));
}

#[test]
fn test_validator_accepts_case_drift_and_one_day() {
    let validator = BattleValidator::new(ValidationPolicy::default());
    let date = at("2020-05-21 18:30");
    let claim = BattleClaim {
        winner: "Ash".to_string(),
        loser: "Gary".to_string(),
        submitted_at: date,
    };
    let mut replay = record("ash", "gary", "2020-05-21 18:30");
    replay.recorded_at = date + Duration::days(1);

    let result = validator.validate(&claim, &replay);
    assert!(result.is_success());
    assert_eq!(result.error(), "");
}

#[test]
fn test_validator_reports_only_the_winner() {
    let validator = BattleValidator::new(ValidationPolicy::default());
    let claim = BattleClaim {
        winner: "Ash".to_string(),
        loser: "Gary".to_string(),
        submitted_at: at("2020-05-21 18:30"),
    };

    let result = validator.validate(&claim, &record("Misty", "Gary", "2020-05-21 18:00"));
    assert!(!result.is_success());
    assert!(result.error().contains("Winner is not valid"));
    assert!(!result.error().contains("Loser"));
    assert!(!result.error().contains("Date"));
}

#[test]
fn test_leaderboard_row_truncates_nickname() {
    let raw = row(&["Real Name", "a_really_long_nickname", "4", "1", "260", "5"]);
    let built = build_row_from_raw(&raw, 3).unwrap();

    assert_eq!(built.position, 3);
    assert_eq!(built.nickname, "a_really_long..");
    assert_eq!(built.nickname.chars().count(), 15);
    assert_eq!(built.tier, Tier::Bronze);
    assert_eq!(raw[1], "a_really_long_nickname");
}

#[tokio::test]
async fn test_audit_reports_unresolved_winner_on_its_line() {
    let replays = FakeReplays(HashMap::from([
        (
            "https://replay.pokemonshowdown.com/gen8ou-1".to_string(),
            record("Ash", "Gary", "2020-05-21 18:00"),
        ),
        (
            "https://replay.pokemonshowdown.com/gen8ou-2".to_string(),
            record("Brock", "Misty", "2020-05-22 20:00"),
        ),
    ]));
    let auditor = FormAuditor::new(Arc::new(replays), BattleValidator::default(), 2);
    let leaderboard = Leaderboard::from_rows(&ranked_rows());

    let form = vec![
        row(&["21/05/2020 18:30:00", "ash@x", "Ash", "Gary", "https://replay.pokemonshowdown.com/gen8ou-1"]),
        row(&["22/05/2020 20:10:00", "brock@x", "Brock", "Misty", "https://replay.pokemonshowdown.com/gen8ou-2"]),
    ];

    let report = auditor.audit(&form, &leaderboard).await;
    assert_eq!(report.len(), 1, "{:?}", report);
    assert_eq!(report[0].row, 3);
    assert_eq!(report[0].message, "Winner not found; ");
}

fn player_rows() -> Vec<Vec<String>> {
    vec![
        row(&["Ash Ketchum", "ash#0001", "SW-1111-2222-3333", "AshK"]),
        row(&["Misty"]),
        row(&[]),
        row(&["Brock", "brock#0002", "", "Brocko"]),
    ]
}

fn oak(form: Vec<Vec<String>>, replays: FakeReplays) -> Oak {
    let settings = Settings::default();
    let sheet = FakeSheet(HashMap::from([
        (settings.ranked.rank_range.clone(), ranked_rows()),
        (settings.ranked.form_range.clone(), form),
        (settings.ranked.trainer_db_range.clone(), player_rows()),
    ]));
    Oak::with_sources(settings, Arc::new(sheet), Arc::new(replays)).unwrap()
}

#[tokio::test]
async fn test_ranked_validate_is_restricted_to_admin_channel() {
    let oak = oak(vec![], FakeReplays(HashMap::new()));

    let reply = oak.ranked_validate(&Invocation::new("1", "general")).await.unwrap();
    assert_eq!(reply.content(), "Restricted command!");

    let reply = oak.ranked_validate(&Invocation::new("1", "admin")).await.unwrap();
    assert!(reply.content().starts_with("All good!"));
}

#[tokio::test]
async fn test_ranked_validate_lists_problems() {
    let form = vec![row(&[
        "21/05/2020 18:30:00",
        "ash@x",
        "Ash",
        "Gary",
        "https://replay.pokemonshowdown.com/missing",
    ])];
    let oak = oak(form, FakeReplays(HashMap::new()));

    let reply = oak.ranked_validate(&Invocation::new("1", "admin")).await.unwrap();
    assert_eq!(reply.messages.len(), 1);
    assert!(reply.content().contains("Could not load replay"));
    assert!(reply.content().contains("Ln."));
}

#[tokio::test]
async fn test_ranked_lookups() {
    let oak = oak(vec![], FakeReplays(HashMap::new()));

    let reply = oak.ranked_trainer("gary").await.unwrap();
    assert_eq!(reply.content(), "**__Gary__**");
    let card = reply.messages[0].card.as_ref().unwrap();
    assert_eq!(card.get("Pos"), Some("2"));
    assert_eq!(card.get("Elo"), Some("Silver"));
    assert_eq!(card.color, Tier::Silver.color());

    let reply = oak.ranked_trainer("Nobody").await.unwrap();
    assert_eq!(reply.content(), "Trainer not found");

    let reply = oak.ranked_elo("prata").await.unwrap();
    assert_eq!(reply.messages.len(), 2);
    assert!(reply.messages[1].content.contains("Gary"));
    assert!(reply.messages[1].content.contains("Misty"));
    assert!(!reply.messages[1].content.contains("Ash"));

    let reply = oak.ranked_elo("ouro").await.unwrap();
    assert!(reply.messages[1].content.contains("Ash"));

    let reply = oak.ranked_elo("Mestre").await.unwrap();
    assert_eq!(reply.content(), "No trainers found for elo: Master");
}

#[tokio::test]
async fn test_trainer_db_lookup_and_sample() {
    let oak = oak(vec![], FakeReplays(HashMap::new()));

    let reply = oak.trainer_db(Some("brocko")).await.unwrap();
    assert_eq!(reply.content(), "**__Brock__**");
    let card = reply.messages[0].card.as_ref().unwrap();
    assert_eq!(card.get("Discord"), Some("brock#0002"));
    assert_eq!(card.get("Switch FC"), Some("n/a"));

    let reply = oak.trainer_db(Some("Gary")).await.unwrap();
    assert_eq!(reply.content(), "Trainer not found");

    let reply = oak.trainer_db(None).await.unwrap();
    let card = reply.messages[0].card.as_ref().unwrap();
    assert_eq!(card.fields.len(), 3);
    assert!(card.fields.iter().any(|f| f.name == "Misty - n/a"));
}

#[tokio::test]
async fn test_ranked_trainer_matches_decomposed_nickname() {
    let mut rows = ranked_rows();
    rows.push(row(&["João", "Joa\u{0303}o", "1", "0", "120", "1"]));
    let settings = Settings::default();
    let sheet = FakeSheet(HashMap::from([(settings.ranked.rank_range.clone(), rows)]));
    let oak = Oak::with_sources(settings, Arc::new(sheet), Arc::new(FakeReplays(HashMap::new()))).unwrap();

    let reply = oak.ranked_trainer("joão").await.unwrap();
    let card = reply.messages[0].card.as_ref().unwrap();
    assert_eq!(card.get("Pos"), Some("4"));
    assert_eq!(card.get("Elo"), Some("Bronze"));
}
