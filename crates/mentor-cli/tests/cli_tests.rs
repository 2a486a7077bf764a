//! Command tests driven through fixture files

use mentor_cli::fixture::TEMP_ID_PREFIX;
use mentor_cli::{
    run_questions, run_save, run_setup_defaults, run_uploads, CliConfig, FixtureApi,
    QuestionsArgs,
};
use mentor_core::{
    AccessToken, Answer, LoadingStatus, Mentor, MentorConfig, Question, UtteranceName,
    TITLE_PLACEHOLDER,
};
use mentor_store::{FailureScope, StoreConfig, StoreError};
use mentor_upload::{TaskInfo, UploadPhase, UploadTask, UploadTaskStatus};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = r#"[
    {"_id": "intro", "question": "Tell us about yourself", "type": "UTTERANCE", "name": "intro"},
    {"_id": "idle", "question": "Idle", "type": "UTTERANCE", "name": "idle", "minVideoLength": 10},
    {"_id": "a", "question": "What is your name?", "type": "QUESTION"},
    {"_id": "b", "question": "What do you do for a living?"}
]"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn fixture_api() -> FixtureApi {
    let file = write_temp(FIXTURE);
    FixtureApi::from_file(file.path()).unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn config_defaults_without_file() {
    let config = CliConfig::load(None).unwrap();
    assert_eq!(config, CliConfig::default());
    assert_eq!(config.log.level, "info");
    assert_eq!(config.store.failure_scope, FailureScope::Requested);
}

#[test]
fn config_reads_partial_toml() {
    let file = write_temp(
        r#"
[store]
failure_scope = "fetched"
load_error_message = "could not load"

[log]
json = true
"#,
    );

    let config = CliConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.store.failure_scope, FailureScope::Fetched);
    assert_eq!(config.store.load_error_message, "could not load");
    assert_eq!(config.store.save_error_message, "failed to save");
    assert!(config.log.json);
    assert_eq!(config.log.level, "info");
}

#[test]
fn config_rejects_bad_toml() {
    let file = write_temp("[store\nfailure_scope = 3");
    let err = CliConfig::load(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("parsing config"));
}

#[test]
fn fixture_rejects_malformed_json() {
    let file = write_temp("{not json");
    let err = FixtureApi::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("decoding fixture"));
}

#[tokio::test]
async fn fixture_accepts_unfamiliar_utterance_names() {
    let file = write_temp(
        r#"[
            {"_id": "q1", "question": "Any feedback?", "type": "UTTERANCE", "name": "_FEEDBACK_"},
            {"_id": "q2", "question": "What?"}
        ]"#,
    );
    let api = FixtureApi::from_file(file.path()).unwrap();

    let report = run_questions(
        api,
        StoreConfig::default(),
        QuestionsArgs {
            ids: ids(&["q1", "q2"]),
            ..QuestionsArgs::default()
        },
    )
    .await;

    assert_eq!(report.outcome, "loaded");
    assert!(report
        .questions
        .iter()
        .all(|q| q.status == LoadingStatus::Succeeded));
}

#[tokio::test]
async fn questions_load_and_skip_unknown_ids() {
    let report = run_questions(
        fixture_api(),
        StoreConfig::default(),
        QuestionsArgs {
            ids: ids(&["a", "b", "missing"]),
            ..QuestionsArgs::default()
        },
    )
    .await;

    assert_eq!(report.outcome, "loaded");
    assert_eq!(report.batch_status, LoadingStatus::Succeeded);
    let loaded: Vec<_> = report
        .questions
        .iter()
        .filter(|q| q.status == LoadingStatus::Succeeded)
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(loaded, vec!["a", "b"]);
    assert_eq!(report.questions[0].text, "What is your name?");
}

#[tokio::test]
async fn questions_already_preloaded_are_cancelled() {
    let report = run_questions(
        fixture_api(),
        StoreConfig::default(),
        QuestionsArgs {
            ids: ids(&["a"]),
            preload: ids(&["a", "b"]),
            ..QuestionsArgs::default()
        },
    )
    .await;

    assert_eq!(report.outcome, "cancelled");
    assert_eq!(report.questions.len(), 2);
}

#[tokio::test]
async fn questions_reload_refetches_preloaded() {
    let report = run_questions(
        fixture_api(),
        StoreConfig::default(),
        QuestionsArgs {
            ids: ids(&["a"]),
            preload: ids(&["a"]),
            reload: true,
            ..QuestionsArgs::default()
        },
    )
    .await;

    assert_eq!(report.outcome, "loaded");
}

#[tokio::test]
async fn questions_offline_marks_requested_ids_failed() {
    let report = run_questions(
        fixture_api().offline(true),
        StoreConfig::default().with_messages("could not load", "could not save"),
        QuestionsArgs {
            ids: ids(&["a", "b"]),
            ..QuestionsArgs::default()
        },
    )
    .await;

    assert_eq!(report.outcome, "failed");
    assert_eq!(report.batch_status, LoadingStatus::Failed);
    assert_eq!(report.questions.len(), 2);
    for row in &report.questions {
        assert_eq!(row.status, LoadingStatus::Failed);
        assert_eq!(row.error.as_deref(), Some("could not load"));
    }
    assert!(report.render_text().contains("[could not load]"));
}

#[tokio::test]
async fn questions_overlay_rewrites_intro_and_idle() {
    let overlay = MentorConfig {
        intro_recording_text: Some("Hi, I'm your mentor".to_string()),
        idle_recording_duration: Some(25.0),
    };
    let report = run_questions(
        fixture_api(),
        StoreConfig::default(),
        QuestionsArgs {
            ids: ids(&["intro", "idle", "a"]),
            overlay: Some(overlay),
            ..QuestionsArgs::default()
        },
    )
    .await;

    let row = |id: &str| report.questions.iter().find(|q| q.id == id).unwrap();
    assert_eq!(row("intro").text, "Hi, I'm your mentor");
    assert_eq!(row("idle").min_video_length, Some(25.0));
    assert_eq!(row("a").text, "What is your name?");
}

#[tokio::test]
async fn save_rekeys_temporary_id() {
    let draft = Question::new(format!("{TEMP_ID_PREFIX}-1"), "Where did you grow up?");

    let (saved, report) = run_save(
        fixture_api(),
        StoreConfig::default(),
        draft,
        Some(AccessToken::new("token")),
    )
    .await
    .unwrap();

    assert_eq!(saved.id, "q000001");
    assert_eq!(report.outcome, "saved");
    assert_eq!(report.questions.len(), 1);
    assert_eq!(report.questions[0].id, "q000001");
    assert_eq!(report.questions[0].status, LoadingStatus::Succeeded);
}

#[tokio::test]
async fn save_keeps_server_id() {
    let question = Question::utterance("intro", "New intro", UtteranceName::Intro);
    let (saved, _) = run_save(
        fixture_api(),
        StoreConfig::default(),
        question.clone(),
        Some(AccessToken::new("token")),
    )
    .await
    .unwrap();
    assert_eq!(saved, question);
}

#[tokio::test]
async fn save_without_token_is_rejected() {
    let err = run_save(
        fixture_api(),
        StoreConfig::default(),
        Question::new("a", "What is your name?"),
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err, StoreError::NoAccessToken);
}

#[tokio::test]
async fn save_offline_fails() {
    let err = run_save(
        fixture_api().offline(true),
        StoreConfig::default(),
        Question::new("a", "What is your name?"),
        Some(AccessToken::new("token")),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::SaveFailed { ref id, .. } if id == "a"));
}

#[tokio::test]
async fn uploads_resolve_titles_and_phases() {
    use UploadTaskStatus::{Done, Failed, Processing, Queued};

    let task = |question: &str, statuses: &[UploadTaskStatus]| {
        UploadTask::new(
            question,
            statuses
                .iter()
                .enumerate()
                .map(|(i, s)| TaskInfo::new(format!("step{i}"), *s))
                .collect(),
        )
    };
    let mut cancelling = task("b", &[Processing]);
    cancelling.is_cancelling = true;
    let tasks = vec![
        task("a", &[Done, Done]),
        cancelling,
        task("intro", &[Queued, Failed]),
        task("unknown", &[Queued, Processing]),
    ];
    let answers = vec![Answer::new("a", "My name is Clint").flagged()];

    let rows = run_uploads(fixture_api(), &tasks, answers).await;

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].title, "What is your name?");
    assert_eq!(rows[0].phase, UploadPhase::Done);
    assert!(rows[0].needs_attention);

    assert_eq!(rows[1].phase, UploadPhase::Processing);
    assert!(rows[1].cancelling);
    assert!(!rows[1].needs_attention);

    assert_eq!(rows[2].title, "Tell us about yourself");
    assert_eq!(rows[2].phase, UploadPhase::Failed);
    assert!(rows[2].queued && rows[2].failed);

    assert_eq!(rows[3].title, "");
    assert_eq!(rows[3].phase, UploadPhase::Queued);
}

#[test]
fn setup_defaults_for_new_mentor() {
    let mentor: Mentor = serde_json::from_str(r#"{"_id": "clint"}"#).unwrap();
    let edits = run_setup_defaults(&mentor, "Clint Anderson").unwrap();

    assert_eq!(edits.title.as_deref(), Some(TITLE_PLACEHOLDER));
    assert_eq!(edits.name.as_deref(), Some("Clint Anderson"));
    assert_eq!(edits.first_name.as_deref(), Some("Clint"));
}

#[test]
fn setup_defaults_for_complete_mentor() {
    let mentor: Mentor = serde_json::from_str(
        r#"{"_id": "clint", "name": "Clint Anderson", "firstName": "Clint", "title": "Electrician"}"#,
    )
    .unwrap();
    assert_eq!(run_setup_defaults(&mentor, "Clint Anderson"), None);
}
