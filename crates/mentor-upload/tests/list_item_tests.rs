use mentor_core::{Answer, Question};
use mentor_test_utils::{intro_question, upload_task, FakeRecordSession};
use mentor_upload::UploadTaskStatus::{Done, Failed, Processing, Queued};
use mentor_upload::{
    are_all_tasks_done, is_a_task_failed, is_queued, UploadListItem, UploadPhase, UploadTask,
    UploadTaskStatus,
};
use proptest::prelude::*;

#[test]
fn job_title_uses_custom_intro_text() {
    let session = FakeRecordSession::new().with_question(intro_question(), Some("Tell us who you are"));
    let upload = upload_task("intro", &[Processing]);

    let item = UploadListItem::new(&session, &upload);
    assert_eq!(item.job_title, "Tell us who you are");
}

#[test]
fn job_title_falls_back_to_question_then_empty() {
    let session = FakeRecordSession::new().with_question(Question::new("q1", "What is your job?"), None);

    let known = upload_task("q1", &[Queued]);
    assert_eq!(UploadListItem::new(&session, &known).job_title, "What is your job?");

    let unknown = upload_task("q2", &[Queued]);
    assert_eq!(UploadListItem::new(&session, &unknown).job_title, "");
}

#[test]
fn needs_attention_comes_from_matching_answer() {
    let session = FakeRecordSession::new()
        .with_answer(Answer::new("q1", "I build bridges").flagged())
        .with_answer(Answer::new("q2", "I like hiking"));

    let flagged = upload_task("q1", &[Done]);
    let clean = upload_task("q2", &[Done]);
    let missing = upload_task("q3", &[Done]);

    assert!(UploadListItem::new(&session, &flagged).needs_attention);
    assert!(!UploadListItem::new(&session, &clean).needs_attention);
    assert!(!UploadListItem::new(&session, &missing).needs_attention);
}

#[test]
fn cancelling_flag_is_passed_through() {
    let session = FakeRecordSession::new();
    let mut upload = upload_task("q1", &[Processing]);
    upload.is_cancelling = true;

    assert!(UploadListItem::new(&session, &upload).cancelling);
}

#[test]
fn download_uses_local_blob_url() {
    let session = FakeRecordSession::new().with_file("q1", "blob:http://localhost/123");
    let with_file = upload_task("q1", &[Processing]);
    let without_file = upload_task("q2", &[Processing]);

    let item = UploadListItem::new(&session, &with_file);
    assert!(item.has_video_file_url());
    assert!(item.download_video());

    let other = UploadListItem::new(&session, &without_file);
    assert!(!other.has_video_file_url());
    assert!(!other.download_video());

    assert_eq!(
        session.downloads(),
        vec![("blob:http://localhost/123".to_string(), "q1".to_string())]
    );
}

#[test]
fn close_removes_only_finished_tasks() {
    let session = FakeRecordSession::new();
    let done = upload_task("done", &[Done, Done]);
    let failed = upload_task("failed", &[Done, Failed]);
    let running = upload_task("running", &[Done, Processing]);

    assert!(UploadListItem::new(&session, &done).on_close());
    assert!(UploadListItem::new(&session, &failed).on_close());
    assert!(!UploadListItem::new(&session, &running).on_close());

    assert_eq!(session.removed(), vec!["done".to_string(), "failed".to_string()]);
}

#[test]
fn session_counters_are_passed_through() {
    let mut session = FakeRecordSession::new();
    session.downloading = true;
    session.poll_count = 7;
    let upload = upload_task("q1", &[Queued]);

    let item = UploadListItem::new(&session, &upload);
    assert!(item.is_downloading_video());
    assert_eq!(item.poll_status_count(), 7);
    assert!(item.is_job_queued());
    assert_eq!(item.phase(), UploadPhase::Queued);
}

#[test]
fn upload_task_deserializes_wire_format() {
    let json = r#"{"question":"q1","taskList":[{"taskName":"transcoding","status":"DONE"},{"taskName":"transcribing","status":"QUEUED"}],"isCancelling":false}"#;
    let task: UploadTask = serde_json::from_str(json).unwrap();
    assert!(is_queued(&task));
    assert!(!are_all_tasks_done(&task));
}

fn status_strategy() -> impl Strategy<Value = UploadTaskStatus> {
    prop_oneof![Just(Queued), Just(Processing), Just(Done), Just(Failed)]
}

proptest! {
    #[test]
    fn prop_predicates_match_definitions(statuses in prop::collection::vec(status_strategy(), 0..6)) {
        let task = upload_task("q1", &statuses);

        prop_assert_eq!(is_queued(&task), statuses.contains(&Queued));
        prop_assert_eq!(is_a_task_failed(&task), statuses.contains(&Failed));
        prop_assert_eq!(are_all_tasks_done(&task), statuses.iter().all(|s| *s == Done));
    }

    #[test]
    fn prop_phase_respects_precedence(statuses in prop::collection::vec(status_strategy(), 0..6)) {
        let task = upload_task("q1", &statuses);
        let phase = UploadPhase::of(&task);

        if is_a_task_failed(&task) {
            prop_assert_eq!(phase, UploadPhase::Failed);
        } else if are_all_tasks_done(&task) {
            prop_assert_eq!(phase, UploadPhase::Done);
        } else {
            prop_assert!(!phase.is_terminal());
        }
    }
}
