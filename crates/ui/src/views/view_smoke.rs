use std::time::Duration;

use serde_json::json;
use services::api::ApiFailure;
use services::toast::DEFAULT_AUTO_HIDE;

use super::test_harness::{ViewKind, setup_view_harness};
use crate::vm::QuizIntent;

fn questions_json() -> serde_json::Value {
    json!({"success": true, "data": {"questions": [
        {"questionid": 1, "question": "1 + 1?", "a": "2", "b": "3", "c": "4", "d": "5", "answer": "2"},
        {"questionid": 2, "question": "2 + 2?", "a": "2", "b": "3", "c": "4", "d": "5", "answer": "4"}
    ]}})
}

#[tokio::test(flavor = "current_thread")]
async fn portal_view_smoke_renders_joined_tracks() {
    let mut harness = setup_view_harness(ViewKind::Portal, |transport| {
        transport.respond_json(
            "get-learning-tracks",
            json!({"success": true, "data": {"learning_tracks": [
                {"code": "ICAN", "name": "ICAN Professional"},
                {"code": "ACCA", "name": "ACCA Foundations", "logo": "/media/acca.png"}
            ]}}),
        );
    })
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("ICAN Professional"), "missing track in {html}");
    assert!(html.contains("ACCA Foundations"), "missing track in {html}");
    assert!(
        html.contains("https://api.example.test/media/acca.png"),
        "logo not resolved in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_summary_and_locked_tests() {
    let mut harness = setup_view_harness(ViewKind::Dashboard("ICAN".into()), |transport| {
        transport
            .respond_json(
                "get-quests",
                json!({"success": true, "data": {"quests": [
                    {"testid": 3, "title": "Ethics", "question_count": 10, "answered_count": 4, "time": 30}
                ]}}),
            )
            .respond_json(
                "get-books",
                json!({"success": true, "data": {"books": [
                    {"bookid": 8, "title": "Audit Basics", "author": "J. Smith"}
                ]}}),
            )
            .respond_json(
                "get-tests",
                json!({"success": true, "data": {"tests": [
                    {"testid": 9, "title": "Final Exam", "question_count": 20, "time": 30}
                ]}}),
            );
    })
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Ethics"), "missing quest in {html}");
    assert!(html.contains("4 of 10 answered"), "missing progress in {html}");
    assert!(html.contains("Audit Basics"), "missing book in {html}");
    assert!(html.contains("Final Exam"), "missing test in {html}");
    assert!(
        html.contains("Complete every module in this track"),
        "missing locked note in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_failures_surface_as_toasts() {
    let mut harness = setup_view_harness(ViewKind::Dashboard("ICAN".into()), |transport| {
        transport
            .respond_json("get-quests", json!({"success": true, "data": {"quests": []}}))
            .respond_json("get-tests", json!({"success": true, "data": {"tests": []}}))
            .fail("get-books", ApiFailure::Connection);
    })
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("toast--error"), "missing error toast in {html}");
    assert!(html.contains("No modules in this track yet."), "missing body in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn blank_track_code_is_rejected() {
    let mut harness = setup_view_harness(ViewKind::Dashboard("  ".into()), |_| {}).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Course key is invalid."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(harness.transport.requests_to("get-quests").is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_highlights_tapped_option() {
    let mut harness = setup_view_harness(
        ViewKind::PracticeQuest {
            id: "7".into(),
            time: "30".into(),
        },
        |transport| {
            transport.respond_json("get-questions", questions_json());
        },
    )
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("1 + 1?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
    assert!(!html.contains("quiz-option--highlighted"));

    let handles = harness.quiz_handles.clone().expect("quiz handles");
    assert_eq!(handles.question_count(), Some(2));
    harness
        .dom
        .in_runtime(|| handles.dispatch(QuizIntent::Tap(0)));
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("quiz-option--highlighted"),
        "missing highlight in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_reports_empty_question_bank() {
    let mut harness = setup_view_harness(
        ViewKind::PracticeQuest {
            id: "7".into(),
            time: "30".into(),
        },
        |transport| {
            transport.respond_json(
                "get-questions",
                json!({"success": true, "data": {"questions": []}}),
            );
        },
    )
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No questions found for this test."),
        "missing empty notice in {html}"
    );
    assert!(html.contains("Back to portal"), "missing back button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score() {
    let mut harness = setup_view_harness(
        ViewKind::PracticeResults {
            id: "7".into(),
            passed: "4".into(),
        },
        |_| {},
    )
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("100%"), "missing score in {html}");
    assert!(
        html.contains("No corrections. Every answer was right."),
        "missing corrections state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn certification_view_smoke_lists_tests() {
    let mut harness = setup_view_harness(ViewKind::CertificationTests("ICAN".into()), |transport| {
        transport.respond_json(
            "get-tests",
            json!({"success": true, "data": {"tests": [
                {"testid": 9, "title": "Final Exam", "question_count": 20, "time": 30, "is_attempted": true},
                {"testid": 10, "title": "Mock Exam", "question_count": 5, "time": 10}
            ]}}),
        );
    })
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Final Exam"), "missing test in {html}");
    assert!(html.contains("Mock Exam"), "missing test in {html}");
    assert!(html.contains("20 questions"), "missing details in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toasts_hide_on_their_own_or_when_closed() {
    let mut harness = setup_view_harness(ViewKind::Blank, |_| {}).await;
    harness.rebuild();
    let toaster = harness.toaster();

    let closed = harness.dom.in_runtime(|| {
        toaster.info("Draft saved");
        toaster.error("Upload failed")
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Draft saved"), "missing toast in {html}");
    assert!(html.contains("Upload failed"), "missing toast in {html}");

    assert!(harness.dom.in_runtime(|| toaster.dismiss(closed)));
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains("Upload failed"), "closed toast still shown in {html}");
    assert!(html.contains("Draft saved"), "other toast went early in {html}");

    tokio::time::advance(DEFAULT_AUTO_HIDE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Draft saved"), "toast did not hide in {html}");
    assert!(harness.dom.in_runtime(|| toaster.snapshot()).is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_restarts_for_each_question() {
    let mut harness = setup_view_harness(
        ViewKind::TakeTest {
            id: "5".into(),
            time: "20".into(),
        },
        |transport| {
            transport.respond_json("start-test", questions_json());
        },
    )
    .await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing counter in {html}");
    assert!(html.contains("00:20"), "missing timer in {html}");

    // Answer part way into the first question's first second.
    tokio::time::advance(Duration::from_millis(400)).await;
    let handles = harness.quiz_handles.clone().expect("quiz handles");
    harness.dom.in_runtime(|| {
        handles.dispatch(QuizIntent::Tap(0));
        handles.dispatch(QuizIntent::Tap(0));
    });
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "did not advance in {html}");
    assert!(html.contains("00:20"), "timer not reset in {html}");

    tokio::time::advance(Duration::from_millis(600)).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("00:20"), "ticked early in {html}");

    tokio::time::advance(Duration::from_millis(500)).await;
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("00:19"), "missing tick in {html}");
}
