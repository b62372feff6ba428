use std::sync::Arc;

use portal_core::model::{LearningTrack, QuestionId, TestId, TrackCode};
use portal_core::quiz::{Step, TapOutcome, TickOutcome};
use portal_core::time::fixed_clock;
use serde_json::{Value, json};
use services::api::{ApiFailure, Endpoints, RequestMethod, ScriptedTransport};
use services::{
    AppServices, Destination, Notice, PortraitPhoto, ProfileError, QuizError, QuizLoopService,
};

fn harness() -> (AppServices, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::new());
    let endpoints = Endpoints::parse("https://api.example.test").expect("endpoints");
    let services = AppServices::in_memory(transport.clone(), endpoints, fixed_clock());
    let quiz_loop = QuizLoopService::new(services.api().clone(), services.session())
        .with_canonical_order();
    (services.with_quiz_loop(quiz_loop), transport)
}

fn user_json() -> Value {
    json!({
        "username": "ada",
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "lastLogin": "14-11-2023"
    })
}

fn questions_json() -> Value {
    json!({"success": true, "data": {"questions": [
        {"questionid": 1, "question": "1 + 1?", "a": "2", "b": "3", "c": "4", "d": "5", "answer": "2"},
        {"questionid": 2, "question": "2 + 2?", "a": "2", "b": "3", "c": "4", "d": "5", "answer": "4",
         "explanation": "Two pairs make four."},
        {"questionid": 3, "question": "3 + 3?", "a": "6", "b": "3", "c": "4", "d": "5", "answer": "6"}
    ]}})
}

async fn sign_in(services: &AppServices, transport: &ScriptedTransport) {
    transport.respond_json(
        "professional-login",
        json!({"success": true, "message": "Welcome back", "data": {"user": user_json()}}),
    );
    services
        .account()
        .login("ada@example.com", "secret")
        .await
        .expect("login");
}

#[tokio::test]
async fn login_stores_user_and_opens_session() {
    let (services, transport) = harness();
    transport.respond_json(
        "professional-login",
        json!({"success": true, "message": "Welcome back", "data": {"user": user_json()}}),
    );

    let outcome = services
        .account()
        .login("ada@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(outcome.message, "Welcome back");
    assert_eq!(outcome.user.display_name(), "A. Lovelace");
    assert!(services.account().has_active_session().await.unwrap());

    let request = &transport.requests_to("professional-login")[0];
    assert_eq!(request.method, RequestMethod::PostForm);
    assert_eq!(request.field("email"), Some("ada@example.com"));
    assert_eq!(request.field("password"), Some("secret"));

    services.account().logout().await.unwrap();
    assert!(services.account().current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn practice_run_saves_progress_and_corrections() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    transport
        .respond_json("/api/quest/7/get-questions/ada/", questions_json())
        .respond_json("/answered/ada/", json!({"success": true}));

    let quiz = services.quiz_loop();
    let mut session = quiz.start_practice(TestId::new(7), 30).await.unwrap();
    assert_eq!(session.len(), 3);

    // Correct: "2" sits at position 0 in canonical order.
    assert_eq!(session.tap(0), TapOutcome::Highlighted(0));
    assert!(matches!(session.tap(0), TapOutcome::Committed(e) if e.is_correct()));
    assert_eq!(session.resolve().unwrap(), Step::Presenting(1));

    // Wrong with an explanation: the overlay must be dismissed.
    session.tap(1);
    session.tap(1);
    assert_eq!(session.resolve().unwrap(), Step::Explaining);
    assert_eq!(session.dismiss_explanation().unwrap(), Step::Presenting(2));

    // Let the clock run out on the last one.
    let mut outcome = session.tick();
    while let TickOutcome::Running(_) = outcome {
        outcome = session.tick();
    }
    assert!(matches!(outcome, TickOutcome::TimedOut(_)));
    assert_eq!(session.resolve().unwrap(), Step::Finished);

    let report = quiz.submit(TestId::new(7), &session).await.unwrap();
    assert_eq!(
        report.destination,
        Some(Destination::PracticeResults {
            test_id: TestId::new(7),
            passed: 1
        })
    );
    assert!(report.notices.is_empty());
    assert_eq!(
        transport.requests_to("/api/question/1/answered/ada/").len(),
        1
    );

    let corrections = services.session().corrections().await.unwrap();
    let ids: Vec<QuestionId> = corrections.iter().filter_map(|q| q.id()).collect();
    assert_eq!(ids, vec![QuestionId::new(2), QuestionId::new(3)]);
}

#[tokio::test]
async fn empty_question_bank_is_reported() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    transport.respond_json(
        "get-questions",
        json!({"success": true, "data": {"questions": []}}),
    );
    let err = services
        .quiz_loop()
        .start_practice(TestId::new(1), 30)
        .await
        .unwrap_err();
    assert!(matches!(err, QuizError::NoQuestions));
    assert_eq!(err.to_string(), "No questions found for this test.");
}

#[tokio::test]
async fn certification_score_failure_still_navigates() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    transport
        .respond_json("start-test", questions_json())
        .fail("save-test-score", ApiFailure::Connection);

    let quiz = services.quiz_loop();
    let mut session = quiz.start_certification(TestId::new(5), 40).await.unwrap();
    for position in [0, 2, 1] {
        session.tap(position);
        session.tap(position);
        session.resolve().unwrap();
    }
    assert!(session.is_finished());

    let report = quiz.submit(TestId::new(5), &session).await.unwrap();
    assert_eq!(report.destination, Some(Destination::Portal));
    assert_eq!(
        report.notices,
        vec![Notice::error(
            "Failed to save test score. Connection Interrupted!"
        )]
    );
    let request = &transport.requests_to("save-test-score/ada/5/")[0];
    assert_eq!(request.field("score"), Some("66"));
}

#[tokio::test]
async fn certification_scores_against_every_question_sent() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    let questions: Vec<Value> = (1..=10)
        .map(|n| {
            json!({
                "questionid": if n == 9 { json!("q-9") } else { json!(n) },
                "question": format!("Question {n}?"),
                "a": "right", "b": "wrong", "c": "other", "d": "none",
                "answer": if n == 10 { "" } else { "right" },
            })
        })
        .collect();
    transport
        .respond_json(
            "start-test",
            json!({"success": true, "data": {"questions": questions}}),
        )
        .respond_json("save-test-score", json!({"success": true, "message": "Score saved"}));

    let quiz = services.quiz_loop();
    let mut session = quiz.start_certification(TestId::new(6), 40).await.unwrap();
    assert_eq!(session.len(), 10);
    for i in 0..10 {
        let position = if i < 7 { 0 } else { 1 };
        session.tap(position);
        session.tap(position);
        session.resolve().unwrap();
    }
    assert!(session.is_finished());

    quiz.submit(TestId::new(6), &session).await.unwrap();
    let request = &transport.requests_to("save-test-score/ada/6/")[0];
    assert_eq!(request.field("score"), Some("70"));
}

#[tokio::test]
async fn submission_without_user_stays_put() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    transport.respond_json("get-questions", questions_json());
    let quiz = services.quiz_loop();
    let mut session = quiz.start_practice(TestId::new(7), 0).await.unwrap();
    for _ in 0..3 {
        session.tap(3);
        session.tap(3);
        if session.resolve().unwrap() == Step::Explaining {
            session.dismiss_explanation().unwrap();
        }
    }
    assert!(session.is_finished());
    services.account().logout().await.unwrap();

    let report = quiz.submit(TestId::new(7), &session).await.unwrap();
    assert_eq!(report.destination, None);
    assert_eq!(
        report.notices,
        vec![Notice::error("User not logged in. Cannot save progress.")]
    );
}

#[tokio::test]
async fn results_round_trip_to_track_dashboard() {
    let (services, transport) = harness();
    sign_in(&services, &transport).await;
    let track = LearningTrack {
        code: TrackCode::new("ICAN").unwrap(),
        name: "ICAN".into(),
        logo: None,
    };
    services.catalog().open_track(&track).await.unwrap();
    transport.respond_json("save-performance", json!({"success": false, "message": "nope"}));

    let results_service = services.results();
    assert!(results_service.load(Some("7"), None).await.is_err());
    let results = results_service.load(Some("7"), Some("4")).await.unwrap();
    assert_eq!(results.score_percent(), 100);

    let report = results_service.save_performance(&results).await.unwrap();
    assert_eq!(
        report.destination,
        Some(Destination::TrackDashboard { code: track.code })
    );
    assert_eq!(
        report.notices,
        vec![Notice::error(
            "Failed to save performance. Connection Interrupted!!"
        )]
    );
    let request = &transport.requests_to("save-performance/ada/")[0];
    assert_eq!(request.field("total_answered"), Some("4"));
    assert_eq!(request.field("time"), Some("6"));
    assert_eq!(request.field("testid"), Some("7"));
}

#[tokio::test]
async fn portrait_upload_checks_user_and_photo() {
    let (services, transport) = harness();
    let photo = PortraitPhoto {
        mime: "image/png".into(),
        bytes: vec![0x89, 0x50],
    };
    let err = services
        .profile()
        .upload_portrait(Some(photo.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::NotSignedIn));
    assert!(transport.requests().is_empty());

    sign_in(&services, &transport).await;
    let err = services.profile().upload_portrait(None).await.unwrap_err();
    assert_eq!(err.to_string(), "No photo to upload. Please take a photo first.");

    transport.respond("user-profile/update", Ok(services::api::ApiPayload::new(
        "Upload successful",
        Value::Null,
    )));
    let message = services
        .profile()
        .upload_portrait(Some(photo))
        .await
        .unwrap();
    assert_eq!(message, "Upload successful");
    let request = &transport.requests_to("user-profile/update")[0];
    assert_eq!(request.method, RequestMethod::PostMultipart);
    assert_eq!(request.field("email"), Some("ada@example.com"));
    assert_eq!(request.files[0].field, "portraitPhoto");
}
