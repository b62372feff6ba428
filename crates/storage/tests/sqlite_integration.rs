use std::sync::Arc;

use portal_core::model::{LearningTrack, QuestionId, SessionUser, TrackCode};
use storage::repository::{LocalStore, Storage};
use storage::session_store::SessionStore;
use storage::sqlite::SqliteStore;

fn user() -> SessionUser {
    SessionUser {
        username: "grace".into(),
        email: "grace@example.com".into(),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        last_login: Some("14-11-2023".into()),
    }
}

#[tokio::test]
async fn sqlite_round_trips_raw_items() {
    let store = SqliteStore::connect("sqlite:file:memdb_raw_items?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");
    store.migrate().await.expect("migrations are idempotent");

    store.set_item("lessonTrack", "\"A\"").await.unwrap();
    store.set_item("lessonTrack", "\"B\"").await.unwrap();
    assert_eq!(
        store.get_item("lessonTrack").await.unwrap().as_deref(),
        Some("\"B\"")
    );

    store.remove_item("lessonTrack").await.unwrap();
    assert!(store.get_item("lessonTrack").await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_session_store_keeps_user_and_track() {
    let storage = Storage::sqlite("sqlite:file:memdb_session?mode=memory&cache=shared")
        .await
        .expect("storage");
    let session = SessionStore::new(Arc::clone(&storage.local));

    session.set_user(&user()).await.unwrap();
    let track = LearningTrack {
        code: TrackCode::new("PRO-7").unwrap(),
        name: "Accounting".into(),
        logo: Some("/media/logo.png".into()),
    };
    session.set_lesson_track_obj(&track).await.unwrap();
    session.set_lesson_track(&track.code).await.unwrap();

    assert_eq!(session.user().await.unwrap(), Some(user()));
    assert_eq!(session.lesson_track_obj().await.unwrap(), Some(track));

    session.clear().await.unwrap();
    assert!(session.user().await.unwrap().is_none());
    assert!(session.lesson_track().await.unwrap().is_none());
}

#[tokio::test]
async fn corrections_survive_a_round_trip() {
    let storage = Storage::in_memory();
    let session = SessionStore::new(Arc::clone(&storage.local));
    let question = portal_core::model::Question::new(
        QuestionId::new(5),
        "2 + 2?",
        ["3".into(), "4".into(), "5".into(), "22".into()],
        "4",
    )
    .with_explanation("Addition.");

    session.set_corrections(&[question.clone()]).await.unwrap();
    assert_eq!(session.corrections().await.unwrap(), vec![question]);
}
