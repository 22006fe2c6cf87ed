//! End-to-end turns through the real client and a mock gateway.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;

use chathub::credential::Credential;
use chathub::llm::{Message, ModelRegistry, Role, SYSTEM_PROMPT};
use chathub::session::{
    ChatSession, ENTER_KEY_PROMPT, StepOutcome, TYPE_MESSAGE_PROMPT, TurnError,
};
use chathub::surface;
use common::{MockGateway, MockReply, RecordingSurface};

fn session_for(mock: &MockGateway) -> ChatSession {
    ChatSession::new(
        Arc::new(mock.client()),
        ModelRegistry::builtin().default_model(),
    )
}

#[tokio::test]
async fn scenario_a_missing_key() {
    let mock = MockGateway::start(MockReply::content("unused")).await;
    let mut session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("", "hello");

    session.step(&mut surface).await;

    assert_eq!(surface.infos, [ENTER_KEY_PROMPT]);
    assert!(session.history().is_empty());
    assert!(mock.captured().is_empty());
}

#[tokio::test]
async fn scenario_b_empty_message() {
    let mock = MockGateway::start(MockReply::content("unused")).await;
    let mut session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("sk-x", "");

    session.step(&mut surface).await;

    assert_eq!(surface.infos, [TYPE_MESSAGE_PROMPT]);
    assert!(session.history().is_empty());
    assert!(mock.captured().is_empty());
}

#[tokio::test]
async fn scenario_c_successful_reply() {
    let mock = MockGateway::start(MockReply::content("Hello!")).await;
    let mut session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("sk-x", "Hi");

    let outcome = session.step(&mut surface).await;

    assert!(matches!(outcome, StepOutcome::Replied(ref r) if r == "Hello!"));
    assert_eq!(
        session.history(),
        [Message::user("Hi"), Message::assistant("Hello!")]
    );
    assert!(surface.errors.is_empty());

    let captured = mock.captured();
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer sk-x"));
    assert_eq!(captured[0].body["messages"][0]["content"], SYSTEM_PROMPT);
}

#[tokio::test]
async fn scenario_d_invalid_key() {
    let mock = MockGateway::start(MockReply::Json(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"error": "invalid key"}),
    ))
    .await;
    let mut session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("sk-x", "Hi");

    let outcome = session.step(&mut surface).await;

    assert!(matches!(outcome, StepOutcome::Rejected(TurnError::Gateway(_))));
    assert_eq!(session.history(), [Message::user("Hi")]);
    assert_eq!(surface.errors.len(), 1);
    assert!(surface.errors[0].contains("401"));
    assert!(surface.errors[0].contains("invalid key"));
}

#[tokio::test]
async fn scenario_e_timeout() {
    let mock = MockGateway::start(MockReply::Delayed(
        Duration::from_secs(5),
        serde_json::json!({"choices": [{"message": {"content": "late"}}]}),
    ))
    .await;
    let mut session = session_for(&mock).with_timeout(Duration::from_millis(200));
    let mut surface = RecordingSurface::submitting("sk-x", "Hi");

    session.step(&mut surface).await;

    assert_eq!(session.history(), [Message::user("Hi")]);
    assert_eq!(surface.errors.len(), 1);
    assert!(surface.errors[0].contains("timed out"), "{}", surface.errors[0]);
    assert_eq!(surface.busy, [true, false]);
}

#[tokio::test]
async fn scenario_f_clear_after_reply() {
    let mock = MockGateway::start(MockReply::content("Hello!")).await;
    let mut session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("sk-x", "Hi");
    session.step(&mut surface).await;
    assert_eq!(session.history().len(), 2);

    surface.clear = true;
    let outcome = session.step(&mut surface).await;

    assert!(matches!(outcome, StepOutcome::Cleared));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn conversation_alternates_and_resends_history() {
    let mock = MockGateway::start(MockReply::content("ok")).await;
    let mut session = session_for(&mock).with_credential(Credential::new("sk-x"));

    for i in 0..3 {
        session.submit(&format!("question {i}")).await.unwrap();
        assert_eq!(session.history().len(), 2 * (i + 1));
    }

    for (i, message) in session.history().iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(message.role, expected);
    }

    let captured = mock.captured();
    assert_eq!(captured.len(), 3);
    let last = captured[2].body["messages"].as_array().unwrap();
    assert_eq!(last.len(), 6);
    assert_eq!(last[0]["role"], "system");
    assert_eq!(last[5]["content"], "question 2");
}

#[tokio::test]
async fn run_drives_until_surface_closes() {
    let mock = MockGateway::start(MockReply::content("Hello!")).await;
    let session = session_for(&mock);
    let mut surface = RecordingSurface::submitting("sk-x", "Hi");

    surface::run(session, &mut surface).await;

    assert_eq!(mock.captured().len(), 1);
    let last = surface.renders.last().unwrap();
    assert_eq!(last, &[Message::user("Hi"), Message::assistant("Hello!")]);
}
