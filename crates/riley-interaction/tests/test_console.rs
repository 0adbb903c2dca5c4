use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use riley_core::session::{GREETING, MessageRole};
use riley_core::user::DefaultUserService;
use riley_core::{
    ActionKind, ActionOutcome, ApiRequest, Mode, ResponseBackend, ResponseSource, RileyError,
    Route, Settings, Tone,
};
use riley_execution::MockBackend;
use riley_execution::responses::canned_response;
use riley_interaction::voice::{
    MOCK_TRANSCRIPT, MockRecognizer, NoSpeech, RECOGNITION_PLACEHOLDER, SpeechSynthesizer,
};
use riley_interaction::{APOLOGY, ConsoleSession, InteractionResult};
use tokio::sync::Notify;

fn session_with(settings: Settings, backend: Arc<dyn ResponseBackend>) -> ConsoleSession {
    ConsoleSession::new(settings, backend, Arc::new(DefaultUserService::default()))
}

fn instant_session() -> ConsoleSession {
    session_with(
        Settings::default(),
        Arc::new(MockBackend::with_latency(Duration::ZERO)),
    )
}

/// Backend that blocks until released, so a request can be observed in flight.
struct GatedBackend {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl ResponseBackend for GatedBackend {
    async fn respond(
        &self,
        _request: &ApiRequest,
        route: &Route,
        mode: Mode,
    ) -> riley_core::Result<ActionOutcome> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(canned_response(route, mode))
    }
}

struct FailingBackend;

#[async_trait]
impl ResponseBackend for FailingBackend {
    async fn respond(
        &self,
        _request: &ApiRequest,
        _route: &Route,
        _mode: Mode,
    ) -> riley_core::Result<ActionOutcome> {
        Err(RileyError::backend("connection refused"))
    }
}

#[derive(Default)]
struct RecordingSynthesizer {
    spoken: Mutex<Vec<String>>,
    cancels: Mutex<usize>,
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn cancel(&self) {
        *self.cancels.lock().unwrap() += 1;
    }
}

fn reply_of(result: InteractionResult) -> riley_core::session::Message {
    match result {
        InteractionResult::Reply(message) => message,
        other => panic!("Expected Reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_session_opens_with_greeting() {
    let session = instant_session();
    let messages = session.messages().await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::Assistant);
    assert_eq!(messages[0].content, GREETING);
    assert_eq!(session.current_mode().await, Mode::Assistant);
    assert!(!session.is_busy().await);
}

#[tokio::test]
async fn test_messages_interleave_in_order() {
    let session = instant_session();
    let inputs = ["hello", "search penguins", "what time is it", "fix my code"];

    for input in inputs {
        reply_of(session.send(input).await);
    }

    let messages = session.messages().await;
    assert_eq!(messages.len(), 1 + 2 * inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        let user = &messages[1 + 2 * i];
        let assistant = &messages[2 + 2 * i];
        assert_eq!(user.role, MessageRole::User);
        assert_eq!(user.content, *input);
        assert_eq!(assistant.role, MessageRole::Assistant);
        assert!(user.timestamp <= assistant.timestamp);
    }
}

#[tokio::test]
async fn test_reply_annotations_per_kind() {
    let session = instant_session();

    let invention = reply_of(session.send("create a new invention").await);
    assert_eq!(invention.source, Some(ResponseSource::InventionEngine));
    assert_eq!(invention.emotion, Some(Tone::Enthusiastic));
    assert_eq!(invention.style, Some(Tone::Enthusiastic));

    let github = reply_of(session.send("analyze https://github.com/x/y").await);
    assert_eq!(github.source, Some(ResponseSource::GithubLearning));

    let search = reply_of(session.send("research coral reefs").await);
    assert!(search.content.contains("\"coral reefs\""));

    let chat = reply_of(session.send("what time is it").await);
    assert_eq!(chat.source, Some(ResponseSource::ReasoningEngine));
    assert_eq!(chat.emotion, Some(Tone::Empathetic));
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let session = instant_session();
    assert_eq!(session.send("   ").await, InteractionResult::NoOp);
    assert_eq!(session.handle_input("").await, InteractionResult::NoOp);
    assert_eq!(session.messages().await.len(), 1);
}

#[tokio::test]
async fn test_mode_switch_appends_one_announcement() {
    let session = instant_session();

    let result = session.handle_input("/mode storyteller").await;
    match result {
        InteractionResult::ModeChanged { mode, announcement } => {
            assert_eq!(mode, Mode::Storyteller);
            assert_eq!(
                announcement.content,
                "I've switched to storyteller mode. How can I assist you?"
            );
            assert!(announcement.source.is_none());
        }
        other => panic!("Expected ModeChanged, got {:?}", other),
    }

    assert_eq!(session.current_mode().await, Mode::Storyteller);
    assert_eq!(session.messages().await.len(), 2);

    let reply = reply_of(session.send("tell me about dragons").await);
    assert!(reply.content.contains("storyteller mode"));
    assert_eq!(reply.emotion, Some(Tone::Engaging));
}

#[tokio::test]
async fn test_backend_failure_appends_single_apology() {
    let session = session_with(Settings::default(), Arc::new(FailingBackend));

    let apology = reply_of(session.send("search anything").await);
    assert_eq!(apology.content, APOLOGY);
    assert!(apology.source.is_none());
    assert!(apology.emotion.is_none());

    let messages = session.messages().await;
    assert_eq!(messages.len(), 3);
    assert_eq!(messages.iter().filter(|m| m.content == APOLOGY).count(), 1);
    assert!(!session.is_busy().await, "slot is cleared after failure");
}

#[tokio::test]
async fn test_special_action_visible_while_in_flight() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let session = Arc::new(session_with(
        Settings::default(),
        Arc::new(GatedBackend {
            started: started.clone(),
            release: release.clone(),
        }),
    ));

    let sender = session.clone();
    let handle =
        tokio::spawn(async move { sender.send("clone https://github.com/a/b please").await });
    started.notified().await;

    let action = session.special_action().await.expect("action in flight");
    assert_eq!(action.kind, ActionKind::Github);
    assert_eq!(action.prompt, "clone https://github.com/a/b please");
    assert_eq!(action.request.endpoint(), "/api/github");
    assert!(session.is_busy().await);

    release.notify_one();
    reply_of(handle.await.unwrap());

    assert!(session.special_action().await.is_none());
    assert!(!session.is_busy().await);
}

#[tokio::test]
async fn test_second_send_while_pending_is_busy() {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let session = Arc::new(session_with(
        Settings::default(),
        Arc::new(GatedBackend {
            started: started.clone(),
            release: release.clone(),
        }),
    ));

    let sender = session.clone();
    let handle = tokio::spawn(async move { sender.send("hello").await });
    started.notified().await;

    assert_eq!(session.send("are you there?").await, InteractionResult::Busy);
    // Plain chat holds the slot too, but is not a special action.
    assert!(session.special_action().await.is_none());

    release.notify_one();
    reply_of(handle.await.unwrap());

    let contents: Vec<String> = session
        .messages()
        .await
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert!(!contents.iter().any(|c| c == "are you there?"));
    assert_eq!(contents.len(), 3);
}

#[tokio::test]
async fn test_cancel_resolves_pending_request() {
    let started = Arc::new(Notify::new());
    let session = Arc::new(session_with(
        Settings::default(),
        Arc::new(GatedBackend {
            started: started.clone(),
            release: Arc::new(Notify::new()),
        }),
    ));

    assert!(!session.cancel_pending().await);

    let sender = session.clone();
    let handle = tokio::spawn(async move { sender.send("invent a gadget").await });
    started.notified().await;

    assert_eq!(
        session.handle_input("/cancel").await,
        InteractionResult::Notice("Cancelling the request in progress.".to_string())
    );
    assert_eq!(handle.await.unwrap(), InteractionResult::Cancelled);
    assert!(!session.is_busy().await);

    // The user message stays, no reply was added.
    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, MessageRole::User);
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_send_releases_slot() {
    let session = session_with(Settings::default(), Arc::new(MockBackend::new()));

    let timed_out =
        tokio::time::timeout(Duration::from_millis(100), session.send("search otters")).await;
    assert!(timed_out.is_err());

    assert!(!session.is_busy().await);
    assert!(session.special_action().await.is_none());
    let reply = reply_of(session.send("second").await);
    assert_eq!(reply.source, Some(ResponseSource::ReasoningEngine));
}

#[tokio::test]
async fn test_aborted_send_releases_slot() {
    let started = Arc::new(Notify::new());
    let session = Arc::new(session_with(
        Settings::default(),
        Arc::new(GatedBackend {
            started: started.clone(),
            release: Arc::new(Notify::new()),
        }),
    ));

    let sender = session.clone();
    let handle = tokio::spawn(async move { sender.send("invent a gadget").await });
    started.notified().await;
    assert!(session.is_busy().await);

    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());

    assert!(!session.is_busy().await);
    assert!(!session.cancel_pending().await, "nothing left to cancel");
}

#[tokio::test]
async fn test_disabled_tool_answers_as_conversation() {
    let mut settings = Settings::default();
    settings.allowed_tools.github = false;
    let session = session_with(settings, Arc::new(MockBackend::with_latency(Duration::ZERO)));

    let reply = reply_of(session.send("analyze the tokio repository").await);
    assert_eq!(reply.source, Some(ResponseSource::ReasoningEngine));
}

#[tokio::test]
async fn test_settings_seed_mode_and_voice() {
    let settings = Settings {
        default_mode: Mode::Genius,
        voice_enabled: true,
        ..Settings::default()
    };
    let session = session_with(settings, Arc::new(MockBackend::with_latency(Duration::ZERO)));

    assert_eq!(session.current_mode().await, Mode::Genius);
    assert!(session.voice_enabled().await);
}

#[tokio::test]
async fn test_voice_speaks_replies_only_when_enabled() {
    let synthesizer = Arc::new(RecordingSynthesizer::default());
    let session = instant_session().with_speech(synthesizer.clone(), Arc::new(NoSpeech));

    session.send("hello").await;
    assert!(synthesizer.spoken.lock().unwrap().is_empty());

    let (enabled, notice) = session.toggle_voice().await;
    assert!(enabled);
    assert_eq!(notice, None, "no recognizer, no placeholder");

    let reply = reply_of(session.send("hello again").await);
    assert_eq!(*synthesizer.spoken.lock().unwrap(), vec![reply.content]);

    let (enabled, _) = session.toggle_voice().await;
    assert!(!enabled);
    assert_eq!(*synthesizer.cancels.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_voice_toggle_placeholder_and_listen() {
    let session = instant_session().with_speech(
        Arc::new(NoSpeech),
        Arc::new(MockRecognizer::new(Duration::ZERO)),
    );

    assert_eq!(
        session.handle_input("/listen").await,
        InteractionResult::Transcript(None)
    );

    assert_eq!(
        session.handle_input("/voice").await,
        InteractionResult::VoiceToggled {
            enabled: true,
            notice: Some(RECOGNITION_PLACEHOLDER.to_string()),
        }
    );
    assert_eq!(
        session.handle_input("/listen").await,
        InteractionResult::Transcript(Some(MOCK_TRANSCRIPT.to_string()))
    );
}

#[tokio::test]
async fn test_informational_commands() {
    let session = instant_session();
    session.send("hello").await;

    match session.handle_input("/history 2").await {
        InteractionResult::History(messages) => {
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].content, "hello");
        }
        other => panic!("Expected History, got {:?}", other),
    }

    match session.handle_input("/status").await {
        InteractionResult::Notice(text) => {
            assert!(text.contains("mode: assistant"));
            assert!(text.contains("in flight: none"));
            assert!(text.contains("messages: 3"));
        }
        other => panic!("Expected Notice, got {:?}", other),
    }

    match session.handle_input("/modes").await {
        InteractionResult::Notice(text) => {
            assert_eq!(text.lines().count(), 8);
            assert!(text.lines().next().unwrap().starts_with("* assistant"));
        }
        other => panic!("Expected Notice, got {:?}", other),
    }

    match session.handle_input("/settings").await {
        InteractionResult::Notice(text) => assert!(text.contains("default_mode = \"assistant\"")),
        other => panic!("Expected Notice, got {:?}", other),
    }

    match session.handle_input("/help mode").await {
        InteractionResult::Notice(text) => assert!(text.starts_with("/mode [")),
        other => panic!("Expected Notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_command_errors_do_not_touch_conversation() {
    let session = instant_session();

    assert_eq!(
        session.handle_input("/dance").await,
        InteractionResult::Error("Unknown command '/dance'".to_string())
    );
    assert_eq!(
        session.handle_input("/mode pirate").await,
        InteractionResult::Error("Unknown mode 'pirate'".to_string())
    );
    assert_eq!(session.messages().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_listen_stops_capture() {
    let session = Arc::new(instant_session().with_speech(
        Arc::new(NoSpeech),
        Arc::new(MockRecognizer::default()),
    ));
    session.toggle_voice().await;

    let listener = session.clone();
    let handle = tokio::spawn(async move { listener.listen().await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(session.is_listening());

    assert_eq!(
        session.handle_input("/listen").await,
        InteractionResult::Transcript(None)
    );
    assert_eq!(handle.await.unwrap(), None);
    assert!(!session.is_listening());

    // A fresh capture runs to completion.
    assert_eq!(session.listen().await, Some(MOCK_TRANSCRIPT.to_string()));
    assert!(!session.is_listening());
}
