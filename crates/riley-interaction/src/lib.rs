pub mod voice;

use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use riley_core::command::{ConsoleCommand, builtin_commands, find_builtin_command};
use riley_core::session::{Conversation, Message, SpecialAction};
use riley_core::user::UserService;
use riley_core::{
    ApiRequest, IntentRouter, Mode, ResponseBackend, RileyError, Route, Settings,
};
use riley_execution::ActionExecutor;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::voice::{NoSpeech, RECOGNITION_PLACEHOLDER, SpeechRecognizer, SpeechSynthesizer};

/// The single user-visible failure message.
pub const APOLOGY: &str =
    "I apologize, but I encountered an error processing your request. Please try again.";

/// Result of handling one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResult {
    /// Nothing happened (blank input).
    NoOp,
    /// Riley answered; the message is already in the conversation.
    Reply(Message),
    /// The mode changed and an announcement was appended.
    ModeChanged { mode: Mode, announcement: Message },
    /// Voice output was toggled.
    VoiceToggled {
        enabled: bool,
        notice: Option<String>,
    },
    /// Output of `/listen`; `None` when voice is off or nothing was heard.
    Transcript(Option<String>),
    /// A slice of the conversation for `/history`.
    History(Vec<Message>),
    /// Informational text for the user.
    Notice(String),
    /// Another request is still in flight; nothing was appended.
    Busy,
    /// The request was cancelled before it resolved.
    Cancelled,
    /// A console command could not be run.
    Error(String),
}

/// Bookkeeping for the one request a session may have in flight.
struct PendingRequest {
    id: Uuid,
    action: Option<SpecialAction>,
    cancel: CancellationToken,
}

/// An active `/listen` capture.
struct Listening {
    id: Uuid,
    cancel: CancellationToken,
}

trait SlotEntry {
    fn id(&self) -> Uuid;
}

impl SlotEntry for PendingRequest {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl SlotEntry for Listening {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn lock<T>(slot: &StdMutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Empties a slot when dropped, unless the slot has moved on to another entry.
///
/// Runs on normal completion and when the owning future is dropped mid-await.
struct SlotGuard<'a, T: SlotEntry> {
    slot: &'a StdMutex<Option<T>>,
    id: Uuid,
}

impl<T: SlotEntry> Drop for SlotGuard<'_, T> {
    fn drop(&mut self) {
        let mut slot = lock(self.slot);
        if slot.as_ref().map(SlotEntry::id) == Some(self.id) {
            *slot = None;
        }
    }
}

/// Chat console state for one user.
///
/// The `ConsoleSession` handles:
/// - Routing utterances and dispatching them to the backend
/// - The append-only conversation log
/// - Mode and voice toggles
/// - The single in-flight request slot
pub struct ConsoleSession {
    session_id: String,
    settings: Settings,
    router: IntentRouter,
    executor: ActionExecutor,
    user_service: Arc<dyn UserService>,
    conversation: Arc<RwLock<Conversation>>,
    mode: Arc<RwLock<Mode>>,
    voice_enabled: Arc<RwLock<bool>>,
    pending: Arc<StdMutex<Option<PendingRequest>>>,
    listening: Arc<StdMutex<Option<Listening>>>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl ConsoleSession {
    /// Creates a session opened with Riley's greeting.
    ///
    /// Mode and voice start from `settings`. Voice capabilities default to
    /// [`NoSpeech`]; see [`ConsoleSession::with_speech`].
    pub fn new(
        settings: Settings,
        backend: Arc<dyn ResponseBackend>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        info!(
            session = %session_id,
            mode = %settings.default_mode,
            voice = settings.voice_enabled,
            "Console session started"
        );

        Self {
            session_id,
            mode: Arc::new(RwLock::new(settings.default_mode)),
            voice_enabled: Arc::new(RwLock::new(settings.voice_enabled)),
            settings,
            router: IntentRouter::new(),
            executor: ActionExecutor::new(backend),
            user_service,
            conversation: Arc::new(RwLock::new(Conversation::with_greeting())),
            pending: Arc::new(StdMutex::new(None)),
            listening: Arc::new(StdMutex::new(None)),
            synthesizer: Arc::new(NoSpeech),
            recognizer: Arc::new(NoSpeech),
        }
    }

    /// Replaces the voice capabilities.
    pub fn with_speech(
        mut self,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> Self {
        self.synthesizer = synthesizer;
        self.recognizer = recognizer;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Snapshot of the conversation, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        self.conversation.read().await.messages().to_vec()
    }

    pub async fn current_mode(&self) -> Mode {
        *self.mode.read().await
    }

    pub async fn voice_enabled(&self) -> bool {
        *self.voice_enabled.read().await
    }

    /// The special action currently in flight, if any.
    pub async fn special_action(&self) -> Option<SpecialAction> {
        lock(&self.pending)
            .as_ref()
            .and_then(|pending| pending.action.clone())
    }

    /// Whether any request, special or not, is in flight.
    pub async fn is_busy(&self) -> bool {
        lock(&self.pending).is_some()
    }

    /// Whether a `/listen` capture is running.
    pub fn is_listening(&self) -> bool {
        lock(&self.listening).is_some()
    }

    /// Handles one line of input: `/commands` or chat.
    pub async fn handle_input(&self, input: &str) -> InteractionResult {
        match ConsoleCommand::parse(input) {
            Ok(Some(command)) => self.run_command(command).await,
            Ok(None) => self.send(input).await,
            Err(e) => InteractionResult::Error(e.to_string()),
        }
    }

    /// Sends a chat utterance and waits for Riley's reply.
    ///
    /// Blank input is ignored. A second send while one is pending returns
    /// [`InteractionResult::Busy`] without touching the conversation.
    #[tracing::instrument(skip(self, input), fields(session = %self.session_id))]
    pub async fn send(&self, input: &str) -> InteractionResult {
        if input.trim().is_empty() {
            return InteractionResult::NoOp;
        }

        let mode = self.current_mode().await;
        let route = self.route(input);
        let request = ApiRequest::from_route(&route, input, &self.user_service.user_id(), mode);
        debug!(
            endpoint = request.endpoint(),
            body = ?request.body().ok(),
            "Prepared backend request"
        );

        let cancel = CancellationToken::new();
        let id = Uuid::new_v4();
        {
            let mut pending = lock(&self.pending);
            if pending.is_some() {
                warn!("Rejected send while another request is in flight");
                return InteractionResult::Busy;
            }
            *pending = Some(PendingRequest {
                id,
                action: route
                    .kind
                    .map(|kind| SpecialAction::new(kind, input, request.clone())),
                cancel: cancel.clone(),
            });
        }
        let slot = SlotGuard {
            slot: self.pending.as_ref(),
            id,
        };

        self.conversation.write().await.push(Message::user(input));

        let result = self.executor.execute(&request, &route, mode, &cancel).await;
        drop(slot);

        match result {
            Ok(outcome) => {
                info!(source = %outcome.source, tone = %outcome.tone, "Reply ready");
                let reply = Message::reply(outcome.content, outcome.source, outcome.tone);
                self.conversation.write().await.push(reply.clone());
                if self.voice_enabled().await && self.synthesizer.is_available() {
                    self.synthesizer.speak(&reply.content);
                }
                InteractionResult::Reply(reply)
            }
            Err(e) if e.is_cancelled() => InteractionResult::Cancelled,
            Err(e) => {
                error!(error = %e, "Request failed");
                let apology = Message::assistant(APOLOGY);
                self.conversation.write().await.push(apology.clone());
                InteractionResult::Reply(apology)
            }
        }
    }

    /// Routes an utterance, demoting actions whose tool is disabled to chat.
    fn route(&self, input: &str) -> Route {
        let route = self.router.route(input);
        match route.kind {
            Some(kind) if !self.settings.allowed_tools.permits(kind) => {
                info!(%kind, "Tool disabled, answering as conversation");
                Route::conversation(input)
            }
            _ => {
                debug!(kind = ?route.kind, "Routed utterance");
                route
            }
        }
    }

    /// Switches persona and announces it in the conversation.
    pub async fn switch_mode(&self, mode: Mode) -> Message {
        *self.mode.write().await = mode;
        let announcement =
            Message::assistant(format!("I've switched to {} mode. How can I assist you?", mode));
        self.conversation.write().await.push(announcement.clone());
        info!(session = %self.session_id, %mode, "Mode switched");
        announcement
    }

    /// Flips voice output.
    ///
    /// Returns the new state and an optional notice for the user.
    pub async fn toggle_voice(&self) -> (bool, Option<String>) {
        let mut enabled = self.voice_enabled.write().await;
        *enabled = !*enabled;

        let notice = if *enabled {
            self.recognizer
                .is_available()
                .then(|| RECOGNITION_PLACEHOLDER.to_string())
        } else {
            if self.synthesizer.is_available() {
                self.synthesizer.cancel();
            }
            None
        };

        info!(session = %self.session_id, enabled = *enabled, "Voice toggled");
        (*enabled, notice)
    }

    /// Starts or stops capturing one utterance.
    ///
    /// Returns the transcript when a capture completes. Calling it while a
    /// capture is running stops that capture; both calls then return `None`.
    /// Always `None` when voice is off.
    pub async fn listen(&self) -> Option<String> {
        if !self.voice_enabled().await {
            return None;
        }

        let cancel = CancellationToken::new();
        let id = Uuid::new_v4();
        {
            let mut listening = lock(&self.listening);
            if let Some(active) = listening.take() {
                active.cancel.cancel();
                info!(session = %self.session_id, "Stopped listening");
                return None;
            }
            *listening = Some(Listening {
                id,
                cancel: cancel.clone(),
            });
        }
        let _slot = SlotGuard {
            slot: self.listening.as_ref(),
            id,
        };

        debug!(session = %self.session_id, "Listening");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            heard = self.recognizer.listen() => heard,
        }
    }

    /// Cancels the in-flight request. Returns whether there was one.
    pub async fn cancel_pending(&self) -> bool {
        match lock(&self.pending).as_ref() {
            Some(pending) => {
                pending.cancel.cancel();
                true
            }
            None => false,
        }
    }

    async fn run_command(&self, command: ConsoleCommand) -> InteractionResult {
        match command {
            ConsoleCommand::Help(topic) => self.help(topic.as_deref()),
            ConsoleCommand::Mode(Some(mode)) => InteractionResult::ModeChanged {
                mode,
                announcement: self.switch_mode(mode).await,
            },
            ConsoleCommand::Mode(None) => {
                let mode = self.current_mode().await;
                InteractionResult::Notice(format!(
                    "Riley is in {} mode: {}",
                    mode,
                    mode.description()
                ))
            }
            ConsoleCommand::Modes => {
                let current = self.current_mode().await;
                let lines: Vec<String> = Mode::all()
                    .into_iter()
                    .map(|mode| {
                        let marker = if mode == current { "*" } else { " " };
                        format!("{} {:<12} {}", marker, mode, mode.description())
                    })
                    .collect();
                InteractionResult::Notice(lines.join("\n"))
            }
            ConsoleCommand::Voice => {
                let (enabled, notice) = self.toggle_voice().await;
                InteractionResult::VoiceToggled { enabled, notice }
            }
            ConsoleCommand::Listen => InteractionResult::Transcript(self.listen().await),
            ConsoleCommand::History(limit) => {
                let messages = self.messages().await;
                let skip = limit.map_or(0, |n| messages.len().saturating_sub(n));
                InteractionResult::History(messages.into_iter().skip(skip).collect())
            }
            ConsoleCommand::Status => self.status().await,
            ConsoleCommand::Settings => match riley_infrastructure::render_settings(&self.settings) {
                Ok(rendered) => InteractionResult::Notice(rendered),
                Err(e) => InteractionResult::Error(e.to_string()),
            },
            ConsoleCommand::Cancel => {
                if self.cancel_pending().await {
                    InteractionResult::Notice("Cancelling the request in progress.".to_string())
                } else {
                    InteractionResult::Notice("Nothing to cancel.".to_string())
                }
            }
        }
    }

    fn help(&self, topic: Option<&str>) -> InteractionResult {
        match topic {
            Some(name) => match find_builtin_command(name) {
                Some(cmd) => {
                    let mut text = format!("{}\n  {}", cmd.usage, cmd.description);
                    if let Some(args) = cmd.args {
                        text.push_str(&format!("\n  args: {}", args));
                    }
                    InteractionResult::Notice(text)
                }
                None => InteractionResult::Error(RileyError::UnknownCommand(name.to_string()).to_string()),
            },
            None => {
                let lines: Vec<String> = builtin_commands()
                    .iter()
                    .map(|cmd| format!("{:<10} {}", cmd.invocation(), cmd.description))
                    .collect();
                InteractionResult::Notice(lines.join("\n"))
            }
        }
    }

    async fn status(&self) -> InteractionResult {
        let mode = self.current_mode().await;
        let voice = if self.voice_enabled().await { "on" } else { "off" };
        let in_flight = match lock(&self.pending).as_ref() {
            Some(PendingRequest {
                action: Some(action),
                ..
            }) => format!("{} ({})", action.kind, action.request.endpoint()),
            Some(_) => "chat".to_string(),
            None => "none".to_string(),
        };
        let messages = self.conversation.read().await.len();

        InteractionResult::Notice(format!(
            "mode: {}\nvoice: {}\nlistening: {}\nin flight: {}\nmessages: {}",
            mode,
            voice,
            if self.is_listening() { "yes" } else { "no" },
            in_flight,
            messages
        ))
    }
}
