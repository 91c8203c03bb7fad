//! Chat session orchestration.
//!
//! `ChatSession` owns everything a single conversation needs: the message
//! log, the latest context snapshot, the editor, the model client and the
//! credential source. One `send` runs the full cycle:
//!
//! ```text
//! Idle -> UserMessageAppended -> ContextRefreshed -> PlaceholderAppended
//!      -> AwaitingModel -> Idle
//! ```
//!
//! Every path ends back at `Idle` with a well-formed conversation. Failures of
//! the model call become the assistant's reply text.
//!
//! `send` takes `&mut self`, so a second send cannot start while one is in
//! flight.

use codechat_core::context::{ContextProvider, ContextSnapshot, ContextSource, EditorApi};
use codechat_core::conversation::{ConversationMessage, ConversationStore, MessageId, MessageRole};
use codechat_core::secret::CredentialProvider;
use codechat_interaction::{ModelClient, ModelError, RequestBuilder};
use tracing::{debug, info, warn};

/// Content of the assistant message shown while the model is working.
pub const THINKING_PLACEHOLDER: &str = "Thinking...";

/// Where a session is within a send cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    UserMessageAppended,
    ContextRefreshed,
    PlaceholderAppended,
    AwaitingModel,
}

/// Result of a send action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The input was blank; nothing changed.
    Ignored,
    /// A user message and its answer were added to the conversation.
    Replied {
        user_id: MessageId,
        assistant_id: MessageId,
        /// Final assistant text (the model's answer or an error description).
        content: String,
        /// True when `content` describes a failure rather than an answer.
        is_error: bool,
    },
}

/// A single-user conversation with the model about the code in an editor.
pub struct ChatSession<E, C, K> {
    context_provider: ContextProvider<E>,
    request_builder: RequestBuilder,
    client: C,
    credentials: K,
    conversation: ConversationStore,
    context: ContextSnapshot,
    phase: SendPhase,
    cycle: Vec<SendPhase>,
}

impl<E, C, K> ChatSession<E, C, K>
where
    E: EditorApi,
    C: ModelClient,
    K: CredentialProvider,
{
    /// Creates a session with an empty conversation.
    ///
    /// The context starts out as the provider's `Empty` snapshot; the first
    /// send (or an explicit refresh) captures the real one.
    pub fn new(context_provider: ContextProvider<E>, client: C, credentials: K) -> Self {
        let context = context_provider.empty_snapshot();
        Self {
            context_provider,
            request_builder: RequestBuilder::default(),
            client,
            credentials,
            conversation: ConversationStore::new(),
            context,
            phase: SendPhase::Idle,
            cycle: Vec::new(),
        }
    }

    /// Replaces the request builder (custom preamble).
    pub fn with_request_builder(mut self, request_builder: RequestBuilder) -> Self {
        self.request_builder = request_builder;
        self
    }

    /// Runs one send cycle for `input`.
    ///
    /// Blank input is ignored. Otherwise the conversation grows by exactly two
    /// messages, whatever the model call does.
    pub async fn send(&mut self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            debug!("Ignoring blank input");
            return SendOutcome::Ignored;
        }

        self.cycle.clear();
        let user_id = self.conversation.append(MessageRole::User, text);
        self.enter(SendPhase::UserMessageAppended);

        // An explicit selection survives the send; anything else is re-read
        if !self.context.is_selection() {
            self.context = self.context_provider.capture();
        }
        self.enter(SendPhase::ContextRefreshed);

        let assistant_id = self
            .conversation
            .append(MessageRole::Assistant, THINKING_PLACEHOLDER);
        self.enter(SendPhase::PlaceholderAppended);

        self.enter(SendPhase::AwaitingModel);
        let reply = self.ask_model(assistant_id).await;

        let (content, is_error) = match reply {
            Ok(answer) => (answer, false),
            Err(err) => {
                warn!(error = %err, "Model call failed, showing error as reply");
                (err.to_string(), true)
            }
        };

        self.conversation.replace_at(assistant_id, content.clone());
        self.enter(SendPhase::Idle);

        info!(
            user_id = user_id.0,
            assistant_id = assistant_id.0,
            is_error,
            context_source = ?self.context.source,
            "Send cycle finished"
        );

        SendOutcome::Replied {
            user_id,
            assistant_id,
            content,
            is_error,
        }
    }

    /// Re-captures the context regardless of the current source.
    pub fn refresh_context(&mut self) -> &ContextSnapshot {
        self.context = self.context_provider.capture();
        info!(source = ?self.context.source, "Context refreshed");
        &self.context
    }

    pub fn context(&self) -> &ContextSnapshot {
        &self.context
    }

    pub fn context_source(&self) -> ContextSource {
        self.context.source
    }

    /// Copy of the conversation in append order.
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.conversation.snapshot()
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Phases entered by the most recent non-blank send, in order.
    pub fn last_cycle(&self) -> &[SendPhase] {
        &self.cycle
    }

    pub fn editor(&self) -> &E {
        self.context_provider.editor()
    }

    /// Lets the front-end drive the editor. Changes take effect at the next
    /// capture.
    pub fn editor_mut(&mut self) -> &mut E {
        self.context_provider.editor_mut()
    }

    /// Sends everything except the pending placeholder itself.
    async fn ask_model(&self, pending: MessageId) -> Result<String, ModelError> {
        let api_key = self.credentials.api_key();
        if api_key.trim().is_empty() {
            return Err(ModelError::CredentialMissing {
                env_var: self.credentials.hint().to_string(),
            });
        }

        let history = match self.conversation.messages().split_last() {
            Some((last, earlier)) if last.id == pending => earlier,
            _ => self.conversation.messages(),
        };
        let request = self.request_builder.build(&self.context, history);
        self.client.send(&request, &api_key).await
    }

    fn enter(&mut self, phase: SendPhase) {
        debug!(from = ?self.phase, to = ?phase, "Send phase transition");
        self.phase = phase;
        self.cycle.push(phase);
    }
}
