use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

use codechat_application::{ChatSession, SendOutcome, SendPhase};
use codechat_core::context::{ContextProvider, ContextSource, EditorApi, EditorError};
use codechat_core::conversation::{MessageId, MessageRole};
use codechat_core::secret::StaticCredential;
use codechat_interaction::{
    FileEditor, GenerateContentRequest, LineRange, ModelClient, ModelError, RequestBuilder,
};
use tempfile::TempDir;

// Mock ModelClient that replays scripted replies and records what it was sent
#[derive(Clone, Default)]
struct ScriptedClient {
    replies: Arc<Mutex<VecDeque<Result<String, ModelError>>>>,
    requests: Arc<Mutex<Vec<(GenerateContentRequest, String)>>>,
}

impl ScriptedClient {
    fn replying(replies: Vec<Result<String, ModelError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<(GenerateContentRequest, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedClient {
    async fn send(
        &self,
        request: &GenerateContentRequest,
        credential: &str,
    ) -> Result<String, ModelError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), credential.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("default answer".to_string()))
    }
}

// Editor whose state the test changes between sends
#[derive(Default)]
struct ScriptedEditor {
    selection: Option<String>,
    document: Option<String>,
    fail: bool,
}

impl EditorApi for ScriptedEditor {
    fn selection_text(&self) -> Result<Option<String>, EditorError> {
        if self.fail {
            return Err(EditorError::NotRunning);
        }
        Ok(self.selection.clone())
    }

    fn document_text(&self) -> Result<Option<String>, EditorError> {
        if self.fail {
            return Err(EditorError::NotRunning);
        }
        Ok(self.document.clone())
    }
}

fn session_with(
    editor: ScriptedEditor,
    client: ScriptedClient,
    api_key: &str,
) -> ChatSession<ScriptedEditor, ScriptedClient, StaticCredential> {
    ChatSession::new(
        ContextProvider::new(editor),
        client,
        StaticCredential::new("GEMINI_API_KEY", api_key),
    )
}

fn document_editor(text: &str) -> ScriptedEditor {
    ScriptedEditor {
        document: Some(text.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let client = ScriptedClient::default();
    let mut session = session_with(document_editor("code"), client.clone(), "key");

    assert_eq!(session.send("").await, SendOutcome::Ignored);
    assert_eq!(session.send("   \n\t").await, SendOutcome::Ignored);

    assert!(session.messages().is_empty());
    assert!(client.requests().is_empty());
    assert_eq!(session.context_source(), ContextSource::Empty);
}

#[tokio::test]
async fn test_successful_send_appends_user_and_answer() {
    let client = ScriptedClient::replying(vec![Ok("It prints hello.".to_string())]);
    let mut session = session_with(document_editor("print('hello')"), client.clone(), "key");

    let outcome = session.send("  What does this do?  ").await;

    assert_eq!(
        outcome,
        SendOutcome::Replied {
            user_id: MessageId(1),
            assistant_id: MessageId(2),
            content: "It prints hello.".to_string(),
            is_error: false,
        }
    );

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "What does this do?");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].content, "It prints hello.");
    assert_eq!(session.phase(), SendPhase::Idle);
}

#[tokio::test]
async fn test_request_carries_context_and_excludes_placeholder() {
    let client = ScriptedClient::replying(vec![Ok("first".into()), Ok("second".into())]);
    let mut session = session_with(document_editor("fn main() {}"), client.clone(), "key-123");

    session.send("one").await;
    session.send("two").await;

    let requests = client.requests();
    assert_eq!(requests.len(), 2);

    let (first, credential) = &requests[0];
    assert_eq!(credential, "key-123");
    assert_eq!(first.contents.len(), 2);
    assert_eq!(first.contents[0].role, "user");
    assert!(first.contents[0].parts[0].text.contains("fn main() {}"));
    assert_eq!(first.contents[1].parts[0].text, "one");

    let (second, _) = &requests[1];
    let roles: Vec<&str> = second.contents.iter().map(|c| c.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "user", "model", "user"]);
    assert_eq!(second.contents[2].parts[0].text, "first");
    assert!(
        second
            .contents
            .iter()
            .all(|c| c.parts[0].text != "Thinking...")
    );
}

#[tokio::test]
async fn test_model_error_becomes_assistant_text() {
    let client = ScriptedClient::replying(vec![
        Err(ModelError::Api {
            status: 403,
            message: "bad key".to_string(),
        }),
        Err(ModelError::Network("connection refused".to_string())),
    ]);
    let mut session = session_with(document_editor("x"), client, "key");

    let outcome = session.send("hi").await;
    assert!(matches!(
        outcome,
        SendOutcome::Replied { ref content, is_error: true, .. } if content == "bad key"
    ));
    assert_eq!(session.messages().len(), 2);

    session.send("again").await;
    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].content, "Network error: connection refused");
    assert_eq!(messages[3].role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_missing_credential_is_reported_without_calling_model() {
    let client = ScriptedClient::default();
    let mut session = session_with(ScriptedEditor::default(), client.clone(), "");

    let outcome = session.send("hello").await;

    let SendOutcome::Replied { content, is_error, .. } = outcome else {
        panic!("expected a reply");
    };
    assert!(is_error);
    assert!(content.contains("GEMINI_API_KEY"));
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].content, content);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_whitespace_credential_counts_as_missing() {
    let client = ScriptedClient::default();
    let mut session = session_with(document_editor("x"), client.clone(), "  \t ");

    let SendOutcome::Replied { content, is_error, .. } = session.send("hello").await else {
        panic!("expected a reply");
    };
    assert!(is_error);
    assert!(content.contains("GEMINI_API_KEY"));
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_send_walks_phases_in_order() {
    let client = ScriptedClient::replying(vec![
        Ok("answer".into()),
        Err(ModelError::Status { status: 503 }),
    ]);
    let mut session = session_with(document_editor("x"), client, "key");
    assert!(session.last_cycle().is_empty());

    let expected = [
        SendPhase::UserMessageAppended,
        SendPhase::ContextRefreshed,
        SendPhase::PlaceholderAppended,
        SendPhase::AwaitingModel,
        SendPhase::Idle,
    ];

    session.send("first").await;
    assert_eq!(session.last_cycle(), expected.as_slice());

    // A failed call walks the same path
    session.send("second").await;
    assert_eq!(session.last_cycle(), expected.as_slice());

    // Blank input leaves the previous cycle alone
    session.send("  ").await;
    assert_eq!(session.last_cycle(), expected.as_slice());
    assert_eq!(session.phase(), SendPhase::Idle);
}

#[tokio::test]
async fn test_ids_strictly_increase_across_sends() {
    let client = ScriptedClient::replying(vec![
        Ok("a".into()),
        Err(ModelError::Status { status: 500 }),
        Ok("c".into()),
    ]);
    let mut session = session_with(document_editor("x"), client, "key");

    for input in ["one", "   ", "two", "", "three"] {
        session.send(input).await;
    }

    let ids: Vec<u64> = session.messages().iter().map(|m| m.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_selection_is_sticky_across_sends() {
    let client = ScriptedClient::default();
    let editor = ScriptedEditor {
        selection: Some("x <- 1".to_string()),
        document: Some("x <- 1\ny <- 2".to_string()),
        fail: false,
    };
    let mut session = session_with(editor, client.clone(), "key");

    session.send("explain").await;
    assert_eq!(session.context_source(), ContextSource::Selection);
    assert_eq!(session.context().text, "x <- 1");

    // The user deselects in the editor; the deliberate selection is kept
    session.editor_mut().selection = None;
    session.send("and now?").await;

    assert_eq!(session.context_source(), ContextSource::Selection);
    assert_eq!(session.context().text, "x <- 1");
    let requests = client.requests();
    assert!(requests[1].0.contents[0].parts[0].text.contains("x <- 1"));
    assert!(!requests[1].0.contents[0].parts[0].text.contains("y <- 2"));
}

#[tokio::test]
async fn test_document_context_is_recaptured_each_send() {
    let client = ScriptedClient::default();
    let mut session = session_with(document_editor("version one"), client.clone(), "key");

    session.send("first").await;
    session.editor_mut().document = Some("version two".to_string());
    session.send("second").await;

    assert_eq!(session.context_source(), ContextSource::FullDocument);
    assert_eq!(session.context().text, "version two");
    let requests = client.requests();
    assert!(requests[0].0.contents[0].parts[0].text.contains("version one"));
    assert!(requests[1].0.contents[0].parts[0].text.contains("version two"));
}

#[tokio::test]
async fn test_refresh_overrides_sticky_selection() {
    let editor = ScriptedEditor {
        selection: Some("selected".to_string()),
        document: Some("whole document".to_string()),
        fail: false,
    };
    let mut session = session_with(editor, ScriptedClient::default(), "key");

    assert_eq!(session.refresh_context().source, ContextSource::Selection);

    session.editor_mut().selection = None;
    let snapshot = session.refresh_context();

    assert_eq!(snapshot.source, ContextSource::FullDocument);
    assert_eq!(snapshot.text, "whole document");
}

#[tokio::test]
async fn test_editor_failure_still_completes_send() {
    let editor = ScriptedEditor {
        fail: true,
        ..Default::default()
    };
    let client = ScriptedClient::replying(vec![Ok("answer".into())]);
    let mut session = session_with(editor, client.clone(), "key");

    session.send("question").await;

    assert_eq!(session.context_source(), ContextSource::Error);
    assert_eq!(session.messages().len(), 2);
    let (request, _) = &client.requests()[0];
    assert!(
        request.contents[0].parts[0]
            .text
            .contains("Error retrieving code context: editor is not running")
    );
}

#[tokio::test]
async fn test_custom_preamble_is_used() {
    let client = ScriptedClient::default();
    let mut session = session_with(document_editor("code"), client.clone(), "key")
        .with_request_builder(RequestBuilder::new("Review this Rust code."));

    session.send("ok?").await;

    let (request, _) = &client.requests()[0];
    assert_eq!(request.contents[0].parts[0].text, "Review this Rust code.\n\ncode");
}

#[tokio::test]
async fn test_file_editor_selection_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.R");
    fs::write(&path, "library(stats)\nx <- 1\nsummary(x)\n").unwrap();

    let mut editor = FileEditor::with_document(&path);
    editor.select(LineRange::new(2, 2).unwrap());
    let client = ScriptedClient::default();
    let mut session = ChatSession::new(
        ContextProvider::new(editor),
        client.clone(),
        StaticCredential::new("GEMINI_API_KEY", "key"),
    );

    let snapshot = session.refresh_context().clone();
    assert_eq!(snapshot.source, ContextSource::Selection);
    assert_eq!(snapshot.text, "x <- 1");

    session.editor_mut().clear_selection();
    session.refresh_context();
    assert_eq!(session.context_source(), ContextSource::FullDocument);
    assert!(session.context().text.contains("summary(x)"));
}
