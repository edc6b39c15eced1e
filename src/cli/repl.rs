//! Interactive chat loop.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::audio::{
    CommandSpeechOutput, SilentSpeechOutput, SpeechEngine, SpeechOutput, SpeechSettings,
};
use crate::auth::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use crate::config::ParleyConfig;
use crate::error::{ParleyError, Result};
use crate::provider::http::build_http_client;
use crate::provider::OpenAiChatClient;
use crate::session::{ChatSession, SessionEvent};

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Reset,
    Key(String),
    Message(String),
}

/// What the loop does after handling a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplFlow {
    Continue,
    Quit,
}

/// Interpret a raw input line. Anything that is not a known command is a
/// message, including the empty line. Messages are kept verbatim.
pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => ReplCommand::Quit,
        "/reset" => ReplCommand::Reset,
        _ => {
            if let Some(rest) = trimmed.strip_prefix("/key") {
                if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    return ReplCommand::Key(rest.trim().to_string());
                }
            }
            ReplCommand::Message(line.to_string())
        }
    }
}

/// Prompt shown before each line.
pub fn prompt_label(started: bool) -> &'static str {
    if started {
        "> "
    } else {
        "Press Enter to start> "
    }
}

/// Credential to start with: the configured key, else the stored one.
///
/// An unreadable store is logged and treated as empty.
pub fn initial_credential(config: &ParleyConfig, session: &ChatSession) -> String {
    if let Some(key) = &config.api_key {
        return key.clone();
    }
    session.stored_credential().unwrap_or_else(|err| {
        warn!(error = %err, "could not read stored credential");
        String::new()
    })
}

/// Run one operator command against the session.
///
/// While the conversation is empty, a message line only starts it: the
/// greeting exchange runs and the line itself is not sent.
pub async fn handle_command(
    session: &ChatSession,
    credential: &mut String,
    command: ReplCommand,
) -> Result<ReplFlow> {
    match command {
        ReplCommand::Quit => return Ok(ReplFlow::Quit),
        ReplCommand::Reset => {
            session.reset()?;
            println!("Conversation cleared.");
            start(session, credential).await;
        }
        ReplCommand::Key(value) if value.is_empty() => {
            eprintln!("Usage: /key <value>");
        }
        ReplCommand::Key(value) => {
            *credential = value;
            println!("API key updated.");
        }
        ReplCommand::Message(text) => {
            if !session.has_messages().await {
                if !text.trim().is_empty() {
                    eprintln!("(conversation not started yet; that line was not sent)");
                }
                start(session, credential).await;
            } else if let Err(err) = session.submit(credential, &text).await {
                report(&err);
            }
        }
    }
    Ok(ReplFlow::Continue)
}

/// Build the speech output the config asks for.
pub fn speech_output(config: &ParleyConfig) -> Arc<dyn SpeechOutput> {
    if config.muted {
        return Arc::new(SilentSpeechOutput);
    }
    match config.speech_engine.clone().or_else(SpeechEngine::detect) {
        Some(engine) => Arc::new(CommandSpeechOutput::new(SpeechSettings {
            engine,
            locale: config.speech_locale.clone(),
            voice: config.speech_voice.clone(),
        })),
        None => {
            warn!("no speech engine found; replies will not be spoken");
            eprintln!("(no speech engine found; replies will be shown only)");
            Arc::new(SilentSpeechOutput)
        }
    }
}

/// Build the credential store the config asks for.
pub fn credential_store(config: &ParleyConfig) -> Result<Arc<dyn CredentialStore>> {
    if config.save_credentials {
        Ok(Arc::new(FileCredentialStore::for_endpoint(
            config.data_dir.clone(),
            &config.base_url,
        )?))
    } else {
        Ok(Arc::new(MemoryCredentialStore::for_endpoint(&config.base_url)?))
    }
}

/// Run `parley chat` until `/quit` or end of input.
pub async fn run_chat(config: ParleyConfig) -> Result<()> {
    config.validate()?;

    let http = build_http_client(config.request_timeout)?;
    let client = OpenAiChatClient::new(http)
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())
        .with_options(config.completion.clone());

    let sink = Arc::new(|event: SessionEvent| match event {
        SessionEvent::Processing => {
            eprintln!("Processing...");
        }
        SessionEvent::Reply { text } => {
            println!("{text}");
            let _ = std::io::stdout().flush();
        }
        SessionEvent::SpeechFinished => {}
    });

    let session = ChatSession::new(
        Arc::new(client),
        speech_output(&config),
        credential_store(&config)?,
    )
    .with_policy(config.pruning)
    .with_event_sink(sink);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut credential = initial_credential(&config, &session);
    if credential.is_empty() {
        prompt("API key: ");
        match lines.next_line().await? {
            Some(line) => credential = line.trim().to_string(),
            None => return Ok(()),
        }
    }

    println!("Commands: /reset, /key <value>, /quit");
    start(&session, &credential).await;

    loop {
        prompt(prompt_label(session.has_messages().await));
        let Some(line) = lines.next_line().await? else {
            println!();
            return Ok(());
        };
        if handle_command(&session, &mut credential, parse_line(&line)).await? == ReplFlow::Quit {
            return Ok(());
        }
    }
}

/// Open the conversation with the greeting exchange.
async fn start(session: &ChatSession, credential: &str) {
    if let Err(err) = session.submit(credential, "").await {
        report(&err);
    }
}

fn prompt(label: &str) {
    print!("{label}");
    let _ = std::io::stdout().flush();
}

fn report(err: &ParleyError) {
    eprintln!("Error: {err}");
    if let Some(hint) = err.recovery_suggestion().hint() {
        eprintln!("  hint: {hint}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_recognizes_commands() {
        assert_eq!(parse_line("/quit"), ReplCommand::Quit);
        assert_eq!(parse_line(" /exit "), ReplCommand::Quit);
        assert_eq!(parse_line("/reset"), ReplCommand::Reset);
        assert_eq!(parse_line("/key sk-123 "), ReplCommand::Key("sk-123".into()));
        assert_eq!(parse_line("/key"), ReplCommand::Key(String::new()));
    }

    #[test]
    fn parse_line_treats_everything_else_as_message() {
        assert_eq!(parse_line(""), ReplCommand::Message(String::new()));
        assert_eq!(parse_line("  spaced  "), ReplCommand::Message("  spaced  ".into()));
        assert_eq!(parse_line("/keyboard"), ReplCommand::Message("/keyboard".into()));
        assert_eq!(
            parse_line("元気ですか？"),
            ReplCommand::Message("元気ですか？".into())
        );
    }

    #[tokio::test]
    async fn muted_config_ignores_engine() {
        let config = ParleyConfig {
            muted: true,
            speech_engine: Some(SpeechEngine::Custom("definitely-not-a-program".into())),
            ..ParleyConfig::default()
        };
        assert!(speech_output(&config).speak("hello").await.is_ok());
    }

    #[test]
    fn no_save_uses_memory_store() {
        let config = ParleyConfig {
            save_credentials: false,
            data_dir: std::path::PathBuf::from("/nonexistent/parley"),
            ..ParleyConfig::default()
        };
        let store = credential_store(&config).unwrap();
        store.set("apiKey", Some("sk-mem")).unwrap();
        assert_eq!(store.get("apiKey").unwrap(), "sk-mem");
        assert_eq!(store.site(), "https://api.openai.com");
    }

    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::conversation::GREETING;
    use crate::provider::CompletionClient;
    use crate::types::ChatMessage;

    #[derive(Default)]
    struct RecordingClient {
        requests: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, messages: &[ChatMessage], _credential: &str) -> Result<String> {
            self.requests.lock().unwrap().push(messages.to_vec());
            Ok("はい。".to_string())
        }
    }

    fn session_with(client: Arc<RecordingClient>) -> ChatSession {
        ChatSession::new(
            client,
            Arc::new(SilentSpeechOutput),
            Arc::new(MemoryCredentialStore::for_endpoint("https://api.openai.com/v1").unwrap()),
        )
    }

    #[tokio::test]
    async fn reset_restarts_the_greeting_exchange() {
        let client = Arc::new(RecordingClient::default());
        let session = session_with(client.clone());
        let mut credential = "sk-test".to_string();

        start(&session, &credential).await;
        handle_command(&session, &mut credential, ReplCommand::Reset)
            .await
            .unwrap();

        assert!(session.has_messages().await);
        assert_eq!(prompt_label(session.has_messages().await), "> ");
        let requests = client.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1], vec![ChatMessage::user(GREETING)]);
    }

    #[tokio::test]
    async fn line_typed_before_start_only_starts_the_conversation() {
        let client = Arc::new(RecordingClient::default());
        let session = session_with(client.clone());
        let mut credential = "sk-test".to_string();
        assert_eq!(prompt_label(session.has_messages().await), "Press Enter to start> ");

        handle_command(&session, &mut credential, parse_line("今日の天気は？"))
            .await
            .unwrap();

        let requests = client.requests.lock().unwrap().clone();
        assert_eq!(requests, vec![vec![ChatMessage::user(GREETING)]]);

        handle_command(&session, &mut credential, parse_line("今日の天気は？"))
            .await
            .unwrap();
        let last_request = client.requests.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last_request.last(), Some(&ChatMessage::user("今日の天気は？")));
    }

    #[tokio::test]
    async fn quit_ends_the_loop() {
        let session = session_with(Arc::new(RecordingClient::default()));
        let mut credential = String::new();
        let flow = handle_command(&session, &mut credential, ReplCommand::Quit)
            .await
            .unwrap();
        assert_eq!(flow, ReplFlow::Quit);
    }

    #[test]
    fn unreadable_store_yields_empty_initial_credential() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("credentials.toml"), "version = 9\n").unwrap();
        let config = ParleyConfig {
            data_dir: dir.path().to_path_buf(),
            ..ParleyConfig::default()
        };
        let session = ChatSession::new(
            Arc::new(RecordingClient::default()),
            Arc::new(SilentSpeechOutput),
            credential_store(&config).unwrap(),
        );

        assert_eq!(initial_credential(&config, &session), "");

        let config = ParleyConfig {
            api_key: Some("sk-env".into()),
            ..config
        };
        assert_eq!(initial_credential(&config, &session), "sk-env");
    }
}
