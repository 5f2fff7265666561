//! A terminal demo of the `codegen-chat` session.
//!
//! The demo runs against an offline canned backend so it works without
//! network access; real deployments supply their own
//! [`GenerativeBackend`].

#[macro_use]
extern crate tracing;

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::io::Write as _;
use std::time::Duration;

use codegen_chat::SessionBuilder;
use codegen_chat::core::conversation::{Message, Sender};
use codegen_chat::core::prompt::TargetLanguage;
use codegen_chat_backend::{
    BackendError, Completion, ErrorKind, GenerativeBackend,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum SessionEvent {
    Idle,
    Message(Message),
}

const BAR_CHAR: &str = "▎";

#[derive(Debug)]
struct CannedError;

impl Display for CannedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for CannedError {}

impl BackendError for CannedError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// An offline backend that answers every prompt with a canned
/// four-section breakdown, fenced in the language the prompt asks for.
struct CannedBackend;

impl GenerativeBackend for CannedBackend {
    type Error = CannedError;

    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        // The fence hint in the closing instruction carries the language
        // tag; fall back to javascript if it is missing.
        let lang = prompt
            .split("```")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap_or("javascript")
            .to_owned();
        async move {
            sleep(Duration::from_millis(300)).await;
            Ok(Completion {
                text: canned_answer(&lang),
            })
        }
    }
}

fn canned_answer(lang: &str) -> String {
    format!(
        "### 1. Brute Force Approach\n\
         ```{lang}\n// try every candidate\n```\n\
         Explanation: check all possibilities. Time O(n^2), space O(1).\n\
         Dry run: input [2, 1] compares every pair.\n\n\
         ### 2. Better Approach\n\
         ```{lang}\n// sort first\n```\n\
         Explanation: sorting reduces the search. Time O(n log n).\n\
         Dry run: [2, 1] becomes [1, 2].\n\n\
         ### 3. Optimal Approach\n\
         ```{lang}\n// single pass with a map\n```\n\
         Explanation: one pass, constant lookups. Time O(n), space O(n).\n\
         Dry run: [2, 1] visits each element once.\n\n\
         ### 4. Edge Cases to Remember\n\
         - Empty input\n- Single element\n- Duplicates\n"
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut language = TargetLanguage::JavaScript;
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(lang) => language = lang,
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        }
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut session = SessionBuilder::with_backend(CannedBackend)
        .with_language(language)
        .on_message({
            let event_tx = event_tx.clone();
            move |message| {
                event_tx.send(SessionEvent::Message(message.clone())).ok();
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .build();

    // The seeded greeting is always the first event.
    if let Some(SessionEvent::Message(greeting)) = event_rx.recv().await {
        print_assistant_message(&greeting);
    }
    println!(
        "language: {language} (switch with /lang <name>, dictate with /mic)"
    );

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    'outer: loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("/lang") {
            match rest.trim().parse::<TargetLanguage>() {
                Ok(lang) => {
                    session.set_language(lang);
                    println!("language set to {lang}");
                }
                Err(err) => println!("{err}"),
            }
            continue;
        }
        if line == "/mic" {
            match session.toggle_dictation() {
                Ok(true) => println!("recording..."),
                Ok(false) => println!("stopped recording"),
                Err(err) => println!("{err}"),
            }
            continue;
        }
        if line == "/quit" {
            break;
        }

        session.type_text(line);
        session.submit();

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message("Generating code...");
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = &progress_bar {
                progress_bar.finish_and_clear();
            }
            progress_bar = None;

            match event {
                SessionEvent::Message(message) => {
                    if message.sender() == Sender::Assistant {
                        print_assistant_message(&message);
                    }
                }
                SessionEvent::Idle => {
                    break;
                }
            }
        }
    }
}

fn print_assistant_message(message: &Message) {
    println!(
        "{}{}",
        BAR_CHAR.bright_cyan(),
        message.content().bright_white()
    );
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
