use std::sync::{Arc, Mutex};
use std::time::Duration;

use codegen_chat_backend::{Completion, GenerativeBackend};
use codegen_chat_test_backend::{ScriptedBackend, ScriptedErrorKind};
use tokio::sync::watch;
use tokio::time::timeout;

use super::state::{FAILURE_NOTICE, REJECTION_NOTICE};
use crate::conversation::Sender;
use crate::prompt::TargetLanguage;
use crate::{Orchestrator, OrchestratorBuilder, Phase};

const FOUR_SECTION_REPLY: &str = "\
## Brute Force Approach\n```java\n// nested loops\n```\n\
## Better Approach\n...\n\
## Optimal Approach\n...\n\
## Edge Cases to Remember\n- empty input\n";

/// A backend that records every prompt it receives and answers with a
/// fixed reply.
#[derive(Clone)]
struct PromptCapture {
    prompts: Arc<Mutex<Vec<String>>>,
    reply: String,
}

impl PromptCapture {
    fn with_reply(reply: &str) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            reply: reply.to_owned(),
        }
    }
}

impl GenerativeBackend for PromptCapture {
    type Error = codegen_chat_test_backend::Error;

    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        let text = self.reply.clone();
        async move { Ok(Completion { text }) }
    }
}

fn build_with_idle(
    builder: OrchestratorBuilder,
) -> (Orchestrator, watch::Receiver<u32>) {
    let (idle_tx, idle_rx) = watch::channel(0u32);
    let orchestrator = builder
        .on_idle(move || {
            idle_tx.send_modify(|v| *v += 1);
        })
        .build();
    (orchestrator, idle_rx)
}

async fn wait_idle(idle_rx: &mut watch::Receiver<u32>, count: u32) {
    timeout(Duration::from_secs(5), idle_rx.wait_for(|v| *v >= count))
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_accepted_submit_end_to_end() {
    let backend = PromptCapture::with_reply(FOUR_SECTION_REPLY);
    let prompts = Arc::clone(&backend.prompts);
    let (orchestrator, mut idle_rx) = build_with_idle(
        OrchestratorBuilder::with_backend(backend)
            .with_language(TargetLanguage::Java),
    );

    orchestrator.submit("bubble sort in java");
    wait_idle(&mut idle_rx, 1).await;

    {
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("bubble sort in java"));
        assert!(prompts[0].contains("```java"));
    }

    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].sender(), Sender::Assistant);
    assert_eq!(transcript[1].sender(), Sender::User);
    assert_eq!(transcript[1].content(), "bubble sort in java");
    assert_eq!(transcript[2].sender(), Sender::Assistant);
    assert_eq!(transcript[2].content(), FOUR_SECTION_REPLY);
    assert!(
        transcript.windows(2).all(|w| w[0].id() < w[1].id()),
        "ids must be strictly increasing in append order"
    );
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_single_flight_queues_concurrent_submits() {
    let mut backend = ScriptedBackend::default();
    backend.set_delay(Duration::from_millis(200));
    backend.add_reply("first answer");
    backend.add_reply("second answer");
    let (orchestrator, mut idle_rx) =
        build_with_idle(OrchestratorBuilder::with_backend(backend));

    orchestrator.submit("sort an array of numbers");
    assert_eq!(orchestrator.phase().await, Phase::AwaitingResponse);

    // A submit while awaiting is held back, but its user message still
    // lands in the transcript immediately.
    orchestrator.submit("search in a rotated array");
    assert_eq!(orchestrator.phase().await, Phase::AwaitingResponse);

    wait_idle(&mut idle_rx, 1).await;

    let transcript = orchestrator.transcript().await;
    let contents: Vec<_> =
        transcript.iter().map(|m| m.content()).collect();
    assert_eq!(
        contents,
        vec![
            "Hello! Please provide a coding problem statement.",
            "sort an array of numbers",
            "search in a rotated array",
            "first answer",
            "second answer",
        ]
    );
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test]
async fn test_rejected_submit_makes_no_backend_call() {
    // An empty script would answer any backend call with a failure
    // notice, so a rejection notice proves no call was made.
    let backend = ScriptedBackend::default();
    let (orchestrator, mut idle_rx) =
        build_with_idle(OrchestratorBuilder::with_backend(backend));

    orchestrator.submit("I like turtles");
    wait_idle(&mut idle_rx, 1).await;

    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].content(), "I like turtles");
    assert_eq!(transcript[2].content(), REJECTION_NOTICE);
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test]
async fn test_blank_submit_is_ignored() {
    let backend = ScriptedBackend::default();
    let orchestrator = OrchestratorBuilder::with_backend(backend).build();

    orchestrator.submit("   \n\t");

    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript.len(), 1, "only the greeting");
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test]
async fn test_backend_failure_surfaces_fixed_notice() {
    let mut backend = ScriptedBackend::default();
    backend.add_failure(ScriptedErrorKind::RateLimitExceeded);
    let (orchestrator, mut idle_rx) =
        build_with_idle(OrchestratorBuilder::with_backend(backend));

    orchestrator.submit("merge two sorted linked lists");
    wait_idle(&mut idle_rx, 1).await;

    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript.last().unwrap().content(), FAILURE_NOTICE);
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_forces_the_failure_transition() {
    let mut backend = ScriptedBackend::default();
    backend.set_delay(Duration::from_secs(3600));
    backend.add_reply("too late");
    let (orchestrator, mut idle_rx) = build_with_idle(
        OrchestratorBuilder::with_backend(backend)
            .with_request_timeout(Duration::from_millis(50)),
    );

    orchestrator.submit("balance a binary search tree");
    wait_idle(&mut idle_rx, 1).await;

    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript.last().unwrap().content(), FAILURE_NOTICE);
    assert_eq!(orchestrator.phase().await, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_rejection_queued_behind_active_request() {
    let mut backend = ScriptedBackend::default();
    backend.set_delay(Duration::from_millis(100));
    backend.add_reply("the answer");
    let (orchestrator, mut idle_rx) =
        build_with_idle(OrchestratorBuilder::with_backend(backend));

    orchestrator.submit("sort an array of numbers");
    orchestrator.submit("I like turtles");
    wait_idle(&mut idle_rx, 1).await;

    let transcript = orchestrator.transcript().await;
    let contents: Vec<_> =
        transcript.iter().skip(1).map(|m| m.content()).collect();
    assert_eq!(
        contents,
        vec![
            "sort an array of numbers",
            "I like turtles",
            "the answer",
            REJECTION_NOTICE,
        ]
    );
}

#[tokio::test]
async fn test_set_language_applies_to_subsequent_prompts() {
    let backend = PromptCapture::with_reply("ok");
    let prompts = Arc::clone(&backend.prompts);
    let (orchestrator, mut idle_rx) =
        build_with_idle(OrchestratorBuilder::with_backend(backend));

    orchestrator.set_language(TargetLanguage::Python);
    orchestrator.submit("reverse a linked list");
    wait_idle(&mut idle_rx, 1).await;

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].contains("```python"));
    assert!(prompts[0].contains("specifically in python"));
}

#[tokio::test]
async fn test_custom_greeting_and_no_greeting() {
    let backend = ScriptedBackend::default();
    let orchestrator = OrchestratorBuilder::with_backend(backend)
        .with_greeting("Welcome back.")
        .build();
    let transcript = orchestrator.transcript().await;
    assert_eq!(transcript[0].content(), "Welcome back.");

    let backend = ScriptedBackend::default();
    let orchestrator = OrchestratorBuilder::with_backend(backend)
        .without_greeting()
        .build();
    assert!(orchestrator.transcript().await.is_empty());
}
