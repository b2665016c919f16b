//! End-to-end continuation rounds against a scripted driver.

use async_trait::async_trait;
use folio_core::{
    ContinuationRequest, ContinuationRequestBuilder, FinishReason, GenerateRequest,
    GenerateResponse, GenerationMode, Protocol, SegmentIndex,
};
use folio_error::{FolioErrorKind, FolioResult, NarrativeErrorKind, ProviderError, ProviderErrorKind};
use folio_interface::{CompletionDriver, WorldStore};
use folio_narrative::{ContinuationExecutor, TemplateSet};
use folio_storage::{FileSystemWorldStore, InMemoryWorldStore};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A single scripted reply.
#[derive(Debug, Clone)]
enum MockResponse {
    Text(&'static str),
    Truncated(&'static str),
    Error(ProviderErrorKind),
}

/// Driver that replays scripted replies and records every prompt.
struct ScriptedDriver {
    script: Mutex<VecDeque<MockResponse>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDriver {
    fn new(script: Vec<MockResponse>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let driver = Self {
            script: Mutex::new(script.into()),
            prompts: Arc::clone(&prompts),
        };
        (driver, prompts)
    }
}

#[async_trait]
impl CompletionDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let prompt = req.messages.last().map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        match self.script.lock().unwrap().pop_front() {
            Some(MockResponse::Text(text)) => Ok(GenerateResponse {
                text: text.to_string(),
                finish_reason: Some(FinishReason::Stop),
            }),
            Some(MockResponse::Truncated(text)) => Ok(GenerateResponse {
                text: text.to_string(),
                finish_reason: Some(FinishReason::Length),
            }),
            Some(MockResponse::Error(kind)) => Err(ProviderError::new(kind).into()),
            None => Err(ProviderError::new(ProviderErrorKind::EmptyResponse).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

fn scene_request(segment_index: SegmentIndex) -> ContinuationRequest {
    ContinuationRequestBuilder::default()
        .topic("discovering mars")
        .world_name("world0")
        .segment_index(segment_index)
        .mode(GenerationMode::Scene)
        .build()
        .unwrap()
}

async fn fresh_store() -> Arc<InMemoryWorldStore> {
    let store = Arc::new(InMemoryWorldStore::new());
    store
        .create("world0", json!({"planet": "Mars"}))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn test_scene_rounds_accumulate_until_end() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let (driver, prompts) = ScriptedDriver::new(vec![
        MockResponse::Text("# Title\n<info>\nplan\n</info>\n### Scene 1\nALICE: Hi.\n"),
        MockResponse::Text("MORE: dialogue.\n### THE END.\n<end>"),
    ]);
    let executor = ContinuationExecutor::new(driver, store.clone());

    let first = executor.continue_segment(&scene_request(SegmentIndex::At(0))).await?;
    assert_eq!(first.narrative_text(), "# Title\n### Scene 1\nALICE: Hi.");
    assert!(!first.terminal());
    assert_eq!(*first.segment_index(), 0);

    let second = executor.continue_segment(&scene_request(SegmentIndex::Last)).await?;
    assert_eq!(second.narrative_text(), "MORE: dialogue.\n### THE END.");
    assert!(*second.terminal());

    let world = store.load("world0").await?;
    assert_eq!(
        world.segment(0),
        Some("\n# Title\n<info>\nplan\n</info>\n### Scene 1\nALICE: Hi.\n\nMORE: dialogue.\n### THE END.\n<end>")
    );

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].contains("Current Content:\n<empty>"));
    assert!(prompts[1].contains("Current Content:\n\n# Title\n<info>"));
    assert!(prompts[0].contains("Topic: discovering mars\nLanguage: English\nWorld: "));
    Ok(())
}

#[tokio::test]
async fn test_new_segment_compacts_history() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let mut world = store.load("world0").await?;
    store
        .append_to_segment("world0", &mut world, 0, "<info>\nold plan\n</info>\nold prose\n<end>")
        .await?;

    let (driver, prompts) = ScriptedDriver::new(vec![MockResponse::Text("# Next\nnew prose")]);
    let executor = ContinuationExecutor::new(driver, store.clone());

    let outcome = executor.continue_segment(&scene_request(SegmentIndex::New)).await?;
    assert_eq!(*outcome.segment_index(), 1);

    let prompt = prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains(r#""Previous Plots/Stories":["old plan",""]"#));
    assert!(!prompt.contains("old prose"));

    assert_eq!(store.load("world0").await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_enhanced_protocol_prefers_summary_and_repeats() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let mut world = store.load("world0").await?;
    store
        .append_to_segment(
            "world0",
            &mut world,
            0,
            "<info>\nplan\n</info>\nprose\n<summary>\nrecap\n</summary>\n<end>",
        )
        .await?;

    let (driver, prompts) = ScriptedDriver::new(vec![MockResponse::Text("text")]);
    let templates = TemplateSet::new().with_override(GenerationMode::Scene, "SCENE RULES\n");
    let executor = ContinuationExecutor::new(driver, store.clone())
        .with_templates(templates)
        .with_protocol(Protocol::Enhanced);

    executor.continue_segment(&scene_request(SegmentIndex::New)).await?;

    let prompt = prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains(r#"["recap",""]"#));
    assert!(prompt.starts_with("SCENE RULES\n"));
    assert!(prompt.ends_with("<empty>\nSCENE RULES\n"));
    Ok(())
}

#[tokio::test]
async fn test_provider_failure_leaves_world_unchanged() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let before = store.load("world0").await?;

    let (driver, _) = ScriptedDriver::new(vec![MockResponse::Error(ProviderErrorKind::Api {
        status: 503,
        message: "overloaded".to_string(),
    })]);
    let executor = ContinuationExecutor::new(driver, store.clone());

    let err = executor
        .continue_segment(&scene_request(SegmentIndex::New))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FolioErrorKind::Provider(_)));
    assert_eq!(store.load("world0").await?, before);
    Ok(())
}

#[tokio::test]
async fn test_missing_world_is_not_found() {
    let store = Arc::new(InMemoryWorldStore::new());
    let (driver, prompts) = ScriptedDriver::new(vec![MockResponse::Text("unused")]);
    let executor = ContinuationExecutor::new(driver, store);

    let err = executor
        .continue_segment(&scene_request(SegmentIndex::New))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_index_fails_before_provider_call() {
    let store = fresh_store().await;
    let (driver, prompts) = ScriptedDriver::new(vec![MockResponse::Text("unused")]);
    let executor = ContinuationExecutor::new(driver, store);

    let err = executor
        .continue_segment(&scene_request(SegmentIndex::At(9)))
        .await
        .unwrap_err();
    match err.kind() {
        FolioErrorKind::Narrative(e) => assert_eq!(
            e.kind,
            NarrativeErrorKind::SegmentOutOfRange { index: 9, len: 1 }
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_tag_only_completion_returns_raw_text() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let (driver, _) = ScriptedDriver::new(vec![MockResponse::Truncated("<info>\nonly a plan\n")]);
    let executor = ContinuationExecutor::new(driver, store.clone());

    let outcome = executor.continue_segment(&scene_request(SegmentIndex::At(0))).await?;
    assert_eq!(outcome.narrative_text(), "<info>\nonly a plan");
    assert!(!outcome.terminal());
    assert_eq!(
        store.load("world0").await?.segment(0),
        Some("\n<info>\nonly a plan\n")
    );
    Ok(())
}

#[tokio::test]
async fn test_run_until_terminal_follows_resolved_segment() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let (driver, _) = ScriptedDriver::new(vec![
        MockResponse::Text("# Title\n### Scene 1\nA: one."),
        MockResponse::Text("### Scene 2\nA: two."),
        MockResponse::Text("A: three.\n### THE END.\n<end>"),
        MockResponse::Text("never requested"),
    ]);
    let executor = ContinuationExecutor::new(driver, store.clone());

    let mut seen = Vec::new();
    let outcomes = executor
        .run_until_terminal(&scene_request(SegmentIndex::New), 10, |outcome| {
            seen.push(outcome.narrative_text().clone());
            Ok(())
        })
        .await?;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| *o.segment_index() == 1));
    assert!(*outcomes[2].terminal());
    assert_eq!(seen[1], "### Scene 2\nA: two.");

    let world = store.load("world0").await?;
    assert_eq!(world.len(), 2);
    assert!(world.segment(1).unwrap().ends_with("<end>"));
    Ok(())
}

#[tokio::test]
async fn test_run_until_terminal_respects_round_cap() -> anyhow::Result<()> {
    let store = fresh_store().await;
    let (driver, prompts) = ScriptedDriver::new(vec![
        MockResponse::Text("round one"),
        MockResponse::Text("round two"),
        MockResponse::Text("round three"),
    ]);
    let executor = ContinuationExecutor::new(driver, store);

    let outcomes = executor
        .run_until_terminal(&scene_request(SegmentIndex::At(0)), 2, |_| Ok(()))
        .await?;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.terminal()));
    assert_eq!(prompts.lock().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_filesystem_store_round_trip() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let store = Arc::new(FileSystemWorldStore::new(temp_dir.path())?);
    store.create("world0", json!("a red planet")).await?;

    let (driver, _) = ScriptedDriver::new(vec![MockResponse::Text(
        "# Dust\n<info>\nplan\n</info>\nprose\n### THE END.\n<end>\n",
    )]);
    let executor = ContinuationExecutor::new(driver, store.clone());
    let outcome = executor.continue_segment(&scene_request(SegmentIndex::Last)).await?;
    assert!(*outcome.terminal());

    let raw = std::fs::read_to_string(temp_dir.path().join("world0.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value["backstory"][0], json!("\n# Dust\n<info>\nplan\n</info>\nprose\n### THE END.\n<end>\n"));
    Ok(())
}

#[tokio::test]
async fn test_from_config_uses_scene_template_override() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let template = dir.path().join("scene.txt");
    std::fs::write(&template, "Write a radio play.\n")?;
    let config_path = dir.path().join("folio.toml");
    std::fs::write(
        &config_path,
        format!(
            "[generation]\nscene_template = {:?}\n",
            template.display().to_string()
        ),
    )?;
    let config = folio_core::FolioConfig::from_file(&config_path)?;

    let store = fresh_store().await;
    let (driver, prompts) = ScriptedDriver::new(vec![
        MockResponse::Text("scene text"),
        MockResponse::Text("story text"),
    ]);
    let executor = ContinuationExecutor::from_config(driver, store, &config)?;
    assert_eq!(executor.protocol(), Protocol::Basic);

    executor.continue_segment(&scene_request(SegmentIndex::New)).await?;
    let story = ContinuationRequestBuilder::default()
        .mode(GenerationMode::Story)
        .build()?;
    executor.continue_segment(&story).await?;

    let prompts = prompts.lock().unwrap();
    assert!(prompts[0].starts_with("Write a radio play.\nTopic: discovering mars"));
    let builtin_story = folio_narrative::PromptTemplate::builtin(GenerationMode::Story, Protocol::Basic);
    assert!(prompts[1].starts_with(builtin_story.instructions().as_str()));
    assert!(!prompts[1].contains("Write a radio play."));
    Ok(())
}
