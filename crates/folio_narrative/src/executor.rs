//! Continuation orchestration.
//!
//! One continuation is a single sequential chain: load the World, resolve the
//! target segment, compact, compile, call the driver once, append the raw
//! completion, persist, and extract the caller-visible text.

use crate::{compact, AnnotationPreference, PromptCompiler, TaggedText, TemplateSet};
use folio_core::{
    ContinuationOutcome, ContinuationOutcomeBuilder, ContinuationRequest, FinishReason,
    FolioConfig, GenerateRequestBuilder, Message, Protocol, SegmentIndex,
};
use folio_error::{
    BuilderError, BuilderErrorKind, FolioResult, NarrativeError, NarrativeErrorKind,
};
use folio_interface::{CompletionDriver, WorldStore};
use std::sync::Arc;

/// Extends World segments one completion at a time.
///
/// The driver and store are injected; nothing is global.
///
/// # Example
///
/// ```rust,ignore
/// use folio_narrative::ContinuationExecutor;
/// use folio_storage::FileSystemWorldStore;
///
/// let store = Arc::new(FileSystemWorldStore::new("data")?);
/// let executor = ContinuationExecutor::new(driver, store).with_protocol(Protocol::Enhanced);
///
/// let outcome = executor.continue_segment(&request).await?;
/// println!("{}", outcome.narrative_text());
/// ```
pub struct ContinuationExecutor<D: CompletionDriver> {
    driver: D,
    store: Arc<dyn WorldStore>,
    templates: TemplateSet,
    protocol: Protocol,
    compiler: PromptCompiler,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl<D: CompletionDriver> ContinuationExecutor<D> {
    /// Executor with built-in templates and the basic protocol.
    pub fn new(driver: D, store: Arc<dyn WorldStore>) -> Self {
        Self {
            driver,
            store,
            templates: TemplateSet::new(),
            protocol: Protocol::default(),
            compiler: PromptCompiler::default(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Executor configured from the `[generation]` and `[provider]` sections.
    ///
    /// # Errors
    ///
    /// Returns an error if a template override cannot be read.
    pub fn from_config(driver: D, store: Arc<dyn WorldStore>, config: &FolioConfig) -> FolioResult<Self> {
        let generation = config.generation();
        Ok(Self::new(driver, store)
            .with_templates(TemplateSet::from_config(generation)?)
            .with_protocol(*generation.protocol())
            .with_repeat_instructions(*generation.repeat_instructions())
            .with_sampling(*config.provider().max_tokens(), *config.provider().temperature()))
    }

    /// Replace the template set.
    pub fn with_templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    /// Select the prompt protocol.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Toggle instruction repetition in enhanced prompts.
    pub fn with_repeat_instructions(mut self, repeat: bool) -> Self {
        self.compiler = PromptCompiler::new(repeat);
        self
    }

    /// Completion length cap and temperature passed to the driver.
    pub fn with_sampling(mut self, max_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// The completion driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The World store.
    pub fn store(&self) -> &Arc<dyn WorldStore> {
        &self.store
    }

    /// Active protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Run one generation round against the requested segment.
    ///
    /// A provider failure propagates and leaves the stored World untouched.
    /// A completion with no narrative text outside its tags is still
    /// appended; its trimmed raw text is returned as the narrative.
    #[tracing::instrument(
        skip(self, request),
        fields(
            world = %request.world_name(),
            segment = %request.segment_index(),
            mode = %request.mode(),
            protocol = %self.protocol,
            provider = self.driver.provider_name(),
        )
    )]
    pub async fn continue_segment(
        &self,
        request: &ContinuationRequest,
    ) -> FolioResult<ContinuationOutcome> {
        let name = request.world_name();
        let mut world = self.store.load(name).await?;

        let (index, current) = world.read_segment(*request.segment_index())?;
        let current = current.to_string();
        tracing::debug!(index, segments = world.len(), "Resolved target segment");

        let compacted = compact(&world, index, AnnotationPreference::from(self.protocol));
        let template = self.templates.get(*request.mode(), self.protocol);
        let prompt = self.compiler.compile(
            &template,
            request.topic(),
            request.language(),
            &compacted,
            &current,
        );

        let generate_request = GenerateRequestBuilder::default()
            .messages(vec![Message::user(prompt)])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())))?;

        let response = self.driver.generate(&generate_request).await.map_err(|e| {
            tracing::error!(error = %e, model = self.driver.model_name(), "Completion failed");
            e
        })?;

        if response.finish_reason == Some(FinishReason::Length) {
            tracing::warn!(
                completion_len = response.text.len(),
                "Completion truncated at the token limit"
            );
        }

        self.store
            .append_to_segment(name, &mut world, index, &response.text)
            .await?;

        let tagged = TaggedText::parse(&response.text);
        let terminal = tagged.terminal();
        let narrative_text = if tagged.narrative().is_empty() {
            let malformed =
                NarrativeError::new(NarrativeErrorKind::MalformedResponse(response.text.len()));
            tracing::warn!(error = %malformed, "Returning raw completion text");
            response.text.trim().to_string()
        } else {
            tagged.into_narrative()
        };

        tracing::info!(
            index,
            terminal,
            narrative_len = narrative_text.len(),
            "Segment extended"
        );

        ContinuationOutcomeBuilder::default()
            .narrative_text(narrative_text)
            .terminal(terminal)
            .segment_index(index)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())).into())
    }

    /// Keep extending one segment until a terminal round or `max_rounds` rounds.
    ///
    /// The first round uses the request's segment index; later rounds target
    /// the segment it resolved to. `observer` sees each outcome as it arrives
    /// and can stop the loop by returning an error.
    #[tracing::instrument(skip(self, request, observer), fields(world = %request.world_name()))]
    pub async fn run_until_terminal<F>(
        &self,
        request: &ContinuationRequest,
        max_rounds: usize,
        mut observer: F,
    ) -> FolioResult<Vec<ContinuationOutcome>>
    where
        F: FnMut(&ContinuationOutcome) -> FolioResult<()>,
    {
        let mut outcomes: Vec<ContinuationOutcome> = Vec::new();
        let mut current = request.clone();

        while outcomes.len() < max_rounds {
            let outcome = self.continue_segment(&current).await?;
            observer(&outcome)?;

            let terminal = *outcome.terminal();
            current = request.with_segment(SegmentIndex::At(*outcome.segment_index()));
            outcomes.push(outcome);

            if terminal {
                tracing::info!(rounds = outcomes.len(), "Reached the end marker");
                return Ok(outcomes);
            }
        }

        tracing::warn!(rounds = outcomes.len(), "Stopped before the end marker");
        Ok(outcomes)
    }
}
