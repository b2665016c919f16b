//! Generation command handlers.

use super::commands::GenerateArgs;
use folio_core::{ContinuationOutcome, ContinuationRequest, ContinuationRequestBuilder, SegmentIndex};
use folio_error::{
    BuilderError, BuilderErrorKind, FolioResult, StorageError, StorageErrorKind, TerminalError,
    TerminalErrorKind,
};
use folio_interface::{CompletionDriver, WorldStore};
use folio_narrative::{ContinuationExecutor, extract_narrative};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Options for the `run` caller loop.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File rewritten after every round
    pub output: PathBuf,
    /// Clear the World's backstory before the first round
    pub fresh: bool,
    /// Wait for Enter between rounds
    pub pause: bool,
    /// Round cap per work
    pub max_rounds: usize,
    /// Number of works to finish before stopping
    pub works: usize,
}

/// Build a continuation request from command-line options.
pub fn build_request(args: &GenerateArgs) -> FolioResult<ContinuationRequest> {
    ContinuationRequestBuilder::default()
        .topic(args.topic.as_str())
        .language(args.language.as_str())
        .world_name(args.world.as_str())
        .segment_index(args.segment)
        .mode(args.mode)
        .build()
        .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())).into())
}

/// Handle `folio continue`: one round, narrative to stdout.
pub async fn continue_once<D: CompletionDriver>(
    executor: &ContinuationExecutor<D>,
    request: &ContinuationRequest,
) -> FolioResult<ContinuationOutcome> {
    let outcome = executor.continue_segment(request).await?;
    println!("{}", outcome.narrative_text());
    eprintln!(
        "[segment {}{}]",
        outcome.segment_index(),
        if *outcome.terminal() { ", finished" } else { "" }
    );
    Ok(outcome)
}

/// Narrative already present in the segment a request targets.
async fn existing_narrative(store: &dyn WorldStore, request: &ContinuationRequest) -> FolioResult<String> {
    if *request.segment_index() == SegmentIndex::New {
        return Ok(String::new());
    }
    let mut world = store.load(request.world_name()).await?;
    let (_, raw) = world.read_segment(*request.segment_index())?;
    Ok(extract_narrative(raw))
}

/// Print the pause prompt and block until a line (or end of input) arrives.
fn prompt_and_wait<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(), TerminalError> {
    write!(output, "Press Enter to continue...")
        .and_then(|_| output.flush())
        .map_err(|e| TerminalError::new(TerminalErrorKind::PromptWrite(e.to_string())))?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| TerminalError::new(TerminalErrorKind::InputRead(e.to_string())))?;
    Ok(())
}

fn wait_for_enter() -> FolioResult<()> {
    tokio::task::block_in_place(|| {
        prompt_and_wait(&mut std::io::stdin().lock(), &mut std::io::stdout())?;
        Ok(())
    })
}

/// Handle `folio run`: extend a segment until it ends, mirroring its
/// narrative to `options.output` after every round.
///
/// With `options.works > 1`, each finished work is followed by a new segment,
/// and the output file starts over for it. A work that hits `max_rounds`
/// without ending stops the loop.
#[tracing::instrument(
    skip(executor, request, options),
    fields(world = %request.world_name(), output = %options.output.display(), works = options.works)
)]
pub async fn run_story<D: CompletionDriver>(
    executor: &ContinuationExecutor<D>,
    request: &ContinuationRequest,
    options: &RunOptions,
) -> FolioResult<Vec<ContinuationOutcome>> {
    let store = executor.store().as_ref();
    if options.fresh {
        store.clear(request.world_name()).await?;
    }

    let mut outcomes = Vec::new();
    let mut current = request.clone();
    let mut finished_works = 0;

    while finished_works < options.works {
        let more_works = finished_works + 1 < options.works;
        let mut narrative = existing_narrative(store, &current).await?;

        let rounds = executor
            .run_until_terminal(&current, options.max_rounds, |outcome| {
                if !narrative.is_empty() {
                    narrative.push('\n');
                }
                narrative.push_str(outcome.narrative_text());

                std::fs::write(&options.output, &narrative).map_err(|e| {
                    StorageError::new(StorageErrorKind::FileWrite(format!(
                        "{}: {}",
                        options.output.display(),
                        e
                    )))
                })?;
                tracing::debug!(len = narrative.len(), "Wrote narrative");

                if options.pause && (more_works || !*outcome.terminal()) {
                    wait_for_enter()?;
                }
                Ok(())
            })
            .await?;

        let finished = rounds.last().is_some_and(|o| *o.terminal());
        outcomes.extend(rounds);
        if !finished {
            break;
        }
        finished_works += 1;
        current = request.with_segment(SegmentIndex::New);
    }

    println!(
        "{} round(s), {} of {} work(s) finished -> {}",
        outcomes.len(),
        finished_works,
        options.works,
        options.output.display()
    );
    Ok(outcomes)
}
