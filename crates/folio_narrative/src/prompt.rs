//! Prompt assembly.

use crate::{CompactedWorld, PromptTemplate};
use folio_core::Protocol;

/// Placeholder for a segment with no text yet.
pub const EMPTY_PLACEHOLDER: &str = "<empty>";

/// Joins a template, the labeled block and the in-progress segment into one prompt.
///
/// # Examples
///
/// ```
/// use folio_core::{GenerationMode, Protocol};
/// use folio_narrative::{CompactedWorld, PromptCompiler, PromptTemplate};
/// use serde_json::json;
///
/// let template = PromptTemplate::new(GenerationMode::Scene, Protocol::Basic, "Write a scene.\n");
/// let world = CompactedWorld { description: json!("Mars"), annotations: vec![String::new()] };
///
/// let prompt = PromptCompiler::default().compile(&template, "discovering mars", "English", &world, "");
/// assert_eq!(
///     prompt,
///     "Write a scene.\nTopic: discovering mars\nLanguage: English\n\
///      World: {\"Description\":\"Mars\",\"Previous Plots/Stories\":[\"\"]}\n\
///      Current Content:\n<empty>"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptCompiler {
    repeat_instructions: bool,
}

impl Default for PromptCompiler {
    fn default() -> Self {
        Self {
            repeat_instructions: true,
        }
    }
}

impl PromptCompiler {
    /// Compiler with explicit repetition behavior.
    pub fn new(repeat_instructions: bool) -> Self {
        Self {
            repeat_instructions,
        }
    }

    /// Whether enhanced prompts repeat the instructions at the end.
    pub fn repeat_instructions(&self) -> bool {
        self.repeat_instructions
    }

    /// Assemble the prompt text.
    pub fn compile(
        &self,
        template: &PromptTemplate,
        topic: &str,
        language: &str,
        world: &CompactedWorld,
        current_content: &str,
    ) -> String {
        let current = if current_content.is_empty() {
            EMPTY_PLACEHOLDER
        } else {
            current_content
        };

        let mut prompt = format!(
            "{}Topic: {}\nLanguage: {}\nWorld: {}\nCurrent Content:\n{}",
            template.instructions(),
            topic,
            language,
            world.to_prompt_blob(),
            current
        );

        if self.repeat_instructions && *template.protocol() == Protocol::Enhanced {
            prompt.push('\n');
            prompt.push_str(template.instructions());
        }

        tracing::debug!(
            mode = %template.mode(),
            protocol = %template.protocol(),
            prompt_len = prompt.len(),
            "Compiled prompt"
        );
        prompt
    }
}
