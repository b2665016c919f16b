//! Generation-mode prompt templates.

use derive_getters::Getters;
use folio_core::{GenerationConfig, GenerationMode, Protocol};
use folio_error::{FolioResult, NarrativeError, NarrativeErrorKind};
use std::path::Path;

const SCENE_BASIC: &str = include_str!("../templates/scene_basic.txt");
const STORY_BASIC: &str = include_str!("../templates/story_basic.txt");
const SCENE_ENHANCED: &str = include_str!("../templates/scene_enhanced.txt");
const STORY_ENHANCED: &str = include_str!("../templates/story_enhanced.txt");

/// Instructional text for one mode under one protocol.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PromptTemplate {
    /// Story or scene
    mode: GenerationMode,
    /// Basic or enhanced
    protocol: Protocol,
    /// Instructions placed before (and in enhanced prompts after) the labeled block
    instructions: String,
}

impl PromptTemplate {
    /// Template with custom instructions.
    pub fn new(mode: GenerationMode, protocol: Protocol, instructions: impl Into<String>) -> Self {
        Self {
            mode,
            protocol,
            instructions: instructions.into(),
        }
    }

    /// One of the four bundled templates.
    ///
    /// ```
    /// use folio_core::{GenerationMode, Protocol};
    /// use folio_narrative::PromptTemplate;
    ///
    /// let template = PromptTemplate::builtin(GenerationMode::Scene, Protocol::Enhanced);
    /// assert!(template.instructions().contains("<summary>"));
    /// ```
    pub fn builtin(mode: GenerationMode, protocol: Protocol) -> Self {
        let instructions = match (mode, protocol) {
            (GenerationMode::Scene, Protocol::Basic) => SCENE_BASIC,
            (GenerationMode::Story, Protocol::Basic) => STORY_BASIC,
            (GenerationMode::Scene, Protocol::Enhanced) => SCENE_ENHANCED,
            (GenerationMode::Story, Protocol::Enhanced) => STORY_ENHANCED,
        };
        Self::new(mode, protocol, instructions)
    }
}

/// Built-in templates with optional per-mode overrides.
///
/// An override replaces the instructions for its mode under every protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    story_override: Option<String>,
    scene_override: Option<String>,
}

impl TemplateSet {
    /// Built-in templates only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the instructions for one mode.
    pub fn with_override(mut self, mode: GenerationMode, instructions: impl Into<String>) -> Self {
        match mode {
            GenerationMode::Story => self.story_override = Some(instructions.into()),
            GenerationMode::Scene => self.scene_override = Some(instructions.into()),
        }
        self
    }

    /// Load overrides from the files named in configuration.
    ///
    /// # Errors
    ///
    /// Returns a template error if a named file cannot be read.
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &GenerationConfig) -> FolioResult<Self> {
        let mut set = Self::new();
        if let Some(path) = config.story_template() {
            set = set.with_override(GenerationMode::Story, read_template(path)?);
        }
        if let Some(path) = config.scene_template() {
            set = set.with_override(GenerationMode::Scene, read_template(path)?);
        }
        Ok(set)
    }

    /// Template for a mode under a protocol.
    pub fn get(&self, mode: GenerationMode, protocol: Protocol) -> PromptTemplate {
        let custom = match mode {
            GenerationMode::Story => self.story_override.as_ref(),
            GenerationMode::Scene => self.scene_override.as_ref(),
        };
        match custom {
            Some(instructions) => PromptTemplate::new(mode, protocol, instructions.clone()),
            None => PromptTemplate::builtin(mode, protocol),
        }
    }
}

fn read_template(path: &Path) -> Result<String, NarrativeError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        NarrativeError::new(NarrativeErrorKind::TemplateError(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded template override");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_builtin_asks_for_info_and_end() {
        for mode in GenerationMode::iter() {
            for protocol in Protocol::iter() {
                let template = PromptTemplate::builtin(mode, protocol);
                assert!(template.instructions().contains("<info>"), "{mode}/{protocol}");
                assert!(template.instructions().contains("<end>"), "{mode}/{protocol}");
                assert!(template.instructions().contains("### THE END."), "{mode}/{protocol}");
            }
        }
    }

    #[test]
    fn test_only_enhanced_asks_for_summary() {
        for mode in GenerationMode::iter() {
            assert!(!PromptTemplate::builtin(mode, Protocol::Basic).instructions().contains("<summary>"));
            assert!(PromptTemplate::builtin(mode, Protocol::Enhanced).instructions().contains("<summary>"));
        }
    }

    #[test]
    fn test_override_applies_to_its_mode_only() {
        let set = TemplateSet::new().with_override(GenerationMode::Story, "Write a fable.\n");
        assert_eq!(set.get(GenerationMode::Story, Protocol::Basic).instructions(), "Write a fable.\n");
        assert_eq!(
            set.get(GenerationMode::Scene, Protocol::Basic),
            PromptTemplate::builtin(GenerationMode::Scene, Protocol::Basic)
        );
    }

    #[test]
    fn test_missing_override_file_is_template_error() {
        let err = read_template(Path::new("/nonexistent/story.txt")).unwrap_err();
        assert!(matches!(err.kind, NarrativeErrorKind::TemplateError(_)));
    }

    #[test]
    fn test_from_config_reads_override_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scene.txt");
        std::fs::write(&path, "Write a two-hander.\n").unwrap();

        let config: GenerationConfig = serde_json::from_value(serde_json::json!({
            "protocol": "enhanced",
            "scene_template": path,
        }))
        .unwrap();
        let set = TemplateSet::from_config(&config).unwrap();

        assert_eq!(
            set.get(GenerationMode::Scene, Protocol::Enhanced).instructions(),
            "Write a two-hander.\n"
        );
        assert_eq!(
            set.get(GenerationMode::Story, Protocol::Enhanced),
            PromptTemplate::builtin(GenerationMode::Story, Protocol::Enhanced)
        );
    }
}
