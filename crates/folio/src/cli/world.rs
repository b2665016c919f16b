//! World management command handlers.

use folio_core::SegmentState;
use folio_error::{FolioResult, JsonError, StorageError, StorageErrorKind};
use folio_interface::WorldStore;
use folio_narrative::extract_narrative;
use serde_json::Value;
use std::path::Path;

/// Read a setting description from a flag value or a JSON file.
///
/// A flag value that is not valid JSON is kept as a JSON string.
pub fn read_description(inline: Option<&str>, file: Option<&Path>) -> FolioResult<Value> {
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;
        let value = serde_json::from_str(&contents)
            .map_err(|e| JsonError::new(format!("{}: {}", path.display(), e)))?;
        return Ok(value);
    }

    Ok(match inline {
        Some(text) => serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())),
        None => Value::Object(Default::default()),
    })
}

/// Handle `folio create`.
pub async fn create_world(store: &dyn WorldStore, name: &str, description: Value) -> FolioResult<()> {
    let overwriting = store.exists(name).await?;
    store.create(name, description).await?;
    if overwriting {
        println!("Replaced world '{}'", name);
    } else {
        println!("Created world '{}'", name);
    }
    Ok(())
}

/// Handle `folio clear`; returns the names that were cleared.
pub async fn clear_worlds(
    store: &dyn WorldStore,
    name: Option<&str>,
    all: bool,
) -> FolioResult<Vec<String>> {
    let names = match name {
        Some(name) if !all => vec![name.to_string()],
        _ => store.list().await?,
    };

    for name in &names {
        store.clear(name).await?;
    }
    println!("Successfully cleared {} world(s)", names.len());
    Ok(names)
}

/// Render every segment of a World as Markdown-ish text.
pub async fn render_world(store: &dyn WorldStore, name: &str, raw: bool) -> FolioResult<String> {
    let world = store.load(name).await?;

    let mut out = format!("# {}\n\n", name);
    let description = serde_json::to_string_pretty(&world.description)
        .map_err(|e| JsonError::new(e.to_string()))?;
    out.push_str(&description);
    out.push('\n');

    for (index, segment) in world.backstory.iter().enumerate() {
        let state = SegmentState::of(segment);
        out.push_str(&format!("\n## Segment {} ({})\n\n", index, state));
        if raw {
            out.push_str(segment.trim());
        } else {
            out.push_str(&extract_narrative(segment));
        }
        out.push('\n');
    }

    Ok(out)
}

/// Handle `folio show`.
pub async fn show_world(store: &dyn WorldStore, name: &str, raw: bool) -> FolioResult<()> {
    print!("{}", render_world(store, name, raw).await?);
    Ok(())
}
