//! Key-value persistence for the canvas.
//!
//! The canvas stores three entries, each value a JSON document of its own:
//! the pan offset, the zoom level and the placed element list. Values are
//! written on every change and read back once at startup.

use crate::graph::NodeKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding `{"x": .., "y": ..}`.
pub const PAN_OFFSET_KEY: &str = "canvasPanOffset";

/// Key holding the zoom level as a float string.
pub const ZOOM_LEVEL_KEY: &str = "canvasZoomLevel";

/// Key holding the JSON array of [`CanvasElement`]s.
pub const ELEMENTS_KEY: &str = "canvasElements";

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable string-to-string store.
pub trait ViewportStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ViewportStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// The file is read once when opened and rewritten in full on every save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Default file name inside a data directory.
    pub const FILE_NAME: &'static str = "canvas.json";

    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty and is overwritten by the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "corrupt canvas store, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable canvas store, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Open `canvas.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::open(dir.as_ref().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ViewportStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Kind tag of a persisted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    OriginalFact,
    ReframedFact,
}

impl ElementType {
    /// Fill colour recorded alongside each element.
    pub fn color_for(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Original => "#FFFACD",
            NodeKind::Reframed => "#E6E6FA",
        }
    }
}

/// A placed node as stored under [`ELEMENTS_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    pub color: String,
}

/// Serialize `value` and save it under `key`, logging instead of failing.
pub(crate) fn save_json<S, T>(store: &mut S, key: &str, value: &T)
where
    S: ViewportStore + ?Sized,
    T: Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(PersistError::from)
        .and_then(|json| store.save(key, &json));
    if let Err(err) = result {
        tracing::warn!(key, error = %err, "failed to persist canvas state");
    }
}

/// Load and parse the value under `key`; missing or malformed yields `None`.
pub(crate) fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: ViewportStore + ?Sized,
    T: for<'de> Deserialize<'de>,
{
    let raw = store.load(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring malformed persisted value");
            None
        }
    }
}
