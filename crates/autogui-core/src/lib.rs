//! Immediate-mode automatic GUI engine.
//!
//! Given an in-memory object graph ([`Value`]), this crate synthesizes
//! editable widgets for every field, every frame, and writes user edits
//! back into the graph in place. On top of the render engine sit a scoped
//! modification flag, debounced autosave and a linear undo/redo history
//! with global keyboard arbitration.
//!
//! # Example
//!
//! ```ignore
//! use autogui_core::{Record, ScriptedBackend, Session, Value};
//!
//! let mut session = Session::default();
//! let mut backend = ScriptedBackend::new();
//! let mut value = Value::from(Record::new("Camera").with("fov", 60.0));
//!
//! backend.edit("camera/fov", 75.0);
//! let modified = session.frame(&mut backend).render(&mut value, "camera")?;
//! assert!(modified);
//! ```
//!
//! # Architecture
//!
//! - `value/` - Closed value model (scalars, sequences, maps, arrays, records)
//! - `render/` - Recursive render engine and the scopes built on it
//! - `backend/` - Widget backend contract, key events, headless backend
//! - `modflag.rs` - Nested "anything modified" flag stack
//! - `history.rs` - Undo/redo logs and shortcut arbitration
//! - `autosave/` - Debounced autosave timers
//! - `storage.rs` - Load/save collaborators
//! - `cache/` - Content-addressed cache and LaTeX images
//! - `config.rs` - TOML configuration
//! - `error.rs` - Error types with user-friendly messages

mod autosave;
mod backend;
mod cache;
mod clock;
mod config;
mod error;
mod history;
mod hooks;
mod modflag;
mod path;
mod render;
mod session;
mod storage;
mod value;

pub use autosave::{AutosaveRegistry, AutosaveTimer, DebouncePolicy, DirtyTracker};
pub use backend::{
    Chord, Event, KeyAction, KeyEvent, Modifiers, ParseChordError, ScriptedBackend, WidgetBackend,
    WidgetKind,
};
pub use cache::{ContentCache, LatexRenderer, content_key};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    AutoGuiConfig, AutosaveConfig, HistoryConfig, LatexConfig, ShortcutConfig, load_config,
    save_config,
};
pub use error::{BoxError, CacheError, ConfigError, FieldError, RenderError, Result, StorageError};
pub use history::{History, HistoryRegistry, HistoryState};
pub use hooks::{HookRegistry, RenderHook, Selection};
pub use modflag::ModStack;
pub use path::{Path, Segment, WidgetId};
pub use render::{Node, Renderer};
pub use session::Session;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use value::{
    Annotation, ArrayData, Field, Fields, Int, IntKind, Map, NdArray, Real, RealKind, Record,
    ShapeError, Value, ValueKind,
};
