//! Contract with the immediate-mode widget backend.
//!
//! The engine never draws anything itself. Every frame it calls into a
//! [`WidgetBackend`], which returns the user's edits for each widget
//! identity. Editing widgets take the current value by `&mut` and report
//! whether the user changed it this frame.
//!
//! Implementations:
//! - `autogui_egui::EguiBackend` draws with egui
//! - [`ScriptedBackend`] replays scripted edits headlessly (tests, tooling)

mod keys;
mod scripted;

pub use keys::{Chord, KeyAction, KeyEvent, Modifiers, ParseChordError};
pub use scripted::{Event, ScriptedBackend, WidgetKind};

use crate::path::WidgetId;
use image::RgbaImage;

/// Immediate-mode widget primitives used by the render engine.
pub trait WidgetBackend {
    /// Display-only text.
    fn label(&mut self, text: &str);

    /// Inline error text; `detail` is shown on hover.
    fn error_label(&mut self, message: &str, detail: &str);

    fn checkbox(&mut self, id: &WidgetId, label: &str, value: &mut bool) -> bool;

    /// Integer drag/stepper with unit step.
    fn drag_int(&mut self, id: &WidgetId, label: &str, value: &mut i64) -> bool;

    /// Continuous drag widget.
    fn drag_real(&mut self, id: &WidgetId, label: &str, value: &mut f64) -> bool;

    /// Single-line text edit.
    fn text_edit(&mut self, id: &WidgetId, label: &str, value: &mut String) -> bool;

    fn combo(&mut self, id: &WidgetId, label: &str, options: &[String], selected: &mut usize)
    -> bool;

    /// Collapsible group. `body` runs only when the group is expanded;
    /// returns whether it is expanded.
    fn collapsing(
        &mut self,
        id: &WidgetId,
        label: &str,
        body: &mut dyn FnMut(&mut dyn WidgetBackend),
    ) -> bool;

    /// Lay out the widgets added by `body` left to right.
    fn row(&mut self, body: &mut dyn FnMut(&mut dyn WidgetBackend));

    /// Context menu on the most recently added item. Returns the index of
    /// the activated entry.
    fn context_menu(&mut self, id: &WidgetId, items: &[&str]) -> Option<usize>;

    /// Width left in the current layout.
    fn available_width(&self) -> f32;

    /// Width for the next editing widget only.
    fn set_next_item_width(&mut self, width: f32);

    fn image(&mut self, id: &WidgetId, image: &RgbaImage);

    /// Key events received this frame.
    fn key_events(&self) -> Vec<KeyEvent>;
}
