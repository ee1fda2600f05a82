//! Demo application struct and eframe::App implementation

use crate::backend::EguiBackend;
use crate::demo::{COLOR, ColorHook, FORMULA, demo_state};
use autogui_core::{AutoGuiConfig, AutosaveTimer, JsonFileStorage, Session, Value};
use std::path::PathBuf;
use std::time::Duration;

/// Name of the undo/redo history for the demo state.
const HISTORY: &str = "scene";

pub struct DemoApp {
    session: Session,
    state: Value,
    storage: JsonFileStorage,
    state_path: PathBuf,
}

impl DemoApp {
    pub fn new(config: AutoGuiConfig, state_path: PathBuf) -> anyhow::Result<Self> {
        tracing::info!(
            "Autosaving to {:?} (undo {}, redo {})",
            state_path,
            config.shortcuts.undo,
            config.shortcuts.redo
        );
        let mut session = Session::new(config);
        session.register_hook(COLOR, ColorHook);
        Ok(Self {
            session,
            state: demo_state()?,
            storage: JsonFileStorage::new(),
            state_path,
        })
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let shortcuts = &self.session.config().shortcuts;
        ui.horizontal(|ui| {
            ui.label(format!("Undo: {}", shortcuts.undo));
            ui.separator();
            ui.label(format!("Redo: {}", shortcuts.redo));
            ui.separator();
            let pending = self
                .session
                .autosaves()
                .timer(&self.state_path)
                .is_some_and(AutosaveTimer::is_pending);
            ui.label(if pending { "Unsaved changes" } else { "Saved" });
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.show_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut backend = EguiBackend::new(ui);
                let mut renderer = self.session.frame(&mut backend);

                renderer.error_sink(|ui| {
                    ui.autosave(
                        &mut self.state,
                        &self.state_path,
                        &mut self.storage,
                        |ui, value| {
                            ui.mod_history(HISTORY, value, |ui, value| {
                                ui.render(value, "scene").map(|_| ())
                            })
                        },
                    )
                });
                renderer.error_sink(|ui| ui.latex(FORMULA));
            });
        });

        // Pending flushes need a frame even when the user is idle.
        let config = self.session.config();
        let pending_save = self
            .session
            .autosaves()
            .timer(&self.state_path)
            .is_some_and(AutosaveTimer::is_pending);
        if pending_save {
            ctx.request_repaint_after(Duration::from_millis(config.autosave.debounce_ms));
        }
        if self.session.histories().has_pending_snapshot() {
            ctx.request_repaint_after(Duration::from_millis(config.history.debounce_ms));
        }
    }
}
