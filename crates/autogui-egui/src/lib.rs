//! egui widget backend for autogui, plus the demo application.
//!
//! [`EguiBackend`] wraps an `egui::Ui` so the engine in `autogui_core` can
//! draw into any egui or eframe application:
//!
//! ```ignore
//! egui::CentralPanel::default().show(ctx, |ui| {
//!     let mut backend = EguiBackend::new(ui);
//!     session.frame(&mut backend).render(&mut value, "state")?;
//! });
//! ```

pub mod app;
pub mod backend;
pub mod demo;
pub mod keys;
pub mod settings;

pub use app::DemoApp;
pub use backend::EguiBackend;
