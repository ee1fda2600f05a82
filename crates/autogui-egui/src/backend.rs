//! [`WidgetBackend`] implemented on an `egui::Ui`.

use crate::keys::translate_events;
use autogui_core::{KeyEvent, WidgetBackend, WidgetId};
use image::RgbaImage;

/// Draws engine widgets into one `egui::Ui`.
///
/// A fresh backend wraps the `Ui` each frame; nested layouts (collapsing
/// groups, rows) get their own short-lived backend on the child `Ui`.
pub struct EguiBackend<'u> {
    ui: &'u mut egui::Ui,
    next_width: Option<f32>,
    /// Response of the most recently added item, for context menus.
    last: Option<egui::Response>,
}

impl<'u> EguiBackend<'u> {
    pub fn new(ui: &'u mut egui::Ui) -> Self {
        Self {
            ui,
            next_width: None,
            last: None,
        }
    }

    /// Add an editing widget under its own id scope, label on the right.
    fn add(&mut self, id: &WidgetId, label: &str, widget: impl egui::Widget) -> bool {
        let width = self.next_width.take();
        let response = self
            .ui
            .push_id(id.as_str(), |ui| {
                ui.horizontal(|ui| {
                    let response = match width {
                        Some(width) => {
                            let height = ui.spacing().interact_size.y;
                            ui.add_sized([width, height], widget)
                        }
                        None => ui.add(widget),
                    };
                    if !label.is_empty() {
                        ui.label(label);
                    }
                    response
                })
                .inner
            })
            .inner;
        let changed = response.changed();
        self.last = Some(response);
        changed
    }

    fn texture(&self, id: &WidgetId, image: &RgbaImage) -> egui::TextureHandle {
        let ctx = self.ui.ctx();
        let key = egui::Id::new(("autogui-texture", id.as_str()));
        if let Some(texture) = ctx.data(|d| d.get_temp::<egui::TextureHandle>(key)) {
            return texture;
        }

        let size = [image.width() as usize, image.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let texture = ctx.load_texture(id.as_str(), pixels, egui::TextureOptions::LINEAR);
        ctx.data_mut(|d| d.insert_temp(key, texture.clone()));
        texture
    }
}

impl WidgetBackend for EguiBackend<'_> {
    fn label(&mut self, text: &str) {
        self.last = Some(self.ui.label(text));
    }

    fn error_label(&mut self, message: &str, detail: &str) {
        let color = self.ui.visuals().error_fg_color;
        let response = self.ui.colored_label(color, message);
        self.last = Some(if detail.is_empty() {
            response
        } else {
            response.on_hover_text(detail)
        });
    }

    fn checkbox(&mut self, id: &WidgetId, label: &str, value: &mut bool) -> bool {
        self.add(id, "", egui::Checkbox::new(value, label))
    }

    fn drag_int(&mut self, id: &WidgetId, label: &str, value: &mut i64) -> bool {
        self.add(id, label, egui::DragValue::new(value).speed(1.0))
    }

    fn drag_real(&mut self, id: &WidgetId, label: &str, value: &mut f64) -> bool {
        self.add(id, label, egui::DragValue::new(value).speed(0.01))
    }

    fn text_edit(&mut self, id: &WidgetId, label: &str, value: &mut String) -> bool {
        self.add(id, label, egui::TextEdit::singleline(value))
    }

    fn combo(
        &mut self,
        id: &WidgetId,
        label: &str,
        options: &[String],
        selected: &mut usize,
    ) -> bool {
        let before = *selected;
        let mut combo = egui::ComboBox::from_id_salt(id.as_str());
        if let Some(width) = self.next_width.take() {
            combo = combo.width(width);
        }
        let response = self
            .ui
            .horizontal(|ui| {
                let response = combo.show_index(ui, selected, options.len(), |i| {
                    options.get(i).cloned().unwrap_or_default()
                });
                if !label.is_empty() {
                    ui.label(label);
                }
                response
            })
            .inner;
        self.last = Some(response);
        *selected != before
    }

    fn collapsing(
        &mut self,
        id: &WidgetId,
        label: &str,
        body: &mut dyn FnMut(&mut dyn WidgetBackend),
    ) -> bool {
        let response = egui::CollapsingHeader::new(label)
            .id_salt(id.as_str())
            .default_open(true)
            .show(self.ui, |ui| {
                let mut inner = EguiBackend::new(ui);
                body(&mut inner);
            });
        self.last = Some(response.header_response);
        response.body_returned.is_some()
    }

    fn row(&mut self, body: &mut dyn FnMut(&mut dyn WidgetBackend)) {
        let response = self
            .ui
            .horizontal(|ui| {
                let mut inner = EguiBackend::new(ui);
                body(&mut inner);
            })
            .response;
        self.last = Some(response);
    }

    fn context_menu(&mut self, _id: &WidgetId, items: &[&str]) -> Option<usize> {
        let response = self.last.as_ref()?;
        let mut picked = None;
        response.context_menu(|ui| {
            for (i, item) in items.iter().enumerate() {
                if ui.button(*item).clicked() {
                    picked = Some(i);
                    ui.close();
                }
            }
        });
        picked
    }

    fn available_width(&self) -> f32 {
        self.ui.available_width()
    }

    fn set_next_item_width(&mut self, width: f32) {
        self.next_width = Some(width);
    }

    fn image(&mut self, id: &WidgetId, image: &RgbaImage) {
        let texture = self.texture(id, image);
        let sized = egui::load::SizedTexture::from_handle(&texture);
        self.last = Some(self.ui.image(sized));
    }

    fn key_events(&self) -> Vec<KeyEvent> {
        self.ui.input(|i| translate_events(&i.events))
    }
}
