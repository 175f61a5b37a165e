use crate::config::SketchpadConfig;
use crate::error::ExportError;
use crate::event::DrawingEvent;
use crate::export::ExportedImage;
use crate::input::{CanvasInput, InputEvent};
use crate::renderer::PainterSurface;
use crate::sketchpad::{Outcome, Sketchpad};
use crate::tool::{ToolKind, ToolSelection};

pub struct SketchpadApp {
    sketchpad: Sketchpad,
    input: CanvasInput,
    custom_sticker: String,
    status: String,
}

impl SketchpadApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchpadConfig) -> Self {
        let sketchpad = Sketchpad::new(config);

        // Any change to the drawing schedules a repaint
        let ctx = cc.egui_ctx.clone();
        sketchpad.subscribe(Box::new(move |_: &DrawingEvent| ctx.request_repaint()));

        Self {
            sketchpad,
            input: CanvasInput::new(),
            custom_sticker: String::new(),
            status: String::new(),
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match self.sketchpad.handle(event) {
            Ok(Outcome::Exported(image)) => self.save_export(&image),
            Ok(_) => {}
            Err(err) => {
                log::error!("Export failed: {err}");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn save_export(&mut self, image: &ExportedImage) {
        let path = &self.sketchpad.config().export_path;
        let result: Result<(), ExportError> = std::fs::write(path, &image.png).map_err(Into::into);
        self.status = match result {
            Ok(()) => {
                log::info!("Saved {}x{} export to {}", image.width, image.height, path.display());
                format!("Exported {}x{} to {}", image.width, image.height, path.display())
            }
            Err(err) => {
                log::error!("Could not save export: {err}");
                format!("Could not save export: {err}")
            }
        };
    }

    fn toolbar(&self, ui: &mut egui::Ui) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let config = self.sketchpad.config();
        let tool = self.sketchpad.tool();
        let freehand = tool.kind() == ToolKind::Freehand;

        ui.horizontal(|ui| {
            for (label, thickness) in [("Thin", config.thin_thickness), ("Thick", config.thick_thickness)] {
                if ui
                    .selectable_label(freehand && tool.thickness() == thickness, label)
                    .clicked()
                {
                    events.push(InputEvent::SelectTool(ToolSelection::Freehand { thickness }));
                }
            }

            let mut thickness = tool.thickness();
            if ui
                .add(egui::Slider::new(&mut thickness, 1.0..=20.0).text("px"))
                .changed()
            {
                events.push(InputEvent::SelectTool(ToolSelection::Freehand { thickness }));
            }
        });

        ui.horizontal(|ui| {
            for glyph in self.sketchpad.palette().glyphs() {
                let selected = !freehand && tool.glyph() == Some(glyph.as_str());
                if ui.selectable_label(selected, glyph.as_str()).clicked() {
                    events.push(InputEvent::SelectTool(ToolSelection::Sticker {
                        glyph: glyph.clone(),
                    }));
                }
            }
        });

        events
    }

    fn history_buttons(&self, ui: &mut egui::Ui) -> Vec<InputEvent> {
        let history = self.sketchpad.history();
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            if ui.add_enabled(history.can_undo(), egui::Button::new("Undo")).clicked() {
                events.push(InputEvent::Undo);
            }
            if ui.add_enabled(history.can_redo(), egui::Button::new("Redo")).clicked() {
                events.push(InputEvent::Redo);
            }
            if ui.button("Clear").clicked() {
                events.push(InputEvent::Clear);
            }
            if ui.button("Export").clicked() {
                events.push(InputEvent::Export);
            }
        });
        events
    }
}

impl eframe::App for SketchpadApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sketchpad");

            let mut events = self.toolbar(ui);

            ui.horizontal(|ui| {
                ui.label("Custom sticker:");
                let response = ui.text_edit_singleline(&mut self.custom_sticker);
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    let glyph = std::mem::take(&mut self.custom_sticker);
                    if self.sketchpad.add_sticker(&glyph).is_ignored() {
                        log::debug!("Sticker {glyph:?} not added");
                    }
                }
            });

            let size = self.sketchpad.config().canvas_size as f32;
            let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
            let canvas = response.rect;

            events.extend(self.history_buttons(ui));
            events.extend(self.input.process_input(ctx, canvas));
            for event in events {
                self.dispatch(event);
            }

            let mut surface = PainterSurface::new(&painter, canvas);
            self.sketchpad.redraw(&mut surface);

            if !self.status.is_empty() {
                ui.label(&self.status);
            }
        });
    }
}
