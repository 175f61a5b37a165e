#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod drawable;
pub mod error;
pub mod event;
pub mod export;
pub mod history;
pub mod input;
pub mod preview;
pub mod renderer;
pub mod sketchpad;
pub mod sticker;
pub mod stroke;
pub mod tool;

pub use app::SketchpadApp;
pub use config::SketchpadConfig;
pub use drawable::{Drawable, DrawableId, DrawableKind, Style};
pub use error::{ConfigError, ExportError};
pub use event::{DrawingEvent, EventBus, EventHandler};
pub use export::{ExportedImage, RasterSurface};
pub use history::HistoryStack;
pub use input::{CanvasInput, InputEvent};
pub use preview::{Preview, PreviewHint};
pub use renderer::{PainterSurface, ScaledSurface, Surface};
pub use sketchpad::{Outcome, Sketchpad};
pub use sticker::Sticker;
pub use stroke::Stroke;
pub use tool::{StickerPalette, ToolKind, ToolSelection, ToolState};
