#![warn(clippy::all, rust_2018_idioms)]

pub mod attachment;
pub mod curves;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod id_generator;
pub mod settings;
pub mod snap;
pub mod spiral;
pub mod tools;

pub use attachment::{Attachment, AttachmentGraph};
pub use document::Document;
pub use editor::Editor;
pub use error::EditorError;
pub use history::History;
pub use settings::{AdjustDirection, AdjustKind, ParamEdit, ToolSettings};
pub use snap::{SnapHit, SnapQuery, find_snap_point};
pub use spiral::{Spiral, SpiralId, SpiralKind};
pub use tools::{DrawTool, DrawUpdate, EndPoint, HitTarget, SelectTool, ToolChoice};
