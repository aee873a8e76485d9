use serde::{Deserialize, Serialize};

mod draw_tool;
mod select_tool;

pub use draw_tool::{DrawTool, DrawUpdate};
pub use select_tool::{EndPoint, HitTarget, SelectTool, hit_test};

/// Which tool currently owns pointer input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolChoice {
    #[default]
    Spiral,
    Select,
}
