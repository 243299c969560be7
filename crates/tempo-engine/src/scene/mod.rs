//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands
//! - keep paint order equal to recording order
//! - carry the canvas transform that was current when each command was recorded

mod cmd;
mod list;

pub use cmd::{DrawCmd, ImageCmd};
pub use list::{DrawItem, DrawList};
