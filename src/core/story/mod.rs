//! Story generation.
//!
//! `resolver` decides where a story goes, `render` decides what it says, and
//! `generate` applies the result to a file tree.

mod generate;
pub mod render;
pub mod resolver;
mod types;

pub use generate::{generate, GenerateOutput};
pub use types::{
    LabelSource, PathResolution, Placement, RenderOptions, RenderedFile, StoryAction, StoryBody,
    StoryConfig, StoryMode, StoryOptions, StoryVariant, STORY_EXTENSION, STORY_HELPER,
    STORY_MODULE,
};
