use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::rewrite::{self, RewriteRule};

/// Extension shared by component sources and generated stories.
pub const STORY_EXTENSION: &str = "ts";
/// Story registration helper imported by every generated file.
pub const STORY_HELPER: &str = "storiesOf";
/// Module the helper is imported from.
pub const STORY_MODULE: &str = "@storybook/angular";

/// Raw story options as accepted from the CLI, `--json` specs and project defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub use_template: bool,
    pub tag_as_label: bool,
    pub no_story: bool,
    pub use_component_dir: bool,
    /// JSON-encoded string or inline array of `{from, to}` rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_path: Option<Value>,
    /// Component file sits directly in its parent directory.
    pub flat: bool,
    /// Overwrite an existing story.
    pub force: bool,
    /// Compute everything, touch nothing.
    pub dry_run: bool,
}

impl StoryOptions {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            use_template: self.use_template,
            tag_as_label: self.tag_as_label,
            no_story: self.no_story,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub use_template: bool,
    pub tag_as_label: bool,
    pub no_story: bool,
}

/// Where the story file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Beside the component's implementation. Rewrite rules do not move the file.
    ComponentDir,
    /// Under the stories root, at the rewritten directory of the logical name.
    StoriesTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryVariant {
    /// Imports the component class and references it.
    Reference,
    /// Inline `<tag></tag>` markup, no component import.
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    ClassName,
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryMode {
    Skip,
    Emit {
        variant: StoryVariant,
        label: LabelSource,
    },
}

impl From<RenderOptions> for StoryMode {
    fn from(options: RenderOptions) -> Self {
        if options.no_story {
            return StoryMode::Skip;
        }

        let variant = if options.use_template {
            StoryVariant::Template
        } else {
            StoryVariant::Reference
        };
        let label = if options.tag_as_label {
            LabelSource::Tag
        } else {
            LabelSource::ClassName
        };

        StoryMode::Emit { variant, label }
    }
}

/// Validated generation settings.
///
/// Precedence: `no_story` decides whether anything is emitted,
/// `use_component_dir` decides placement over any rewrite rules, the
/// remaining flags pick the variant and label.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    pub placement: Placement,
    pub mode: StoryMode,
    pub rules: Vec<RewriteRule>,
}

impl StoryConfig {
    pub fn from_options(options: &StoryOptions) -> Result<Self> {
        let rules = rewrite::parse_rules(options.replace_path.as_ref())?;
        let placement = if options.use_component_dir {
            Placement::ComponentDir
        } else {
            Placement::StoriesTree
        };

        Ok(Self {
            placement,
            mode: StoryMode::from(options.render_options()),
            rules,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResolution {
    pub output_path: String,
    /// Extension-less, always starts with `.`.
    pub import_path: String,
}

/// The two story shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryBody {
    Reference {
        group_name: String,
        class_name: String,
        import_path: String,
    },
    Template {
        group_name: String,
        tag_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryAction {
    Created,
    Overwritten,
    Skipped,
    RemovedStale,
}
