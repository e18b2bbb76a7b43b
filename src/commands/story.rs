use clap::Args;
use serde_json::{Map, Value};

use storygen::story::{self, GenerateOutput, StoryOptions};
use storygen::tree::LocalTree;
use storygen::workspace::{self, Workspace};

use super::{merge_json_layers, parse_json_spec, CmdResult, GlobalArgs};

#[derive(Args, Default, Debug)]
pub struct StoryArgs {
    /// Component name, slash-separated (e.g. foo/bar)
    pub name: Option<String>,

    /// Project in the workspace file
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Render an inline `<tag></tag>` template instead of referencing the component class
    #[arg(long, overrides_with = "no_use_template")]
    pub use_template: bool,

    /// Reference the component class even if project defaults say otherwise
    #[arg(long, overrides_with = "use_template")]
    pub no_use_template: bool,

    /// Label the story with the component's tag instead of its class name
    #[arg(long, overrides_with = "no_tag_as_label")]
    pub tag_as_label: bool,

    /// Label the story with the class name even if project defaults say otherwise
    #[arg(long, overrides_with = "tag_as_label")]
    pub no_tag_as_label: bool,

    /// Do not create a story (removes a stale one at the computed path)
    #[arg(long, overrides_with = "story")]
    pub no_story: bool,

    /// Create the story even if project defaults set noStory
    #[arg(long, overrides_with = "no_story")]
    pub story: bool,

    /// Place the story beside the component; replace-path rules do not move it
    #[arg(long, overrides_with = "no_use_component_dir")]
    pub use_component_dir: bool,

    /// Place the story under the stories root even if project defaults say otherwise
    #[arg(long, overrides_with = "use_component_dir")]
    pub no_use_component_dir: bool,

    /// JSON array of {"from": <regex>, "to": <replacement>} applied in order to the story directory
    #[arg(long, value_name = "JSON")]
    pub replace_path: Option<String>,

    /// The component file sits directly in its parent directory
    #[arg(long, overrides_with = "no_flat")]
    pub flat: bool,

    /// The component has a folder of its own even if project defaults set flat
    #[arg(long, overrides_with = "flat")]
    pub no_flat: bool,

    /// Overwrite an existing story
    #[arg(long)]
    pub force: bool,

    /// Show what would be written without touching the workspace
    #[arg(long)]
    pub dry_run: bool,

    /// JSON options spec (supports @file and - for stdin); flags take precedence
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,
}

impl StoryArgs {
    /// Options given as flags. Unset flags are left out so lower layers apply;
    /// the `--no-*` forms turn off an option set by a lower layer.
    fn flag_overrides(&self) -> Map<String, Value> {
        let mut obj = Map::new();

        if let Some(name) = &self.name {
            obj.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(project) = &self.project {
            obj.insert("project".to_string(), Value::String(project.clone()));
        }
        if let Some(replace_path) = &self.replace_path {
            obj.insert("replacePath".to_string(), Value::String(replace_path.clone()));
        }

        for (key, on, off) in [
            ("useTemplate", self.use_template, self.no_use_template),
            ("tagAsLabel", self.tag_as_label, self.no_tag_as_label),
            ("noStory", self.no_story, self.story),
            ("useComponentDir", self.use_component_dir, self.no_use_component_dir),
            ("flat", self.flat, self.no_flat),
            ("force", self.force, false),
            ("dryRun", self.dry_run, false),
        ] {
            if on {
                obj.insert(key.to_string(), Value::Bool(true));
            } else if off {
                obj.insert(key.to_string(), Value::Bool(false));
            }
        }

        obj
    }
}

pub fn run(args: StoryArgs, global: &GlobalArgs) -> CmdResult<GenerateOutput> {
    let path = workspace::resolve_workspace_path(global.workspace.as_deref())?;
    let workspace = Workspace::load(&path)?;

    let options = resolve_options(&args, &workspace)?;
    let tree = LocalTree::new(workspace.root_dir.clone());

    let output = story::generate(&tree, &workspace, &options)?;
    Ok((output, 0))
}

/// Layer project `storyDefaults` < `--json` spec < flags.
fn resolve_options(args: &StoryArgs, workspace: &Workspace) -> storygen::Result<StoryOptions> {
    let spec = parse_json_spec(args.json.as_deref())?;
    let flags = args.flag_overrides();

    let project_id = flags
        .get("project")
        .or_else(|| spec.get("project"))
        .and_then(Value::as_str);
    let defaults = project_id
        .and_then(|id| workspace.projects.get(id))
        .map(|project| project.story_defaults.clone())
        .unwrap_or_default();

    let merged = merge_json_layers(vec![defaults, spec, flags]);
    serde_json::from_value(merged).map_err(|e| {
        storygen::Error::validation_invalid_json(e, Some("story options".to_string()), None)
    })
}
