use serde::Serialize;

use crate::component::{self, ComponentDescriptor};
use crate::error::{Error, Result};
use crate::tree::FileTree;
use crate::utils::validation;
use crate::workspace::Workspace;

use super::render;
use super::resolver;
use super::types::{
    LabelSource, Placement, StoryAction, StoryConfig, StoryMode, StoryOptions, StoryVariant,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub project: String,
    pub component: ComponentDescriptor,
    pub path: String,
    pub import_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<StoryVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSource>,
    pub placement: Placement,
    pub rules: usize,
    pub action: StoryAction,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Resolve, render and apply one story to `tree`.
///
/// Everything is computed before the tree is touched, so a failure leaves
/// the tree as it was.
pub fn generate(
    tree: &dyn FileTree,
    workspace: &Workspace,
    options: &StoryOptions,
) -> Result<GenerateOutput> {
    let name = validation::require(options.name.as_deref(), "name")?;
    let project_id = validation::require(options.project.as_deref(), "project")?;
    let project_id =
        validation::require_non_empty(project_id, "project", "Project cannot be empty")?;

    let project = workspace.project(project_id)?;
    let config = StoryConfig::from_options(options)?;
    let descriptor = component::resolve_component_descriptor(name, project, options.flat)?;

    let resolution = resolver::resolve(
        &descriptor,
        &project.stories_root()?,
        &config.rules,
        config.placement,
    )?;
    let group_dir = resolver::group_directory(&descriptor, &config.rules);
    let rendered = render::render(&descriptor, &resolution, &group_dir, config.mode);

    let (variant, label) = match config.mode {
        StoryMode::Skip => (None, None),
        StoryMode::Emit { variant, label } => (Some(variant), Some(label)),
    };
    let group_name =
        label.map(|source| render::group_name(&group_dir, &render::label(&descriptor, source)));

    let exists = tree.exists(&resolution.output_path);
    let action = match &rendered {
        None if exists => {
            if !options.dry_run {
                crate::log_status!("story", "Removing stale story {}", resolution.output_path);
                tree.delete(&resolution.output_path)?;
            }
            StoryAction::RemovedStale
        }
        None => StoryAction::Skipped,
        Some(_) if exists && !options.force => {
            return Err(Error::story_already_exists(&resolution.output_path));
        }
        Some(file) => {
            if !options.dry_run {
                crate::log_status!("story", "Writing {}", file.path);
                tree.write(&file.path, &file.content)?;
            }
            if exists {
                StoryAction::Overwritten
            } else {
                StoryAction::Created
            }
        }
    };

    Ok(GenerateOutput {
        project: project.id.clone(),
        path: resolution.output_path,
        import_path: resolution.import_path,
        group_name,
        variant,
        label,
        placement: config.placement,
        rules: config.rules.len(),
        action,
        dry_run: options.dry_run,
        content: rendered.filter(|_| options.dry_run).map(|file| file.content),
        component: descriptor,
    })
}
