use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};

use storygen::workspace::{self, Project, Workspace};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// List projects in the workspace file
    List,
    /// Show where stories for a project are placed
    Show {
        /// Project ID
        project_id: String,
    },
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutput {
    pub command: String,
    pub workspace: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub source_root: String,
    pub prefix: String,
    pub stories_root: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub story_defaults: Map<String, Value>,
}

impl TryFrom<&Project> for ProjectSummary {
    type Error = storygen::Error;

    fn try_from(project: &Project) -> storygen::Result<Self> {
        Ok(Self {
            id: project.id.clone(),
            source_root: project.source_root()?,
            prefix: project.prefix().to_string(),
            stories_root: project.stories_root()?,
            story_defaults: project.story_defaults.clone(),
        })
    }
}

pub fn run(args: ProjectArgs, global: &GlobalArgs) -> CmdResult<ProjectOutput> {
    let path = workspace::resolve_workspace_path(global.workspace.as_deref())?;
    let workspace = Workspace::load(&path)?;
    let workspace_display = path.display().to_string();

    match args.command {
        ProjectCommand::List => Ok((
            ProjectOutput {
                command: "project.list".to_string(),
                workspace: workspace_display,
                projects: workspace
                    .projects
                    .values()
                    .map(ProjectSummary::try_from)
                    .collect::<storygen::Result<_>>()?,
                ..Default::default()
            },
            0,
        )),
        ProjectCommand::Show { project_id } => Ok((
            ProjectOutput {
                command: "project.show".to_string(),
                workspace: workspace_display,
                project: Some(ProjectSummary::try_from(workspace.project(&project_id)?)?),
                ..Default::default()
            },
            0,
        )),
    }
}
