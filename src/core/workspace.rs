//! Workspace configuration (`angular.json`-shaped).
//!
//! Only the keys needed to place a story are read: each project's `root`,
//! `sourceRoot`, `prefix`, plus the optional `storiesRoot` and
//! `storyDefaults` extensions. Unknown keys are ignored.

use crate::error::{Error, Result};
use crate::utils::{io, path};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKSPACE_FILE: &str = "angular.json";
pub const DEFAULT_PREFIX: &str = "app";
pub const DEFAULT_STORIES_DIR: &str = "stories";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,

    /// Directory holding the workspace file. Virtual `/` maps here.
    #[serde(skip)]
    pub root_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub root: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stories_root: Option<String>,

    /// Story options applied before `--json` and CLI flags.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub story_defaults: Map<String, Value>,
}

impl Project {
    /// Rooted, normalized source root, e.g. `/projects/baz/src`.
    pub fn source_root(&self) -> Result<String> {
        match self.source_root.as_deref().map(str::trim) {
            Some(source_root) if !source_root.is_empty() => self.rooted("sourceRoot", source_root),
            _ => self.rooted("root", &path::join(self.root.trim(), "src")),
        }
    }

    pub fn prefix(&self) -> &str {
        self.prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PREFIX)
    }

    /// Rooted, normalized default directory for story files,
    /// e.g. `/projects/baz/src/stories`.
    pub fn stories_root(&self) -> Result<String> {
        match self.stories_root.as_deref().map(str::trim) {
            Some(stories_root) if !stories_root.is_empty() => {
                self.rooted("storiesRoot", stories_root)
            }
            _ => Ok(path::join(&self.source_root()?, DEFAULT_STORIES_DIR)),
        }
    }

    fn rooted(&self, key: &str, raw: &str) -> Result<String> {
        path::normalize(&path::root(raw)).ok_or_else(|| {
            Error::config_invalid_value(
                key,
                Some(raw.to_string()),
                format!("Project '{}': path climbs above the workspace root", self.id),
            )
        })
    }
}

impl Workspace {
    pub fn load(file: &Path) -> Result<Self> {
        let raw = io::read_file(file, &format!("read workspace {}", file.display()))?;
        let root_dir = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_json(&raw, &file.display().to_string(), root_dir)
    }

    pub fn from_json(raw: &str, source: &str, root_dir: PathBuf) -> Result<Self> {
        let mut workspace: Workspace =
            serde_json::from_str(raw).map_err(|e| Error::config_invalid_json(source, e))?;

        workspace.root_dir = root_dir;
        for (id, project) in workspace.projects.iter_mut() {
            project.id = id.clone();
        }

        Ok(workspace)
    }

    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .get(id)
            .ok_or_else(|| Error::project_not_found(id, self.similar_project_ids(id)))
    }

    fn similar_project_ids(&self, id: &str) -> Vec<String> {
        let needle = id.to_lowercase();
        self.projects
            .keys()
            .filter(|candidate| {
                let candidate = candidate.to_lowercase();
                candidate.contains(&needle)
                    || needle.contains(&candidate)
                    || edit_distance(&candidate, &needle) <= 2
            })
            .cloned()
            .collect()
    }
}

/// Resolve the workspace file argument, expanding `~` and env vars.
pub fn resolve_workspace_path(arg: Option<&str>) -> Result<PathBuf> {
    let raw = arg.unwrap_or(DEFAULT_WORKSPACE_FILE);
    let expanded = shellexpand::full(raw).map_err(|e| {
        Error::validation_invalid_argument("workspace", e.to_string(), Some(raw.to_string()), None)
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current.push((prev[j] + cost).min(prev[j + 1] + 1).min(current[j] + 1));
        }
        prev = current;
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace(raw: &str) -> Workspace {
        Workspace::from_json(raw, "angular.json", PathBuf::from("/tmp/ws")).unwrap()
    }

    #[test]
    fn defaults_follow_project_root() {
        let ws = workspace(r#"{ "projects": { "baz": { "root": "projects/baz" } } }"#);
        let project = ws.project("baz").unwrap();

        assert_eq!(project.id, "baz");
        assert_eq!(project.source_root().unwrap(), "/projects/baz/src");
        assert_eq!(project.prefix(), "app");
        assert_eq!(project.stories_root().unwrap(), "/projects/baz/src/stories");
    }

    #[test]
    fn explicit_roots_and_prefix_win() {
        let ws = workspace(
            r#"{ "projects": { "web": {
                "root": "",
                "sourceRoot": "src",
                "prefix": "acme",
                "storiesRoot": "storybook/stories"
            } } }"#,
        );
        let project = ws.project("web").unwrap();

        assert_eq!(project.source_root().unwrap(), "/src");
        assert_eq!(project.prefix(), "acme");
        assert_eq!(project.stories_root().unwrap(), "/storybook/stories");
    }

    #[test]
    fn roots_with_parent_segments_are_normalized() {
        let ws = workspace(
            r#"{ "projects": { "baz": {
                "root": "projects/baz",
                "sourceRoot": "projects/baz/../baz/src",
                "storiesRoot": "./projects/baz/./src/../src/stories/"
            } } }"#,
        );
        let project = ws.project("baz").unwrap();

        assert_eq!(project.source_root().unwrap(), "/projects/baz/src");
        assert_eq!(project.stories_root().unwrap(), "/projects/baz/src/stories");
    }

    #[test]
    fn stories_root_above_workspace_is_invalid_config() {
        let ws = workspace(
            r#"{ "projects": { "baz": { "root": "projects/baz", "storiesRoot": "../stories" } } }"#,
        );
        let err = ws.project("baz").unwrap().stories_root().unwrap_err();

        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "storiesRoot");
        assert_eq!(err.details["value"], "../stories");
    }

    #[test]
    fn source_root_above_workspace_is_invalid_config() {
        let ws = workspace(
            r#"{ "projects": { "baz": {
                "root": "projects/baz",
                "sourceRoot": "src/../../lib"
            } } }"#,
        );
        let project = ws.project("baz").unwrap();

        let err = project.source_root().unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "sourceRoot");

        let err = project.stories_root().unwrap_err();
        assert_eq!(err.details["key"], "sourceRoot");
    }

    #[test]
    fn story_defaults_are_kept_as_json() {
        let ws = workspace(
            r#"{ "projects": { "baz": {
                "root": "projects/baz",
                "storyDefaults": { "useTemplate": true }
            } } }"#,
        );
        let project = ws.project("baz").unwrap();
        assert_eq!(project.story_defaults["useTemplate"], Value::Bool(true));
    }

    #[test]
    fn unknown_project_suggests_close_ids() {
        let ws = workspace(
            r#"{ "projects": {
                "baz": { "root": "projects/baz" },
                "admin": { "root": "projects/admin" }
            } }"#,
        );
        let err = ws.project("bax").unwrap_err();

        assert_eq!(err.code.as_str(), "project.not_found");
        assert_eq!(err.details["suggestions"], serde_json::json!(["baz"]));
    }

    #[test]
    fn invalid_json_is_config_error() {
        let err = Workspace::from_json("{", "angular.json", PathBuf::new()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn workspace_path_defaults_to_angular_json() {
        assert_eq!(resolve_workspace_path(None).unwrap(), PathBuf::from("angular.json"));
    }
}
