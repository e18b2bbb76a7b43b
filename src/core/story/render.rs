use crate::component::ComponentDescriptor;
use crate::utils::template::{self, TemplateVars};

use super::types::{
    LabelSource, PathResolution, RenderedFile, StoryBody, StoryMode, StoryVariant, STORY_HELPER,
    STORY_MODULE,
};

const REFERENCE_TEMPLATE: &str = "import { {{storyHelper}} } from '{{storyModule}}';
import { {{className}} } from '{{importPath}}';

{{storyHelper}}('{{groupName}}', module)
  .add('default', () => ({
    component: {{className}}
  }));";

const TEMPLATE_TEMPLATE: &str = "import { {{storyHelper}} } from '{{storyModule}}';

{{storyHelper}}('{{groupName}}', module)
  .add('default', () => ({
    template: `<{{tagName}}></{{tagName}}>`
  }));";

pub fn label(descriptor: &ComponentDescriptor, source: LabelSource) -> String {
    match source {
        LabelSource::ClassName => descriptor.class_name.clone(),
        LabelSource::Tag => format!("<{}>", descriptor.tag_name),
    }
}

/// `group_dir` keeps its trailing slash; an empty directory yields the bare label.
pub fn group_name(group_dir: &str, label: &str) -> String {
    format!("{}{}", group_dir, label)
}

impl StoryBody {
    pub fn new(
        descriptor: &ComponentDescriptor,
        resolution: &PathResolution,
        group_dir: &str,
        variant: StoryVariant,
        label_source: LabelSource,
    ) -> Self {
        let group_name = group_name(group_dir, &label(descriptor, label_source));

        match variant {
            StoryVariant::Reference => StoryBody::Reference {
                group_name,
                class_name: descriptor.class_name.clone(),
                import_path: resolution.import_path.clone(),
            },
            StoryVariant::Template => StoryBody::Template {
                group_name,
                tag_name: descriptor.tag_name.clone(),
            },
        }
    }

    pub fn group_name(&self) -> &str {
        match self {
            StoryBody::Reference { group_name, .. } | StoryBody::Template { group_name, .. } => {
                group_name
            }
        }
    }

    pub fn render(&self) -> String {
        match self {
            StoryBody::Reference {
                group_name,
                class_name,
                import_path,
            } => template::render(
                REFERENCE_TEMPLATE,
                &[
                    (TemplateVars::STORY_HELPER, STORY_HELPER),
                    (TemplateVars::STORY_MODULE, STORY_MODULE),
                    (TemplateVars::CLASS_NAME, class_name.as_str()),
                    (TemplateVars::IMPORT_PATH, import_path.as_str()),
                    (TemplateVars::GROUP_NAME, group_name.as_str()),
                ],
            ),
            StoryBody::Template {
                group_name,
                tag_name,
            } => template::render(
                TEMPLATE_TEMPLATE,
                &[
                    (TemplateVars::STORY_HELPER, STORY_HELPER),
                    (TemplateVars::STORY_MODULE, STORY_MODULE),
                    (TemplateVars::TAG_NAME, tag_name.as_str()),
                    (TemplateVars::GROUP_NAME, group_name.as_str()),
                ],
            ),
        }
    }
}

/// Render the story for `mode`, or nothing when the story is skipped.
pub fn render(
    descriptor: &ComponentDescriptor,
    resolution: &PathResolution,
    group_dir: &str,
    mode: StoryMode,
) -> Option<RenderedFile> {
    let StoryMode::Emit { variant, label } = mode else {
        return None;
    };

    let body = StoryBody::new(descriptor, resolution, group_dir, variant, label);

    Some(RenderedFile {
        path: resolution.output_path.clone(),
        content: body.render(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor {
            logical_name: "foo/bar".to_string(),
            class_name: "BarComponent".to_string(),
            tag_name: "app-bar".to_string(),
            source_dir: "/projects/baz/src/app/foo/bar".to_string(),
            source_file: "/projects/baz/src/app/foo/bar/bar.component".to_string(),
        }
    }

    fn resolution() -> PathResolution {
        PathResolution {
            output_path: "/projects/baz/src/stories/foo/bar.stories.ts".to_string(),
            import_path: "../../app/foo/bar/bar.component".to_string(),
        }
    }

    fn emit(variant: StoryVariant, label: LabelSource) -> StoryMode {
        StoryMode::Emit { variant, label }
    }

    #[test]
    fn reference_story_matches_expected_bytes() {
        let file = render(
            &descriptor(),
            &resolution(),
            "foo/",
            emit(StoryVariant::Reference, LabelSource::ClassName),
        )
        .unwrap();

        assert_eq!(file.path, "/projects/baz/src/stories/foo/bar.stories.ts");
        assert_eq!(
            file.content,
            "import { storiesOf } from '@storybook/angular';
import { BarComponent } from '../../app/foo/bar/bar.component';

storiesOf('foo/BarComponent', module)
  .add('default', () => ({
    component: BarComponent
  }));"
        );
    }

    #[test]
    fn template_story_matches_expected_bytes() {
        let file = render(
            &descriptor(),
            &resolution(),
            "foo/",
            emit(StoryVariant::Template, LabelSource::ClassName),
        )
        .unwrap();

        assert_eq!(
            file.content,
            "import { storiesOf } from '@storybook/angular';

storiesOf('foo/BarComponent', module)
  .add('default', () => ({
    template: `<app-bar></app-bar>`
  }));"
        );
    }

    #[test]
    fn tag_label_wraps_tag_name() {
        let file = render(
            &descriptor(),
            &resolution(),
            "foo/",
            emit(StoryVariant::Reference, LabelSource::Tag),
        )
        .unwrap();

        assert!(file.content.contains("storiesOf('foo/<app-bar>', module)"));
        assert!(file.content.contains("import { BarComponent }"));
    }

    #[test]
    fn template_variant_with_tag_label() {
        let body = StoryBody::new(
            &descriptor(),
            &resolution(),
            "foo/",
            StoryVariant::Template,
            LabelSource::Tag,
        );

        assert_eq!(body.group_name(), "foo/<app-bar>");
        let content = body.render();
        assert!(!content.contains("component:"));
        assert!(!content.contains("BarComponent"));
    }

    #[test]
    fn empty_group_dir_yields_bare_label() {
        assert_eq!(group_name("", "BarComponent"), "BarComponent");
        assert_eq!(group_name("abcabc/def/", "BarComponent"), "abcabc/def/BarComponent");
    }

    #[test]
    fn skip_renders_nothing() {
        assert!(render(&descriptor(), &resolution(), "foo/", StoryMode::Skip).is_none());
    }

    #[test]
    fn no_trailing_newline() {
        for variant in [StoryVariant::Reference, StoryVariant::Template] {
            let mode = emit(variant, LabelSource::ClassName);
            let file = render(&descriptor(), &resolution(), "foo/", mode).unwrap();
            assert!(file.content.ends_with("}));"));
        }
    }
}
