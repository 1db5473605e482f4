//! Rendered CloudFormation templates and cloud assemblies.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::stack::Environment;

/// Metadata key recording the construct path of a resource.
pub const PATH_METADATA_KEY: &str = "aws:cdk:path";

/// Cloud assembly schema version written to the manifest.
pub const ASSEMBLY_VERSION: &str = "36.0.0";

/// File name of the cloud assembly manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// A CloudFormation template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub resources: BTreeMap<String, TemplateResource>,
}

/// One entry of a template's `Resources` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    pub properties: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Template {
    /// Pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resources of the given type, keyed by logical id.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a TemplateResource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
    }
}

/// A synthesized stack: its template plus where it should be deployed.
#[derive(Debug, Clone, PartialEq)]
pub struct StackArtifact {
    pub stack_name: String,
    pub environment: Environment,
    pub template: Template,
}

impl StackArtifact {
    pub fn template_file(&self) -> String {
        format!("{}.template.json", self.stack_name)
    }
}

/// The output of synthesizing an app.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudAssembly {
    pub stacks: Vec<StackArtifact>,
}

/// `manifest.json` contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub artifacts: BTreeMap<String, ArtifactManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub environment: String,
    pub properties: ArtifactProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactProperties {
    pub template_file: String,
}

impl CloudAssembly {
    pub fn stack(&self, stack_name: &str) -> Option<&StackArtifact> {
        self.stacks.iter().find(|s| s.stack_name == stack_name)
    }

    pub fn manifest(&self) -> Manifest {
        let artifacts = self
            .stacks
            .iter()
            .map(|stack| {
                (
                    stack.stack_name.clone(),
                    ArtifactManifest {
                        artifact_type: "aws:cloudformation:stack".to_string(),
                        environment: stack.environment.uri(),
                        properties: ArtifactProperties {
                            template_file: stack.template_file(),
                        },
                    },
                )
            })
            .collect();

        Manifest {
            version: ASSEMBLY_VERSION.to_string(),
            artifacts,
        }
    }

    /// Writes every template and the manifest into `dir`, creating it if needed.
    /// Returns the paths written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<std::path::PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.stacks.len() + 1);

        for stack in &self.stacks {
            let path = dir.join(stack.template_file());
            std::fs::write(&path, stack.template.to_json_pretty()?)?;
            tracing::debug!(path = %path.display(), "wrote template");
            written.push(path);
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        std::fs::write(
            &manifest_path,
            serde_json::to_string_pretty(&self.manifest())?,
        )?;
        written.push(manifest_path);

        Ok(written)
    }
}
