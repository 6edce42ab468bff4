//! Document types for `skaffold/v1alpha1`.
//!
//! The first schema has no profiles, a free-form tag policy string, and
//! implicit docker artifacts.

use crate::schema::variant::exclusive;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A `skaffold/v1alpha1` pipeline config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Config {
    pub api_version: String,
    pub kind: String,
    pub build: BuildConfig,
    pub deploy: DeployConfig,
}

/// The build section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBuildConfig")]
pub struct BuildConfig {
    pub artifacts: Vec<Artifact>,
    /// Tagging strategy name, e.g. `gitCommit` or `sha256`.
    pub tag_policy: String,
    pub build_type: Option<BuildType>,
}

/// Where images are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildType {
    Local(LocalBuild),
    GoogleCloudBuild(GoogleCloudBuild),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalBuild {
    pub skip_push: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GoogleCloudBuild {
    pub project_id: String,
}

/// An image to build. Always built from a Dockerfile in this version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Artifact {
    pub image_name: String,
    pub dockerfile_path: String,
    pub workspace: String,
    pub build_args: BTreeMap<String, String>,
}

/// The deploy section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDeployConfig")]
pub struct DeployConfig {
    pub name: String,
    pub deploy_type: Option<DeployType>,
}

/// How manifests reach the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployType {
    Helm(HelmDeploy),
    Kubectl(KubectlDeploy),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelmDeploy {
    pub releases: Vec<HelmRelease>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HelmRelease {
    pub name: String,
    pub chart_path: String,
    pub values_file_path: String,
    pub values: BTreeMap<String, String>,
    pub namespace: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubectlDeploy {
    pub manifests: Vec<Manifest>,
}

/// A group of manifest paths with template parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    pub paths: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawBuildConfig {
    artifacts: Vec<Artifact>,
    tag_policy: String,
    local: Option<LocalBuild>,
    google_cloud_build: Option<GoogleCloudBuild>,
}

impl TryFrom<RawBuildConfig> for BuildConfig {
    type Error = String;

    fn try_from(raw: RawBuildConfig) -> Result<Self, Self::Error> {
        let build_type = exclusive(
            "build",
            [
                ("local", raw.local.map(BuildType::Local)),
                (
                    "googleCloudBuild",
                    raw.google_cloud_build.map(BuildType::GoogleCloudBuild),
                ),
            ],
        )?;

        Ok(Self {
            artifacts: raw.artifacts,
            tag_policy: raw.tag_policy,
            build_type,
        })
    }
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDeployConfig {
    name: String,
    helm: Option<HelmDeploy>,
    kubectl: Option<KubectlDeploy>,
}

impl TryFrom<RawDeployConfig> for DeployConfig {
    type Error = String;

    fn try_from(raw: RawDeployConfig) -> Result<Self, Self::Error> {
        let deploy_type = exclusive(
            "deploy",
            [
                ("helm", raw.helm.map(DeployType::Helm)),
                ("kubectl", raw.kubectl.map(DeployType::Kubectl)),
            ],
        )?;

        Ok(Self {
            name: raw.name,
            deploy_type,
        })
    }
}
