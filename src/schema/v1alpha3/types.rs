//! Document types for `skaffold/v1alpha3`, the latest schema.
//!
//! Compared to v1alpha2, helm releases take a list of values files and the
//! kaniko builder nests its GCS bucket under a build context.
//!
//! Every variant family is an `Option<Enum>` in the model and a set of
//! sibling keys on the wire. Unset fields are omitted on output so that an
//! upgraded document reads like a hand-written one.

use crate::schema::variant::exclusive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `skaffold/v1alpha3` pipeline config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Config {
    pub api_version: String,
    pub kind: String,
    #[serde(skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
    #[serde(skip_serializing_if = "DeployConfig::is_empty")]
    pub deploy: DeployConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

/// A named override of the build and deploy sections.
///
/// An empty section leaves the corresponding top-level section in effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
    #[serde(skip_serializing_if = "DeployConfig::is_empty")]
    pub deploy: DeployConfig,
}

/// The build section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildConfig", into = "RawBuildConfig")]
pub struct BuildConfig {
    pub artifacts: Vec<Artifact>,
    pub tag_policy: Option<TagPolicy>,
    pub build_type: Option<BuildType>,
}

impl BuildConfig {
    /// True when the section carries no information at all.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty() && self.tag_policy.is_none() && self.build_type.is_none()
    }
}

/// How built images are tagged.
#[derive(Debug, Clone, PartialEq)]
pub enum TagPolicy {
    GitCommit(GitTagger),
    Sha256(ShaTagger),
    EnvTemplate(EnvTemplateTagger),
    DateTime(DateTimeTagger),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitTagger {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShaTagger {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvTemplateTagger {
    pub template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateTimeTagger {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
}

/// Where images are built.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildType {
    Local(LocalBuild),
    GoogleCloudBuild(GoogleCloudBuild),
    Kaniko(KanikoBuild),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalBuild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_push: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GoogleCloudBuild {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub disk_size_gb: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub machine_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
}

/// In-cluster builds with kaniko.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KanikoBuild {
    pub build_context: KanikoBuildContext,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pull_secret: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pull_secret_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timeout: String,
}

/// Where kaniko reads the build context from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KanikoBuildContext {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gcs_bucket: String,
}

/// An image to build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArtifact", into = "RawArtifact")]
pub struct Artifact {
    pub image_name: String,
    pub workspace: String,
    pub artifact_type: Option<ArtifactType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactType {
    Docker(DockerArtifact),
    Bazel(BazelArtifact),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DockerArtifact {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dockerfile_path: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub build_args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BazelArtifact {
    pub target: String,
}

/// The deploy section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeployConfig", into = "RawDeployConfig")]
pub struct DeployConfig {
    pub deploy_type: Option<DeployType>,
}

impl DeployConfig {
    /// True when no deployer is configured.
    pub fn is_empty(&self) -> bool {
        self.deploy_type.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeployType {
    Helm(HelmDeploy),
    Kubectl(KubectlDeploy),
    Kustomize(KustomizeDeploy),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelmDeploy {
    pub releases: Vec<HelmRelease>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HelmRelease {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub chart_path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values_files: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub set_values: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "is_false")]
    pub wait: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KubectlDeploy {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remote_manifests: Vec<String>,
    #[serde(skip_serializing_if = "KubectlFlags::is_empty")]
    pub flags: KubectlFlags,
}

/// Extra arguments passed to kubectl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubectlFlags {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub apply: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<String>,
}

impl KubectlFlags {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.apply.is_empty() && self.delete.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KustomizeDeploy {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kustomize_path: String,
    #[serde(skip_serializing_if = "KubectlFlags::is_empty")]
    pub flags: KubectlFlags,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

// Wire shapes. Variants are sibling keys of their section.

#[derive(Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawTagPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    git_commit: Option<GitTagger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<ShaTagger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_template: Option<EnvTemplateTagger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<DateTimeTagger>,
}

impl RawTagPolicy {
    fn is_empty(&self) -> bool {
        self.git_commit.is_none()
            && self.sha256.is_none()
            && self.env_template.is_none()
            && self.date_time.is_none()
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawBuildConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    artifacts: Vec<Artifact>,
    #[serde(skip_serializing_if = "RawTagPolicy::is_empty")]
    tag_policy: RawTagPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<LocalBuild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_cloud_build: Option<GoogleCloudBuild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kaniko: Option<KanikoBuild>,
}

impl TryFrom<RawBuildConfig> for BuildConfig {
    type Error = String;

    fn try_from(raw: RawBuildConfig) -> Result<Self, Self::Error> {
        let policy = raw.tag_policy;
        let tag_policy = exclusive(
            "build.tagPolicy",
            [
                ("gitCommit", policy.git_commit.map(TagPolicy::GitCommit)),
                ("sha256", policy.sha256.map(TagPolicy::Sha256)),
                ("envTemplate", policy.env_template.map(TagPolicy::EnvTemplate)),
                ("dateTime", policy.date_time.map(TagPolicy::DateTime)),
            ],
        )?;
        let build_type = exclusive(
            "build",
            [
                ("local", raw.local.map(BuildType::Local)),
                (
                    "googleCloudBuild",
                    raw.google_cloud_build.map(BuildType::GoogleCloudBuild),
                ),
                ("kaniko", raw.kaniko.map(BuildType::Kaniko)),
            ],
        )?;

        Ok(Self {
            artifacts: raw.artifacts,
            tag_policy,
            build_type,
        })
    }
}

impl From<BuildConfig> for RawBuildConfig {
    fn from(build: BuildConfig) -> Self {
        let mut raw = RawBuildConfig {
            artifacts: build.artifacts,
            ..Default::default()
        };
        match build.tag_policy {
            Some(TagPolicy::GitCommit(tagger)) => raw.tag_policy.git_commit = Some(tagger),
            Some(TagPolicy::Sha256(tagger)) => raw.tag_policy.sha256 = Some(tagger),
            Some(TagPolicy::EnvTemplate(tagger)) => raw.tag_policy.env_template = Some(tagger),
            Some(TagPolicy::DateTime(tagger)) => raw.tag_policy.date_time = Some(tagger),
            None => {}
        }
        match build.build_type {
            Some(BuildType::Local(local)) => raw.local = Some(local),
            Some(BuildType::GoogleCloudBuild(gcb)) => raw.google_cloud_build = Some(gcb),
            Some(BuildType::Kaniko(kaniko)) => raw.kaniko = Some(kaniko),
            None => {}
        }
        raw
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawArtifact {
    image_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    workspace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    docker: Option<DockerArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bazel: Option<BazelArtifact>,
}

impl TryFrom<RawArtifact> for Artifact {
    type Error = String;

    fn try_from(raw: RawArtifact) -> Result<Self, Self::Error> {
        let artifact_type = exclusive(
            "artifact",
            [
                ("docker", raw.docker.map(ArtifactType::Docker)),
                ("bazel", raw.bazel.map(ArtifactType::Bazel)),
            ],
        )?;

        Ok(Self {
            image_name: raw.image_name,
            workspace: raw.workspace,
            artifact_type,
        })
    }
}

impl From<Artifact> for RawArtifact {
    fn from(artifact: Artifact) -> Self {
        let mut raw = RawArtifact {
            image_name: artifact.image_name,
            workspace: artifact.workspace,
            ..Default::default()
        };
        match artifact.artifact_type {
            Some(ArtifactType::Docker(docker)) => raw.docker = Some(docker),
            Some(ArtifactType::Bazel(bazel)) => raw.bazel = Some(bazel),
            None => {}
        }
        raw
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDeployConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    helm: Option<HelmDeploy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kubectl: Option<KubectlDeploy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kustomize: Option<KustomizeDeploy>,
}

impl TryFrom<RawDeployConfig> for DeployConfig {
    type Error = String;

    fn try_from(raw: RawDeployConfig) -> Result<Self, Self::Error> {
        let deploy_type = exclusive(
            "deploy",
            [
                ("helm", raw.helm.map(DeployType::Helm)),
                ("kubectl", raw.kubectl.map(DeployType::Kubectl)),
                ("kustomize", raw.kustomize.map(DeployType::Kustomize)),
            ],
        )?;

        Ok(Self { deploy_type })
    }
}

impl From<DeployConfig> for RawDeployConfig {
    fn from(deploy: DeployConfig) -> Self {
        let mut raw = RawDeployConfig::default();
        match deploy.deploy_type {
            Some(DeployType::Helm(helm)) => raw.helm = Some(helm),
            Some(DeployType::Kubectl(kubectl)) => raw.kubectl = Some(kubectl),
            Some(DeployType::Kustomize(kustomize)) => raw.kustomize = Some(kustomize),
            None => {}
        }
        raw
    }
}
