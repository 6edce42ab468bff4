//! Document types for `skaffold/v1alpha2`.
//!
//! This version introduces profiles, typed tag policies, typed artifacts, the
//! kaniko builder and the kustomize deployer.

use crate::schema::variant::exclusive;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A `skaffold/v1alpha2` pipeline config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct Config {
    pub api_version: String,
    pub kind: String,
    pub build: BuildConfig,
    pub deploy: DeployConfig,
    pub profiles: Vec<Profile>,
}

/// A named override of the build and deploy sections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub build: BuildConfig,
    pub deploy: DeployConfig,
}

/// The build section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawBuildConfig")]
pub struct BuildConfig {
    pub artifacts: Vec<Artifact>,
    pub tag_policy: Option<TagPolicy>,
    pub build_type: Option<BuildType>,
}

/// How built images are tagged.
#[derive(Debug, Clone, PartialEq)]
pub enum TagPolicy {
    GitCommit(GitTagger),
    Sha256(ShaTagger),
    EnvTemplate(EnvTemplateTagger),
    DateTime(DateTimeTagger),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitTagger {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShaTagger {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvTemplateTagger {
    pub template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateTimeTagger {
    pub format: String,
    pub timezone: String,
}

/// Where images are built.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildType {
    Local(LocalBuild),
    GoogleCloudBuild(GoogleCloudBuild),
    Kaniko(KanikoBuild),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalBuild {
    pub skip_push: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GoogleCloudBuild {
    pub project_id: String,
    pub disk_size_gb: i64,
    pub machine_type: String,
    pub timeout: String,
}

/// In-cluster builds with kaniko, reading the context from a GCS bucket.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KanikoBuild {
    pub gcs_bucket: String,
    pub pull_secret: String,
    pub pull_secret_name: String,
    pub namespace: String,
    pub timeout: String,
}

/// An image to build.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawArtifact")]
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DockerArtifact {
    pub dockerfile_path: String,
    pub build_args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BazelArtifact {
    pub target: String,
}

/// The deploy section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawDeployConfig")]
pub struct DeployConfig {
    pub deploy_type: Option<DeployType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeployType {
    Helm(HelmDeploy),
    Kubectl(KubectlDeploy),
    Kustomize(KustomizeDeploy),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelmDeploy {
    pub releases: Vec<HelmRelease>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HelmRelease {
    pub name: String,
    pub chart_path: String,
    pub values_file_path: String,
    pub values: BTreeMap<String, String>,
    pub namespace: String,
    pub version: String,
    pub set_values: BTreeMap<String, String>,
    pub wait: bool,
    pub overrides: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KubectlDeploy {
    pub manifests: Vec<String>,
    pub remote_manifests: Vec<String>,
    pub flags: KubectlFlags,
}

/// Extra arguments passed to kubectl.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubectlFlags {
    pub global: Vec<String>,
    pub apply: Vec<String>,
    pub delete: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct KustomizeDeploy {
    pub kustomize_path: String,
    pub flags: KubectlFlags,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawTagPolicy {
    git_commit: Option<GitTagger>,
    sha256: Option<ShaTagger>,
    env_template: Option<EnvTemplateTagger>,
    date_time: Option<DateTimeTagger>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawBuildConfig {
    artifacts: Vec<Artifact>,
    tag_policy: RawTagPolicy,
    local: Option<LocalBuild>,
    google_cloud_build: Option<GoogleCloudBuild>,
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

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawArtifact {
    image_name: String,
    workspace: String,
    docker: Option<DockerArtifact>,
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

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDeployConfig {
    helm: Option<HelmDeploy>,
    kubectl: Option<KubectlDeploy>,
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
