//! Default values for the latest schema.
//!
//! Every rule only fills a value that is unset, so applying the defaults
//! twice is the same as applying them once. Profiles are left as written:
//! an unset profile field means "inherit from the top level", and filling it
//! would override the top-level value when the profile is activated.

use super::types::*;

/// Default workspace directory for artifacts.
pub const DEFAULT_WORKSPACE: &str = ".";

/// Default Dockerfile path, relative to the workspace.
pub const DEFAULT_DOCKERFILE_PATH: &str = "Dockerfile";

/// Default name of the secret kaniko pulls credentials from.
pub const DEFAULT_KANIKO_SECRET_NAME: &str = "kaniko-secret";

/// Default namespace kaniko pods run in.
pub const DEFAULT_KANIKO_NAMESPACE: &str = "default";

/// Default timeout of a kaniko build.
pub const DEFAULT_KANIKO_TIMEOUT: &str = "20m";

/// Default kubectl manifest glob.
pub const DEFAULT_KUBECTL_MANIFEST: &str = "k8s/*.yaml";

/// Default directory holding `kustomization.yaml`.
pub const DEFAULT_KUSTOMIZE_PATH: &str = ".";

impl Config {
    /// Fill every unset optional field of the top-level sections.
    pub fn set_default_values(&mut self) {
        set_default_tag_policy(&mut self.build);
        set_default_build_type(&mut self.build);
        for artifact in &mut self.build.artifacts {
            set_default_artifact(artifact);
        }
        if let Some(BuildType::Kaniko(kaniko)) = &mut self.build.build_type {
            set_default_kaniko(kaniko);
        }
        if let Some(deploy_type) = &mut self.deploy.deploy_type {
            set_default_deployer(deploy_type);
        }
    }
}

fn set_default_tag_policy(build: &mut BuildConfig) {
    build
        .tag_policy
        .get_or_insert_with(|| TagPolicy::GitCommit(GitTagger {}));
}

fn set_default_build_type(build: &mut BuildConfig) {
    build
        .build_type
        .get_or_insert_with(|| BuildType::Local(LocalBuild::default()));
}

fn set_default_artifact(artifact: &mut Artifact) {
    set_if_empty(&mut artifact.workspace, DEFAULT_WORKSPACE);

    let artifact_type = artifact
        .artifact_type
        .get_or_insert_with(|| ArtifactType::Docker(DockerArtifact::default()));
    if let ArtifactType::Docker(docker) = artifact_type {
        set_if_empty(&mut docker.dockerfile_path, DEFAULT_DOCKERFILE_PATH);
    }
}

fn set_default_kaniko(kaniko: &mut KanikoBuild) {
    set_if_empty(&mut kaniko.pull_secret_name, DEFAULT_KANIKO_SECRET_NAME);
    set_if_empty(&mut kaniko.namespace, DEFAULT_KANIKO_NAMESPACE);
    set_if_empty(&mut kaniko.timeout, DEFAULT_KANIKO_TIMEOUT);
}

fn set_default_deployer(deploy_type: &mut DeployType) {
    match deploy_type {
        DeployType::Kubectl(kubectl) => {
            if kubectl.manifests.is_empty() {
                kubectl.manifests = vec![DEFAULT_KUBECTL_MANIFEST.to_string()];
            }
        }
        DeployType::Kustomize(kustomize) => {
            set_if_empty(&mut kustomize.kustomize_path, DEFAULT_KUSTOMIZE_PATH);
        }
        DeployType::Helm(_) => {}
    }
}

fn set_if_empty(field: &mut String, default: &str) {
    if field.is_empty() {
        *field = default.to_string();
    }
}
