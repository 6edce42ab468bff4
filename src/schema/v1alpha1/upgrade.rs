//! Upgrade from `skaffold/v1alpha1` to `skaffold/v1alpha2`.
//!
//! Every old field is destructured so that a field added to either schema
//! cannot be forgotten here. Fields without a counterpart are bound to `_`
//! with a note.

use super::types::*;
use crate::schema::v1alpha2 as next;

/// Tag policy names understood by v1alpha1.
const TAG_POLICY_SHA256: &str = "sha256";
const TAG_POLICY_GIT_COMMIT: &str = "gitCommit";

/// Map a v1alpha1 config to the equivalent v1alpha2 config.
pub fn upgrade(config: Config) -> next::Config {
    let Config {
        api_version: _,
        kind,
        build,
        deploy,
    } = config;

    next::Config {
        api_version: next::VERSION.to_string(),
        kind,
        build: upgrade_build(build),
        deploy: upgrade_deploy(deploy),
        profiles: Vec::new(),
    }
}

fn upgrade_build(build: BuildConfig) -> next::BuildConfig {
    let BuildConfig {
        artifacts,
        tag_policy,
        build_type,
    } = build;

    next::BuildConfig {
        artifacts: artifacts.into_iter().map(upgrade_artifact).collect(),
        tag_policy: upgrade_tag_policy(&tag_policy),
        build_type: build_type.map(upgrade_build_type),
    }
}

/// Unrecognized policy names have no typed counterpart and are dropped.
fn upgrade_tag_policy(tag_policy: &str) -> Option<next::TagPolicy> {
    match tag_policy {
        TAG_POLICY_SHA256 => Some(next::TagPolicy::Sha256(next::ShaTagger {})),
        TAG_POLICY_GIT_COMMIT => Some(next::TagPolicy::GitCommit(next::GitTagger {})),
        _ => None,
    }
}

/// Docker was the only artifact type, so it becomes the explicit variant.
fn upgrade_artifact(artifact: Artifact) -> next::Artifact {
    let Artifact {
        image_name,
        dockerfile_path,
        workspace,
        build_args,
    } = artifact;

    next::Artifact {
        image_name,
        workspace,
        artifact_type: Some(next::ArtifactType::Docker(next::DockerArtifact {
            dockerfile_path,
            build_args,
        })),
    }
}

fn upgrade_build_type(build_type: BuildType) -> next::BuildType {
    match build_type {
        BuildType::Local(LocalBuild { skip_push }) => {
            next::BuildType::Local(next::LocalBuild { skip_push })
        }
        BuildType::GoogleCloudBuild(GoogleCloudBuild { project_id }) => {
            next::BuildType::GoogleCloudBuild(next::GoogleCloudBuild {
                project_id,
                ..Default::default()
            })
        }
    }
}

fn upgrade_deploy(deploy: DeployConfig) -> next::DeployConfig {
    let DeployConfig {
        // removed in v1alpha2
        name: _,
        deploy_type,
    } = deploy;

    next::DeployConfig {
        deploy_type: deploy_type.map(upgrade_deploy_type),
    }
}

fn upgrade_deploy_type(deploy_type: DeployType) -> next::DeployType {
    match deploy_type {
        DeployType::Helm(HelmDeploy { releases }) => next::DeployType::Helm(next::HelmDeploy {
            releases: releases.into_iter().map(upgrade_helm_release).collect(),
        }),
        DeployType::Kubectl(KubectlDeploy { manifests }) => {
            next::DeployType::Kubectl(next::KubectlDeploy {
                manifests: flatten_manifests(manifests),
                ..Default::default()
            })
        }
    }
}

fn upgrade_helm_release(release: HelmRelease) -> next::HelmRelease {
    let HelmRelease {
        name,
        chart_path,
        values_file_path,
        values,
        namespace,
        version,
    } = release;

    next::HelmRelease {
        name,
        chart_path,
        values_file_path,
        values,
        namespace,
        version,
        ..Default::default()
    }
}

/// Manifest groups collapse into one ordered path list.
fn flatten_manifests(manifests: Vec<Manifest>) -> Vec<String> {
    manifests
        .into_iter()
        .flat_map(|manifest| {
            let Manifest {
                paths,
                // template parameters were removed in v1alpha2
                parameters: _,
            } = manifest;
            paths
        })
        .collect()
}
