//! Upgrade from `skaffold/v1alpha2` to `skaffold/v1alpha3`.
//!
//! Two fields change shape in this hop:
//! - `helm.releases[].valuesFilePath` becomes the one-element list `valuesFiles`
//! - `kaniko.gcsBucket` moves under `kaniko.buildContext.gcsBucket`
//!
//! Everything else is copied variant by variant. Profiles go through the same
//! build and deploy functions as the top-level sections.

use super::types::*;
use crate::schema::v1alpha3 as next;

/// Map a v1alpha2 config to the equivalent v1alpha3 config.
pub fn upgrade(config: Config) -> next::Config {
    let Config {
        api_version: _,
        kind,
        build,
        deploy,
        profiles,
    } = config;

    next::Config {
        api_version: next::VERSION.to_string(),
        kind,
        build: upgrade_build(build),
        deploy: upgrade_deploy(deploy),
        profiles: profiles.into_iter().map(upgrade_profile).collect(),
    }
}

fn upgrade_profile(profile: Profile) -> next::Profile {
    let Profile {
        name,
        build,
        deploy,
    } = profile;

    next::Profile {
        name,
        build: upgrade_build(build),
        deploy: upgrade_deploy(deploy),
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
        tag_policy: tag_policy.map(upgrade_tag_policy),
        build_type: build_type.map(upgrade_build_type),
    }
}

fn upgrade_tag_policy(tag_policy: TagPolicy) -> next::TagPolicy {
    match tag_policy {
        TagPolicy::GitCommit(GitTagger {}) => next::TagPolicy::GitCommit(next::GitTagger {}),
        TagPolicy::Sha256(ShaTagger {}) => next::TagPolicy::Sha256(next::ShaTagger {}),
        TagPolicy::EnvTemplate(EnvTemplateTagger { template }) => {
            next::TagPolicy::EnvTemplate(next::EnvTemplateTagger { template })
        }
        TagPolicy::DateTime(DateTimeTagger { format, timezone }) => {
            next::TagPolicy::DateTime(next::DateTimeTagger { format, timezone })
        }
    }
}

fn upgrade_artifact(artifact: Artifact) -> next::Artifact {
    let Artifact {
        image_name,
        workspace,
        artifact_type,
    } = artifact;

    let artifact_type = artifact_type.map(|artifact_type| match artifact_type {
        ArtifactType::Docker(DockerArtifact {
            dockerfile_path,
            build_args,
        }) => next::ArtifactType::Docker(next::DockerArtifact {
            dockerfile_path,
            build_args,
        }),
        ArtifactType::Bazel(BazelArtifact { target }) => {
            next::ArtifactType::Bazel(next::BazelArtifact { target })
        }
    });

    next::Artifact {
        image_name,
        workspace,
        artifact_type,
    }
}

fn upgrade_build_type(build_type: BuildType) -> next::BuildType {
    match build_type {
        BuildType::Local(LocalBuild { skip_push }) => {
            next::BuildType::Local(next::LocalBuild { skip_push })
        }
        BuildType::GoogleCloudBuild(GoogleCloudBuild {
            project_id,
            disk_size_gb,
            machine_type,
            timeout,
        }) => next::BuildType::GoogleCloudBuild(next::GoogleCloudBuild {
            project_id,
            disk_size_gb,
            machine_type,
            timeout,
        }),
        BuildType::Kaniko(kaniko) => next::BuildType::Kaniko(upgrade_kaniko(kaniko)),
    }
}

fn upgrade_kaniko(kaniko: KanikoBuild) -> next::KanikoBuild {
    let KanikoBuild {
        gcs_bucket,
        pull_secret,
        pull_secret_name,
        namespace,
        timeout,
    } = kaniko;

    next::KanikoBuild {
        build_context: next::KanikoBuildContext { gcs_bucket },
        pull_secret,
        pull_secret_name,
        namespace,
        timeout,
    }
}

fn upgrade_deploy(deploy: DeployConfig) -> next::DeployConfig {
    let DeployConfig { deploy_type } = deploy;

    let deploy_type = deploy_type.map(|deploy_type| match deploy_type {
        DeployType::Helm(HelmDeploy { releases }) => next::DeployType::Helm(next::HelmDeploy {
            releases: releases.into_iter().map(upgrade_helm_release).collect(),
        }),
        DeployType::Kubectl(KubectlDeploy {
            manifests,
            remote_manifests,
            flags,
        }) => next::DeployType::Kubectl(next::KubectlDeploy {
            manifests,
            remote_manifests,
            flags: upgrade_kubectl_flags(flags),
        }),
        DeployType::Kustomize(KustomizeDeploy {
            kustomize_path,
            flags,
        }) => next::DeployType::Kustomize(next::KustomizeDeploy {
            kustomize_path,
            flags: upgrade_kubectl_flags(flags),
        }),
    });

    next::DeployConfig { deploy_type }
}

fn upgrade_helm_release(release: HelmRelease) -> next::HelmRelease {
    let HelmRelease {
        name,
        chart_path,
        values_file_path,
        values,
        namespace,
        version,
        set_values,
        wait,
        overrides,
    } = release;

    next::HelmRelease {
        name,
        chart_path,
        values_files: promote_to_list(values_file_path),
        values,
        namespace,
        version,
        set_values,
        wait,
        overrides,
    }
}

fn upgrade_kubectl_flags(flags: KubectlFlags) -> next::KubectlFlags {
    let KubectlFlags {
        global,
        apply,
        delete,
    } = flags;

    next::KubectlFlags {
        global,
        apply,
        delete,
    }
}

/// An unset scalar becomes an empty list, a set one a list of exactly itself.
fn promote_to_list(value: String) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value]
    }
}
