//! Tests for the v1alpha2 schema and its upgrade to v1alpha3.

use super::*;
use crate::error::SchemaError;
use crate::schema::v1alpha3 as next;
use crate::test_support::{V1ALPHA2_HELM, V1ALPHA2_KANIKO_WITH_PROFILE};
use pretty_assertions::assert_eq;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn header() -> Config {
    Config {
        api_version: VERSION.to_string(),
        kind: "Config".to_string(),
        ..Default::default()
    }
}

fn kubectl(manifests: &[&str]) -> next::DeployConfig {
    next::DeployConfig {
        deploy_type: Some(next::DeployType::Kubectl(next::KubectlDeploy {
            manifests: manifests.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        })),
    }
}

fn example_artifact() -> next::Artifact {
    next::Artifact {
        image_name: "gcr.io/k8s-skaffold/skaffold-example".to_string(),
        workspace: String::new(),
        artifact_type: None,
    }
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_kaniko_with_profile() {
    let config = decode(V1ALPHA2_KANIKO_WITH_PROFILE.as_bytes()).unwrap();

    assert_eq!(
        config.build.build_type,
        Some(BuildType::Kaniko(KanikoBuild {
            gcs_bucket: "k8s-skaffold".to_string(),
            pull_secret: "/a/secret/path/kaniko.json".to_string(),
            ..Default::default()
        }))
    );
    assert_eq!(config.profiles.len(), 1);
    assert_eq!(config.profiles[0].name, "test profile");
    assert_eq!(config.profiles[0].build.build_type, None);
}

#[test]
fn test_decode_tag_policy_variants() {
    let yaml = r#"apiVersion: skaffold/v1alpha2
kind: Config
build:
  tagPolicy:
    dateTime:
      format: "2006-01-02"
      timezone: UTC
"#;
    let config = decode(yaml.as_bytes()).unwrap();
    assert_eq!(
        config.build.tag_policy,
        Some(TagPolicy::DateTime(DateTimeTagger {
            format: "2006-01-02".to_string(),
            timezone: "UTC".to_string(),
        }))
    );
}

#[test]
fn test_decode_rejects_two_tag_policies() {
    let yaml = r#"apiVersion: skaffold/v1alpha2
kind: Config
build:
  tagPolicy:
    gitCommit: {}
    sha256: {}
"#;
    let err = decode(yaml.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("build.tagPolicy"));
}

#[test]
fn test_decode_rejects_two_deployers() {
    let yaml = r#"apiVersion: skaffold/v1alpha2
kind: Config
deploy:
  kubectl: {}
  kustomize: {}
"#;
    let err = decode(yaml.as_bytes()).unwrap_err();
    assert!(matches!(err, SchemaError::Decode { .. }));
}

#[test]
fn test_decode_rejects_two_artifact_types() {
    let yaml = r#"apiVersion: skaffold/v1alpha2
kind: Config
build:
  artifacts:
  - imageName: app
    docker: {}
    bazel:
      target: //:app.tar
"#;
    assert!(decode(yaml.as_bytes()).is_err());
}

#[test]
fn test_decode_rejects_other_version_header() {
    let yaml = "apiVersion: skaffold/v1alpha3\nkind: Config\n";
    let err = decode(yaml.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("skaffold/v1alpha3"));
}

// ============================================================================
// Upgrade
// ============================================================================

#[test]
fn test_upgrade_helm_values_file_becomes_list() {
    let upgraded = upgrade(decode(V1ALPHA2_HELM.as_bytes()).unwrap());

    let expected = next::Config {
        api_version: next::VERSION.to_string(),
        kind: "Config".to_string(),
        deploy: next::DeployConfig {
            deploy_type: Some(next::DeployType::Helm(next::HelmDeploy {
                releases: vec![next::HelmRelease {
                    name: "test release".to_string(),
                    values_files: vec!["values.yaml".to_string()],
                    ..Default::default()
                }],
            })),
        },
        ..Default::default()
    };

    assert_eq!(upgraded, expected);
}

#[test]
fn test_upgrade_helm_without_values_file_has_empty_list() {
    let mut config = header();
    config.deploy.deploy_type = Some(DeployType::Helm(HelmDeploy {
        releases: vec![HelmRelease {
            name: "bare".to_string(),
            ..Default::default()
        }],
    }));

    match upgrade(config).deploy.deploy_type {
        Some(next::DeployType::Helm(helm)) => assert!(helm.releases[0].values_files.is_empty()),
        other => panic!("expected helm deploy, got {:?}", other),
    }
}

#[test]
fn test_upgrade_kaniko_with_profile() {
    let upgraded = upgrade(decode(V1ALPHA2_KANIKO_WITH_PROFILE.as_bytes()).unwrap());

    let expected = next::Config {
        api_version: next::VERSION.to_string(),
        kind: "Config".to_string(),
        build: next::BuildConfig {
            artifacts: vec![example_artifact()],
            tag_policy: None,
            build_type: Some(next::BuildType::Kaniko(next::KanikoBuild {
                build_context: next::KanikoBuildContext {
                    gcs_bucket: "k8s-skaffold".to_string(),
                },
                pull_secret: "/a/secret/path/kaniko.json".to_string(),
                ..Default::default()
            })),
        },
        deploy: kubectl(&["k8s-*"]),
        profiles: vec![next::Profile {
            name: "test profile".to_string(),
            build: next::BuildConfig {
                artifacts: vec![example_artifact()],
                tag_policy: None,
                build_type: None,
            },
            deploy: kubectl(&["k8s-*"]),
        }],
    };

    assert_eq!(upgraded, expected);
}

#[test]
fn test_upgrade_kaniko_keeps_every_field() {
    let mut config = header();
    config.build.build_type = Some(BuildType::Kaniko(KanikoBuild {
        gcs_bucket: "bucket".to_string(),
        pull_secret: "/secret.json".to_string(),
        pull_secret_name: "my-secret".to_string(),
        namespace: "builds".to_string(),
        timeout: "5m".to_string(),
    }));

    assert_eq!(
        upgrade(config).build.build_type,
        Some(next::BuildType::Kaniko(next::KanikoBuild {
            build_context: next::KanikoBuildContext {
                gcs_bucket: "bucket".to_string(),
            },
            pull_secret: "/secret.json".to_string(),
            pull_secret_name: "my-secret".to_string(),
            namespace: "builds".to_string(),
            timeout: "5m".to_string(),
        }))
    );
}

#[test]
fn test_upgrade_profile_kaniko_and_helm_are_mapped() {
    let mut config = header();
    config.profiles = vec![Profile {
        name: "gcb".to_string(),
        build: BuildConfig {
            build_type: Some(BuildType::Kaniko(KanikoBuild {
                gcs_bucket: "profile-bucket".to_string(),
                ..Default::default()
            })),
            ..Default::default()
        },
        deploy: DeployConfig {
            deploy_type: Some(DeployType::Helm(HelmDeploy {
                releases: vec![HelmRelease {
                    name: "r".to_string(),
                    values_file_path: "profile-values.yaml".to_string(),
                    ..Default::default()
                }],
            })),
        },
    }];

    let profile = upgrade(config).profiles.remove(0);
    match profile.build.build_type {
        Some(next::BuildType::Kaniko(kaniko)) => {
            assert_eq!(kaniko.build_context.gcs_bucket, "profile-bucket")
        }
        other => panic!("expected kaniko build, got {:?}", other),
    }
    match profile.deploy.deploy_type {
        Some(next::DeployType::Helm(helm)) => {
            assert_eq!(helm.releases[0].values_files, vec!["profile-values.yaml"])
        }
        other => panic!("expected helm deploy, got {:?}", other),
    }
}

#[test]
fn test_upgrade_profile_matches_standalone_document() {
    let config = decode(V1ALPHA2_KANIKO_WITH_PROFILE.as_bytes()).unwrap();
    let profile = config.profiles[0].clone();

    let standalone = upgrade(Config {
        build: profile.build.clone(),
        deploy: profile.deploy.clone(),
        ..header()
    });
    let upgraded = upgrade(config);

    assert_eq!(upgraded.profiles[0].build, standalone.build);
    assert_eq!(upgraded.profiles[0].deploy, standalone.deploy);
}

#[test]
fn test_upgrade_copies_kustomize_and_flags() {
    let flags = KubectlFlags {
        global: vec!["--context=dev".to_string()],
        apply: vec!["--force".to_string()],
        delete: vec![],
    };
    let mut config = header();
    config.deploy.deploy_type = Some(DeployType::Kustomize(KustomizeDeploy {
        kustomize_path: "overlays/dev".to_string(),
        flags,
    }));

    assert_eq!(
        upgrade(config).deploy.deploy_type,
        Some(next::DeployType::Kustomize(next::KustomizeDeploy {
            kustomize_path: "overlays/dev".to_string(),
            flags: next::KubectlFlags {
                global: vec!["--context=dev".to_string()],
                apply: vec!["--force".to_string()],
                delete: vec![],
            },
        }))
    );
}

#[test]
fn test_upgrade_helm_release_keeps_overrides() {
    let overrides: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str("replicas: 3\nimage:\n  pullPolicy: Always\n").unwrap();
    let mut config = header();
    config.deploy.deploy_type = Some(DeployType::Helm(HelmDeploy {
        releases: vec![HelmRelease {
            name: "app".to_string(),
            set_values: BTreeMap::from([("a".to_string(), "b".to_string())]),
            wait: true,
            overrides: overrides.clone(),
            ..Default::default()
        }],
    }));

    match upgrade(config).deploy.deploy_type {
        Some(next::DeployType::Helm(helm)) => {
            let release = &helm.releases[0];
            assert_eq!(release.overrides, overrides);
            assert_eq!(release.set_values["a"], "b");
            assert!(release.wait);
        }
        other => panic!("expected helm deploy, got {:?}", other),
    }
}

#[test]
fn test_upgrade_copies_payload_fields() {
    let yaml = r#"apiVersion: skaffold/v1alpha2
kind: Config
build:
  tagPolicy:
    envTemplate:
      template: "{{.IMAGE_NAME}}:{{.DIGEST}}"
  artifacts:
  - imageName: gcr.io/app
    workspace: svc
    bazel:
      target: //:app.tar
  googleCloudBuild:
    projectId: p
    diskSizeGb: 200
    machineType: N1_HIGHCPU_8
    timeout: 10m
profiles:
- name: remote
  build:
    tagPolicy:
      dateTime:
        format: "2006-01-02"
        timezone: UTC
  deploy:
    kubectl:
      remoteManifests:
      - deployment/web
"#;
    let upgraded = upgrade(decode(yaml.as_bytes()).unwrap());

    assert_eq!(
        upgraded.build,
        next::BuildConfig {
            artifacts: vec![next::Artifact {
                image_name: "gcr.io/app".to_string(),
                workspace: "svc".to_string(),
                artifact_type: Some(next::ArtifactType::Bazel(next::BazelArtifact {
                    target: "//:app.tar".to_string(),
                })),
            }],
            tag_policy: Some(next::TagPolicy::EnvTemplate(next::EnvTemplateTagger {
                template: "{{.IMAGE_NAME}}:{{.DIGEST}}".to_string(),
            })),
            build_type: Some(next::BuildType::GoogleCloudBuild(next::GoogleCloudBuild {
                project_id: "p".to_string(),
                disk_size_gb: 200,
                machine_type: "N1_HIGHCPU_8".to_string(),
                timeout: "10m".to_string(),
            })),
        }
    );
    assert_eq!(
        upgraded.profiles[0].build.tag_policy,
        Some(next::TagPolicy::DateTime(next::DateTimeTagger {
            format: "2006-01-02".to_string(),
            timezone: "UTC".to_string(),
        }))
    );
    assert_eq!(
        upgraded.profiles[0].deploy,
        next::DeployConfig {
            deploy_type: Some(next::DeployType::Kubectl(next::KubectlDeploy {
                remote_manifests: vec!["deployment/web".to_string()],
                ..Default::default()
            })),
        }
    );
}

#[test]
fn test_upgrade_helm_release_keeps_chart_fields() {
    let mut config = header();
    config.deploy.deploy_type = Some(DeployType::Helm(HelmDeploy {
        releases: vec![HelmRelease {
            name: "app".to_string(),
            chart_path: "charts/app".to_string(),
            namespace: "staging".to_string(),
            version: "1.2.3".to_string(),
            values: BTreeMap::from([("image".to_string(), "gcr.io/app".to_string())]),
            ..Default::default()
        }],
    }));

    assert_eq!(
        upgrade(config).deploy,
        next::DeployConfig {
            deploy_type: Some(next::DeployType::Helm(next::HelmDeploy {
                releases: vec![next::HelmRelease {
                    name: "app".to_string(),
                    chart_path: "charts/app".to_string(),
                    namespace: "staging".to_string(),
                    version: "1.2.3".to_string(),
                    values: BTreeMap::from([("image".to_string(), "gcr.io/app".to_string())]),
                    ..Default::default()
                }],
            })),
        }
    );
}

// ============================================================================
// Properties over every variant combination
// ============================================================================

fn text() -> impl Strategy<Value = String> {
    "[a-z0-9./*-]{0,8}"
}

fn tag_policy() -> impl Strategy<Value = Option<TagPolicy>> {
    prop_oneof![
        Just(None),
        Just(Some(TagPolicy::GitCommit(GitTagger {}))),
        Just(Some(TagPolicy::Sha256(ShaTagger {}))),
        text().prop_map(|template| Some(TagPolicy::EnvTemplate(EnvTemplateTagger { template }))),
        (text(), text()).prop_map(|(format, timezone)| {
            Some(TagPolicy::DateTime(DateTimeTagger { format, timezone }))
        }),
    ]
}

fn artifact() -> impl Strategy<Value = Artifact> {
    let artifact_type = prop_oneof![
        Just(None),
        (text(), btree_map(text(), text(), 0..3)).prop_map(|(dockerfile_path, build_args)| {
            Some(ArtifactType::Docker(DockerArtifact {
                dockerfile_path,
                build_args,
            }))
        }),
        text().prop_map(|target| Some(ArtifactType::Bazel(BazelArtifact { target }))),
    ];
    (text(), text(), artifact_type).prop_map(|(image_name, workspace, artifact_type)| Artifact {
        image_name,
        workspace,
        artifact_type,
    })
}

fn build_type() -> impl Strategy<Value = Option<BuildType>> {
    prop_oneof![
        Just(None),
        proptest::option::of(any::<bool>())
            .prop_map(|skip_push| Some(BuildType::Local(LocalBuild { skip_push }))),
        (text(), 0i64..500, text(), text()).prop_map(
            |(project_id, disk_size_gb, machine_type, timeout)| {
                Some(BuildType::GoogleCloudBuild(GoogleCloudBuild {
                    project_id,
                    disk_size_gb,
                    machine_type,
                    timeout,
                }))
            }
        ),
        (text(), text(), text(), text(), text()).prop_map(
            |(gcs_bucket, pull_secret, pull_secret_name, namespace, timeout)| {
                Some(BuildType::Kaniko(KanikoBuild {
                    gcs_bucket,
                    pull_secret,
                    pull_secret_name,
                    namespace,
                    timeout,
                }))
            }
        ),
    ]
}

fn build_config() -> impl Strategy<Value = BuildConfig> {
    (vec(artifact(), 0..3), tag_policy(), build_type()).prop_map(
        |(artifacts, tag_policy, build_type)| BuildConfig {
            artifacts,
            tag_policy,
            build_type,
        },
    )
}

fn kubectl_flags() -> impl Strategy<Value = KubectlFlags> {
    (vec(text(), 0..2), vec(text(), 0..2), vec(text(), 0..2)).prop_map(
        |(global, apply, delete)| KubectlFlags {
            global,
            apply,
            delete,
        },
    )
}

fn helm_release() -> impl Strategy<Value = HelmRelease> {
    let maps = (
        btree_map(text(), text(), 0..3),
        btree_map(text(), text(), 0..3),
        btree_map(text(), text(), 0..2),
    );
    (text(), text(), text(), text(), text(), any::<bool>(), maps).prop_map(
        |(name, chart_path, values_file_path, namespace, version, wait, maps)| {
            let (values, set_values, overrides) = maps;
            HelmRelease {
                name,
                chart_path,
                values_file_path,
                values,
                namespace,
                version,
                set_values,
                wait,
                overrides: overrides
                    .into_iter()
                    .map(|(key, value)| (key, serde_yaml::Value::String(value)))
                    .collect(),
            }
        },
    )
}

fn deploy_config() -> impl Strategy<Value = DeployConfig> {
    let deploy_type = prop_oneof![
        Just(None),
        vec(helm_release(), 0..3)
            .prop_map(|releases| Some(DeployType::Helm(HelmDeploy { releases }))),
        (vec(text(), 0..3), vec(text(), 0..2), kubectl_flags()).prop_map(
            |(manifests, remote_manifests, flags)| {
                Some(DeployType::Kubectl(KubectlDeploy {
                    manifests,
                    remote_manifests,
                    flags,
                }))
            }
        ),
        (text(), kubectl_flags()).prop_map(|(kustomize_path, flags)| {
            Some(DeployType::Kustomize(KustomizeDeploy {
                kustomize_path,
                flags,
            }))
        }),
    ];
    deploy_type.prop_map(|deploy_type| DeployConfig { deploy_type })
}

fn profile() -> impl Strategy<Value = Profile> {
    (text(), build_config(), deploy_config()).prop_map(|(name, build, deploy)| Profile {
        name,
        build,
        deploy,
    })
}

fn config() -> impl Strategy<Value = Config> {
    (build_config(), deploy_config(), vec(profile(), 0..4)).prop_map(
        |(build, deploy, profiles)| Config {
            build,
            deploy,
            profiles,
            ..header()
        },
    )
}

// The expected next-version sections are spelled out field by field from the
// v1alpha3 field table, without going through the mapper.

fn expected_tag_policy(tag_policy: &TagPolicy) -> next::TagPolicy {
    match tag_policy {
        TagPolicy::GitCommit(_) => next::TagPolicy::GitCommit(next::GitTagger {}),
        TagPolicy::Sha256(_) => next::TagPolicy::Sha256(next::ShaTagger {}),
        TagPolicy::EnvTemplate(tagger) => next::TagPolicy::EnvTemplate(next::EnvTemplateTagger {
            template: tagger.template.clone(),
        }),
        TagPolicy::DateTime(tagger) => next::TagPolicy::DateTime(next::DateTimeTagger {
            format: tagger.format.clone(),
            timezone: tagger.timezone.clone(),
        }),
    }
}

fn expected_artifact(artifact: &Artifact) -> next::Artifact {
    next::Artifact {
        image_name: artifact.image_name.clone(),
        workspace: artifact.workspace.clone(),
        artifact_type: artifact.artifact_type.as_ref().map(|artifact_type| match artifact_type {
            ArtifactType::Docker(docker) => next::ArtifactType::Docker(next::DockerArtifact {
                dockerfile_path: docker.dockerfile_path.clone(),
                build_args: docker.build_args.clone(),
            }),
            ArtifactType::Bazel(bazel) => next::ArtifactType::Bazel(next::BazelArtifact {
                target: bazel.target.clone(),
            }),
        }),
    }
}

fn expected_build_type(build_type: &BuildType) -> next::BuildType {
    match build_type {
        BuildType::Local(local) => next::BuildType::Local(next::LocalBuild {
            skip_push: local.skip_push,
        }),
        BuildType::GoogleCloudBuild(gcb) => {
            next::BuildType::GoogleCloudBuild(next::GoogleCloudBuild {
                project_id: gcb.project_id.clone(),
                disk_size_gb: gcb.disk_size_gb,
                machine_type: gcb.machine_type.clone(),
                timeout: gcb.timeout.clone(),
            })
        }
        BuildType::Kaniko(kaniko) => next::BuildType::Kaniko(next::KanikoBuild {
            build_context: next::KanikoBuildContext {
                gcs_bucket: kaniko.gcs_bucket.clone(),
            },
            pull_secret: kaniko.pull_secret.clone(),
            pull_secret_name: kaniko.pull_secret_name.clone(),
            namespace: kaniko.namespace.clone(),
            timeout: kaniko.timeout.clone(),
        }),
    }
}

fn expected_build(build: &BuildConfig) -> next::BuildConfig {
    next::BuildConfig {
        artifacts: build.artifacts.iter().map(expected_artifact).collect(),
        tag_policy: build.tag_policy.as_ref().map(expected_tag_policy),
        build_type: build.build_type.as_ref().map(expected_build_type),
    }
}

fn expected_flags(flags: &KubectlFlags) -> next::KubectlFlags {
    next::KubectlFlags {
        global: flags.global.clone(),
        apply: flags.apply.clone(),
        delete: flags.delete.clone(),
    }
}

fn expected_helm_release(release: &HelmRelease) -> next::HelmRelease {
    let values_files = if release.values_file_path.is_empty() {
        vec![]
    } else {
        vec![release.values_file_path.clone()]
    };
    next::HelmRelease {
        name: release.name.clone(),
        chart_path: release.chart_path.clone(),
        values_files,
        values: release.values.clone(),
        namespace: release.namespace.clone(),
        version: release.version.clone(),
        set_values: release.set_values.clone(),
        wait: release.wait,
        overrides: release.overrides.clone(),
    }
}

fn expected_deploy(deploy: &DeployConfig) -> next::DeployConfig {
    let deploy_type = deploy.deploy_type.as_ref().map(|deploy_type| match deploy_type {
        DeployType::Helm(helm) => next::DeployType::Helm(next::HelmDeploy {
            releases: helm.releases.iter().map(expected_helm_release).collect(),
        }),
        DeployType::Kubectl(kubectl) => next::DeployType::Kubectl(next::KubectlDeploy {
            manifests: kubectl.manifests.clone(),
            remote_manifests: kubectl.remote_manifests.clone(),
            flags: expected_flags(&kubectl.flags),
        }),
        DeployType::Kustomize(kustomize) => next::DeployType::Kustomize(next::KustomizeDeploy {
            kustomize_path: kustomize.kustomize_path.clone(),
            flags: expected_flags(&kustomize.flags),
        }),
    });
    next::DeployConfig { deploy_type }
}

proptest! {
    #[test]
    fn prop_upgrade_is_total_and_tags_next_version(config in config()) {
        let upgraded = upgrade(config.clone());

        prop_assert_eq!(upgraded.api_version.as_str(), next::VERSION);
        prop_assert_eq!(upgraded.kind, config.kind);
    }

    #[test]
    fn prop_upgrade_preserves_every_field(config in config()) {
        let upgraded = upgrade(config.clone());

        prop_assert_eq!(upgraded.build, expected_build(&config.build));
        prop_assert_eq!(upgraded.deploy, expected_deploy(&config.deploy));
    }

    #[test]
    fn prop_profiles_upgrade_like_top_level(config in config()) {
        let upgraded = upgrade(config.clone());

        prop_assert_eq!(upgraded.profiles.len(), config.profiles.len());
        for (old, new) in config.profiles.iter().zip(&upgraded.profiles) {
            let standalone = upgrade(Config {
                build: old.build.clone(),
                deploy: old.deploy.clone(),
                ..header()
            });

            prop_assert_eq!(&new.name, &old.name);
            prop_assert_eq!(&new.build, &standalone.build);
            prop_assert_eq!(&new.deploy, &standalone.deploy);
            prop_assert_eq!(&new.build, &expected_build(&old.build));
            prop_assert_eq!(&new.deploy, &expected_deploy(&old.deploy));
        }
    }

    #[test]
    fn prop_upgrade_is_deterministic(config in config()) {
        prop_assert_eq!(upgrade(config.clone()), upgrade(config));
    }
}
