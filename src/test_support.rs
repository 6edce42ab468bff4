//! Fixture documents shared by the schema and migration tests.

/// A v1alpha1 config touching every field that has a v1alpha2 counterpart.
pub(crate) const V1ALPHA1_FULL: &str = r#"apiVersion: skaffold/v1alpha1
kind: Config
build:
  tagPolicy: sha256
  artifacts:
  - imageName: gcr.io/k8s-skaffold/app
    dockerfilePath: build/Dockerfile
    workspace: app
    buildArgs:
      GO_VERSION: "1.10"
  googleCloudBuild:
    projectId: k8s-skaffold
deploy:
  name: app-deploy
  kubectl:
    manifests:
    - paths:
      - k8s/deployment.yaml
      - k8s/service.yaml
      parameters:
        IMAGE_NAME: gcr.io/k8s-skaffold/app
    - paths:
      - k8s/ingress.yaml
"#;

/// A v1alpha2 helm deploy with a single values file.
pub(crate) const V1ALPHA2_HELM: &str = r#"apiVersion: skaffold/v1alpha2
kind: Config
deploy:
  helm:
    releases:
    - name: test release
      valuesFilePath: values.yaml
"#;

/// A v1alpha2 kaniko build with a profile carrying its own sections.
pub(crate) const V1ALPHA2_KANIKO_WITH_PROFILE: &str = r#"apiVersion: skaffold/v1alpha2
kind: Config
build:
  artifacts:
  - imageName: gcr.io/k8s-skaffold/skaffold-example
  kaniko:
    gcsBucket: k8s-skaffold
    pullSecret: /a/secret/path/kaniko.json
deploy:
  kubectl:
    manifests:
    - k8s-*
profiles:
  - name: test profile
    build:
      artifacts:
      - imageName: gcr.io/k8s-skaffold/skaffold-example
    deploy:
      kubectl:
        manifests:
        - k8s-*
"#;
