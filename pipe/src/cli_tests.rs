//! Tests for CLI parsing and phase dispatch.

use super::*;
use crate::client::MockBucketClient;
use crate::test_utils::DistDir;
use rstest::{fixture, rstest};

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["scoop-pipe", "run", "--tag", "v1.0.0"]);
    assert_eq!(cli.config, Utf8PathBuf::from(DEFAULT_CONFIG_FILE));
    assert_eq!(cli.verbosity, 0);
    assert_eq!(
        cli.command,
        Command::Run(PhaseArgs {
            tag: "v1.0.0".to_owned(),
            artifacts: None,
        })
    );
}

#[rstest]
#[case::run("run")]
#[case::publish("publish")]
#[case::release("release")]
fn every_phase_takes_a_tag(#[case] phase: &str) {
    let cli = Cli::parse_from(["scoop-pipe", phase, "-t", "v2.0.0", "--artifacts", "out/a.json"]);
    assert_eq!(cli.command.args().tag, "v2.0.0");
    assert_eq!(cli.command.args().artifacts, Some(Utf8PathBuf::from("out/a.json")));
}

#[test]
fn cli_counts_verbosity_and_reads_config() {
    let cli = Cli::parse_from(["scoop-pipe", "-vv", "--config", "ci.toml", "release", "--tag", "v1.0.0"]);
    assert_eq!(cli.verbosity, 2);
    assert_eq!(cli.config, Utf8PathBuf::from("ci.toml"));
    assert!(matches!(cli.command, Command::Release(_)));
}

#[test]
fn cli_requires_a_tag() {
    assert!(Cli::try_parse_from(["scoop-pipe", "run"]).is_err());
}

#[test]
fn release_context_carries_release_switches() {
    let mut config = ProjectConfig::from_toml_str("project_name = \"myapp\"\n").expect("valid");
    config.release.draft = true;
    let ctx = release_context(&config, "v1.0.0", [("A".to_owned(), "b".to_owned())]).expect("valid tag");
    assert!(ctx.is_draft());
    assert!(!ctx.is_disabled());
    assert_eq!(ctx.env("A"), Some("b"));
}

#[test]
fn git_client_uses_the_release_repository() {
    let mut config = ProjectConfig::from_toml_str("project_name = \"myapp\"\n").expect("valid");
    assert!(git_client(&config).release_url_template().is_err());

    config.release.owner = "acme".to_owned();
    config.release.name = "myapp".to_owned();
    assert_eq!(
        git_client(&config).release_url_template().expect("template"),
        "https://github.com/acme/myapp/releases/download/{{ .Tag }}/{{ .ArtifactName }}"
    );
}

struct Project {
    dist: DistDir,
    config: ProjectConfig,
    ctx: ReleaseContext,
}

#[fixture]
fn project() -> Project {
    let dist = DistDir::new();
    let mut config = ProjectConfig::from_toml_str(
        r#"
project_name = "myapp"

[scoop]
url_template = "https://example.com/{{ .ArtifactName }}"

[scoop.bucket]
owner = "acme"
name = "scoop-bucket"
"#,
    )
    .expect("valid configuration");
    config.dist = dist.root();
    let artefacts = vec![dist.windows_archive("amd64")];
    std::fs::write(
        dist.root().join(ARTEFACTS_FILE),
        serde_json::to_vec(&artefacts).expect("serialise artefacts"),
    )
    .expect("write artefacts");
    Project {
        dist,
        config,
        ctx: ReleaseContext::new("myapp", "v1.0.0").expect("valid tag"),
    }
}

fn phase(tag: &str) -> PhaseArgs {
    PhaseArgs {
        tag: tag.to_owned(),
        artifacts: None,
    }
}

#[rstest]
fn run_then_publish_in_separate_invocations(project: Project) {
    let quiet = MockBucketClient::new();
    execute(&Command::Run(phase("v1.0.0")), &project.config, &project.ctx, &quiet).expect("run");
    assert!(project.dist.root().join("myapp.json").is_file());
    assert!(project.dist.root().join("myapp.publish.json").is_file());

    let mut client = MockBucketClient::new();
    client
        .expect_create_file()
        .withf(|commit| commit.path == "myapp.json" && commit.repo.to_string() == "acme/scoop-bucket")
        .times(1)
        .returning(|_| Ok(()));
    execute(&Command::Publish(phase("v1.0.0")), &project.config, &project.ctx, &client).expect("publish");
}

#[rstest]
fn release_runs_both_phases(project: Project) {
    let mut client = MockBucketClient::new();
    client.expect_create_file().times(1).returning(|_| Ok(()));
    execute(&Command::Release(phase("v1.0.0")), &project.config, &project.ctx, &client).expect("release");
}

#[rstest]
fn publish_without_a_run_fails(project: Project) {
    let client = MockBucketClient::new();
    let err = execute(&Command::Publish(phase("v1.0.0")), &project.config, &project.ctx, &client)
        .expect_err("nothing was written");
    assert!(matches!(err, CliError::Pipe(PipeError::ManifestRead { .. })));
}

#[rstest]
fn missing_bucket_skips_every_phase(mut project: Project) {
    project.config.scoop.bucket.name.clear();
    let client = MockBucketClient::new();
    execute(&Command::Release(phase("v1.0.0")), &project.config, &project.ctx, &client).expect("skipped");
    assert!(!project.dist.root().join("myapp.json").exists());
}

#[rstest]
fn explicit_artefacts_path_is_honoured(project: Project) {
    let args = PhaseArgs {
        tag: "v1.0.0".to_owned(),
        artifacts: Some(project.dist.root().join("elsewhere.json")),
    };
    let err = execute(&Command::Run(args), &project.config, &project.ctx, &MockBucketClient::new())
        .expect_err("file is missing");
    assert!(matches!(err, CliError::ArtefactsRead { ref path, .. } if path.ends_with("elsewhere.json")));
}

#[test]
fn malformed_artefacts_are_reported() {
    let dist = DistDir::new();
    let path = dist.root().join(ARTEFACTS_FILE);
    std::fs::write(&path, "{not json").expect("write");
    let err = load_artefacts(&path).expect_err("invalid json");
    assert!(matches!(err, CliError::ArtefactsParse { .. }));
}

#[test]
fn unrelated_artefact_kinds_do_not_block_selection() {
    let dist = DistDir::new();
    let archive = dist.windows_archive("amd64");
    let mut listed = serde_json::to_value(vec![&archive]).expect("serialise archive");
    let serde_json::Value::Array(entries) = &mut listed else {
        panic!("artefacts serialise as an array");
    };
    entries.push(serde_json::json!({"name": "myapp.sbom.json", "path": "dist/myapp.sbom.json", "type": "sbom"}));
    entries.push(serde_json::json!({"name": "myapp_1.0.0_amd64.deb", "path": "dist/myapp.deb", "type": "linux_package"}));
    let path = dist.root().join(ARTEFACTS_FILE);
    std::fs::write(&path, serde_json::to_vec(&listed).expect("serialise list")).expect("write");

    let artefacts = load_artefacts(&path).expect("mixed list loads");

    assert_eq!(artefacts.len(), 3);
    let selected = crate::selector::select_windows_archives(&artefacts, "v1").expect("archive selected");
    assert_eq!(selected, vec![&archive]);
}
