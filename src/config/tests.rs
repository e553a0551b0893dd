use super::*;
use clap::Parser;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["kaniko-ecr"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_join_repo() {
    assert_eq!(
        join_repo("123.dkr.ecr.us-east-1.amazonaws.com/myrepo", "app"),
        "123.dkr.ecr.us-east-1.amazonaws.com/myrepo/app"
    );
    assert_eq!(join_repo("public.ecr.aws/abc", "web"), "public.ecr.aws/abc/web");
}

#[test]
#[serial]
fn test_defaults() {
    let dir = tempdir().unwrap();
    let config = PluginConfig::from_cli(parse(&[]), &dir.path().join(".tags")).unwrap();

    assert_eq!(config.dockerfile, "Dockerfile");
    assert_eq!(config.context, ".");
    assert_eq!(config.tags, vec!["latest"]);
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.cache_ttl, 0);
    assert!(config.target.is_none());
    assert!(!config.no_push);
    assert!(!config.create_repository);
}

#[test]
#[serial]
fn test_list_flags_split_on_commas() {
    let dir = tempdir().unwrap();
    let cli = parse(&[
        "--tags",
        "v1,v1.2",
        "--args",
        "A=1,B=2",
        "--custom-labels",
        "team=infra",
    ]);
    let config = PluginConfig::from_cli(cli, &dir.path().join(".tags")).unwrap();

    assert_eq!(config.tags, vec!["v1", "v1.2"]);
    assert_eq!(config.args, vec!["A=1", "B=2"]);
    assert_eq!(config.labels, vec!["team=infra"]);
}

#[test]
#[serial]
fn test_tags_file_used_when_no_tags_given() {
    let dir = tempdir().unwrap();
    let tags_file = dir.path().join(".tags");
    fs::write(&tags_file, "1.0.0,1.0\nlatest\n").unwrap();

    let config = PluginConfig::from_cli(parse(&[]), &tags_file).unwrap();
    assert_eq!(config.tags, vec!["1.0.0", "1.0", "latest"]);

    let config = PluginConfig::from_cli(parse(&["--tags", "dev"]), &tags_file).unwrap();
    assert_eq!(config.tags, vec!["dev"]);
}

#[test]
#[serial]
fn test_empty_values_become_none() {
    let dir = tempdir().unwrap();
    let cli = parse(&["--access-key", "", "--target", "", "--verbosity", ""]);
    let config = PluginConfig::from_cli(cli, &dir.path().join(".tags")).unwrap();

    assert!(config.access_key.is_none());
    assert!(config.target.is_none());
    assert!(config.verbosity.is_none());
}

#[test]
fn test_needs_auth() {
    let mut config = PluginConfig::default();
    assert!(config.needs_auth());

    config.no_push = true;
    assert!(!config.needs_auth());

    config.access_key = Some("AKIA".to_string());
    assert!(config.needs_auth());
}

#[test]
fn test_should_create_repository() {
    let mut config = PluginConfig {
        create_repository: true,
        ..Default::default()
    };
    assert!(config.should_create_repository());

    config.no_push = true;
    assert!(!config.should_create_repository());

    config.no_push = false;
    config.create_repository = false;
    assert!(!config.should_create_repository());
}

#[test]
fn test_cache_repo_derived_even_when_cache_disabled() {
    let config = PluginConfig {
        registry: "123.dkr.ecr.us-east-1.amazonaws.com".to_string(),
        repo: "app".to_string(),
        cache_repo: "app-cache".to_string(),
        enable_cache: false,
        ..Default::default()
    };

    assert_eq!(config.image_repo(), "123.dkr.ecr.us-east-1.amazonaws.com/app");
    assert_eq!(
        config.cache_repo(),
        "123.dkr.ecr.us-east-1.amazonaws.com/app-cache"
    );
}

#[test]
#[serial]
fn test_boolean_flags_accept_values() {
    let dir = tempdir().unwrap();
    let cli = parse(&["--no-push", "--enable-cache", "--create-repository"]);
    let config = PluginConfig::from_cli(cli, &dir.path().join(".tags")).unwrap();
    assert!(config.no_push);
    assert!(config.enable_cache);
    assert!(config.create_repository);
}

#[test]
#[serial]
fn test_list_env_vars_split_on_commas() {
    let dir = tempdir().unwrap();

    temp_env::with_vars(
        [
            ("PLUGIN_TAGS", Some("a,b")),
            ("PLUGIN_BUILD_ARGS", Some("A=1,B=2")),
            ("PLUGIN_CUSTOM_LABELS", Some("x=1,y=2")),
        ],
        || {
            let config = PluginConfig::from_cli(parse(&[]), &dir.path().join(".tags")).unwrap();
            assert_eq!(config.tags, vec!["a", "b"]);
            assert_eq!(config.args, vec!["A=1", "B=2"]);
            assert_eq!(config.labels, vec!["x=1", "y=2"]);
        },
    );
}

#[test]
#[serial]
fn test_boolean_env_vars() {
    let dir = tempdir().unwrap();

    temp_env::with_vars(
        [
            ("PLUGIN_NO_PUSH", Some("true")),
            ("PLUGIN_ENABLE_CACHE", Some("false")),
        ],
        || {
            let config = PluginConfig::from_cli(parse(&[]), &dir.path().join(".tags")).unwrap();
            assert!(config.no_push);
            assert!(!config.enable_cache);
        },
    );
}
