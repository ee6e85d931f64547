use clap::Parser;
use figment::Jail;
use modelsum::cli::Cli;
use modelsum::config::{Config, ConfigError};
use modelsum::{execute, Algorithm, ExitCode};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_load_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "modelsum.toml",
            r#"
            algorithm = "blake3"
            follow_symlinks = true
            progress = false
            "#,
        )?;

        let config = Config::load(Some(Path::new("modelsum.toml"))).unwrap();
        assert_eq!(config.algorithm, Algorithm::Blake3);
        assert!(config.follow_symlinks);
        assert!(!config.progress);
        assert!(!config.strict);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("modelsum.toml", "algorithm = \"blake3\"")?;
        jail.set_env("MODELSUM_ALGORITHM", "sha256");
        jail.set_env("MODELSUM_SKIP_HIDDEN", "true");

        let config = Config::load(Some(Path::new("modelsum.toml"))).unwrap();
        assert_eq!(config.algorithm, Algorithm::Sha256);
        assert!(config.skip_hidden);
        Ok(())
    });
}

#[test]
fn test_wrongly_typed_value_is_invalid() {
    Jail::expect_with(|jail| {
        jail.create_file("modelsum.toml", "strict = \"sometimes\"")?;

        let err = Config::load(Some(Path::new("modelsum.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_config_ignore_patterns_apply_to_scan() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("checkpoints")).unwrap();
    fs::write(dir.path().join("checkpoints/step1.pt"), b"ckpt").unwrap();
    fs::write(dir.path().join("final.pt"), b"final").unwrap();

    let config = Config {
        ignore_patterns: vec!["checkpoints/".to_string()],
        ..Config::default()
    };
    let cli =
        Cli::try_parse_from(["modelsum", "-q", "scan", dir.path().to_str().unwrap()]).unwrap();

    let mut out = Vec::new();
    let code = execute(&cli, &config, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("final.pt"));
    assert!(!out.contains("step1.pt"));
}

#[test]
fn test_cli_algorithm_overrides_config() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("m.pt");
    fs::write(&model, b"test").unwrap();

    let config = Config {
        algorithm: Algorithm::Blake3,
        ..Config::default()
    };

    let run = |args: &[&str]| {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        execute(&cli, &config, &mut out).unwrap();
        String::from_utf8(out).unwrap().trim().to_string()
    };

    let path = model.to_str().unwrap();
    assert_eq!(
        run(&["modelsum", "calculate", path]),
        blake3::hash(b"test").to_hex().to_string()
    );
    assert_eq!(
        run(&["modelsum", "calculate", path, "--algorithm", "sha256"]),
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
    );
}
