use modelsum::scanner::{ScanOptions, Scanner, WalkerConfig};
use modelsum::{calculate_checksum, scan_directory, IntegrityError};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn options() -> ScanOptions {
    ScanOptions::default()
}

#[test]
fn test_scan_mixed_tree() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("vision/resnet")).unwrap();
    fs::create_dir(dir.path().join("nlp")).unwrap();

    File::create(dir.path().join("vision/resnet/model.onnx"))
        .unwrap()
        .write_all(b"onnx bytes")
        .unwrap();
    File::create(dir.path().join("nlp/bert.pt"))
        .unwrap()
        .write_all(b"torch bytes")
        .unwrap();
    File::create(dir.path().join("weights.h5"))
        .unwrap()
        .write_all(b"keras bytes")
        .unwrap();
    File::create(dir.path().join("README.md"))
        .unwrap()
        .write_all(b"docs")
        .unwrap();

    let report = scan_directory(dir.path(), None, true).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["nlp/bert.pt", "vision/resnet/model.onnx", "weights.h5"]);
    assert!(report.is_complete());
    assert_eq!(
        report.checksums["nlp/bert.pt"],
        calculate_checksum(dir.path().join("nlp/bert.pt")).unwrap()
    );
    assert_eq!(report.bytes_hashed, 10 + 11 + 11);
}

#[test]
fn test_scan_non_recursive() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("top.pt"), b"top").unwrap();
    fs::write(dir.path().join("sub/deep.pt"), b"deep").unwrap();

    let report = scan_directory(dir.path(), None, false).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["top.pt"]);
}

#[test]
fn test_scan_identical_content_keeps_both_keys() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.pt"), b"same").unwrap();
    fs::write(dir.path().join("b.pt"), b"same").unwrap();

    let report = scan_directory(dir.path(), None, true).unwrap();
    assert_eq!(report.checksums.len(), 2);
    assert_eq!(report.checksums["a.pt"], report.checksums["b.pt"]);
}

#[test]
fn test_scan_skip_hidden() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".cache")).unwrap();
    fs::write(dir.path().join(".cache/cached.pt"), b"cached").unwrap();
    fs::write(dir.path().join(".hidden.pt"), b"hidden").unwrap();
    fs::write(dir.path().join("visible.pt"), b"visible").unwrap();

    let report = scan_directory(dir.path(), None, true).unwrap();
    assert_eq!(report.checksums.len(), 3);

    let scanner = Scanner::new(ScanOptions {
        walker: WalkerConfig {
            skip_hidden: true,
            ..WalkerConfig::default()
        },
        ..options()
    });
    let report = scanner.scan(dir.path()).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["visible.pt"]);
}

#[test]
fn test_scan_ignore_patterns() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("tmp")).unwrap();
    fs::write(dir.path().join("tmp/scratch.pt"), b"scratch").unwrap();
    fs::write(dir.path().join("draft.onnx"), b"draft").unwrap();
    fs::write(dir.path().join("final.onnx"), b"final").unwrap();

    let scanner = Scanner::new(ScanOptions {
        walker: WalkerConfig {
            ignore_patterns: vec!["tmp/".to_string(), "draft.*".to_string()],
            ..WalkerConfig::default()
        },
        ..options()
    });
    let report = scanner.scan(dir.path()).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["final.onnx"]);
}

#[cfg(unix)]
#[test]
fn test_scan_symlinks_skipped_by_default() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("real.pt");
    fs::write(&target, b"real").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.pt")).unwrap();

    let report = scan_directory(dir.path(), None, true).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["real.pt"]);

    let scanner = Scanner::new(ScanOptions {
        walker: WalkerConfig {
            follow_symlinks: true,
            ..WalkerConfig::default()
        },
        ..options()
    });
    let report = scanner.scan(dir.path()).unwrap();
    assert_eq!(report.checksums.len(), 2);
    assert_eq!(report.checksums["link.pt"], report.checksums["real.pt"]);
}

#[test]
fn test_scan_missing_root() {
    let dir = tempdir().unwrap();
    let result = scan_directory(dir.path().join("absent"), None, true);
    assert!(matches!(result, Err(IntegrityError::NotFound(_))));
}

#[test]
fn test_scan_extensions_override_normalizes_tokens() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.pt"), b"a").unwrap();
    fs::write(dir.path().join("b.safetensors"), b"b").unwrap();

    let extensions = vec!["SAFETENSORS".to_string()];
    let report = scan_directory(dir.path(), Some(&extensions), true).unwrap();
    let keys: Vec<&str> = report.checksums.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b.safetensors"]);
}
