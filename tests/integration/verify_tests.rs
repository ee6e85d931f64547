use modelsum::scanner::{Algorithm, Hasher};
use modelsum::verify::{check_records, verify_with, CheckStatus};
use modelsum::{calculate_checksum, scan_directory, verify_checksum, IntegrityError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_verify_own_checksum() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("model.pt");
    fs::write(&model, b"test content").unwrap();

    let digest = calculate_checksum(&model).unwrap();
    assert_eq!(
        digest,
        "6ae8a75555209fd6c44157c0aed8016e763ff435a19cf186f76863140143ff72"
    );
    assert!(verify_checksum(&model, &digest).unwrap());
}

#[test]
fn test_verify_uppercase_and_padded_digest() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("model.pt");
    fs::write(&model, b"test content").unwrap();

    let expected = "  6AE8A75555209FD6C44157C0AED8016E763FF435A19CF186F76863140143FF72\n";
    assert!(verify_checksum(&model, expected).unwrap());
}

#[test]
fn test_verify_after_modification_fails() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("model.onnx");
    fs::write(&model, b"original weights").unwrap();
    let digest = calculate_checksum(&model).unwrap();

    fs::write(&model, b"poisoned weights").unwrap();
    assert!(!verify_checksum(&model, &digest).unwrap());
}

#[test]
fn test_verify_garbage_expected_is_false() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("model.onnx");
    fs::write(&model, b"weights").unwrap();

    assert!(!verify_checksum(&model, "not a digest").unwrap());
    assert!(!verify_checksum(&model, "").unwrap());
}

#[test]
fn test_verify_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let result = verify_checksum(dir.path().join("gone.pt"), &"0".repeat(64));
    assert!(matches!(result, Err(IntegrityError::NotFound(_))));
}

#[test]
fn test_verify_blake3() {
    let dir = tempdir().unwrap();
    let model = dir.path().join("model.pt");
    fs::write(&model, b"test content").unwrap();

    let hasher = Hasher::with_algorithm(Algorithm::Blake3);
    let expected = blake3::hash(b"test content").to_hex().to_string();
    assert!(verify_with(&hasher, &model, &expected).unwrap());

    let sha = calculate_checksum(&model).unwrap();
    assert!(!verify_with(&hasher, &model, &sha).unwrap());
}

#[test]
fn test_check_records_detects_tampering() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.pt"), b"alpha").unwrap();
    fs::write(dir.path().join("b.h5"), b"beta").unwrap();

    let records = scan_directory(dir.path(), None, true).unwrap().checksums;
    fs::write(dir.path().join("b.h5"), b"beta, modified").unwrap();

    let report = check_records(&Hasher::new(), &records, dir.path());
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.passed(), 1);
    assert_eq!(report.mismatched(), 1);
    assert_eq!(report.failed(), 0);
    assert!(!report.all_ok());

    let tampered = &report.entries[1];
    assert_eq!(tampered.key, "b.h5");
    match &tampered.status {
        CheckStatus::Mismatch { actual } => {
            assert_eq!(actual, &calculate_checksum(dir.path().join("b.h5")).unwrap());
        }
        other => panic!("Expected mismatch, got {:?}", other),
    }
}

#[test]
fn test_check_records_missing_file_does_not_stop() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.pt"), b"alpha").unwrap();
    fs::write(dir.path().join("b.pt"), b"beta").unwrap();

    let records = scan_directory(dir.path(), None, true).unwrap().checksums;
    fs::remove_file(dir.path().join("a.pt")).unwrap();

    let report = check_records(&Hasher::new(), &records, dir.path());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), 1);
    assert!(matches!(
        report.entries[0].status,
        CheckStatus::Failed(IntegrityError::NotFound(_))
    ));
}
