//! CLI integration tests.
//!
//! Every test runs the real binary with the age backend and an isolated
//! HOME, so identities and the filesystem store live in temp directories.

mod support;
use support::*;

use predicates::prelude::*;
use valise::core::domain::Secret;
use valise::core::yaml;

/// Encrypt the standard secrets into `secrets/<file>`.
fn encrypt_standard(t: &Test, file: &str) {
    t.secret_dir();
    for (key, value) in STANDARD_SECRETS {
        let output = t.encrypt(key, value, &format!("secrets/{}", file));
        assert_success(&output);
    }
}

/// Replace one key's value in a secret file.
fn tamper(t: &Test, rel: &str, key: &str) {
    let path = t.path(rel);
    let secrets: Vec<Secret> = yaml::load(&path)
        .unwrap()
        .into_iter()
        .map(|s| {
            if s.key() == key {
                Secret::new(key, TAMPERED_VALUE)
            } else {
                s
            }
        })
        .collect();
    yaml::save(&secrets, &path).unwrap();
}

#[test]
fn test_keygen_writes_identity() {
    let t = Test::new();
    let output = t.keygen();
    assert_success(&output);
    assert_stdout_contains(&output, "public key: age1");
    assert!(t.home.path().join(".valise").join("identity.txt").exists());
}

#[test]
fn test_keygen_refuses_overwrite() {
    let t = Test::with_identity();
    t.cmd()
        .arg("keygen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_encrypt_writes_canonical_file() {
    let t = Test::with_identity();
    t.secret_dir();

    assert_success(&t.encrypt("zeta", "1", "secrets/app.yml"));
    assert_success(&t.encrypt("alpha", "2", "secrets/app.yml"));

    let secrets = yaml::load(t.path("secrets/app.yml")).unwrap();
    let keys: Vec<_> = secrets.iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["alpha", "zeta"]);
}

#[test]
fn test_encrypt_replaces_existing_key() {
    let t = Test::with_identity();
    t.secret_dir();

    assert_success(&t.encrypt("api_key", "one", "secrets/app.yml"));
    assert_success(&t.encrypt("api_key", "two", "secrets/app.yml"));

    assert_eq!(yaml::load(t.path("secrets/app.yml")).unwrap().len(), 1);
}

#[test]
fn test_validate_all_valid() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    encrypt_standard(&t, "web.yaml");

    let output = t.validate("secrets");
    assert_success(&output);
    assert_stdout_contains(&output, "app.yml");
    assert_stdout_contains(&output, "web.yaml");
    assert_stdout_contains(&output, "all secrets are valid");
}

#[test]
fn test_validate_reports_tampered_key_and_continues() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    encrypt_standard(&t, "web.yml");
    tamper(&t, "secrets/app.yml", "db_password");

    let output = t.validate("secrets");
    assert_failure(&output);

    let out = stdout(&output);
    assert!(out.contains("db_password"), "missing invalid key: {}", out);
    assert!(!out.contains("api_key"), "valid key reported: {}", out);
    // the second file is still checked
    assert!(out.contains("web.yml"), "second file skipped: {}", out);
    assert_stderr_contains(&output, "some secrets are invalid");
}

#[test]
fn test_validate_prints_failure_reason() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    t.write(
        "secrets/web.yml",
        &format!(
            "- key: api_key\n  value: '%%% not base64'\n- key: db_password\n  value: {}\n",
            TAMPERED_VALUE
        ),
    );

    let output = t.validate("secrets");
    assert_failure(&output);
    assert_stdout_contains(&output, "invalid base64 for api_key");
    assert_stdout_contains(&output, "failed to decrypt db_password");
    assert_stderr_contains(&output, "some secrets are invalid (2 in 1 file(s))");
}

#[test]
fn test_validate_wrong_identity() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");

    std::fs::remove_file(t.home.path().join(".valise").join("identity.txt")).unwrap();
    assert_success(&t.keygen());

    let output = t.validate("secrets");
    assert_failure(&output);
    for (key, _) in STANDARD_SECRETS {
        assert_stdout_contains(&output, key);
    }
}

#[test]
fn test_validate_parse_error_is_fatal() {
    let t = Test::with_identity();
    t.write("secrets/app.yml", MISSING_VALUE_YAML);

    let output = t.validate("secrets");
    assert_failure(&output);
    assert_stderr_contains(&output, "app.yml");
    assert_stdout_excludes(&output, "all secrets are valid");
}

#[test]
fn test_validate_missing_dir() {
    let t = Test::with_identity();
    t.cmd()
        .args(["validate", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read directory"));
}

#[test]
fn test_validate_skips_dotfiles_and_other_files() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    t.write("secrets/.draft.yml", MISSING_VALUE_YAML);
    t.write("secrets/README.md", "not: [yaml");

    let output = t.validate("secrets");
    assert_success(&output);
    assert_stdout_excludes(&output, ".draft.yml");
}

#[test]
fn test_validate_without_identity_hints_keygen() {
    let t = Test::new();
    t.write("secrets/app.yml", "");

    let output = t.validate("secrets");
    assert_failure(&output);
    assert_stderr_contains(&output, "valise keygen");
}

#[test]
fn test_identity_flag_overrides_default() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["keygen", "--output", "keys/id.txt"])
        .output()
        .unwrap();
    assert_success(&output);

    t.secret_dir();
    let output = t
        .cmd()
        .args(["--identity", "keys/id.txt", "encrypt", "k", "v", "--file", "secrets/a.yml"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t
        .cmd()
        .env("VALISE_IDENTITY", "keys/id.txt")
        .args(["validate", "secrets"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_unknown_backend_rejected() {
    let t = Test::with_identity();
    t.secret_dir();
    let output = t
        .cmd()
        .args(["--kms", "vault", "validate", "secrets"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown backend");
}

#[test]
fn test_sync_then_list_and_namespaces() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    encrypt_standard(&t, "web.yml");

    let output = t.sync("secrets");
    assert_success(&output);
    assert_stdout_contains(&output, "synced 2 namespace(s)");

    let output = t.namespaces();
    assert_success(&output);
    assert_stdout_contains(&output, "app");
    assert_stdout_contains(&output, "web");

    let output = t.list("app");
    assert_success(&output);
    for (key, _) in STANDARD_SECRETS {
        assert_stdout_contains(&output, key);
    }
}

#[test]
fn test_sync_is_idempotent() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");

    assert_success(&t.sync("secrets"));
    let output = t.sync("secrets");
    assert_success(&output);
    assert_stdout_contains(&output, "app: up to date");
    assert_stdout_contains(&output, "already in sync");
}

#[test]
fn test_sync_deletes_removed_keys() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    assert_success(&t.sync("secrets"));

    let path = t.path("secrets/app.yml");
    let kept: Vec<Secret> = yaml::load(&path)
        .unwrap()
        .into_iter()
        .filter(|s| s.key() != "db_password")
        .collect();
    yaml::save(&kept, &path).unwrap();

    let output = t.sync("secrets");
    assert_success(&output);
    assert_stdout_contains(&output, "- db_password");

    let output = t.list("app");
    assert_stdout_excludes(&output, "db_password");
    assert_stdout_contains(&output, "api_key");
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");

    let output = t.sync_dry_run("secrets");
    assert_success(&output);
    assert_stdout_contains(&output, "+ api_key");
    assert_stdout_contains(&output, "dry run");

    let output = t.namespaces();
    assert_stdout_contains(&output, "no namespaces");
}

#[test]
fn test_dump_round_trips_through_store() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    assert_success(&t.sync("secrets"));

    let output = t
        .cmd()
        .args(["dump", "app", "--output", "restored/app.yml"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "dumped 3 secrets");

    assert_eq!(t.read("restored/app.yml"), t.read("secrets/app.yml"));

    // the dumped directory validates with the same identity
    assert_success(&t.validate("restored"));
}

#[test]
fn test_dump_to_stdout() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    assert_success(&t.sync("secrets"));

    let output = t.dump("app");
    assert_success(&output);
    assert_stdout_contains(&output, "key: DATABASE_URL");
}

#[test]
fn test_store_path_from_config_file() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");
    t.write("valise.toml", "[store]\npath = \"remote\"\n");

    let output = t
        .cmd()
        .args(["--config", "valise.toml", "sync", "secrets"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.path("remote").join("app.json").exists());

    // VALISE_STORE wins over the file
    let output = t
        .cmd()
        .env("VALISE_STORE", "other")
        .args(["--config", "valise.toml", "sync", "secrets"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.path("other").join("app.json").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let t = Test::with_identity();
    let output = t
        .cmd()
        .args(["--config", "absent.toml", "namespaces"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
}

#[test]
fn test_completions() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valise"));
}

#[test]
fn test_default_no_log_output() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");

    let output = t.validate("secrets");
    assert_success(&output);
    let err = stderr(&output);
    assert!(
        !err.contains("DEBUG") && !err.contains("TRACE"),
        "Default mode should not show debug/trace output"
    );
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let t = Test::with_identity();
    encrypt_standard(&t, "app.yml");

    let output = t.cmd().args(["--verbose", "validate", "secrets"]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
}
