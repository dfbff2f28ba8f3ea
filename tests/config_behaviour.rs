use std::error::Error;
use std::path::PathBuf;

use upkeep::config::load_or_default;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_config_file_falls_back_to_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_or_default(dir.path().join("does-not-exist.toml"))?;

    assert_eq!(cfg.mirror.url, "https://archlinux.org/mirrorlist/all/https/");
    assert_eq!(cfg.mirror.fetch_timeout_secs, 20);
    assert_eq!(cfg.mirror.probe_timeout_secs, 5);
    assert_eq!(cfg.mirror.result_count, 30);
    assert_eq!(cfg.mirror.list_dir, PathBuf::from("/etc/pacman.d"));
    assert_eq!(cfg.mirror.rank_tool, "rankmirrors");
    assert!(cfg.steps.mirrors);
    assert!(cfg.steps.journal);

    Ok(())
}

#[test]
fn config_file_overrides_defaults_per_field() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Upkeep.toml");
    std::fs::write(
        &path,
        r#"
[mirror]
probe_timeout_secs = 2
result_count = 5
list_dir = "/tmp/upkeep-test"

[steps]
flatpak = false
"#,
    )?;

    let cfg = load_or_default(&path)?;

    assert_eq!(cfg.mirror.probe_timeout_secs, 2);
    assert_eq!(cfg.mirror.result_count, 5);
    assert_eq!(cfg.mirror.list_dir, PathBuf::from("/tmp/upkeep-test"));
    // Untouched fields keep their defaults.
    assert_eq!(cfg.mirror.fetch_timeout_secs, 20);
    assert_eq!(cfg.mirror.max_workers, 4);

    assert!(!cfg.steps.flatpak);
    assert!(cfg.steps.packages);

    Ok(())
}

#[test]
fn zero_result_count_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Upkeep.toml");
    std::fs::write(&path, "[mirror]\nresult_count = 0\n")?;

    let err = load_or_default(&path).expect_err("validation should fail");
    assert!(err.to_string().contains("result_count"));

    Ok(())
}

#[test]
fn zero_workers_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Upkeep.toml");
    std::fs::write(&path, "[mirror]\nmax_workers = 0\n")?;

    let err = load_or_default(&path).expect_err("validation should fail");
    assert!(err.to_string().contains("max_workers"));

    Ok(())
}
