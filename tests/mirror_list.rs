use std::error::Error;

use upkeep::mirror::{count_active_servers, extract_servers, write_list};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn commented_server_directive_is_uncommented() -> TestResult {
    let servers = extract_servers("#Server = https://example.com/$repo/os/$arch");
    assert_eq!(servers, vec!["Server = https://example.com/$repo/os/$arch"]);
    Ok(())
}

#[test]
fn active_directive_passes_through_unchanged() -> TestResult {
    let servers = extract_servers("Server = https://foo/");
    assert_eq!(servers, vec!["Server = https://foo/"]);
    Ok(())
}

#[test]
fn plain_comments_and_noise_are_discarded() -> TestResult {
    let raw = "\
# comment
## Arch Linux repository mirrorlist

## Worldwide
";
    assert!(extract_servers(raw).is_empty());
    Ok(())
}

#[test]
fn mixed_list_keeps_only_server_directives_in_order() -> TestResult {
    let raw = "\
## Germany
#Server = https://de.mirror/$repo/os/$arch
Server = https://active.mirror/$repo/os/$arch

## France
#Server = https://fr.mirror/$repo/os/$arch
";
    let servers = extract_servers(raw);
    assert_eq!(
        servers,
        vec![
            "Server = https://de.mirror/$repo/os/$arch",
            "Server = https://active.mirror/$repo/os/$arch",
            "Server = https://fr.mirror/$repo/os/$arch",
        ]
    );
    Ok(())
}

#[test]
fn active_server_count_ignores_comments_and_blanks() -> TestResult {
    let ranked = "\
# ranked by speed
Server = https://one/
Server = https://two/

#Server = https://commented/
";
    assert_eq!(count_active_servers(ranked), 2);
    Ok(())
}

#[cfg(unix)]
#[test]
fn list_artifacts_are_written_world_readable() -> TestResult {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("mirrorlist.orig");

    write_list(&path, "Server = https://one/\n")?;

    let mode = std::fs::metadata(&path)?.permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
    assert_eq!(std::fs::read_to_string(&path)?, "Server = https://one/\n");

    Ok(())
}
