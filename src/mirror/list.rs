// src/mirror/list.rs

use std::fs;
use std::io;
use std::path::Path;

/// Extract server directives from a raw mirror list.
///
/// Line rules:
/// - `#Server ...` is a commented-out directive: uncomment and keep.
/// - `Server ...` is already active: keep as-is.
/// - Everything else (comments, blanks, country headers) is discarded.
pub fn extract_servers(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            if line.starts_with("#Server") {
                Some(line[1..].trim().to_string())
            } else if line.starts_with("Server") {
                Some(line.trim().to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Count active `Server` directives in ranked output.
pub fn count_active_servers(text: &str) -> usize {
    text.lines()
        .filter(|line| !line.trim().is_empty() && line.starts_with("Server"))
        .count()
}

/// Write a list artifact with predictable permissions.
///
/// Mirror lists are consumed by the package manager as root but must stay
/// world-readable, so artifacts are always written mode 0644.
pub fn write_list(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    }

    Ok(())
}
