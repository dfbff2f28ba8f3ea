// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [mirror]
/// url = "https://archlinux.org/mirrorlist/all/https/"
/// probe_timeout_secs = 5
/// result_count = 30
///
/// [steps]
/// flatpak = false
/// ```
///
/// All sections are optional and have reasonable defaults; `upkeep` runs
/// without any config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Mirror ranking settings from `[mirror]`.
    #[serde(default)]
    pub mirror: MirrorSection,

    /// Per-step enable flags from `[steps]`.
    #[serde(default)]
    pub steps: StepsSection,
}

/// `[mirror]` section: everything the ranking batch needs.
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorSection {
    /// Endpoint serving the full plaintext mirror list.
    #[serde(default = "default_mirror_url")]
    pub url: String,

    /// Hard timeout for the mirror-list fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Per-candidate probe timeout handed to the ranking utility, in seconds.
    ///
    /// This bounds each probe, not the utility's total runtime.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// How many ranked mirrors to keep.
    #[serde(default = "default_result_count")]
    pub result_count: usize,

    /// Directory holding the mirror list artifacts.
    #[serde(default = "default_list_dir")]
    pub list_dir: PathBuf,

    /// Upper bound on concurrently running ranking tasks.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Name of the mirror-ranking utility.
    #[serde(default = "default_rank_tool")]
    pub rank_tool: String,

    /// Name of the distribution-specific ranking helper.
    ///
    /// Absence on the system is not an error; the corresponding task is
    /// simply omitted from the batch.
    #[serde(default = "default_helper_tool")]
    pub helper_tool: String,
}

fn default_mirror_url() -> String {
    "https://archlinux.org/mirrorlist/all/https/".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    20
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_result_count() -> usize {
    30
}

fn default_list_dir() -> PathBuf {
    PathBuf::from("/etc/pacman.d")
}

fn default_max_workers() -> usize {
    4
}

fn default_rank_tool() -> String {
    "rankmirrors".to_string()
}

fn default_helper_tool() -> String {
    "eos-rankmirrors".to_string()
}

impl Default for MirrorSection {
    fn default() -> Self {
        Self {
            url: default_mirror_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            result_count: default_result_count(),
            list_dir: default_list_dir(),
            max_workers: default_max_workers(),
            rank_tool: default_rank_tool(),
            helper_tool: default_helper_tool(),
        }
    }
}

/// `[steps]` section: per-step enable flags, all on by default.
///
/// A disabled step is skipped without prompting; an enabled step whose
/// primary tool is missing from the system is skipped with an info line.
#[derive(Debug, Clone, Deserialize)]
pub struct StepsSection {
    #[serde(default = "default_true")]
    pub mirrors: bool,
    #[serde(default = "default_true")]
    pub firmware: bool,
    #[serde(default = "default_true")]
    pub packages: bool,
    #[serde(default = "default_true")]
    pub aur: bool,
    #[serde(default = "default_true")]
    pub flatpak: bool,
    #[serde(default = "default_true")]
    pub shell: bool,
    #[serde(default = "default_true")]
    pub journal: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StepsSection {
    fn default() -> Self {
        Self {
            mirrors: true,
            firmware: true,
            packages: true,
            aur: true,
            flatpak: true,
            shell: true,
            journal: true,
        }
    }
}
