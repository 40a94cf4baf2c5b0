//! Profile persistence.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use super::Profile;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Get the profile file path.
fn profile_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "vimeo").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("profile.json"))
}

/// Save the profile to disk, readable by the owner only.
pub fn save_profile(profile: &Profile) -> Result<()> {
    let path = profile_path()?;
    let json = serde_json::to_string_pretty(profile)?;

    fs::write(&path, &json).context("Failed to write profile file")?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    debug!(path = %path.display(), "Profile saved");
    Ok(())
}

/// Load the profile, if one has been saved.
pub fn load_profile() -> Result<Option<Profile>> {
    let path = profile_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read profile file")?;
    let profile: Profile = serde_json::from_str(&json).context("Invalid profile file")?;

    Ok(Some(profile))
}

/// Load the profile or fail with a hint.
pub fn require_profile() -> Result<Profile> {
    load_profile()?.context("No stored profile. Run 'vimeo auth client-credentials' first.")
}
