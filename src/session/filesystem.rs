use super::storage::SessionStore;
use crate::error::{FetchDogsError, Result};
use crate::models::SessionRecord;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SESSION_FILE: &str = "session.json";

/// Keeps the session record as JSON under a state directory
/// (`~/.cache/fetchdogs` unless configured otherwise).
pub struct FilesystemSessionStore {
    dir: PathBuf,
}

impl FilesystemSessionStore {
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            FetchDogsError::SessionError("Could not determine home directory".to_string())
        })?;
        Ok(Self::with_dir(home.join(".cache").join("fetchdogs")))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_file(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

impl SessionStore for FilesystemSessionStore {
    fn load(&self) -> Option<SessionRecord> {
        let content = fs::read_to_string(self.session_file()).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// The record carries the session cookie, so on unix the file is owner-only
    /// (0600) and a directory created here is 0700.
    fn save(&self, record: &SessionRecord) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
            restrict(&self.dir, 0o700)?;
        }

        let content = serde_json::to_string_pretty(record)?;
        let path = self.session_file();

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&path)?;
        // A file left by an older run keeps its mode through open()
        restrict(&path, 0o600)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_file();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
