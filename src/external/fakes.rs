//! In-process fakes for the external tool traits
//!
//! Used by unit tests so capture/apply/orchestrator logic runs without the
//! real `zip`, `unzip`, or `dconf` binaries. A fake "archive" is simply a
//! directory holding the packed tree.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ProfileError, ProfileResult};

use super::{ArchiveTool, SettingsTool};

/// Archive fake that copies directory trees instead of zipping them
pub struct DirCopyArchiver;

impl ArchiveTool for DirCopyArchiver {
    fn pack(&self, source_dir: &Path, dest_archive: &Path) -> ProfileResult<()> {
        if dest_archive.exists() {
            fs::remove_dir_all(dest_archive)?;
        }
        fs::create_dir_all(dest_archive)?;
        copy_tree(source_dir, dest_archive)
    }

    fn unpack(&self, archive: &Path, dest_dir: &Path) -> ProfileResult<()> {
        if !archive.exists() {
            return Err(ProfileError::ArchiveRead(format!(
                "No such archive: {}",
                archive.display()
            )));
        }
        fs::create_dir_all(dest_dir)?;
        copy_tree(archive, dest_dir)
    }
}

/// Archive fake whose operations always fail
pub struct BrokenArchiver;

impl ArchiveTool for BrokenArchiver {
    fn pack(&self, _source_dir: &Path, _dest_archive: &Path) -> ProfileResult<()> {
        Err(ProfileError::ArchiveWrite("broken archiver".into()))
    }

    fn unpack(&self, _archive: &Path, _dest_dir: &Path) -> ProfileResult<()> {
        Err(ProfileError::ArchiveRead("broken archiver".into()))
    }
}

fn copy_tree(src: &Path, dest: &Path) -> ProfileResult<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| ProfileError::Io(e.to_string()))?;
        if entry.depth() == 0 {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| ProfileError::Io(e.to_string()))?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// In-memory settings store with call recording and failure injection
#[derive(Default)]
pub struct MemorySettings {
    pub store: RefCell<HashMap<String, String>>,
    /// Every dump/reset/load invocation, in order
    pub calls: RefCell<Vec<String>>,
    pub fail_dump: bool,
    pub fail_reset: bool,
    pub fail_load: bool,
}

impl MemorySettings {
    pub fn with_contents(namespace: &str, text: &str) -> Self {
        let fake = Self::default();
        fake.store
            .borrow_mut()
            .insert(namespace.to_string(), text.to_string());
        fake
    }

    pub fn contents(&self, namespace: &str) -> Option<String> {
        self.store.borrow().get(namespace).cloned()
    }
}

impl SettingsTool for MemorySettings {
    fn dump(&self, namespace: &str) -> ProfileResult<String> {
        self.calls.borrow_mut().push(format!("dump {}", namespace));
        if self.fail_dump {
            return Err(ProfileError::Settings("dump failure injected".into()));
        }
        Ok(self.store.borrow().get(namespace).cloned().unwrap_or_default())
    }

    fn reset(&self, namespace: &str) -> ProfileResult<()> {
        self.calls.borrow_mut().push(format!("reset {}", namespace));
        if self.fail_reset {
            return Err(ProfileError::Settings("reset failure injected".into()));
        }
        self.store.borrow_mut().remove(namespace);
        Ok(())
    }

    fn load(&self, namespace: &str, text: &str) -> ProfileResult<()> {
        self.calls.borrow_mut().push(format!("load {}", namespace));
        if self.fail_load {
            return Err(ProfileError::Settings("load failure injected".into()));
        }
        self.store
            .borrow_mut()
            .insert(namespace.to_string(), text.to_string());
        Ok(())
    }
}
