//! Local working directory for one run

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory under the invocation directory that holds working copies
pub const WORK_DIR_NAME: &str = ".hoist-work";

/// A directory that is deleted when the run ends, however it ends.
///
/// Call [`remove`](TransientDir::remove) to observe the result; dropping
/// without it still removes the tree, ignoring errors.
#[derive(Debug)]
pub struct TransientDir {
    path: PathBuf,
    armed: bool,
}

impl TransientDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        remove_tree(&self.path)
    }
}

impl Drop for TransientDir {
    fn drop(&mut self) {
        if self.armed {
            let _ = remove_tree(&self.path);
        }
    }
}

fn remove_tree(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    // The shared parent goes too once nothing else lives in it
    if let Some(parent) = path.parent() {
        if parent.file_name().is_some_and(|name| name == WORK_DIR_NAME) {
            let _ = fs::remove_dir(parent);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn remove_deletes_tree_and_empty_parent() {
        let root = tempdir().unwrap();
        let dir = root.path().join(WORK_DIR_NAME).join("app");
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src/main.rs"), "fn main() {}").unwrap();

        TransientDir::new(&dir).remove().unwrap();

        assert!(!dir.exists());
        assert!(!root.path().join(WORK_DIR_NAME).exists());
    }

    #[test]
    fn parent_with_other_projects_is_kept() {
        let root = tempdir().unwrap();
        let work = root.path().join(WORK_DIR_NAME);
        fs::create_dir_all(work.join("app")).unwrap();
        fs::create_dir_all(work.join("other")).unwrap();

        TransientDir::new(work.join("app")).remove().unwrap();

        assert!(work.join("other").exists());
    }

    #[test]
    fn drop_removes_without_explicit_call() {
        let root = tempdir().unwrap();
        let dir = root.path().join("scratch");
        fs::create_dir_all(&dir).unwrap();

        {
            let _guard = TransientDir::new(&dir);
        }

        assert!(!dir.exists());
    }

    #[test]
    fn missing_directory_is_fine() {
        let root = tempdir().unwrap();
        TransientDir::new(root.path().join("never-created"))
            .remove()
            .unwrap();
    }
}
