//! Utilidades compartidas por los tests unitarios

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Directorio raíz temporal que se borra al salir del test
pub struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "webserver-{}-{}-{}",
            name,
            std::process::id(),
            NEXT_ID.fetch_add(1, Ordering::SeqCst)
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: &str) {
        fs::write(self.path.join(relative), contents).unwrap();
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.path.join(relative)).unwrap();
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
