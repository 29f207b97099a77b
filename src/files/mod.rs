//! # Resolución de Archivos
//! src/files/mod.rs
//!
//! Traduce el path de un request a una decisión sobre el filesystem:
//!
//! ```text
//! no existe                      → NotFound
//! directorio sin "/" final       → Redirect(path + "/")
//! directorio con index.html      → File(index.html)
//! directorio sin index.html      → Listing
//! archivo regular                → File
//! otro tipo (socket, fifo, ...)  → Forbidden
//! ```
//!
//! El path se concatena tal cual al directorio raíz, sin normalizar: un
//! path con `..` puede salir de la raíz.

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Nombre del documento por defecto de un directorio
pub const INDEX_FILE: &str = "index.html";

/// Qué servir para un path
#[derive(Debug)]
pub enum FileTarget {
    /// Archivo regular a transmitir
    File { path: PathBuf, metadata: Metadata },

    /// Directorio sin index.html: generar listado
    Listing { dir: PathBuf },

    /// Directorio pedido sin `/` final
    Redirect { location: String },

    NotFound,

    Forbidden,
}

/// Concatena el path del request a la raíz
///
/// # Ejemplo
/// ```
/// use std::path::{Path, PathBuf};
/// use webserver::files::full_path;
///
/// assert_eq!(full_path(Path::new("."), "/a/b.html"), PathBuf::from("./a/b.html"));
/// ```
pub fn full_path(root: &Path, request_path: &str) -> PathBuf {
    let mut full = OsString::from(root.as_os_str());
    full.push(request_path);
    PathBuf::from(full)
}

/// Decide qué servir para `request_path` bajo `root`
pub fn resolve(root: &Path, request_path: &str) -> FileTarget {
    let path = full_path(root, request_path);

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(_) => return FileTarget::NotFound,
    };

    if metadata.is_dir() {
        if !request_path.ends_with('/') {
            return FileTarget::Redirect {
                location: format!("{}/", request_path),
            };
        }

        let index = path.join(INDEX_FILE);
        return match fs::metadata(&index) {
            Ok(index_metadata) if index_metadata.is_file() => FileTarget::File {
                path: index,
                metadata: index_metadata,
            },
            _ => FileTarget::Listing { dir: path },
        };
    }

    if metadata.is_file() {
        return FileTarget::File { path, metadata };
    }

    FileTarget::Forbidden
}

/// Genera el HTML del listado de un directorio
///
/// Cada entrada (excepto `.` y `..`) se enlaza como
/// `<request_path>/<nombre>`. El orden es el que entrega el sistema
/// operativo.
pub fn render_listing(dir: &Path, request_path: &str) -> io::Result<String> {
    let base = request_path.trim_end_matches('/');
    let mut html = String::from("<html><body><h1>Directory Listing</h1><ul>");

    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name == "." || name == ".." {
            continue;
        }
        let name = escape_html(&name);
        html.push_str(&format!("<li><a href=\"{}/{}\">{}</a></li>", base, name, name));
    }

    html.push_str("</ul></body></html>");
    Ok(html)
}

/// Escapa los caracteres especiales de HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
