//! # Tipos MIME
//! src/http/mime.rs
//!
//! Tabla fija de extensiones. Una extensión desconocida no tiene tipo y la
//! respuesta se envía sin `Content-Type`.

use std::path::Path;

/// Tipo MIME según la extensión del nombre de archivo
///
/// La extensión es lo que sigue al último `.` del nombre (sensible a
/// mayúsculas).
///
/// # Ejemplo
/// ```
/// use std::path::Path;
/// use webserver::http::mime::mime_type_for;
///
/// assert_eq!(mime_type_for(Path::new("./www/index.html")), Some("text/html"));
/// assert_eq!(mime_type_for(Path::new("README")), None);
/// ```
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_str()?;
    let ext = &name[name.rfind('.')?..];

    match ext {
        ".html" | ".htm" => Some("text/html"),
        ".jpg" | ".jpeg" => Some("image/jpeg"),
        ".gif" => Some("image/gif"),
        ".png" => Some("image/png"),
        ".css" => Some("text/css"),
        ".au" => Some("audio/basic"),
        ".wav" => Some("audio/wav"),
        ".avi" => Some("video/x-msvideo"),
        ".mpeg" | ".mpg" => Some("video/mpeg"),
        ".mp3" => Some("audio/mpeg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mime(name: &str) -> Option<&'static str> {
        mime_type_for(Path::new(name))
    }

    #[test]
    fn test_known_extensions() {
        assert_eq!(mime("a.htm"), Some("text/html"));
        assert_eq!(mime("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime("photo.jpg"), Some("image/jpeg"));
        assert_eq!(mime("anim.gif"), Some("image/gif"));
        assert_eq!(mime("logo.png"), Some("image/png"));
        assert_eq!(mime("site.css"), Some("text/css"));
        assert_eq!(mime("sound.au"), Some("audio/basic"));
        assert_eq!(mime("sound.wav"), Some("audio/wav"));
        assert_eq!(mime("clip.avi"), Some("video/x-msvideo"));
        assert_eq!(mime("clip.mpg"), Some("video/mpeg"));
        assert_eq!(mime("song.mp3"), Some("audio/mpeg"));
    }

    #[test]
    fn test_last_dot_wins() {
        assert_eq!(mime("archive.html.gz"), None);
        assert_eq!(mime("page.txt.html"), Some("text/html"));
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(mime("notes.txt"), None);
        assert_eq!(mime("Makefile"), None);
        assert_eq!(mime("dir.d/file"), None);
        assert_eq!(mime("INDEX.HTML"), None);
    }

    #[test]
    fn test_dotfile_uses_whole_name() {
        assert_eq!(mime(".css"), Some("text/css"));
    }
}
