//! # Fechas HTTP
//! src/http/date.rs
//!
//! Formato RFC 1123 para los headers `Date` y `Last-Modified`:
//! `Sun, 06 Nov 1994 08:49:37 GMT`

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Formato strftime de RFC 1123 (siempre en GMT)
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formatea un instante como fecha HTTP
///
/// # Ejemplo
/// ```
/// use std::time::UNIX_EPOCH;
/// use webserver::http::date::http_date;
///
/// assert_eq!(http_date(UNIX_EPOCH), "Thu, 01 Jan 1970 00:00:00 GMT");
/// ```
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(RFC1123_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_known_date() {
        // 784111777 = Sun, 06 Nov 1994 08:49:37 GMT (ejemplo del RFC)
        let time = UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_current_time_format() {
        let date = http_date(SystemTime::now());
        assert!(date.ends_with(" GMT"));
        assert_eq!(date.len(), "Sun, 06 Nov 1994 08:49:37 GMT".len());
    }
}
