//! Small file helpers.

use std::fs;
use std::path::Path;

/// Read a text file and split it on `\n`.
///
/// Lines keep any `\r`, and a file ending in a newline yields a trailing
/// empty string. Invalid UTF-8 is replaced with U+FFFD rather than failing
/// the whole read.
pub fn read_lines(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .split('\n')
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: impl AsRef<[u8]>) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("route-gate-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_splits_on_newline() {
        let path = temp_file("lines", "alpha\nbeta\ngamma");
        assert_eq!(read_lines(&path).unwrap(), vec!["alpha", "beta", "gamma"]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_trailing_newline_and_crlf() {
        let path = temp_file("crlf", "a\r\nb\n");
        assert_eq!(read_lines(&path).unwrap(), vec!["a\r", "b", ""]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_empty_file_is_one_empty_line() {
        let path = temp_file("empty", "");
        assert_eq!(read_lines(&path).unwrap(), vec![""]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_invalid_utf8_replaced() {
        let path = temp_file("lossy", b"ok\n\xff\xfe\nok2");
        assert_eq!(
            read_lines(&path).unwrap(),
            vec!["ok", "\u{FFFD}\u{FFFD}", "ok2"]
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = read_lines("/nonexistent/route-gate/lines").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
