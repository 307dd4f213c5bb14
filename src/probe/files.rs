//! File and directory status probes.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::report::section::{ljust, STATUS_WIDTH};

/// Describe a certificate or config path.
///
/// Returns one value per output line: the status padded to the status
/// column followed by the path, plus a `realpath` line for directories whose
/// canonical path differs. `None` means the source (usually an environment
/// variable) was not set.
pub fn describe_path(path: Option<&str>) -> Vec<String> {
    let Some(raw) = path else {
        return vec!["No ENV key".to_string()];
    };
    let target = Path::new(raw);

    let is_file = target
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains('.'));

    if is_file {
        vec![describe_file(raw, target)]
    } else {
        describe_dir(raw, target)
    }
}

fn describe_file(raw: &str, target: &Path) -> String {
    match std::fs::metadata(target) {
        Ok(meta) if meta.is_file() => {
            let status = match meta.modified() {
                Ok(modified) => {
                    let dated: DateTime<Utc> = modified.into();
                    format!("File Dated {}", dated.format("%F"))
                }
                Err(_) => "File Exists".to_string(),
            };
            format!("{}{}", ljust(&status, STATUS_WIDTH), raw)
        }
        _ => {
            tracing::debug!("No file at {}", raw);
            format!("{}{}", ljust("File Not Found!", STATUS_WIDTH), raw)
        }
    }
}

fn describe_dir(raw: &str, target: &Path) -> Vec<String> {
    if !target.is_dir() {
        tracing::debug!("No directory at {}", raw);
        return vec![format!("{}{}", ljust("Dir  Not Found!", STATUS_WIDTH), raw)];
    }

    let mut lines = vec![format!("{}{}", ljust("Dir  Exists", STATUS_WIDTH), raw)];
    if let Ok(real) = std::fs::canonicalize(target) {
        if real != target {
            lines.push(format!(
                "{}{}",
                ljust("Dir  realpath", STATUS_WIDTH),
                real.display()
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unset_source_reports_no_env_key() {
        assert_eq!(describe_path(None), vec!["No ENV key"]);
    }

    #[test]
    fn missing_file_reports_attempted_path() {
        let lines = describe_path(Some("/nonexistent/rbdiag/cert.pem"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("File Not Found!"));
        assert!(lines[0].ends_with("/nonexistent/rbdiag/cert.pem"));
        assert_eq!(lines[0].find('/'), Some(STATUS_WIDTH));
    }

    #[test]
    fn existing_file_reports_date() {
        let temp = TempDir::new().unwrap();
        let cert = temp.path().join("cert.pem");
        fs::write(&cert, "-----BEGIN CERTIFICATE-----\n").unwrap();
        let raw = cert.to_string_lossy().to_string();

        let lines = describe_path(Some(&raw));
        let today = Utc::now().format("%F").to_string();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&format!("File Dated {}", today)));
        assert!(lines[0].ends_with(&raw));
    }

    #[test]
    fn missing_dir_reports_not_found() {
        let lines = describe_path(Some("/nonexistent/rbdiag/certs"));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Dir  Not Found!"));
    }

    #[test]
    fn existing_canonical_dir_has_one_line() {
        let temp = TempDir::new().unwrap();
        let real = fs::canonicalize(temp.path()).unwrap();
        let certs = real.join("certs");
        fs::create_dir(&certs).unwrap();

        let lines = describe_path(Some(&certs.to_string_lossy()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Dir  Exists"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dir_reports_realpath() {
        let temp = TempDir::new().unwrap();
        let real = fs::canonicalize(temp.path()).unwrap();
        let target = real.join("target");
        fs::create_dir(&target).unwrap();
        let link = real.join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let lines = describe_path(Some(&link.to_string_lossy()));
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Dir  realpath"));
        assert!(lines[1].ends_with(&target.to_string_lossy().to_string()));
    }
}
