//! Key/value credential store backed by a dotenv-style file

use crate::error::{ClientError, Result};
use secrecy::{ExposeSecret, Secret};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Credential store
///
/// Values are loaded once from `path` and every [`CredentialStore::set`]
/// rewrites the file in place, keeping unrelated lines untouched.
/// Not safe for concurrent writers.
pub struct CredentialStore {
    path: PathBuf,
    values: BTreeMap<String, Secret<String>>,
}

impl CredentialStore {
    /// Load the store from `path`
    ///
    /// A missing file yields an empty store; the file is created on the first write.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut values = BTreeMap::new();

        if path.exists() {
            #[allow(deprecated)]
            let iter = dotenv::from_path_iter(&path).map_err(|e| {
                ClientError::Configuration(format!(
                    "cannot read credential file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            for item in iter {
                let (key, value) = item.map_err(|e| {
                    ClientError::Configuration(format!(
                        "cannot parse credential file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                values.insert(key, Secret::new(value));
            }
        }

        tracing::debug!(path = %path.display(), keys = values.len(), "Credential store loaded");

        Ok(Self { path, values })
    }

    /// Stored value for `key`
    ///
    /// Absent and empty values are both reported as missing.
    pub fn get(&self, key: &str) -> Result<String> {
        self.get_optional(key)
            .ok_or_else(|| ClientError::MissingCredential(key.to_string()))
    }

    /// Stored value for `key`, `None` when absent or empty
    pub fn get_optional(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.expose_secret())
            .filter(|v| !v.is_empty())
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_optional(key).is_some()
    }

    /// Upsert `key` and flush the file immediately
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    /// Upsert several keys with a single rewrite of the file
    ///
    /// Either every entry reaches the file or none does.
    pub fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, _) in entries {
            validate_key(key)?;
        }

        let mut updated = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(ClientError::Configuration(format!(
                    "cannot read credential file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        for (key, value) in entries {
            updated = upsert_line(&updated, key, value);
        }
        write_atomically(&self.path, &updated)?;

        for (key, value) in entries {
            self.values
                .insert(key.to_string(), Secret::new(value.to_string()));
            tracing::debug!(key, path = %self.path.display(), "Credential stored");
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("values", &"<redacted>")
            .finish()
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(ClientError::Configuration(format!(
            "invalid credential key: {:?}",
            key
        )))
    }
}

/// Key defined by a `KEY=value` line, if any
fn line_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, _) = trimmed.split_once('=')?;
    Some(key.trim())
}

/// Replace the first definition of `key`, drop later duplicates, append when absent
fn upsert_line(content: &str, key: &str, value: &str) -> String {
    let entry = format!("{}={}", key, encode_value(value));
    let mut replaced = false;
    let mut lines = Vec::new();

    for line in content.lines() {
        if line_key(line) == Some(key) {
            if !replaced {
                lines.push(entry.clone());
                replaced = true;
            }
            continue;
        }
        lines.push(line.to_string());
    }

    if !replaced {
        lines.push(entry);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Serialise a value so that dotenv parses it back verbatim
fn encode_value(value: &str) -> String {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.~+/=@:,".contains(c));
    if plain {
        return value.to_string();
    }

    if !value.contains('\'') && !value.contains('\n') {
        return format!("'{}'", value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Replace `path` via a sibling temp file and rename
///
/// The existing file mode is kept; a new file is created owner-only.
/// The temp file is removed on any failure.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ClientError::Configuration(format!("invalid credential path {}", path.display()))
        })?;
    let tmp_path = dir.join(format!(
        ".{}.{}.{}.tmp",
        file_name,
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));

    #[cfg(unix)]
    let mode = {
        use std::os::unix::fs::PermissionsExt;
        match fs::metadata(path) {
            Ok(meta) => meta.permissions().mode() & 0o7777,
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0o600,
            Err(e) => {
                return Err(ClientError::Configuration(format!(
                    "cannot stat credential file {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    };

    let write_result = (|| -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(mode))?;
        }

        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(ClientError::Configuration(format!(
            "cannot write credential file {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}
