use super::NetworkError;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to a file holding one hex-encoded private key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CredentialPath(PathBuf);

impl CredentialPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Absolute paths are kept as they are; relative ones are joined onto `base`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        if self.0.is_absolute() {
            self.0.clone()
        } else {
            base.join(&self.0)
        }
    }

    /// Reads and decodes the key file.
    pub fn load(&self, base: &Path) -> Result<SigningKey, NetworkError> {
        let path = self.resolve(base);
        let contents = std::fs::read_to_string(&path).map_err(|source| NetworkError::Io {
            path: path.clone(),
            source,
        })?;
        let key = SigningKey::from_hex(&contents).map_err(|reason| NetworkError::Credential {
            path: path.clone(),
            reason,
        })?;
        debug!(path = %path.display(), "Loaded signing key");
        Ok(key)
    }
}

/// A 32-byte private key. Its `Debug` output never shows the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Parses 64 hex digits, with or without a `0x` prefix. Surrounding
    /// whitespace (such as a trailing newline) is ignored.
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 64 {
            return Err(format!("expected 64 hex digits, got {}", digits.len()));
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| format!("malformed key: {e}"))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_key_parses_with_prefix_and_newline() {
        let plain = SigningKey::from_hex(KEY).unwrap();
        let prefixed = SigningKey::from_hex(&format!("0x{KEY}\n")).unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_bytes()[0], 0x4c);
        assert_eq!(plain.as_bytes()[31], 0x18);
    }

    #[test]
    fn test_upper_case_digits_decode() {
        let upper = SigningKey::from_hex(&format!("0X{}", KEY.to_ascii_uppercase())).unwrap();
        assert_eq!(upper, SigningKey::from_hex(KEY).unwrap());
    }

    #[test]
    fn test_malformed_keys_are_rejected() {
        assert!(SigningKey::from_hex("abc").is_err());
        assert!(SigningKey::from_hex(&KEY.replace('4', "g")).is_err());
        assert!(SigningKey::from_hex(&format!("+{}", &KEY[1..])).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SigningKey::from_hex(KEY).unwrap();
        let shown = format!("{key:?}");
        assert_eq!(shown, "SigningKey(<redacted>)");
        assert!(!shown.contains("4c08"));
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let relative = CredentialPath::new("secrete.txt");
        assert_eq!(relative.resolve(Path::new("/etc/app")), PathBuf::from("/etc/app/secrete.txt"));

        let absolute = CredentialPath::new("/keys/deployer");
        assert_eq!(absolute.resolve(Path::new("/etc/app")), PathBuf::from("/keys/deployer"));
    }

    #[test]
    fn test_load_reads_key_file() {
        let dir = std::env::temp_dir().join(format!("supply-guard-cred-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("key.txt"), format!("{KEY}\n")).unwrap();
        std::fs::write(dir.join("bad.txt"), "not a key").unwrap();

        let key = CredentialPath::new("key.txt").load(&dir).unwrap();
        assert_eq!(key, SigningKey::from_hex(KEY).unwrap());

        let bad = CredentialPath::new("bad.txt").load(&dir);
        assert!(matches!(bad, Err(NetworkError::Credential { .. })));

        let missing = CredentialPath::new("missing.txt").load(&dir);
        assert!(matches!(missing, Err(NetworkError::Io { .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
