/*!
 * Process Names
 * Owned, inline-optimized storage for process display names
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Owned display name of a process
///
/// Each [`ProcessRecord`](crate::process::ProcessRecord) holds its own
/// `ProcessName`; cloning copies the text, so two records never share a
/// buffer and each copy is freed exactly once when it drops.
///
/// Names up to 23 bytes (most kernel `comm` values) are stored inline
/// without a heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ProcessName {
    inner: SmartString,
}

impl ProcessName {
    /// Get string slice
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Check if the name is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Build a name from raw bytes reported by the OS, replacing invalid UTF-8
    /// and stripping trailing NULs and newlines
    pub fn from_os_bytes(raw: &[u8]) -> Self {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let text = String::from_utf8_lossy(&raw[..end]);
        Self::from(text.trim_end_matches(['\n', '\r']))
    }

    pub fn into_string(self) -> String {
        self.inner.into()
    }
}

impl From<&str> for ProcessName {
    #[inline]
    fn from(s: &str) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<String> for ProcessName {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<ProcessName> for String {
    #[inline]
    fn from(name: ProcessName) -> Self {
        name.inner.into()
    }
}

impl AsRef<str> for ProcessName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::ops::Deref for ProcessName {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
