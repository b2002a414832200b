//! Cursor type

use crate::error::{Error, Result};
use crate::types::Key;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Caller-held continuation state for one paging sequence
///
/// A fresh cursor has no last-evaluated key and means "start of partition".
/// After a call, a missing key means the sequence is finished. The scan
/// direction must stay the same for the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Number of filtered records wanted per page
    pub page_limit: u32,

    /// Index key of the last record returned
    #[serde(default)]
    pub last_evaluated_key: Option<Key>,

    /// Walk the index in descending order
    #[serde(default)]
    pub scan_descending: bool,
}

impl Cursor {
    /// Fresh ascending cursor
    pub fn new(page_limit: u32) -> Self {
        Self {
            page_limit,
            last_evaluated_key: None,
            scan_descending: false,
        }
    }

    /// Set the scan direction
    #[must_use]
    pub fn descending(mut self, scan_descending: bool) -> Self {
        self.scan_descending = scan_descending;
        self
    }

    /// Replace the resume key, keeping limit and direction
    #[must_use]
    pub fn resume_at(&self, last_evaluated_key: Option<Key>) -> Self {
        Self {
            last_evaluated_key,
            ..self.clone()
        }
    }

    /// Whether a resume key is present
    pub fn has_resume_key(&self) -> bool {
        self.last_evaluated_key.is_some()
    }

    /// Reject cursors that cannot drive a query
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(Error::InvalidPageLimit {
                limit: self.page_limit,
            });
        }
        Ok(())
    }

    /// Encode as an opaque URL-safe token
    pub fn to_token(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a token produced by [`Cursor::to_token`]
    pub fn from_token(token: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| Error::cursor(format!("not base64: {e}")))?;
        let cursor: Self = serde_json::from_slice(&bytes)
            .map_err(|e| Error::cursor(format!("not a cursor: {e}")))?;
        cursor.validate()?;
        Ok(cursor)
    }
}
