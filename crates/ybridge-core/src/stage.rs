//! String staging into linear memory.

use tracing::{debug, warn};
use ybridge_types::{BridgeError, Result};

use crate::memory::MemoryWindow;

/// UTF-8 bytes of a classified string, waiting for a destination offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedText {
    bytes: Vec<u8>,
}

impl StagedText {
    pub fn encode(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Copy the bytes to `[offset, offset + len)` of `window`. Returns the
    /// number of bytes written.
    pub fn stage_into<W: MemoryWindow + ?Sized>(self, window: &W, offset: usize) -> Result<usize> {
        window.write(offset, &self.bytes)?;
        debug!(offset, len = self.bytes.len(), "staged string");
        Ok(self.bytes.len())
    }
}

/// Single-slot handoff between `classify` and `stage_into`.
///
/// Holds at most one string. Callers must drain it with exactly one
/// `take` per classified string before the next string is classified.
#[derive(Debug, Default)]
pub struct HandoffSlot {
    pending: Option<StagedText>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text`, replacing anything not yet drained.
    pub fn put(&mut self, text: StagedText) {
        if let Some(dropped) = self.pending.replace(text) {
            warn!(
                len = dropped.len(),
                "classified string was never staged; overwriting"
            );
        }
    }

    /// Remove the pending text.
    pub fn take(&mut self) -> Result<StagedText> {
        self.pending.take().ok_or(BridgeError::NoBufferedString)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Byte length of the pending text, if any.
    pub fn pending_len(&self) -> Option<usize> {
        self.pending.as_ref().map(StagedText::len)
    }
}
