//! Single-slot copy buffer.

use hiveplan_types::slot::SlotConfig;

/// Holds at most one slot configuration snapshot.
///
/// Pasting reads the buffer without consuming it, so one copy can be pasted
/// into any number of slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    buffer: Option<SlotConfig>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer with a snapshot of `config`.
    pub fn copy(&mut self, config: SlotConfig) {
        tracing::debug!(bee = %config.bee.id, "slot copied to clipboard");
        self.buffer = Some(config);
    }

    pub fn peek(&self) -> Option<&SlotConfig> {
        self.buffer.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_none()
    }

    pub fn clear(&mut self) -> Option<SlotConfig> {
        self.buffer.take()
    }
}
