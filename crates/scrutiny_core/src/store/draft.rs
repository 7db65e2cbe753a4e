//! Two-step staged edit (open, stage, then commit or cancel).
//!
//! A draft holds a pending value for one target record. Cancelling drops the
//! draft; nothing is written to the target until the owner commits.

/// Pending edit for the record identified by `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft<K> {
    target: K,
    value: String,
}

impl<K: Copy + PartialEq> EditDraft<K> {
    /// Opens a draft prefilled with the record's current value.
    pub fn open(target: K, current: impl Into<String>) -> Self {
        Self {
            target,
            value: current.into(),
        }
    }

    pub fn target(&self) -> K {
        self.target
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Replaces the staged value.
    pub fn stage(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_for(&self, target: K) -> bool {
        self.target == target
    }

    pub fn into_value(self) -> String {
        self.value
    }
}
