//! In-memory slot, used by tests and ephemeral hosts.

use super::{PersistenceSlot, SlotError, SlotResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Process-local slot storage with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot rejecting writes whose stored total would exceed `quota_bytes`.
    ///
    /// Usage counts key and value bytes of every entry, like browser storage.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Slot that fails every access, as when storage is turned off.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Seeds raw content, bypassing quota checks.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.borrow_mut().insert(key.into(), value.into());
    }

    /// Returns the raw stored value for inspection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn ensure_enabled(&self) -> SlotResult<()> {
        if self.disabled {
            return Err(SlotError::Unavailable("storage is disabled".to_string()));
        }
        Ok(())
    }

    fn usage_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .values
            .borrow()
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, stored)| existing.len() + stored.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self, key: &str) -> SlotResult<Option<String>> {
        self.ensure_enabled()?;
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> SlotResult<()> {
        self.ensure_enabled()?;
        if let Some(quota_bytes) = self.quota_bytes {
            let attempted_bytes = self.usage_with(key, value);
            if attempted_bytes > quota_bytes {
                return Err(SlotError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes,
                    quota_bytes,
                });
            }
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> SlotResult<()> {
        self.ensure_enabled()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySlot;
    use crate::slot::{PersistenceSlot, SlotError};

    #[test]
    fn unset_key_reads_none_and_clear_is_noop() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("books").unwrap(), None);
        slot.clear("books").unwrap();

        slot.write("books", "[]").unwrap();
        assert_eq!(slot.read("books").unwrap().as_deref(), Some("[]"));
        slot.clear("books").unwrap();
        assert_eq!(slot.read("books").unwrap(), None);
    }

    #[test]
    fn quota_counts_replacement_not_accumulation() {
        let slot = MemorySlot::with_quota(10);
        slot.write("k", "123456789").unwrap();
        slot.write("k", "abcdefghi").unwrap();

        let err = slot.write("k", "0123456789").unwrap_err();
        assert!(matches!(
            err,
            SlotError::QuotaExceeded {
                attempted_bytes: 11,
                quota_bytes: 10,
                ..
            }
        ));
        assert_eq!(slot.raw("k").as_deref(), Some("abcdefghi"));
    }

    #[test]
    fn disabled_slot_fails_reads_and_writes() {
        let slot = MemorySlot::disabled();
        assert!(matches!(slot.read("k"), Err(SlotError::Unavailable(_))));
        assert!(matches!(slot.write("k", "v"), Err(SlotError::Unavailable(_))));
    }
}
