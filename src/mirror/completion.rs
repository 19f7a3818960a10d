#![allow(unsafe_code)]

use core::cell::UnsafeCell;

use crate::mirror::driver::OpResult;

/// One-shot handoff slot for a storage completion.
///
/// Carries the single completion status of an in-flight command from
/// interrupt context to thread context: the interrupt side calls
/// [`signal`](Self::signal), the driver's
/// [`poll_complete`](crate::mirror::StorageDriver::poll_complete) drains
/// it with [`take`](Self::take). At most one completion is buffered,
/// matching the one-command-in-flight contract; a later signal
/// overwrites an earlier one that was never drained.
pub struct CompletionCell {
    slot: UnsafeCell<Option<OpResult>>,
}

// Access to the slot is serialized through critical sections.
unsafe impl Sync for CompletionCell {}

impl CompletionCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            slot: UnsafeCell::new(None),
        }
    }

    /// Records the completion of the in-flight command.
    pub fn signal(&self, status: OpResult) {
        critical_section::with(|_| unsafe { *self.slot.get() = Some(status) });
    }

    /// Takes the buffered completion, if one has arrived.
    pub fn take(&self) -> Option<OpResult> {
        critical_section::with(|_| unsafe { (*self.slot.get()).take() })
    }

    /// True while a completion is waiting to be drained.
    pub fn is_signalled(&self) -> bool {
        critical_section::with(|_| unsafe { (*self.slot.get()).is_some() })
    }
}

impl Default for CompletionCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::driver::StorageFault;

    #[test]
    fn signalled_status_is_handed_out_once() {
        let cell = CompletionCell::new();
        assert!(!cell.is_signalled());
        assert_eq!(cell.take(), None);

        cell.signal(Ok(()));
        assert!(cell.is_signalled());
        assert_eq!(cell.take(), Some(Ok(())));

        assert_eq!(cell.take(), None);
        assert!(!cell.is_signalled());
    }

    #[test]
    fn later_signal_overwrites_an_undrained_one() {
        let cell = CompletionCell::new();
        cell.signal(Err(StorageFault::MediumError));
        cell.signal(Ok(()));

        assert_eq!(cell.take(), Some(Ok(())));
    }

    #[test]
    fn faults_pass_through_unchanged() {
        let cell = CompletionCell::new();
        cell.signal(Err(StorageFault::NotPresent));

        assert_eq!(cell.take(), Some(Err(StorageFault::NotPresent)));
    }
}
