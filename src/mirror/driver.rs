use crate::mirror::region::Region;

/// Failure kinds a storage driver can report.
///
/// Faults travel to the caller verbatim, wrapped in
/// [`MirrorError::Fault`](crate::mirror::MirrorError::Fault), whether
/// raised when the command was issued or by its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageFault {
    /// The persistent region has never been programmed.
    NotPresent,
    /// The medium reported a hardware fault during the transfer.
    MediumError,
    /// The driver refused the requested transfer length.
    SizeMismatch,
}

impl core::fmt::Display for StorageFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageFault::NotPresent => write!(f, "persistent region never programmed"),
            StorageFault::MediumError => write!(f, "storage medium fault"),
            StorageFault::SizeMismatch => write!(f, "transfer length refused by driver"),
        }
    }
}

/// Final status of one storage command, as carried by its completion.
pub type OpResult = Result<(), StorageFault>;

/// Interface to the controller that owns the persistent medium.
///
/// Commands are coarse: the whole region is read or written in a single
/// transfer. An accepted command yields exactly one completion, drained
/// through [`poll_complete`](Self::poll_complete). At most one command
/// is in flight at a time; [`MirrorStore`](crate::mirror::MirrorStore)
/// enforces this, implementations may assume it.
pub trait StorageDriver {
    /// Begins reading the persistent region into `dest`.
    ///
    /// The driver fills `dest` before returning - the bytes land
    /// directly in the caller's buffer, with no intermediate copy - and
    /// the completion that follows carries the outcome of the transfer.
    /// `Err` means the command was refused; a refused command never
    /// produces a completion.
    fn start_read(&mut self, region: Region, dest: &mut [u8]) -> Result<(), StorageFault>;

    /// Begins programming the persistent region from `src`.
    ///
    /// The driver latches `src` before returning; the slice is not
    /// borrowed across the completion. `Err` means the command was
    /// refused; a refused command never produces a completion.
    fn start_write(&mut self, region: Region, src: &[u8]) -> Result<(), StorageFault>;

    /// Drains the completion of the in-flight command, if it has arrived.
    ///
    /// Returns `Some` exactly once per accepted command.
    fn poll_complete(&mut self) -> Option<OpResult>;

    /// Called while a blocking operation waits for a completion.
    ///
    /// Ports should override this to sleep until the storage interrupt
    /// fires; the default busy-spins.
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}
