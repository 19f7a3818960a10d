use crate::mirror::driver::StorageFault;

/// Errors reported by the mirror store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MirrorError {
    /// No persistent region has been configured.
    Unbound,
    /// Another load or save is still in flight.
    Busy,
    /// The mirrored state has zero size.
    ZeroSize,
    /// The persistent region is smaller than the mirrored state.
    RegionTooSmall,
    /// The storage driver refused or failed the command.
    Fault(StorageFault),
}

impl From<StorageFault> for MirrorError {
    fn from(fault: StorageFault) -> Self {
        MirrorError::Fault(fault)
    }
}

impl core::fmt::Display for MirrorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MirrorError::Unbound => write!(f, "no persistent region configured"),
            MirrorError::Busy => write!(f, "another operation is in flight"),
            MirrorError::ZeroSize => write!(f, "mirrored state has zero size"),
            MirrorError::RegionTooSmall => write!(f, "persistent region smaller than state"),
            MirrorError::Fault(fault) => write!(f, "storage fault: {fault}"),
        }
    }
}
