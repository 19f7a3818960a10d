use crate::mirror::{
    driver::{OpResult, StorageDriver},
    error::MirrorError,
    region::Region,
};

/// Callback invoked when a non-blocking [`MirrorStore::save`] completes.
///
/// Receives the final status reported by the driver and the opaque
/// token that was handed to [`MirrorStore::save`], unchanged.
pub type SaveCallback = fn(status: OpResult, token: usize);

/// The single operation that may be outstanding.
#[derive(Clone, Copy)]
enum Pending {
    Idle,
    Load,
    Save {
        notify: Option<(SaveCallback, usize)>,
    },
}

/// Mirror of a fixed-size application state structure between a
/// persistent region and an `N`-byte RAM working copy.
///
/// The store is an ordinary caller-held value: construct one per state
/// structure, [`configure`](Self::configure) it once at startup, and
/// keep it for the life of the application. Each operation walks
/// `Idle → Issued → (Completed | Failed) → Idle`; only one operation is
/// ever in `Issued`, and the store itself tracks that rather than
/// trusting caller discipline.
pub struct MirrorStore<const N: usize, D: StorageDriver> {
    driver: D,
    shadow: [u8; N],
    region: Option<Region>,
    pending: Pending,
}

impl<const N: usize, D: StorageDriver> core::fmt::Debug for MirrorStore<N, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MirrorStore").finish_non_exhaustive()
    }
}

impl<const N: usize, D: StorageDriver> MirrorStore<N, D> {
    /// Creates a store with no persistent region bound.
    ///
    /// The shadow starts zeroed; [`load`](Self::load) replaces it with
    /// the last-saved image.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            shadow: [0; N],
            region: None,
            pending: Pending::Idle,
        }
    }

    /// Binds the persistent region backing the mirrored state.
    ///
    /// Re-binding while idle replaces the previous region; re-binding
    /// while an operation is outstanding fails with
    /// [`MirrorError::Busy`] and leaves the previous binding in place.
    /// A rejected call never records a binding.
    pub fn configure(&mut self, region: Region) -> Result<(), MirrorError> {
        if self.busy() {
            return Err(MirrorError::Busy);
        }
        if N == 0 {
            return Err(MirrorError::ZeroSize);
        }
        if region.len() < N {
            return Err(MirrorError::RegionTooSmall);
        }
        self.region = Some(region);
        Ok(())
    }

    /// True while a load or save is outstanding.
    pub fn busy(&self) -> bool {
        !matches!(self.pending, Pending::Idle)
    }

    /// Read access to the RAM working copy.
    pub fn shadow(&self) -> &[u8; N] {
        &self.shadow
    }

    /// Mutates the RAM working copy through `f`.
    ///
    /// Denied with [`MirrorError::Busy`] while an operation is
    /// outstanding: the driver may still be transferring the bytes.
    pub fn with_shadow_mut<R>(
        &mut self,
        f: impl FnOnce(&mut [u8; N]) -> R,
    ) -> Result<R, MirrorError> {
        if self.busy() {
            return Err(MirrorError::Busy);
        }
        Ok(f(&mut self.shadow))
    }

    /// Copies the persistent region into the RAM shadow, blocking until
    /// the driver reports completion.
    ///
    /// Driver faults (region never programmed, medium error) are passed
    /// through unchanged as [`MirrorError::Fault`]. There is no
    /// non-blocking load: callers need the data before proceeding.
    pub fn load(&mut self) -> Result<(), MirrorError> {
        let region = self.region.ok_or(MirrorError::Unbound)?;
        if self.busy() {
            return Err(MirrorError::Busy);
        }
        self.pending = Pending::Load;
        if let Err(fault) = self.driver.start_read(region, &mut self.shadow) {
            self.pending = Pending::Idle;
            return Err(MirrorError::Fault(fault));
        }
        let status = self.wait_complete();
        self.pending = Pending::Idle;
        status.map_err(MirrorError::Fault)
    }

    /// Begins writing the RAM shadow into the persistent region.
    ///
    /// `Ok(())` means the command was accepted, not that it completed.
    /// `notify` fires exactly once, from a later [`poll`](Self::poll),
    /// with the final status and `token` unchanged; it never fires
    /// before this call returns, and never for a rejected call. A
    /// request made while another operation is outstanding is dropped
    /// entirely, never queued.
    pub fn save(&mut self, notify: SaveCallback, token: usize) -> Result<(), MirrorError> {
        self.issue_save(Some((notify, token)))
    }

    /// Writes the RAM shadow into the persistent region, blocking until
    /// the driver reports completion, and returns the final status.
    ///
    /// Issues the same write as [`save`](Self::save) with no
    /// application-visible callback and waits on its single completion.
    pub fn save_blocking(&mut self) -> Result<(), MirrorError> {
        self.issue_save(None)?;
        let status = self.wait_complete();
        self.pending = Pending::Idle;
        status.map_err(MirrorError::Fault)
    }

    /// Delivers the completion of an outstanding non-blocking save.
    ///
    /// Call from the application's event loop. Returns the status that
    /// was consumed, if any. A completion arriving while nothing is
    /// outstanding is drained and dropped.
    pub fn poll(&mut self) -> Option<OpResult> {
        match self.pending {
            Pending::Save { notify } => {
                let status = self.driver.poll_complete()?;
                self.pending = Pending::Idle;
                if let Some((callback, token)) = notify {
                    callback(status, token);
                }
                Some(status)
            }
            _ => {
                // stray completion: nothing we issued is waiting for it
                let _ = self.driver.poll_complete();
                None
            }
        }
    }

    fn issue_save(&mut self, notify: Option<(SaveCallback, usize)>) -> Result<(), MirrorError> {
        let region = self.region.ok_or(MirrorError::Unbound)?;
        if self.busy() {
            return Err(MirrorError::Busy);
        }
        self.pending = Pending::Save { notify };
        if let Err(fault) = self.driver.start_write(region, &self.shadow) {
            self.pending = Pending::Idle;
            return Err(MirrorError::Fault(fault));
        }
        Ok(())
    }

    fn wait_complete(&mut self) -> OpResult {
        loop {
            if let Some(status) = self.driver.poll_complete() {
                return status;
            }
            self.driver.relax();
        }
    }
}
