//! Test support utilities - only compiled in test builds.

use heapless::Vec;

use crate::mirror::{
    driver::{OpResult, StorageDriver, StorageFault},
    region::Region,
    store::MirrorStore,
};

/// Commands accepted by [`MemDriver`], in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Read { base: u32, len: usize },
    Write { base: u32, len: usize },
}

/// RAM-backed driver simulating a single-slot persistent medium.
///
/// Transfers happen during `start_*`; the completion is buffered and
/// handed out by `poll_complete` after `latency` empty polls. Faults
/// can be injected at issue time (`refuse_next`) or at completion time
/// (`fail_next`).
pub struct MemDriver<const CAP: usize> {
    pub image: [u8; CAP],
    pub programmed: bool,
    pub inflight: Option<OpResult>,
    pub latency: usize,
    pub countdown: usize,
    pub refuse_next: Option<StorageFault>,
    pub fail_next: Option<StorageFault>,
    pub relax_calls: usize,
    pub journal: Vec<Command, 8>,
}

impl<const CAP: usize> MemDriver<CAP> {
    pub fn new() -> Self {
        Self {
            image: [0xFF; CAP],
            programmed: false,
            inflight: None,
            latency: 0,
            countdown: 0,
            refuse_next: None,
            fail_next: None,
            relax_calls: 0,
            journal: Vec::new(),
        }
    }

    /// Driver whose medium already holds `image`, as if a previous run
    /// had saved it.
    pub fn programmed_with(image: [u8; CAP]) -> Self {
        let mut driver = Self::new();
        driver.image = image;
        driver.programmed = true;
        driver
    }

    fn finish(&mut self, status: OpResult) {
        self.inflight = Some(status);
        self.countdown = self.latency;
    }
}

impl<const CAP: usize> Default for MemDriver<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> StorageDriver for MemDriver<CAP> {
    fn start_read(&mut self, region: Region, dest: &mut [u8]) -> Result<(), StorageFault> {
        if let Some(fault) = self.refuse_next.take() {
            return Err(fault);
        }
        if dest.len() > region.len() || region.len() > CAP {
            return Err(StorageFault::SizeMismatch);
        }
        let _ = self.journal.push(Command::Read {
            base: region.base(),
            len: dest.len(),
        });
        if let Some(fault) = self.fail_next.take() {
            self.finish(Err(fault));
        } else if !self.programmed {
            self.finish(Err(StorageFault::NotPresent));
        } else {
            dest.copy_from_slice(&self.image[..dest.len()]);
            self.finish(Ok(()));
        }
        Ok(())
    }

    fn start_write(&mut self, region: Region, src: &[u8]) -> Result<(), StorageFault> {
        if let Some(fault) = self.refuse_next.take() {
            return Err(fault);
        }
        if src.len() > region.len() || region.len() > CAP {
            return Err(StorageFault::SizeMismatch);
        }
        let _ = self.journal.push(Command::Write {
            base: region.base(),
            len: src.len(),
        });
        if let Some(fault) = self.fail_next.take() {
            self.finish(Err(fault));
        } else {
            self.image[..src.len()].copy_from_slice(src);
            self.programmed = true;
            self.finish(Ok(()));
        }
        Ok(())
    }

    fn poll_complete(&mut self) -> Option<OpResult> {
        if self.inflight.is_some() && self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        self.inflight.take()
    }

    fn relax(&mut self) {
        self.relax_calls += 1;
    }
}

/// Standard test configuration: 8-byte state in a 16-byte region.
pub const TEST_REGION: Region = Region::new(0x100, 16);

pub type TestDriver = MemDriver<16>;
pub type TestStore = MirrorStore<8, TestDriver>;

/// Store bound to [`TEST_REGION`] over a blank medium.
pub fn blank_store() -> TestStore {
    let mut store = MirrorStore::new(TestDriver::new());
    store.configure(TEST_REGION).unwrap();
    store
}

/// Store bound to [`TEST_REGION`] over a medium already holding `image`.
pub fn programmed_store(image: [u8; 16]) -> TestStore {
    let mut store = MirrorStore::new(TestDriver::programmed_with(image));
    store.configure(TEST_REGION).unwrap();
    store
}
