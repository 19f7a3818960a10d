//! Basic example: persistent state fundamentals
//!
//! This example demonstrates:
//! - Binding a persistent region to a RAM working copy
//! - Loading the last-saved image at startup
//! - Detecting a never-programmed region with a magic field
//! - Writing changes back with a blocking save

#![no_std]

use flash_mirror::prelude::*;

// ============ State Layout ============
// A fixed 12-byte structure, mirrored verbatim:
//   magic (u32) | boot_count (u32) | last_mode (u32)
const STATE_SIZE: usize = 12;
const MAGIC: u32 = 0x5AFE_5AFE;

/// Driver over a RAM image standing in for the flash controller.
struct SramFlash {
    image: [u8; 64],
    programmed: bool,
    done: Option<OpResult>,
}

impl SramFlash {
    fn new() -> Self {
        Self {
            image: [0xFF; 64],
            programmed: false,
            done: None,
        }
    }
}

impl StorageDriver for SramFlash {
    fn start_read(&mut self, _region: Region, dest: &mut [u8]) -> Result<(), StorageFault> {
        if !self.programmed {
            self.done = Some(Err(StorageFault::NotPresent));
            return Ok(());
        }
        dest.copy_from_slice(&self.image[..dest.len()]);
        self.done = Some(Ok(()));
        Ok(())
    }

    fn start_write(&mut self, _region: Region, src: &[u8]) -> Result<(), StorageFault> {
        self.image[..src.len()].copy_from_slice(src);
        self.programmed = true;
        self.done = Some(Ok(()));
        Ok(())
    }

    fn poll_complete(&mut self) -> Option<OpResult> {
        self.done.take()
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn write_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn main() {
    let mut store: MirrorStore<STATE_SIZE, _> = MirrorStore::new(SramFlash::new());

    // Bind the persistent region. On hardware the region would come
    // from a storage_region! volume; here the driver fakes the medium
    // in RAM.
    store.configure(Region::new(0x0800_0000, 64)).unwrap();

    // First boot: the region was never programmed.
    assert_eq!(
        store.load(),
        Err(MirrorError::Fault(StorageFault::NotPresent))
    );

    // Initialize defaults and persist them.
    store
        .with_shadow_mut(|state| {
            write_u32(state, 0, MAGIC);
            write_u32(state, 4, 1); // boot_count
            write_u32(state, 8, 0); // last_mode
        })
        .unwrap();
    store.save_blocking().unwrap();

    // Subsequent boot: the image comes back and the magic checks out.
    store.with_shadow_mut(|state| state.fill(0)).unwrap();
    store.load().unwrap();
    assert_eq!(read_u32(store.shadow(), 0), MAGIC);
    assert_eq!(read_u32(store.shadow(), 4), 1);

    // Bump the boot counter and write it back.
    store
        .with_shadow_mut(|state| {
            let boots = read_u32(state, 4);
            write_u32(state, 4, boots + 1);
        })
        .unwrap();
    store.save_blocking().unwrap();

    store.load().unwrap();
    assert_eq!(read_u32(store.shadow(), 4), 2);
}
