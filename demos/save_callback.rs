//! Non-blocking save example: completion via callback
//!
//! This example demonstrates:
//! - Issuing a save that returns as soon as the command is accepted
//! - Pumping completions from the application's event loop
//! - The single-outstanding-operation discipline

#![no_std]

use core::sync::atomic::{AtomicUsize, Ordering};

use flash_mirror::prelude::*;

/// Driver that holds the completion back for a couple of polls, as a
/// real controller would while the page programs.
struct SramFlash {
    image: [u8; 32],
    done: Option<OpResult>,
    polls_left: usize,
}

impl StorageDriver for SramFlash {
    fn start_read(&mut self, _region: Region, dest: &mut [u8]) -> Result<(), StorageFault> {
        dest.copy_from_slice(&self.image[..dest.len()]);
        self.done = Some(Ok(()));
        self.polls_left = 2;
        Ok(())
    }

    fn start_write(&mut self, _region: Region, src: &[u8]) -> Result<(), StorageFault> {
        self.image[..src.len()].copy_from_slice(src);
        self.done = Some(Ok(()));
        self.polls_left = 2;
        Ok(())
    }

    fn poll_complete(&mut self) -> Option<OpResult> {
        if self.done.is_some() && self.polls_left > 0 {
            self.polls_left -= 1;
            return None;
        }
        self.done.take()
    }
}

static SAVES_COMPLETED: AtomicUsize = AtomicUsize::new(0);

fn on_save_done(status: OpResult, token: usize) {
    assert_eq!(status, Ok(()));
    assert_eq!(token, 42);
    SAVES_COMPLETED.fetch_add(1, Ordering::Relaxed);
}

pub fn main() {
    let driver = SramFlash {
        image: [0; 32],
        done: None,
        polls_left: 0,
    };
    let mut store: MirrorStore<16, _> = MirrorStore::new(driver);
    store.configure(Region::new(0, 32)).unwrap();

    store.with_shadow_mut(|state| state[0] = 0xC0).unwrap();

    // Accepted immediately; the callback has not run yet.
    store.save(on_save_done, 42).unwrap();
    assert_eq!(SAVES_COMPLETED.load(Ordering::Relaxed), 0);
    assert!(store.busy());

    // A second save while one is in flight is dropped, not queued.
    assert_eq!(store.save(on_save_done, 43), Err(MirrorError::Busy));

    // Event loop: pump until the completion lands.
    while store.poll().is_none() {
        // other application work would run here
    }

    assert_eq!(SAVES_COMPLETED.load(Ordering::Relaxed), 1);
    assert!(!store.busy());

    // The image really is on the medium now.
    store.with_shadow_mut(|state| state.fill(0)).unwrap();
    store.load().unwrap();
    assert_eq!(store.shadow()[0], 0xC0);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_save_callback_example() {
        super::main();
    }
}
