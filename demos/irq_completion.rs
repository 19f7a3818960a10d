//! Interrupt-driven completion example
//!
//! This example demonstrates:
//! - Routing the controller's completion through a CompletionCell
//! - Signalling the cell from interrupt context (simulated here)
//! - Overriding relax() for the blocking wait

#![no_std]

use flash_mirror::prelude::*;

/// Completion slot shared between the interrupt handler and the driver.
static FLASH_DONE: CompletionCell = CompletionCell::new();

/// Simulated storage interrupt handler.
fn flash_irq_handler(status: OpResult) {
    FLASH_DONE.signal(status);
}

struct IrqFlash {
    image: [u8; 32],
}

impl StorageDriver for IrqFlash {
    fn start_read(&mut self, _region: Region, dest: &mut [u8]) -> Result<(), StorageFault> {
        dest.copy_from_slice(&self.image[..dest.len()]);
        // On hardware the controller raises its interrupt when the
        // transfer settles; simulate it inline.
        flash_irq_handler(Ok(()));
        Ok(())
    }

    fn start_write(&mut self, _region: Region, src: &[u8]) -> Result<(), StorageFault> {
        self.image[..src.len()].copy_from_slice(src);
        flash_irq_handler(Ok(()));
        Ok(())
    }

    fn poll_complete(&mut self) -> Option<OpResult> {
        FLASH_DONE.take()
    }

    fn relax(&mut self) {
        // A real port would wait-for-interrupt here.
        core::hint::spin_loop();
    }
}

pub fn main() {
    let mut store: MirrorStore<8, _> = MirrorStore::new(IrqFlash { image: [0; 32] });
    store.configure(Region::new(0x0801_0000, 32)).unwrap();

    store
        .with_shadow_mut(|state| state.copy_from_slice(b"mirrored"))
        .unwrap();
    store.save_blocking().unwrap();

    store.with_shadow_mut(|state| state.fill(0)).unwrap();
    store.load().unwrap();
    assert_eq!(store.shadow(), b"mirrored");
}
