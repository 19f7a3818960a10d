//! Flash-backed mirroring of fixed-size application state for `no_std`
//! embedded systems.
//!
//! A fixed-size structure declared by the application lives twice: the
//! authoritative last-saved copy in a persistent region of flash, and a
//! working copy (the shadow) in RAM. This crate implements the explicit
//! synchronization protocol between the two copies over a coarse,
//! command/completion storage driver.
//!
//! # Features
//!
//! - **Zero heap allocation** - the shadow is an owned `[u8; N]`
//! - **Explicit synchronization** - state moves only on `load` and `save`
//! - **Blocking and non-blocking saves** - wait for completion, or get a callback
//! - **Single-outstanding-operation discipline** - enforced by the store, not the caller
//! - **Driver-agnostic** - any controller behind the [`StorageDriver`](mirror::StorageDriver) trait
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐    load (flash → RAM)     ┌────────────────────┐
//! │  persistent region │ ────────────────────────▶ │     RAM shadow     │
//! │ (last-saved image) │ ◀──────────────────────── │   (working copy)   │
//! └────────────────────┘    save (RAM → flash)     └────────────────────┘
//!           ▲                                                ▲
//!           │ start_read / start_write       shadow() / with_shadow_mut()
//!           │ poll_complete                                  │
//!     StorageDriver ◀────────── MirrorStore ──────────▶ application
//! ```
//!
//! The application mutates the shadow freely between operations; `load`
//! and `save` move the whole image at once. Exactly one operation may be
//! in flight at any instant; the store tracks this itself and rejects
//! overlapping requests with [`MirrorError::Busy`](mirror::MirrorError::Busy).
//!
//! # Example
//!
//! ```rust
//! use flash_mirror::prelude::*;
//!
//! // Driver over a RAM image standing in for the flash controller.
//! struct SramFlash {
//!     image: [u8; 64],
//!     done: Option<OpResult>,
//! }
//!
//! impl StorageDriver for SramFlash {
//!     fn start_read(&mut self, _region: Region, dest: &mut [u8]) -> Result<(), StorageFault> {
//!         dest.copy_from_slice(&self.image[..dest.len()]);
//!         self.done = Some(Ok(()));
//!         Ok(())
//!     }
//!
//!     fn start_write(&mut self, _region: Region, src: &[u8]) -> Result<(), StorageFault> {
//!         self.image[..src.len()].copy_from_slice(src);
//!         self.done = Some(Ok(()));
//!         Ok(())
//!     }
//!
//!     fn poll_complete(&mut self) -> Option<OpResult> {
//!         self.done.take()
//!     }
//! }
//!
//! let driver = SramFlash { image: [0xFF; 64], done: None };
//! let mut store: MirrorStore<16, _> = MirrorStore::new(driver);
//!
//! // Bind the persistent region, then pull its image into RAM.
//! store.configure(Region::new(0x0800_0000, 64)).unwrap();
//! store.load().unwrap();
//!
//! // Mutate the working copy, then push it back out.
//! store.with_shadow_mut(|state| state[0] = 1).unwrap();
//! store.save_blocking().unwrap();
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod mirror;

pub mod prelude {
    pub use crate::mirror::prelude::*;
}
