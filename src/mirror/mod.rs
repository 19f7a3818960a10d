pub mod completion;
pub mod driver;
pub mod error;
pub mod region;
pub mod store;

#[cfg(test)]
mod test_support;

pub use completion::CompletionCell;
pub use driver::{OpResult, StorageDriver, StorageFault};
pub use error::MirrorError;
pub use region::Region;
pub use store::{MirrorStore, SaveCallback};

pub mod prelude {
    pub use super::{
        CompletionCell, MirrorError, MirrorStore, OpResult, Region, SaveCallback, StorageDriver,
        StorageFault,
    };
}
