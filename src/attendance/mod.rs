pub mod classifier;
pub mod clock;
pub mod error;
pub mod geofence;
pub mod locks;
pub mod processor;

pub use clock::ScanClock;
pub use error::ScanError;
pub use processor::ScanProcessor;
