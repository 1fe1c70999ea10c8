pub mod config;
pub mod error;
pub mod reading;
pub mod transmit;

// Re-export commonly used items
pub use config::Config;
pub use error::{AppError, Result};
pub use reading::SensorReading;
pub use transmit::{ReadingAck, Transmitter};
