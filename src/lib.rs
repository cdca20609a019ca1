pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonFileStorage, MemoryStorage};
pub use app::Console;
pub use config::HotelConfig;
pub use crate::core::hotel::{Hotel, HotelService, DEFAULT_TAX_RATE};
pub use crate::core::payments::Invoice;
pub use crate::core::reports::{OccupancyReport, RevenueReport, RoomOccupancy};
pub use domain::model::{Booking, BookingStatus, DateRange, Guest, Room, RoomNumber, RoomStatus};
pub use domain::ports::{HotelSnapshot, Storage};
pub use utils::error::{ErrorKind, HotelError, Result};
