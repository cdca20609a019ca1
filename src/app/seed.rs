use crate::adapters::JsonFileStorage;
use crate::domain::model::{Guest, Room};
use crate::domain::ports::{HotelSnapshot, Storage};
use crate::utils::error::Result;

/// Three rooms and two guests, no bookings.
pub fn sample_data() -> Result<HotelSnapshot> {
    Ok(HotelSnapshot {
        rooms: vec![
            Room::new(101, "single", 100.0)?,
            Room::new(102, "double", 150.0)?,
            Room::new(103, "suite", 250.0)?,
        ],
        guests: vec![
            Guest::new("guest-001", "John Doe", "john@example.com")?,
            Guest::new("guest-002", "Jane Smith", "jane@example.com")?,
        ],
        bookings: Vec::new(),
    })
}

/// Fills in the sample rooms when `rooms.json` is missing and the sample
/// guests when `guests.json` is missing; whatever is already stored is kept.
/// Returns whether anything was written.
pub fn seed_if_empty(storage: &JsonFileStorage) -> Result<bool> {
    let seed_rooms = !storage.rooms_path().exists();
    let seed_guests = !storage.guests_path().exists();
    if !seed_rooms && !seed_guests {
        tracing::info!("Data files already present, skipping seed");
        return Ok(false);
    }

    let mut data = storage.load()?;
    let sample = sample_data()?;
    if seed_rooms {
        data.rooms = sample.rooms;
        tracing::info!("Seeding {} rooms into {}", data.rooms.len(), storage.rooms_path().display());
    }
    if seed_guests {
        data.guests = sample.guests;
        tracing::info!("Seeding {} guests into {}", data.guests.len(), storage.guests_path().display());
    }
    storage.save(&data.rooms, &data.guests, &data.bookings)?;
    Ok(true)
}
