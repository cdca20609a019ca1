use crate::domain::model::{Booking, Guest, Room};
use crate::domain::ports::{HotelSnapshot, Storage};
use crate::utils::error::Result;
use std::cell::{Cell, RefCell};

/// Keeps the last saved snapshot in process memory. Nothing survives the
/// process; backs the service in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: RefCell<HotelSnapshot>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: HotelSnapshot) -> Self {
        Self {
            snapshot: RefCell::new(snapshot),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> HotelSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<HotelSnapshot> {
        Ok(self.snapshot())
    }

    fn save(&self, rooms: &[Room], guests: &[Guest], bookings: &[Booking]) -> Result<()> {
        *self.snapshot.borrow_mut() = HotelSnapshot {
            rooms: rooms.to_vec(),
            guests: guests.to_vec(),
            bookings: bookings.to_vec(),
        };
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
