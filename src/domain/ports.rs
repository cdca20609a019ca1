use crate::domain::model::{Booking, Guest, Room};
use crate::utils::error::Result;

/// Everything a storage backend persists, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelSnapshot {
    pub rooms: Vec<Room>,
    pub guests: Vec<Guest>,
    pub bookings: Vec<Booking>,
}

pub trait Storage {
    fn load(&self) -> Result<HotelSnapshot>;
    fn save(&self, rooms: &[Room], guests: &[Guest], bookings: &[Booking]) -> Result<()>;
}
