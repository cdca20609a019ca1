use crate::core::payments::Invoice;
use crate::core::reports::{self, OccupancyReport, RevenueReport};
use crate::domain::model::{Booking, BookingStatus, DateRange, Guest, Room, RoomNumber, RoomStatus};
use crate::domain::ports::{HotelSnapshot, Storage};
use crate::utils::error::{HotelError, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;

pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Rooms, guests and bookings of one hotel, each keyed by id and kept in
/// insertion order.
#[derive(Debug, Clone)]
pub struct Hotel {
    name: String,
    rooms: IndexMap<RoomNumber, Room>,
    guests: IndexMap<String, Guest>,
    bookings: IndexMap<String, Booking>,
}

impl Hotel {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HotelError::invalid("Hotel name is required"));
        }
        Ok(Self {
            name,
            rooms: IndexMap::new(),
            guests: IndexMap::new(),
            bookings: IndexMap::new(),
        })
    }

    /// Rebuilds a hotel from persisted collections. Duplicate ids and active
    /// bookings that overlap on one room mean the files were edited by hand
    /// or corrupted, and are reported as storage errors.
    pub fn from_snapshot(name: impl Into<String>, snapshot: HotelSnapshot) -> Result<Self> {
        let mut hotel = Self::new(name)?;

        for room in snapshot.rooms {
            if hotel.rooms.contains_key(&room.number) {
                return Err(HotelError::storage(format!("Duplicate room {} in stored data", room.number)));
            }
            hotel.rooms.insert(room.number, room);
        }
        for guest in snapshot.guests {
            if hotel.guests.contains_key(&guest.guest_id) {
                return Err(HotelError::storage(format!(
                    "Duplicate guest {} in stored data",
                    guest.guest_id
                )));
            }
            hotel.guests.insert(guest.guest_id.clone(), guest);
        }
        for booking in snapshot.bookings {
            if hotel.bookings.contains_key(&booking.booking_id) {
                return Err(HotelError::storage(format!(
                    "Duplicate booking {} in stored data",
                    booking.booking_id
                )));
            }
            if booking.is_active() {
                let stay = booking.stay();
                if let Some(other) = hotel
                    .active_bookings_for(booking.room_number)
                    .find(|b| b.stay().overlaps(&stay))
                {
                    return Err(HotelError::storage(format!(
                        "Bookings {} and {} overlap on room {} in stored data",
                        other.booking_id, booking.booking_id, booking.room_number
                    )));
                }
            }
            hotel.bookings.insert(booking.booking_id.clone(), booking);
        }

        Ok(hotel)
    }

    pub fn snapshot(&self) -> HotelSnapshot {
        HotelSnapshot {
            rooms: self.rooms.values().cloned().collect(),
            guests: self.guests.values().cloned().collect(),
            bookings: self.bookings.values().cloned().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn guests(&self) -> impl Iterator<Item = &Guest> {
        self.guests.values()
    }

    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    pub fn room(&self, number: RoomNumber) -> Result<&Room> {
        self.rooms
            .get(&number)
            .ok_or_else(|| HotelError::not_found("Room", number))
    }

    pub fn guest(&self, guest_id: &str) -> Result<&Guest> {
        self.guests
            .get(guest_id)
            .ok_or_else(|| HotelError::not_found("Guest", guest_id))
    }

    pub fn booking(&self, booking_id: &str) -> Result<&Booking> {
        self.bookings
            .get(booking_id)
            .ok_or_else(|| HotelError::not_found("Booking", booking_id))
    }

    fn booking_mut(&mut self, booking_id: &str) -> Result<&mut Booking> {
        self.bookings
            .get_mut(booking_id)
            .ok_or_else(|| HotelError::not_found("Booking", booking_id))
    }

    pub fn add_room(&mut self, room: Room) -> Result<&Room> {
        room.check()?;
        if self.rooms.contains_key(&room.number) {
            return Err(HotelError::invalid(format!("Room {} already exists", room.number)));
        }
        let number = room.number;
        self.rooms.insert(number, room);
        Ok(&self.rooms[&number])
    }

    pub fn add_guest(&mut self, guest: Guest) -> Result<&Guest> {
        guest.check()?;
        if self.guests.contains_key(&guest.guest_id) {
            return Err(HotelError::invalid(format!("Guest {} already exists", guest.guest_id)));
        }
        let id = guest.guest_id.clone();
        self.guests.insert(id.clone(), guest);
        Ok(&self.guests[&id])
    }

    /// Bookings on `number` that currently hold the room.
    pub fn active_bookings_for(&self, number: RoomNumber) -> impl Iterator<Item = &Booking> {
        self.bookings
            .values()
            .filter(move |b| b.room_number == number && b.is_active())
    }

    /// True iff no active booking on the room overlaps `stay`.
    pub fn is_room_available(&self, number: RoomNumber, stay: &DateRange) -> bool {
        !self
            .active_bookings_for(number)
            .any(|b| b.stay().overlaps(stay))
    }

    pub fn room_status(&self, number: RoomNumber) -> RoomStatus {
        if self
            .active_bookings_for(number)
            .any(|b| b.status == BookingStatus::CheckedIn)
        {
            RoomStatus::Occupied
        } else {
            RoomStatus::Available
        }
    }

    fn next_id(prefix: &str, start: usize, taken: impl Fn(&str) -> bool) -> String {
        let mut n = start;
        loop {
            let candidate = format!("{}-{:04}", prefix, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn next_guest_id(&self) -> String {
        Self::next_id("G", self.guests.len() + 1, |id| self.guests.contains_key(id))
    }

    pub fn next_booking_id(&self) -> String {
        Self::next_id("B", self.bookings.len() + 1, |id| self.bookings.contains_key(id))
    }
}

/// Application facade over a [`Hotel`]: validates every request against the
/// in-memory state, applies it, then writes the whole state through `S`.
///
/// If the write fails the in-memory change stays applied and the storage
/// error is returned; the next successful save brings the files back in
/// line.
pub struct HotelService<S: Storage> {
    hotel: Hotel,
    storage: S,
    tax_rate: f64,
}

impl<S: Storage> HotelService<S> {
    pub fn new(hotel: Hotel, storage: S, tax_rate: f64) -> Self {
        Self {
            hotel,
            storage,
            tax_rate,
        }
    }

    /// Loads the persisted state and builds the service around it.
    pub fn open(name: &str, storage: S, tax_rate: f64) -> Result<Self> {
        let snapshot = storage.load()?;
        let hotel = Hotel::from_snapshot(name, snapshot)?;
        tracing::info!(
            "Opened {} with {} rooms, {} guests, {} bookings",
            hotel.name(),
            hotel.rooms.len(),
            hotel.guests.len(),
            hotel.bookings.len()
        );
        Ok(Self::new(hotel, storage, tax_rate))
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Writes the full current state.
    pub fn save(&self) -> Result<()> {
        let snapshot = self.hotel.snapshot();
        self.storage
            .save(&snapshot.rooms, &snapshot.guests, &snapshot.bookings)
    }

    // ===== Rooms =====

    pub fn add_room(&mut self, number: RoomNumber, room_type: &str, price_per_night: f64) -> Result<&Room> {
        let room = Room::new(number, room_type.trim(), price_per_night)?;
        self.hotel.add_room(room)?;
        tracing::info!("Added room {} ({}, {:.2}/night)", number, room_type, price_per_night);
        self.save()?;
        self.hotel.room(number)
    }

    pub fn get_room(&self, number: RoomNumber) -> Result<&Room> {
        self.hotel.room(number)
    }

    pub fn list_rooms(&self) -> Vec<&Room> {
        self.hotel.rooms().collect()
    }

    pub fn room_status(&self, number: RoomNumber) -> Result<RoomStatus> {
        self.hotel.room(number)?;
        Ok(self.hotel.room_status(number))
    }

    pub fn check_availability(
        &self,
        number: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool> {
        self.hotel.room(number)?;
        let stay = DateRange::new(check_in, check_out)?;
        let available = self.hotel.is_room_available(number, &stay);
        tracing::debug!("Room {} for {}: available={}", number, stay, available);
        Ok(available)
    }

    /// Rooms free for the whole stay, optionally restricted to one type.
    pub fn available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: Option<&str>,
    ) -> Result<Vec<&Room>> {
        let stay = DateRange::new(check_in, check_out)?;
        Ok(self
            .hotel
            .rooms()
            .filter(|r| room_type.map_or(true, |t| r.room_type.eq_ignore_ascii_case(t)))
            .filter(|r| self.hotel.is_room_available(r.number, &stay))
            .collect())
    }

    // ===== Guests =====

    pub fn register_guest(&mut self, name: &str, contact: &str) -> Result<&Guest> {
        let guest_id = self.hotel.next_guest_id();
        self.register_guest_with_id(&guest_id, name, contact)
    }

    pub fn register_guest_with_id(&mut self, guest_id: &str, name: &str, contact: &str) -> Result<&Guest> {
        let guest = Guest::new(guest_id.trim(), name.trim(), contact.trim())?;
        let guest_id = guest.guest_id.clone();
        self.hotel.add_guest(guest)?;
        tracing::info!("Registered guest {}", guest_id);
        self.save()?;
        self.hotel.guest(&guest_id)
    }

    pub fn get_guest(&self, guest_id: &str) -> Result<&Guest> {
        self.hotel.guest(guest_id)
    }

    pub fn list_guests(&self) -> Vec<&Guest> {
        self.hotel.guests().collect()
    }

    // ===== Bookings =====

    pub fn create_booking(
        &mut self,
        room_number: RoomNumber,
        guest_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<&Booking> {
        let stay = DateRange::new(check_in, check_out)?;
        let room = self.hotel.room(room_number)?;
        let guest = self.hotel.guest(guest_id)?;

        if !self.hotel.is_room_available(room_number, &stay) {
            return Err(HotelError::conflict(format!(
                "Room {} is not available for {}",
                room_number, stay
            )));
        }

        let booking = Booking::new(self.hotel.next_booking_id(), room, guest, stay);
        let booking_id = booking.booking_id.clone();
        tracing::info!(
            "Created booking {} for guest {} in room {} ({}, {:.2})",
            booking_id,
            guest_id,
            room_number,
            stay,
            booking.total_price
        );
        self.hotel.bookings.insert(booking_id.clone(), booking);
        self.save()?;
        self.hotel.booking(&booking_id)
    }

    pub fn get_booking(&self, booking_id: &str) -> Result<&Booking> {
        self.hotel.booking(booking_id)
    }

    pub fn list_bookings(&self) -> Vec<&Booking> {
        self.hotel.bookings().collect()
    }

    pub fn guest_bookings(&self, guest_id: &str) -> Result<Vec<&Booking>> {
        self.hotel.guest(guest_id)?;
        Ok(self
            .hotel
            .bookings()
            .filter(|b| b.guest_id == guest_id)
            .collect())
    }

    pub fn active_bookings(&self) -> Vec<&Booking> {
        self.hotel.bookings().filter(|b| b.is_active()).collect()
    }

    pub fn cancel_booking(&mut self, booking_id: &str) -> Result<&Booking> {
        self.transition(booking_id, BookingStatus::Cancelled)
    }

    pub fn check_in(&mut self, booking_id: &str) -> Result<&Booking> {
        let booking = self.hotel.booking(booking_id)?;
        if booking.status != BookingStatus::Reserved {
            return Err(HotelError::invalid(format!(
                "Cannot check in booking {}: status is {}",
                booking_id, booking.status
            )));
        }
        if self.hotel.room_status(booking.room_number) == RoomStatus::Occupied {
            return Err(HotelError::conflict(format!(
                "Room {} is already occupied",
                booking.room_number
            )));
        }
        self.transition(booking_id, BookingStatus::CheckedIn)
    }

    pub fn check_out(&mut self, booking_id: &str) -> Result<&Booking> {
        let booking = self.hotel.booking(booking_id)?;
        if booking.status != BookingStatus::CheckedIn {
            return Err(HotelError::invalid(format!(
                "Cannot check out booking {}: status is {}",
                booking_id, booking.status
            )));
        }
        self.transition(booking_id, BookingStatus::CheckedOut)
    }

    fn transition(&mut self, booking_id: &str, next: BookingStatus) -> Result<&Booking> {
        let booking = self.hotel.booking_mut(booking_id)?;
        let previous = booking.status;
        booking.transition(next)?;
        tracing::info!("Booking {}: {} -> {}", booking_id, previous, next);
        self.save()?;
        self.hotel.booking(booking_id)
    }

    // ===== Payments & reports =====

    pub fn generate_invoice(&self, booking_id: &str) -> Result<Invoice> {
        let booking = self.hotel.booking(booking_id)?;
        Invoice::for_booking(&self.hotel, booking, self.tax_rate)
    }

    pub fn occupancy_report(&self, start: NaiveDate, end: NaiveDate) -> Result<OccupancyReport> {
        let period = DateRange::new(start, end)?;
        Ok(reports::occupancy_report(&self.hotel, period))
    }

    pub fn revenue_report(&self, start: NaiveDate, end: NaiveDate) -> Result<RevenueReport> {
        let period = DateRange::new(start, end)?;
        Ok(reports::revenue_report(&self.hotel, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::utils::error::ErrorKind;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service() -> HotelService<MemoryStorage> {
        HotelService::open("Test Hotel", MemoryStorage::new(), DEFAULT_TAX_RATE).unwrap()
    }

    #[test]
    fn test_hotel_requires_name() {
        assert_eq!(Hotel::new("  ").unwrap_err().kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_duplicate_room_rejected_and_state_unchanged() {
        let mut svc = service();
        svc.add_room(101, "single", 100.0).unwrap();
        let saves = svc.storage().save_count();

        let err = svc.add_room(101, "suite", 300.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert_eq!(svc.list_rooms().len(), 1);
        assert_eq!(svc.get_room(101).unwrap().room_type, "single");
        assert_eq!(svc.storage().save_count(), saves);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut svc = service();
        let err = svc.add_room(101, "single", -5.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(svc.list_rooms().is_empty());
    }

    #[test]
    fn test_every_mutation_is_written_through() {
        let mut svc = service();
        svc.add_room(101, "single", 100.0).unwrap();
        let guest_id = svc.register_guest("John Doe", "john@example.com").unwrap().guest_id.clone();
        let booking_id = svc
            .create_booking(101, &guest_id, date("2024-01-01"), date("2024-01-03"))
            .unwrap()
            .booking_id
            .clone();
        svc.check_in(&booking_id).unwrap();

        assert_eq!(svc.storage().save_count(), 4);
        let stored = svc.storage().snapshot();
        assert_eq!(stored.bookings[0].status, BookingStatus::CheckedIn);
        assert_eq!(stored.guests[0].guest_id, "G-0001");
    }

    #[test]
    fn test_generated_ids_skip_taken_values() {
        let mut svc = service();
        svc.register_guest_with_id("G-0002", "Jane Smith", "jane@example.com").unwrap();
        let first = svc.register_guest("John Doe", "john@example.com").unwrap().guest_id.clone();
        let second = svc.register_guest("Ann Lee", "ann@example.com").unwrap().guest_id.clone();
        assert_eq!(first, "G-0003");
        assert_eq!(second, "G-0004");
    }

    #[test]
    fn test_duplicate_guest_id_rejected() {
        let mut svc = service();
        svc.register_guest_with_id("guest-001", "John Doe", "john@example.com").unwrap();
        let err = svc
            .register_guest_with_id("guest-001", "Someone Else", "else@example.com")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert_eq!(svc.list_guests().len(), 1);
    }

    #[test]
    fn test_room_status_follows_check_in_and_out() {
        let mut svc = service();
        svc.add_room(101, "single", 100.0).unwrap();
        svc.register_guest_with_id("g1", "John Doe", "john@example.com").unwrap();
        let id = svc
            .create_booking(101, "g1", date("2024-01-01"), date("2024-01-03"))
            .unwrap()
            .booking_id
            .clone();

        assert_eq!(svc.room_status(101).unwrap(), RoomStatus::Available);
        svc.check_in(&id).unwrap();
        assert_eq!(svc.room_status(101).unwrap(), RoomStatus::Occupied);
        svc.check_out(&id).unwrap();
        assert_eq!(svc.room_status(101).unwrap(), RoomStatus::Available);
    }

    #[test]
    fn test_check_in_refused_while_room_occupied() {
        let mut svc = service();
        svc.add_room(101, "single", 100.0).unwrap();
        svc.register_guest_with_id("g1", "John Doe", "john@example.com").unwrap();
        let first = svc
            .create_booking(101, "g1", date("2024-01-01"), date("2024-01-03"))
            .unwrap()
            .booking_id
            .clone();
        let second = svc
            .create_booking(101, "g1", date("2024-01-03"), date("2024-01-05"))
            .unwrap()
            .booking_id
            .clone();

        svc.check_in(&first).unwrap();
        let err = svc.check_in(&second).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BookingConflict);
        assert_eq!(svc.get_booking(&second).unwrap().status, BookingStatus::Reserved);
    }

    #[test]
    fn test_available_rooms_filters_by_type_and_dates() {
        let mut svc = service();
        svc.add_room(101, "single", 100.0).unwrap();
        svc.add_room(102, "double", 150.0).unwrap();
        svc.add_room(103, "single", 110.0).unwrap();
        svc.register_guest_with_id("g1", "John Doe", "john@example.com").unwrap();
        svc.create_booking(101, "g1", date("2024-01-01"), date("2024-01-05"))
            .unwrap();

        let free: Vec<RoomNumber> = svc
            .available_rooms(date("2024-01-02"), date("2024-01-03"), Some("Single"))
            .unwrap()
            .iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(free, vec![103]);

        let all = svc
            .available_rooms(date("2024-01-05"), date("2024-01-06"), None)
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let room = Room::new(101, "single", 100.0).unwrap();
        let snapshot = HotelSnapshot {
            rooms: vec![room.clone(), room],
            ..Default::default()
        };
        let err = Hotel::from_snapshot("Test Hotel", snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_from_snapshot_rejects_overlapping_active_bookings() {
        let room = Room::new(101, "single", 100.0).unwrap();
        let guest = Guest::new("guest-001", "John Doe", "john@example.com").unwrap();
        let stay = |a, b| DateRange::new(date(a), date(b)).unwrap();
        let first = Booking::new("B-0001", &room, &guest, stay("2024-01-01", "2024-01-05"));
        let second = Booking::new("B-0002", &room, &guest, stay("2024-01-02", "2024-01-04"));
        let snapshot = HotelSnapshot {
            rooms: vec![room.clone()],
            guests: vec![guest.clone()],
            bookings: vec![first.clone(), second.clone()],
        };
        let err = Hotel::from_snapshot("Test Hotel", snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("B-0002"));

        // a cancelled stay does not hold the room
        let mut cancelled = first;
        cancelled.status = BookingStatus::Cancelled;
        let snapshot = HotelSnapshot {
            rooms: vec![room],
            guests: vec![guest],
            bookings: vec![cancelled, second],
        };
        let hotel = Hotel::from_snapshot("Test Hotel", snapshot).unwrap();
        assert_eq!(hotel.bookings().count(), 2);
    }
}
