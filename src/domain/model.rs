use crate::utils::error::{HotelError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RoomNumber = u32;

/// Half-open date interval `[start, end)`; `end` is the departure day and is
/// not counted as a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(HotelError::invalid(format!(
                "check_out ({}) must be after check_in ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// Number of nights shared by both ranges.
    pub fn intersection_nights(&self, other: &DateRange) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            (end - start).num_days()
        } else {
            0
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub number: RoomNumber,
    pub room_type: String,
    pub price_per_night: f64,
}

impl Room {
    pub fn new(number: RoomNumber, room_type: impl Into<String>, price_per_night: f64) -> Result<Self> {
        let room = Self {
            number,
            room_type: room_type.into(),
            price_per_night,
        };
        room.check()?;
        Ok(room)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.number == 0 {
            return Err(HotelError::invalid("Room number must be positive"));
        }
        if self.room_type.trim().is_empty() {
            return Err(HotelError::invalid("Room type is required"));
        }
        if !self.price_per_night.is_finite() || self.price_per_night < 0.0 {
            return Err(HotelError::invalid(format!(
                "Room price must be a non-negative amount, got {}",
                self.price_per_night
            )));
        }
        Ok(())
    }
}

/// Derived from bookings, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Occupied,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "available"),
            RoomStatus::Occupied => write!(f, "occupied"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub guest_id: String,
    pub name: String,
    pub contact: String,
}

impl Guest {
    pub fn new(
        guest_id: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
    ) -> Result<Self> {
        let guest = Self {
            guest_id: guest_id.into(),
            name: name.into(),
            contact: contact.into(),
        };
        guest.check()?;
        Ok(guest)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.guest_id.trim().is_empty() {
            return Err(HotelError::invalid("Guest ID is required"));
        }
        if self.name.trim().is_empty() {
            return Err(HotelError::invalid("Guest name is required"));
        }
        if self.contact.trim().is_empty() {
            return Err(HotelError::invalid("Guest contact is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[serde(alias = "booked")]
    Reserved,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Reserved => "reserved",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Reserved and CheckedIn bookings hold the room for their dates.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Reserved | BookingStatus::CheckedIn)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Reserved, BookingStatus::CheckedIn)
                | (BookingStatus::Reserved, BookingStatus::Cancelled)
                | (BookingStatus::CheckedIn, BookingStatus::CheckedOut)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub room_number: RoomNumber,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total_price: f64,
}

impl Booking {
    pub fn new(booking_id: impl Into<String>, room: &Room, guest: &Guest, stay: DateRange) -> Self {
        Self {
            booking_id: booking_id.into(),
            room_number: room.number,
            guest_id: guest.guest_id.clone(),
            check_in: stay.start,
            check_out: stay.end,
            status: BookingStatus::Reserved,
            total_price: stay.nights() as f64 * room.price_per_night,
        }
    }

    pub fn stay(&self) -> DateRange {
        DateRange {
            start: self.check_in,
            end: self.check_out,
        }
    }

    pub fn nights(&self) -> i64 {
        self.stay().nights()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Moves the booking along the lifecycle, rejecting any edge that is not
    /// Reserved→CheckedIn, Reserved→Cancelled or CheckedIn→CheckedOut.
    pub fn transition(&mut self, next: BookingStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(HotelError::invalid(format!(
                "Booking {} cannot move from {} to {}",
                self.booking_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.booking_id.trim().is_empty() {
            return Err(HotelError::invalid("Booking ID is required"));
        }
        DateRange::new(self.check_in, self.check_out)?;
        Ok(())
    }
}
