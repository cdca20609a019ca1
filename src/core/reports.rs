use crate::core::hotel::Hotel;
use crate::domain::model::{BookingStatus, DateRange, RoomNumber, RoomStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct RoomOccupancy {
    pub room_number: RoomNumber,
    pub room_type: String,
    pub status: RoomStatus,
    /// Nights of the period covered by active bookings.
    pub booked_nights: i64,
    pub total_nights: i64,
}

impl RoomOccupancy {
    pub fn occupancy_rate(&self) -> f64 {
        if self.total_nights == 0 {
            0.0
        } else {
            self.booked_nights as f64 / self.total_nights as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyReport {
    pub period: DateRange,
    pub rooms: Vec<RoomOccupancy>,
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
}

impl OccupancyReport {
    /// Booked room-nights over available room-nights for the whole hotel.
    pub fn overall_rate(&self) -> f64 {
        let capacity: i64 = self.rooms.iter().map(|r| r.total_nights).sum();
        if capacity == 0 {
            return 0.0;
        }
        let booked: i64 = self.rooms.iter().map(|r| r.booked_nights).sum();
        booked as f64 / capacity as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueReport {
    pub period: DateRange,
    /// Non-cancelled bookings checking in during the period.
    pub booking_count: usize,
    pub total_revenue: f64,
    /// Part of `total_revenue` from stays already checked out.
    pub realized_revenue: f64,
}

pub fn occupancy_report(hotel: &Hotel, period: DateRange) -> OccupancyReport {
    let total_nights = period.nights();

    let rooms: Vec<RoomOccupancy> = hotel
        .rooms()
        .map(|room| {
            let booked_nights = hotel
                .active_bookings_for(room.number)
                .map(|b| b.stay().intersection_nights(&period))
                .sum();
            RoomOccupancy {
                room_number: room.number,
                room_type: room.room_type.clone(),
                status: hotel.room_status(room.number),
                booked_nights,
                total_nights,
            }
        })
        .collect();

    let occupied_rooms = rooms
        .iter()
        .filter(|r| r.status == RoomStatus::Occupied)
        .count();

    tracing::debug!("Occupancy report for {} over {} rooms", period, rooms.len());

    OccupancyReport {
        period,
        total_rooms: rooms.len(),
        occupied_rooms,
        available_rooms: rooms.len() - occupied_rooms,
        rooms,
    }
}

pub fn revenue_report(hotel: &Hotel, period: DateRange) -> RevenueReport {
    let mut report = RevenueReport {
        period,
        booking_count: 0,
        total_revenue: 0.0,
        realized_revenue: 0.0,
    };

    for booking in hotel
        .bookings()
        .filter(|b| b.status != BookingStatus::Cancelled && period.contains(b.check_in))
    {
        report.booking_count += 1;
        report.total_revenue += booking.total_price;
        if booking.status == BookingStatus::CheckedOut {
            report.realized_revenue += booking.total_price;
        }
    }

    tracing::debug!(
        "Revenue report for {}: {} bookings, {:.2}",
        period,
        report.booking_count,
        report.total_revenue
    );
    report
}
