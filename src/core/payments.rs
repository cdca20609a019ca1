use crate::core::hotel::Hotel;
use crate::domain::model::{Booking, RoomNumber};
use crate::utils::error::{HotelError, Result};
use chrono::NaiveDate;
use std::fmt;

/// Bill for one booking. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub booking_id: String,
    pub guest_name: String,
    pub guest_contact: String,
    pub room_number: RoomNumber,
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub rate_per_night: f64,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl Invoice {
    pub fn for_booking(hotel: &Hotel, booking: &Booking, tax_rate: f64) -> Result<Self> {
        let room = hotel.room(booking.room_number).map_err(|_| {
            HotelError::payment(format!(
                "Booking {} references unknown room {}",
                booking.booking_id, booking.room_number
            ))
        })?;
        let guest = hotel.guest(&booking.guest_id).map_err(|_| {
            HotelError::payment(format!(
                "Booking {} references unknown guest {}",
                booking.booking_id, booking.guest_id
            ))
        })?;

        let nights = booking.nights();
        if nights <= 0 {
            return Err(HotelError::payment(format!(
                "Booking {} has no billable nights",
                booking.booking_id
            )));
        }
        if !booking.total_price.is_finite() || booking.total_price < 0.0 {
            return Err(HotelError::payment(format!(
                "Booking {} has no valid price ({})",
                booking.booking_id, booking.total_price
            )));
        }
        let expected = round_cents(nights as f64 * room.price_per_night);
        if round_cents(booking.total_price) != expected {
            return Err(HotelError::payment(format!(
                "Booking {} total {:.2} does not match {} nights at {:.2}",
                booking.booking_id, booking.total_price, nights, room.price_per_night
            )));
        }
        if !tax_rate.is_finite() || tax_rate < 0.0 {
            return Err(HotelError::payment(format!("Invalid tax rate {}", tax_rate)));
        }

        let subtotal = round_cents(booking.total_price);
        let tax = round_cents(subtotal * tax_rate);

        Ok(Self {
            booking_id: booking.booking_id.clone(),
            guest_name: guest.name.clone(),
            guest_contact: guest.contact.clone(),
            room_number: room.number,
            room_type: room.room_type.clone(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            nights,
            rate_per_night: room.price_per_night,
            subtotal,
            tax_rate,
            tax,
            total: round_cents(subtotal + tax),
        })
    }

    pub fn render(&self, currency: &str) -> String {
        let rule = "=".repeat(50);
        let mut text = String::new();
        text.push_str(&format!("{}\nINVOICE {}\n{}\n", rule, self.booking_id, rule));
        text.push_str(&format!("Guest: {}\n", self.guest_name));
        text.push_str(&format!("Contact: {}\n\n", self.guest_contact));
        text.push_str(&format!("Room: {} ({})\n", self.room_number, self.room_type));
        text.push_str(&format!("Check-in: {}\n", self.check_in));
        text.push_str(&format!("Check-out: {}\n", self.check_out));
        text.push_str(&format!("Nights: {}\n\n", self.nights));
        text.push_str(&format!("Rate per night: {}{:.2}\n", currency, self.rate_per_night));
        text.push_str(&format!("Base cost: {}{:.2}\n", currency, self.subtotal));
        text.push_str(&format!(
            "Tax ({}%): {}{:.2}\n",
            format_percent(self.tax_rate),
            currency,
            self.tax
        ));
        text.push_str("---\n");
        text.push_str(&format!("TOTAL: {}{:.2}\n", currency, self.total));
        text.push_str(&rule);
        text.push('\n');
        text
    }
}

fn format_percent(rate: f64) -> String {
    let percent = round_cents(rate * 100.0);
    if percent.fract() == 0.0 {
        format!("{:.0}", percent)
    } else {
        format!("{}", percent)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("$"))
    }
}
