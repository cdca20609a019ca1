use crate::core::hotel::HotelService;
use crate::domain::model::{Booking, RoomNumber};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 50;

fn money(currency: &str, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddRoom,
    ListRooms,
    RegisterGuest,
    ListGuests,
    CheckAvailability,
    CreateBooking,
    GuestBookings,
    CancelBooking,
    CheckIn,
    CheckOut,
    ActiveBookings,
    OccupancyReport,
    RevenueReport,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 14] = [
        MenuChoice::AddRoom,
        MenuChoice::ListRooms,
        MenuChoice::RegisterGuest,
        MenuChoice::ListGuests,
        MenuChoice::CheckAvailability,
        MenuChoice::CreateBooking,
        MenuChoice::GuestBookings,
        MenuChoice::CancelBooking,
        MenuChoice::CheckIn,
        MenuChoice::CheckOut,
        MenuChoice::ActiveBookings,
        MenuChoice::OccupancyReport,
        MenuChoice::RevenueReport,
        MenuChoice::Exit,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let n: usize = raw.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddRoom => "Add room",
            MenuChoice::ListRooms => "List rooms",
            MenuChoice::RegisterGuest => "Register guest",
            MenuChoice::ListGuests => "List guests",
            MenuChoice::CheckAvailability => "Check availability",
            MenuChoice::CreateBooking => "Create booking",
            MenuChoice::GuestBookings => "Get guest bookings",
            MenuChoice::CancelBooking => "Cancel booking",
            MenuChoice::CheckIn => "Check-in",
            MenuChoice::CheckOut => "Check-out",
            MenuChoice::ActiveBookings => "Active bookings",
            MenuChoice::OccupancyReport => "Occupancy report",
            MenuChoice::RevenueReport => "Revenue report",
            MenuChoice::Exit => "Save and exit",
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Numbered-menu front end. Reads answers line by line from `input` and
/// writes prompts and results to `output`; end of input ends the session the
/// same way as choosing Exit.
pub struct Console<S: Storage, R: BufRead, W: Write> {
    service: HotelService<S>,
    input: R,
    output: W,
    currency: String,
}

/// Unwraps a prompt answer, leaving the handler with `Flow::Quit` on end of input.
macro_rules! answer {
    ($e:expr) => {
        match $e? {
            Some(value) => value,
            None => return Ok(Flow::Quit),
        }
    };
}

impl<S: Storage, R: BufRead, W: Write> Console<S, R, W> {
    pub fn new(service: HotelService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
            currency: "$".to_string(),
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn service(&self) -> &HotelService<S> {
        &self.service
    }

    pub fn into_parts(self) -> (HotelService<S>, W) {
        (self.service, self.output)
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;
            let Some(raw) = self.read_line("Choose option: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&raw) {
                Some(choice) => {
                    tracing::debug!("Menu choice: {:?}", choice);
                    match self.handle(choice) {
                        Ok(flow) => flow,
                        Err(e) if e.is_recoverable() => {
                            tracing::warn!("{} failed: {}", choice.label(), e);
                            writeln!(self.output, "✗ Error: {}", e)?;
                            Flow::Continue
                        }
                        Err(e) => return Err(e),
                    }
                }
                None => {
                    writeln!(self.output, "Unknown option")?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                break;
            }
        }

        // reached on Exit and on end of input
        self.service.save()?;
        tracing::info!("State saved, leaving console");
        writeln!(self.output, "✓ Data saved. Goodbye!")?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{}", rule)?;
        writeln!(self.output, "{} - Main Menu", self.service.hotel().name())?;
        writeln!(self.output, "{}", rule)?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            let number = format!("{}.", i + 1);
            writeln!(self.output, "{:<4}{}", number, choice.label())?;
        }
        writeln!(self.output, "{}", rule)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_number<T: std::str::FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match raw.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    /// Empty answer means "not given".
    fn read_optional_number<T: std::str::FromStr>(&mut self, prompt: &str) -> Result<Option<Option<T>>> {
        loop {
            let Some(raw) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                return Ok(Some(None));
            }
            match raw.parse() {
                Ok(value) => return Ok(Some(Some(value))),
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    fn read_date(&mut self, label: &str) -> Result<Option<NaiveDate>> {
        let prompt = format!("{} (YYYY-MM-DD): ", label);
        loop {
            let Some(raw) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => return Ok(Some(date)),
                Err(_) => writeln!(self.output, "Invalid date format. Use YYYY-MM-DD")?,
            }
        }
    }

    fn write_bookings(&mut self, bookings: &[Booking]) -> Result<()> {
        for b in bookings {
            let guest = self
                .service
                .get_guest(&b.guest_id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|_| b.guest_id.clone());
            writeln!(
                self.output,
                "  {}: {} | Room {} | {} to {} | {} | {}",
                b.booking_id,
                guest,
                b.room_number,
                b.check_in,
                b.check_out,
                b.status,
                money(&self.currency, b.total_price)
            )?;
        }
        Ok(())
    }

    fn handle(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::AddRoom => {
                let number: RoomNumber = answer!(self.read_number("Room number: "));
                let room_type = answer!(self.read_line("Room type (single/double/suite): "));
                let price: f64 = answer!(self.read_number("Price per night: "));
                self.service.add_room(number, &room_type, price)?;
                writeln!(self.output, "✓ Room {} added successfully", number)?;
            }

            MenuChoice::ListRooms => {
                let lines: Vec<String> = self
                    .service
                    .list_rooms()
                    .into_iter()
                    .map(|r| {
                        format!(
                            "  Room {}: {} | {}/night | {}",
                            r.number,
                            r.room_type,
                            money(&self.currency, r.price_per_night),
                            self.service.hotel().room_status(r.number)
                        )
                    })
                    .collect();
                if lines.is_empty() {
                    writeln!(self.output, "No rooms in hotel")?;
                } else {
                    writeln!(self.output, "\nRooms:")?;
                    for line in lines {
                        writeln!(self.output, "{}", line)?;
                    }
                }
            }

            MenuChoice::RegisterGuest => {
                let name = answer!(self.read_line("Guest name: "));
                let contact = answer!(self.read_line("Contact (email or phone): "));
                let guest_id = self.service.register_guest(&name, &contact)?.guest_id.clone();
                writeln!(self.output, "✓ Guest registered with ID: {}", guest_id)?;
            }

            MenuChoice::ListGuests => {
                let lines: Vec<String> = self
                    .service
                    .list_guests()
                    .into_iter()
                    .map(|g| format!("  {}: {} ({})", g.guest_id, g.name, g.contact))
                    .collect();
                if lines.is_empty() {
                    writeln!(self.output, "No guests registered")?;
                } else {
                    writeln!(self.output, "\nGuests:")?;
                    for line in lines {
                        writeln!(self.output, "{}", line)?;
                    }
                }
            }

            MenuChoice::CheckAvailability => {
                let room: Option<RoomNumber> =
                    answer!(self.read_optional_number("Room number (leave empty for any): "));
                let check_in = answer!(self.read_date("Check-in date"));
                let check_out = answer!(self.read_date("Check-out date"));

                match room {
                    Some(number) => {
                        let free = self.service.check_availability(number, check_in, check_out)?;
                        let verdict = if free { "is available" } else { "is NOT available" };
                        writeln!(
                            self.output,
                            "Room {} {} from {} to {}",
                            number, verdict, check_in, check_out
                        )?;
                    }
                    None => {
                        let filter = answer!(self.read_line("Room type filter (leave empty for any): "));
                        let filter = (!filter.is_empty()).then_some(filter);
                        let lines: Vec<String> = self
                            .service
                            .available_rooms(check_in, check_out, filter.as_deref())?
                            .into_iter()
                            .map(|r| {
                                format!(
                                    "  Room {}: {} ({}/night)",
                                    r.number,
                                    r.room_type,
                                    money(&self.currency, r.price_per_night)
                                )
                            })
                            .collect();
                        if lines.is_empty() {
                            writeln!(self.output, "No rooms available for these dates")?;
                        } else {
                            writeln!(self.output, "\nAvailable rooms:")?;
                            for line in lines {
                                writeln!(self.output, "{}", line)?;
                            }
                        }
                    }
                }
            }

            MenuChoice::CreateBooking => {
                let guest_id = answer!(self.read_line("Guest ID: "));
                let room: RoomNumber = answer!(self.read_number("Room number: "));
                let check_in = answer!(self.read_date("Check-in date"));
                let check_out = answer!(self.read_date("Check-out date"));
                let booking = self
                    .service
                    .create_booking(room, &guest_id, check_in, check_out)?
                    .clone();
                writeln!(
                    self.output,
                    "✓ Booking created with ID: {} (total {})",
                    booking.booking_id,
                    money(&self.currency, booking.total_price)
                )?;
            }

            MenuChoice::GuestBookings => {
                let guest_id = answer!(self.read_line("Guest ID: "));
                let bookings: Vec<Booking> = self
                    .service
                    .guest_bookings(&guest_id)?
                    .into_iter()
                    .cloned()
                    .collect();
                if bookings.is_empty() {
                    writeln!(self.output, "No bookings for this guest")?;
                } else {
                    writeln!(self.output, "\nBookings for guest {}:", guest_id)?;
                    self.write_bookings(&bookings)?;
                }
            }

            MenuChoice::CancelBooking => {
                let booking_id = answer!(self.read_line("Booking ID: "));
                self.service.cancel_booking(&booking_id)?;
                writeln!(self.output, "✓ Booking {} cancelled", booking_id)?;
            }

            MenuChoice::CheckIn => {
                let booking_id = answer!(self.read_line("Booking ID: "));
                let room = self.service.check_in(&booking_id)?.room_number;
                writeln!(self.output, "✓ Check-in successful (room {})", room)?;
            }

            MenuChoice::CheckOut => {
                let booking_id = answer!(self.read_line("Booking ID: "));
                self.service.check_out(&booking_id)?;
                writeln!(self.output, "✓ Check-out successful")?;
                let invoice = self.service.generate_invoice(&booking_id)?;
                writeln!(self.output, "{}", invoice.render(&self.currency))?;
            }

            MenuChoice::ActiveBookings => {
                let active: Vec<Booking> = self
                    .service
                    .active_bookings()
                    .into_iter()
                    .cloned()
                    .collect();
                if active.is_empty() {
                    writeln!(self.output, "No active bookings")?;
                } else {
                    writeln!(self.output, "\nActive bookings:")?;
                    self.write_bookings(&active)?;
                }
            }

            MenuChoice::OccupancyReport => {
                let start = answer!(self.read_date("Period start"));
                let end = answer!(self.read_date("Period end, exclusive"));
                let report = self.service.occupancy_report(start, end)?;
                writeln!(self.output, "\nOccupancy Report ({}):", report.period)?;
                for room in &report.rooms {
                    writeln!(
                        self.output,
                        "  Room {} ({}): {}/{} nights booked ({:.0}%) | {}",
                        room.room_number,
                        room.room_type,
                        room.booked_nights,
                        room.total_nights,
                        room.occupancy_rate() * 100.0,
                        room.status
                    )?;
                }
                writeln!(self.output, "  Total rooms: {}", report.total_rooms)?;
                writeln!(self.output, "  Occupied: {}", report.occupied_rooms)?;
                writeln!(self.output, "  Available: {}", report.available_rooms)?;
                writeln!(
                    self.output,
                    "  Overall occupancy: {:.1}%",
                    report.overall_rate() * 100.0
                )?;
            }

            MenuChoice::RevenueReport => {
                let start = answer!(self.read_date("Period start"));
                let end = answer!(self.read_date("Period end, exclusive"));
                let report = self.service.revenue_report(start, end)?;
                writeln!(self.output, "\nRevenue Report ({}):", report.period)?;
                writeln!(self.output, "  Bookings: {}", report.booking_count)?;
                writeln!(
                    self.output,
                    "  Total Revenue: {}",
                    money(&self.currency, report.total_revenue)
                )?;
                writeln!(
                    self.output,
                    "  Realized (checked out): {}",
                    money(&self.currency, report.realized_revenue)
                )?;
            }

            MenuChoice::Exit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}
