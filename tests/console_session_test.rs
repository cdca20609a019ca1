use anyhow::Result;
use hotel_desk::{BookingStatus, Console, HotelService, JsonFileStorage, MemoryStorage};
use std::io::Cursor;
use tempfile::TempDir;

fn run_session(script: &str) -> Result<(HotelService<MemoryStorage>, String)> {
    let service = HotelService::open("Test Hotel", MemoryStorage::new(), 0.1)?;
    let mut console = Console::new(service, Cursor::new(script.to_string()), Vec::new());
    console.run()?;
    let (service, output) = console.into_parts();
    Ok((service, String::from_utf8(output)?))
}

#[test]
fn test_full_stay_through_the_menu() -> Result<()> {
    let script = "\
1\n101\nsingle\n100\n\
3\nJohn Doe\njohn@example.com\n\
6\nG-0001\n101\n2024-01-01\n2024-01-03\n\
9\nB-0001\n\
10\nB-0001\n\
13\n2024-01-01\n2024-02-01\n\
14\n";

    let (service, output) = run_session(script)?;

    assert!(output.contains("Test Hotel - Main Menu"));
    assert!(output.contains("✓ Room 101 added successfully"));
    assert!(output.contains("✓ Guest registered with ID: G-0001"));
    assert!(output.contains("✓ Booking created with ID: B-0001 (total $200.00)"));
    assert!(output.contains("✓ Check-in successful (room 101)"));
    assert!(output.contains("TOTAL: $220.00"));
    assert!(output.contains("Total Revenue: $200.00"));
    assert!(output.contains("✓ Data saved. Goodbye!"));

    assert_eq!(service.get_booking("B-0001")?.status, BookingStatus::CheckedOut);
    Ok(())
}

#[test]
fn test_errors_are_reported_and_menu_continues() -> Result<()> {
    let script = "\
1\n101\nsingle\n100\n\
1\n101\ndouble\n150\n\
9\nB-0404\n\
42\n\
2\n\
14\n";

    let (service, output) = run_session(script)?;

    assert!(output.contains("✗ Error: Invalid operation: Room 101 already exists"));
    assert!(output.contains("✗ Error: Not found: Booking B-0404 does not exist"));
    assert!(output.contains("Unknown option"));
    assert!(output.contains("Room 101: single | $100.00/night | available"));
    assert_eq!(service.list_rooms().len(), 1);
    Ok(())
}

#[test]
fn test_bad_input_is_prompted_again() -> Result<()> {
    let script = "\
1\nabc\n101\nsingle\nfree\n80\n\
5\n101\n01/02/2024\n2024-01-02\n2024-01-05\n\
14\n";

    let (_, output) = run_session(script)?;

    assert!(output.contains("Please enter a valid number"));
    assert!(output.contains("Invalid date format. Use YYYY-MM-DD"));
    assert!(output.contains("Room 101 is available from 2024-01-02 to 2024-01-05"));
    Ok(())
}

#[test]
fn test_availability_search_without_room_number() -> Result<()> {
    let script = "\
1\n101\nsingle\n100\n\
1\n102\nsuite\n250\n\
5\n\n2024-01-01\n2024-01-02\nsuite\n\
14\n";

    let (_, output) = run_session(script)?;

    assert!(output.contains("Available rooms:"));
    assert!(output.contains("Room 102: suite ($250.00/night)"));
    assert!(!output.contains("Room 101: single ($100.00/night)"));
    Ok(())
}

#[test]
fn test_end_of_input_saves_and_exits() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let service = HotelService::open("Test Hotel", JsonFileStorage::new(temp_dir.path()), 0.1)?;
    // input stops in the middle of the add-room prompts
    let mut console = Console::new(service, Cursor::new("3\nJane Smith\njane@example.com\n1\n101\n"), Vec::new())
        .with_currency("€");
    console.run()?;

    let reopened = HotelService::open("Test Hotel", JsonFileStorage::new(temp_dir.path()), 0.1)?;
    assert_eq!(reopened.list_guests().len(), 1);
    assert!(reopened.list_rooms().is_empty());
    Ok(())
}

#[test]
fn test_reports_and_guest_listing() -> Result<()> {
    let script = "\
1\n101\nsingle\n100\n\
3\nJohn Doe\njohn@example.com\n\
6\nG-0001\n101\n2024-01-01\n2024-01-06\n\
7\nG-0001\n\
11\n\
12\n2024-01-01\n2024-01-11\n\
8\nB-0001\n\
11\n\
14\n";

    let (_, output) = run_session(script)?;

    assert!(output.contains("Bookings for guest G-0001:"));
    assert!(output.contains("B-0001: John Doe | Room 101 | 2024-01-01 to 2024-01-06 | reserved | $500.00"));
    assert!(output.contains("Period end, exclusive (YYYY-MM-DD): "));
    assert!(output.contains("Room 101 (single): 5/10 nights booked (50%) | available"));
    assert!(output.contains("✓ Booking B-0001 cancelled"));
    assert!(output.contains("No active bookings"));
    Ok(())
}
