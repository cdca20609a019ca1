use crate::domain::model::{Booking, Guest, Room};
use crate::domain::ports::{HotelSnapshot, Storage};
use crate::utils::error::{HotelError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ROOMS_FILE: &str = "rooms.json";
pub const GUESTS_FILE: &str = "guests.json";
pub const BOOKINGS_FILE: &str = "bookings.json";

/// Three pretty-printed JSON arrays on disk, one per collection.
///
/// A missing file loads as an empty collection so a fresh data directory is a
/// valid empty hotel. Every save rewrites all three files.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    rooms_path: PathBuf,
    guests_path: PathBuf,
    bookings_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self::with_paths(
            dir.join(ROOMS_FILE),
            dir.join(GUESTS_FILE),
            dir.join(BOOKINGS_FILE),
        )
    }

    pub fn with_paths(
        rooms_path: impl Into<PathBuf>,
        guests_path: impl Into<PathBuf>,
        bookings_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rooms_path: rooms_path.into(),
            guests_path: guests_path.into(),
            bookings_path: bookings_path.into(),
        }
    }

    pub fn rooms_path(&self) -> &Path {
        &self.rooms_path
    }

    pub fn guests_path(&self) -> &Path {
        &self.guests_path
    }

    pub fn bookings_path(&self) -> &Path {
        &self.bookings_path
    }

    fn read_collection<T: DeserializeOwned>(path: &Path, label: &str) -> Result<Vec<T>> {
        if !path.exists() {
            tracing::debug!("{} not found, starting with no {}", path.display(), label);
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            HotelError::storage(format!("Failed to load {} from {}: {}", label, path.display(), e))
        })?;

        let items: Vec<T> = serde_json::from_str(&content).map_err(|e| {
            HotelError::storage(format!("Failed to load {} from {}: {}", label, path.display(), e))
        })?;

        tracing::debug!("Loaded {} {} from {}", items.len(), label, path.display());
        Ok(items)
    }

    fn write_collection<T: Serialize>(path: &Path, label: &str, items: &[T]) -> Result<()> {
        let fail = |e: &dyn std::fmt::Display| {
            HotelError::storage(format!("Failed to save {} to {}: {}", label, path.display(), e))
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| fail(&e))?;
            }
        }

        let data = serde_json::to_string_pretty(items).map_err(|e| fail(&e))?;

        // write beside the target, then swap it in
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(|e| fail(&e))?;
        fs::rename(&tmp_path, path).map_err(|e| fail(&e))?;
        Ok(())
    }
}

fn check_records<T>(
    items: &[T],
    label: &str,
    path: &Path,
    check: impl Fn(&T) -> Result<()>,
) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        check(item).map_err(|e| {
            HotelError::storage(format!(
                "Invalid {} record #{} in {}: {}",
                label,
                index,
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<HotelSnapshot> {
        let rooms: Vec<Room> = Self::read_collection(&self.rooms_path, "rooms")?;
        check_records(&rooms, "room", &self.rooms_path, Room::check)?;

        let guests: Vec<Guest> = Self::read_collection(&self.guests_path, "guests")?;
        check_records(&guests, "guest", &self.guests_path, Guest::check)?;

        let bookings: Vec<Booking> = Self::read_collection(&self.bookings_path, "bookings")?;
        check_records(&bookings, "booking", &self.bookings_path, Booking::check)?;

        Ok(HotelSnapshot {
            rooms,
            guests,
            bookings,
        })
    }

    fn save(&self, rooms: &[Room], guests: &[Guest], bookings: &[Booking]) -> Result<()> {
        Self::write_collection(&self.rooms_path, "rooms", rooms)?;
        Self::write_collection(&self.guests_path, "guests", guests)?;
        Self::write_collection(&self.bookings_path, "bookings", bookings)?;
        tracing::debug!(
            "Saved {} rooms, {} guests, {} bookings",
            rooms.len(),
            guests.len(),
            bookings.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        let snapshot = storage.load().unwrap();
        assert_eq!(snapshot, HotelSnapshot::default());
    }

    #[test]
    fn test_malformed_json_is_storage_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ROOMS_FILE), "[{\"number\": 101,").unwrap();

        let err = JsonFileStorage::new(dir.path()).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("rooms"));
    }

    #[test]
    fn test_legacy_room_fields_are_accepted() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(ROOMS_FILE),
            r#"[{"number": 101, "room_type": "single", "price_per_night": 100.0, "is_occupied": true}]"#,
        )
        .unwrap();

        let snapshot = JsonFileStorage::new(dir.path()).load().unwrap();
        assert_eq!(snapshot.rooms.len(), 1);
        assert_eq!(snapshot.rooms[0].room_type, "single");
    }

    #[test]
    fn test_invalid_record_is_storage_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(BOOKINGS_FILE),
            r#"[{"booking_id": "B-0001", "room_number": 101, "guest_id": "g", "check_in": "2024-01-03",
                "check_out": "2024-01-01", "status": "reserved", "total_price": 0.0}]"#,
        )
        .unwrap();

        let err = JsonFileStorage::new(dir.path()).load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("booking record #0"));
    }

    #[test]
    fn test_save_creates_directory_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let storage = JsonFileStorage::new(&data_dir);

        let rooms = vec![Room::new(101, "single", 100.0).unwrap()];
        storage.save(&rooms, &[], &[]).unwrap();

        assert!(data_dir.join(ROOMS_FILE).exists());
        assert!(data_dir.join(GUESTS_FILE).exists());
        assert!(!data_dir.join("rooms.json.tmp").exists());

        let raw = fs::read_to_string(data_dir.join(ROOMS_FILE)).unwrap();
        assert!(raw.contains("\"price_per_night\": 100.0"));
    }

    #[test]
    fn test_unwritable_target_is_storage_error() {
        let dir = TempDir::new().unwrap();
        // a directory where the rooms file should be
        let rooms_path = dir.path().join("rooms.json");
        fs::create_dir(&rooms_path).unwrap();
        let storage = JsonFileStorage::with_paths(
            &rooms_path,
            dir.path().join(GUESTS_FILE),
            dir.path().join(BOOKINGS_FILE),
        );

        let err = storage.save(&[], &[], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
