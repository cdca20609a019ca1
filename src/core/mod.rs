pub mod hotel;
pub mod payments;
pub mod reports;
