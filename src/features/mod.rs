pub mod admin;
pub mod auth;
pub mod categories;
pub mod reports;
pub mod uploads;
