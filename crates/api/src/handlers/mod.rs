pub mod notification;
pub mod points;
pub mod reservations;
pub mod shops;
