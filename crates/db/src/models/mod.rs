pub mod notification;
pub mod occupancy;
pub mod points;
pub mod reservation;
pub mod seat;
pub mod shop;
pub mod time_slot;
