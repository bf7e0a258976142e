pub mod notification_repo;
pub mod occupancy_repo;
pub mod points_repo;
pub mod reservation_repo;
pub mod seat_repo;
pub mod shop_repo;
pub mod time_slot_repo;

pub use notification_repo::NotificationRepo;
pub use occupancy_repo::OccupancyRepo;
pub use points_repo::PointsRepo;
pub use reservation_repo::ReservationRepo;
pub use seat_repo::SeatRepo;
pub use shop_repo::ShopRepo;
pub use time_slot_repo::TimeSlotRepo;
