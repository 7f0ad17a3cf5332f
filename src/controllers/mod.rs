pub mod parking_controller;

pub use parking_controller::ParkingController;
