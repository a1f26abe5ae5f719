//! 业务逻辑服务层

mod trip_service;

pub use trip_service::TripService;
