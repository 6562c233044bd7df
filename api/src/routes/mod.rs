pub mod ask;
pub mod health_route;
