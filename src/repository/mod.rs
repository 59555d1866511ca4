pub mod aggregate_repository;
pub mod channel_repository;
pub mod html_repository;
