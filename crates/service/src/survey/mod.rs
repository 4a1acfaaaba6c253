pub mod mapper;
pub mod repository;
pub mod service;

pub use models::survey::{Model as Survey, SurveyFields};
