pub mod application_service;
pub mod appointment_service;
pub mod article_service;
pub mod dashboard_service;
pub mod donation_service;
pub mod favorite_service;
pub mod feedback_service;
pub mod medical_service;
pub mod pet_service;
pub mod store_service;
pub mod user_service;
pub mod volunteer_service;
