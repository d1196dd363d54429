use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod applications;
pub mod appointments;
pub mod doc;
pub mod donations;
pub mod favorites;
pub mod health;
pub mod params;
pub mod pets;
pub mod profile;
pub mod resources;
pub mod review;
pub mod store;
pub mod vet;
pub mod volunteer_portal;
pub mod volunteers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/pets", pets::router())
        .nest("/resources", resources::router())
        .nest("/store", store::router())
        .nest("/favorites", favorites::router())
        .nest("/applications", applications::router())
        .nest("/appointments", appointments::router())
        .nest("/volunteers", volunteers::router())
        .nest("/donations", donations::router())
        .nest("/review", review::router())
        .nest("/vet", vet::router())
        .nest("/volunteer-portal", volunteer_portal::router())
        .nest("/admin", admin::router())
        .merge(profile::router())
}
