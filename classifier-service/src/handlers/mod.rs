pub mod auth;
pub mod data;
pub mod health;
pub mod predict;

pub use auth::auth_check;
pub use data::load_data;
pub use health::{health_check, metrics_endpoint, root};
pub use predict::{predict_diagnosis, predict_species};
