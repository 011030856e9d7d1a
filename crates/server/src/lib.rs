pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;
pub mod metrics;

pub use routes::AppState;
pub use startup::run;
