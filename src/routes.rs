pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod organisation;
pub mod session;
pub mod site;
