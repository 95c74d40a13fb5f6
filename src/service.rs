pub mod bootstrap;
pub mod dashboard;
pub mod label;
pub mod organisation;
pub mod session;
pub mod site_access;
