pub mod health;
pub mod login_session;
pub mod name_entry;
pub mod navigation;
pub mod organisation;
pub mod profile;
pub mod session;
pub mod site;
