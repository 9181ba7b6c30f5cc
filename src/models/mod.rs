pub mod location;
pub mod profile;
pub mod rating;
pub mod user;
