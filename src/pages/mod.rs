pub mod contact;
mod directory;
pub mod home;
pub mod not_found;
