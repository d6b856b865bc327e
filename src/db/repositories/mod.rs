pub mod guest;
pub mod guest_type;
pub mod user;
