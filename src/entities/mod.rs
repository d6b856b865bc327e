pub mod prelude;

pub mod guest_types;
pub mod guests;
pub mod users;
