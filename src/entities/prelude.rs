pub use super::guest_types::Entity as GuestTypes;
pub use super::guests::Entity as Guests;
pub use super::users::Entity as Users;
