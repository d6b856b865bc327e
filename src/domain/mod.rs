pub mod schedule;
pub mod validate;

pub use schedule::{DATE_FORMAT, TIME_FORMAT, exit_instant, parse_date, parse_time};
pub use validate::{FieldErrors, GuestPayload, ValidationContext, validate_guest};
