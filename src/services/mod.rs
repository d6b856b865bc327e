mod guest;

pub use guest::{GuestError, GuestListParams, GuestPage, GuestService};
