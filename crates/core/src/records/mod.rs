//! Record entities written by the seeder.
//!
//! A `New*` record is what the generator proposes. Calling `validate` runs
//! every applicable field rule and, if all pass, yields a `Valid*` borrow that
//! the store accepts. There is no other way to construct a `Valid*` value, so
//! an unvalidated record cannot reach an `INSERT`.

mod contact_request;
mod user;

pub use contact_request::{NewContactRequest, ValidContactRequest};
pub use user::{NewUser, ValidUser};
