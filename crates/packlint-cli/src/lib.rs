//! Library surface of the packlint CLI.
//!
//! Only the logging setup lives here; it is exposed so integration tests can
//! initialize a subscriber with a capturing writer.

pub mod logging;
