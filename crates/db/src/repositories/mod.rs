//! Repository implementations.

mod profile;

pub use profile::PgProfileRepository;
