/// Identifier generation backed by random UUIDs
mod uuid_generator;

pub use uuid_generator::UuidIdGenerator;
