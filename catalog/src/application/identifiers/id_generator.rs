/// Source of opaque identifiers for new books and members.
///
/// Implementations return exactly `length` lower-case hexadecimal characters and
/// must make collisions within one process lifetime negligible. The catalog only
/// checks the shape of ids; uniqueness is entirely the generator's job.
pub trait IdGenerator {
    fn next_id(&mut self, length: usize) -> String;
}
