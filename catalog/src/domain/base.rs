/// Base DDD abstractions for the domain layer
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Eq + Debug {}

/// Trait for entities - objects with an opaque identity assigned at creation
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> &Self::Id;
}

/// Entities whose uniqueness inside a collection is decided by their attributes
/// rather than by their opaque id.
///
/// Two entities with the same natural key are "the same" entity for the catalog,
/// even when their ids differ. Collections are keyed by this value.
pub trait NaturalKey: Entity {
    type Key: ValueObject + Hash;

    fn natural_key(&self) -> Self::Key;
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value provided
    InvalidValue(String),
    /// An identifier does not have the configured shape
    InvalidIdentifier(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            DomainError::InvalidIdentifier(msg) => write!(f, "Invalid identifier: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct TestId(String);
    impl ValueObject for TestId {}

    #[derive(Debug)]
    struct TestEntity {
        id: TestId,
        code: String,
    }

    impl Entity for TestEntity {
        type Id = TestId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    impl NaturalKey for TestEntity {
        type Key = TestId;

        fn natural_key(&self) -> Self::Key {
            TestId(self.code.to_lowercase())
        }
    }

    #[test]
    fn test_natural_key_ignores_id() {
        let entity1 = TestEntity {
            id: TestId("id-1".to_string()),
            code: "ABC".to_string(),
        };

        let entity2 = TestEntity {
            id: TestId("id-2".to_string()),
            code: "abc".to_string(),
        };

        assert_ne!(entity1.id(), entity2.id());
        assert_eq!(entity1.natural_key(), entity2.natural_key());
    }

    #[test]
    fn test_domain_error_display() {
        let error = DomainError::InvalidValue("test".to_string());
        assert_eq!(error.to_string(), "Invalid value: test");

        let error = DomainError::InvalidIdentifier("abc".to_string());
        assert_eq!(error.to_string(), "Invalid identifier: abc");
    }
}
