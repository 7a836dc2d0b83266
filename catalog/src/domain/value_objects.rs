/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use super::validation;
use std::fmt;
use std::str::FromStr;

/// Length of generated book and member identifiers unless configured otherwise
pub const DEFAULT_ID_LENGTH: usize = 8;

/// Length of generated ISBN-like serial numbers unless configured otherwise
pub const DEFAULT_SERIAL_LENGTH: usize = 32;

/// The shape every generated identifier of one kind shares.
///
/// This is a structural check only: a well-formed id is not necessarily the id
/// of an existing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdFormat {
    length: usize,
}

impl IdFormat {
    pub fn new(length: usize) -> DomainResult<Self> {
        if length == 0 {
            return Err(DomainError::InvalidValue(
                "Identifier length must be greater than zero".to_string(),
            ));
        }
        Ok(IdFormat { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Whether `raw` has exactly the configured length and only hexadecimal characters
    pub fn accepts(&self, raw: &str) -> bool {
        raw.len() == self.length && raw.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl Default for IdFormat {
    fn default() -> Self {
        IdFormat {
            length: DEFAULT_ID_LENGTH,
        }
    }
}

impl ValueObject for IdFormat {}

/// Unique identifier for a Book
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue("BookId cannot be empty".to_string()));
        }
        Ok(BookId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for BookId {}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a Member
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidValue("MemberId cannot be empty".to_string()));
        }
        Ok(MemberId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for MemberId {}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISBN-like secondary identifier of a book, kept for external reference only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(isbn: impl Into<String>) -> DomainResult<Self> {
        let isbn = isbn.into();
        if isbn.trim().is_empty() {
            return Err(DomainError::InvalidValue("ISBN cannot be empty".to_string()));
        }
        Ok(Isbn(isbn))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Isbn {}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Library card number carried by students and teachers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(number: impl Into<String>) -> DomainResult<Self> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "Card number cannot be empty".to_string(),
            ));
        }
        Ok(CardNumber(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for CardNumber {}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book title, stored trimmed and lower-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn new(title: &str) -> DomainResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidValue(format!(
                "Book title cannot be empty, got '{}'",
                title
            )));
        }
        Ok(Title(title.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Title {}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An author name, stored trimmed with its case preserved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Author(String);

impl Author {
    pub fn new(author: &str) -> DomainResult<Self> {
        let author = author.trim();
        if author.is_empty() {
            return Err(DomainError::InvalidValue(format!(
                "Book author cannot be empty, got '{}'",
                author
            )));
        }
        Ok(Author(author.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Author {}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A syntactically valid email address, stored trimmed and lower-cased.
///
/// Equality is therefore case-insensitive with respect to the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: &str) -> DomainResult<Self> {
        if !validation::is_email(email) {
            return Err(DomainError::InvalidValue(format!(
                "Invalid email address: '{}'",
                email
            )));
        }
        Ok(Email(email.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Download link of an electronic book
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadLink {
    value: String,
}

impl DownloadLink {
    pub fn new(url: &str) -> DomainResult<Self> {
        if !validation::is_url(url) {
            return Err(DomainError::InvalidValue(format!(
                "Invalid download link: '{}'",
                url
            )));
        }
        Ok(DownloadLink {
            value: url.trim().to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl ValueObject for DownloadLink {}

impl fmt::Display for DownloadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Person name part, trimmed and lower-cased. Blank input becomes an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: &str) -> Self {
        PersonName(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for PersonName {}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookType {
    Physical,
    Electronic,
}

impl BookType {
    pub const ALL: [BookType; 2] = [BookType::Physical, BookType::Electronic];

    pub fn name(&self) -> &'static str {
        match self {
            BookType::Physical => "Physical",
            BookType::Electronic => "EBook",
        }
    }
}

impl ValueObject for BookType {}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BookType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Ok(BookType::Physical),
            "ebook" | "e-book" | "electronic" => Ok(BookType::Electronic),
            other => Err(DomainError::InvalidValue(format!("Unknown book type: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberType {
    Student,
    Teacher,
}

impl MemberType {
    pub const ALL: [MemberType; 2] = [MemberType::Student, MemberType::Teacher];

    pub fn name(&self) -> &'static str {
        match self {
            MemberType::Student => "Student",
            MemberType::Teacher => "Teacher",
        }
    }
}

impl ValueObject for MemberType {}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MemberType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(MemberType::Student),
            "teacher" => Ok(MemberType::Teacher),
            other => Err(DomainError::InvalidValue(format!("Unknown member type: '{}'", other))),
        }
    }
}

/// The attributes that make two books "the same" book: title, author and type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    title: Title,
    author: Author,
    book_type: BookType,
}

impl BookKey {
    pub fn new(title: Title, author: Author, book_type: BookType) -> Self {
        BookKey {
            title,
            author,
            book_type,
        }
    }

    /// Build a key from raw input, applying the same normalization books get
    pub fn parse(title: &str, author: &str, book_type: BookType) -> DomainResult<Self> {
        Ok(BookKey::new(Title::new(title)?, Author::new(author)?, book_type))
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn book_type(&self) -> BookType {
        self.book_type
    }
}

impl ValueObject for BookKey {}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' by {} ({})", self.title, self.author, self.book_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format_accepts_hex_of_exact_length() {
        let format = IdFormat::new(8).unwrap();
        assert!(format.accepts("0a1b2c3d"));
        assert!(format.accepts("ABCDEF01"));
        assert!(!format.accepts("0a1b2c3"));
        assert!(!format.accepts("0a1b2c3d4"));
        assert!(!format.accepts("zzzzzzzz"));
        assert!(!format.accepts(""));
    }

    #[test]
    fn test_id_format_rejects_zero_length() {
        assert!(IdFormat::new(0).is_err());
        assert_eq!(IdFormat::default().length(), DEFAULT_ID_LENGTH);
    }

    #[test]
    fn test_empty_ids_rejected() {
        assert!(BookId::new("").is_err());
        assert!(MemberId::new("  ").is_err());
        assert!(Isbn::new("").is_err());
        assert!(CardNumber::new("").is_err());
        assert_eq!(BookId::new("deadbeef").unwrap().as_str(), "deadbeef");
    }

    #[test]
    fn test_title_is_trimmed_and_lowercased() {
        let title = Title::new("  The Left Hand of Darkness ").unwrap();
        assert_eq!(title.as_str(), "the left hand of darkness");
        assert!(Title::new("   ").is_err());
    }

    #[test]
    fn test_author_keeps_case() {
        let author = Author::new(" Ursula K. Le Guin ").unwrap();
        assert_eq!(author.as_str(), "Ursula K. Le Guin");
        assert!(Author::new("").is_err());
    }

    #[test]
    fn test_email_normalization() {
        let upper = Email::new(" A@B.com ").unwrap();
        let lower = Email::new("a@b.com").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "a@b.com");
        assert!(Email::new("not an email").is_err());
    }

    #[test]
    fn test_download_link() {
        let link = DownloadLink::new(" https://example.com/dune.epub ").unwrap();
        assert_eq!(link.as_str(), "https://example.com/dune.epub");
        assert!(DownloadLink::new("not-a-url").is_err());
    }

    #[test]
    fn test_person_name_allows_blank() {
        assert!(PersonName::new("   ").is_empty());
        assert_eq!(PersonName::new(" Jane ").as_str(), "jane");
    }

    #[test]
    fn test_types_parse_from_names() {
        assert_eq!("Physical".parse::<BookType>().unwrap(), BookType::Physical);
        assert_eq!("EBook".parse::<BookType>().unwrap(), BookType::Electronic);
        assert_eq!(" teacher ".parse::<MemberType>().unwrap(), MemberType::Teacher);
        assert!("magazine".parse::<BookType>().is_err());
        assert!("janitor".parse::<MemberType>().is_err());

        for book_type in BookType::ALL {
            assert_eq!(book_type.to_string().parse::<BookType>().unwrap(), book_type);
        }
    }

    #[test]
    fn test_book_key_normalizes_like_books() {
        let key1 = BookKey::parse("Dune", "Herbert", BookType::Physical).unwrap();
        let key2 = BookKey::parse("dune", " Herbert ", BookType::Physical).unwrap();
        let key3 = BookKey::parse("dune", "herbert", BookType::Physical).unwrap();
        let key4 = BookKey::parse("dune", "Herbert", BookType::Electronic).unwrap();

        assert_eq!(key1, key2);
        assert_ne!(key1, key3);
        assert_ne!(key1, key4);
        assert_eq!(key1.to_string(), "'dune' by Herbert (Physical)");
    }
}
