/// Domain entities
use super::base::{DomainError, DomainResult, Entity, NaturalKey};
use super::value_objects::{
    Author, BookId, BookKey, BookType, CardNumber, DownloadLink, Email, IdFormat, Isbn, MemberId,
    MemberType, PersonName, Title,
};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Variant-specific data of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFormat {
    Physical { shelf_location: String },
    Electronic { download_link: DownloadLink },
}

/// A catalog item. Two books are the same book when title, author and type match;
/// ids, shelf locations and download links play no part in that.
#[derive(Debug, Clone)]
pub struct Book {
    id: BookId,
    isbn: Isbn,
    title: Title,
    author: Author,
    format: BookFormat,
    borrowed: bool,
}

impl Book {
    /// Create a physical book shelved at `shelf_location`
    pub fn new_physical(
        id: BookId,
        isbn: Isbn,
        title: &str,
        author: &str,
        shelf_location: &str,
    ) -> DomainResult<Self> {
        Ok(Book {
            id,
            isbn,
            title: Title::new(title)?,
            author: Author::new(author)?,
            format: BookFormat::Physical {
                shelf_location: shelf_location.to_string(),
            },
            borrowed: false,
        })
    }

    /// Create an electronic book. Fails unless `download_link` is a valid URL.
    pub fn new_ebook(
        id: BookId,
        isbn: Isbn,
        title: &str,
        author: &str,
        download_link: &str,
    ) -> DomainResult<Self> {
        let title = Title::new(title)?;
        let author = Author::new(author)?;
        let download_link = DownloadLink::new(download_link)?;

        Ok(Book {
            id,
            isbn,
            title,
            author,
            format: BookFormat::Electronic { download_link },
            borrowed: false,
        })
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn format(&self) -> &BookFormat {
        &self.format
    }

    pub fn book_type(&self) -> BookType {
        match self.format {
            BookFormat::Physical { .. } => BookType::Physical,
            BookFormat::Electronic { .. } => BookType::Electronic,
        }
    }

    pub fn shelf_location(&self) -> Option<&str> {
        match &self.format {
            BookFormat::Physical { shelf_location } => Some(shelf_location),
            BookFormat::Electronic { .. } => None,
        }
    }

    pub fn download_link(&self) -> Option<&DownloadLink> {
        match &self.format {
            BookFormat::Electronic { download_link } => Some(download_link),
            BookFormat::Physical { .. } => None,
        }
    }

    pub fn is_borrowed(&self) -> bool {
        self.borrowed
    }

    /// Mark the book as borrowed. The caller checks availability first.
    pub fn borrow(&mut self) {
        self.borrowed = true;
    }

    /// Mark the book as back on the shelf
    pub fn return_book(&mut self) {
        self.borrowed = false;
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl NaturalKey for Book {
    type Key = BookKey;

    fn natural_key(&self) -> Self::Key {
        BookKey::new(self.title.clone(), self.author.clone(), self.book_type())
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.author == other.author
            && self.book_type() == other.book_type()
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.natural_key().hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book details\n\tbook id: '{}',\n\ttitle: '{}',\n\tauthor: '{}',\n\tISBN: '{}',\n\tisBorrowed: {},\n\ttype: {}",
            self.id,
            self.title,
            self.author,
            self.isbn,
            self.borrowed,
            self.book_type()
        )?;
        match &self.format {
            BookFormat::Physical { shelf_location } => {
                write!(f, "\n\tshelf location: '{}'", shelf_location)
            }
            BookFormat::Electronic { download_link } => {
                write!(f, "\n\tdownload link: '{}'", download_link)
            }
        }
    }
}

/// Variant-specific data of a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipKind {
    Student { student_id: CardNumber },
    Teacher { teacher_id: CardNumber },
}

/// A registered person. Members are identified by their email alone.
#[derive(Debug, Clone)]
pub struct Member {
    id: MemberId,
    first_name: PersonName,
    last_name: PersonName,
    email: Email,
    kind: MembershipKind,
    borrowed_book_ids: HashSet<BookId>,
}

impl Member {
    pub fn new_student(
        id: MemberId,
        student_id: CardNumber,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> DomainResult<Self> {
        Self::build(id, first_name, last_name, email, MembershipKind::Student { student_id })
    }

    pub fn new_teacher(
        id: MemberId,
        teacher_id: CardNumber,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> DomainResult<Self> {
        Self::build(id, first_name, last_name, email, MembershipKind::Teacher { teacher_id })
    }

    fn build(
        id: MemberId,
        first_name: &str,
        last_name: &str,
        email: &str,
        kind: MembershipKind,
    ) -> DomainResult<Self> {
        Ok(Member {
            id,
            first_name: PersonName::new(first_name),
            last_name: PersonName::new(last_name),
            email: Email::new(email)?,
            kind,
            borrowed_book_ids: HashSet::new(),
        })
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Full name, "first last"
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn kind(&self) -> &MembershipKind {
        &self.kind
    }

    pub fn member_type(&self) -> MemberType {
        match self.kind {
            MembershipKind::Student { .. } => MemberType::Student,
            MembershipKind::Teacher { .. } => MemberType::Teacher,
        }
    }

    pub fn borrowed_book_ids(&self) -> &HashSet<BookId> {
        &self.borrowed_book_ids
    }

    /// Record `book_id` as held by this member.
    ///
    /// Returns `Ok(false)` when the member already holds it. Fails with
    /// `InvalidIdentifier` if the id does not have the shape of `format`;
    /// whether the book exists is the caller's concern.
    pub fn borrow_book(&mut self, book_id: &BookId, format: IdFormat) -> DomainResult<bool> {
        Self::check_shape(book_id, format)?;
        Ok(self.borrowed_book_ids.insert(book_id.clone()))
    }

    /// Drop `book_id` from the held set. `Ok(false)` when this member never held it.
    pub fn try_return_book(&mut self, book_id: &BookId, format: IdFormat) -> DomainResult<bool> {
        Self::check_shape(book_id, format)?;
        Ok(self.borrowed_book_ids.remove(book_id))
    }

    pub fn is_book_borrowed_by_member(
        &self,
        book_id: &BookId,
        format: IdFormat,
    ) -> DomainResult<bool> {
        Self::check_shape(book_id, format)?;
        Ok(self.borrowed_book_ids.contains(book_id))
    }

    fn check_shape(book_id: &BookId, format: IdFormat) -> DomainResult<()> {
        if format.accepts(book_id.as_str()) {
            Ok(())
        } else {
            Err(DomainError::InvalidIdentifier(format!(
                "book id '{}' is not {} hexadecimal characters",
                book_id,
                format.length()
            )))
        }
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl NaturalKey for Member {
    type Key = Email;

    fn natural_key(&self) -> Self::Key {
        self.email.clone()
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.email == other.email
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.email.hash(state);
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member details:\n\tid: '{}'\n\tname: '{}'\n\temail: '{}'\n\ttype: '{}'",
            self.id,
            self.name(),
            self.email,
            self.member_type()
        )?;
        match &self.kind {
            MembershipKind::Student { student_id } => write!(f, "\n\tstudent id: '{}'", student_id),
            MembershipKind::Teacher { teacher_id } => write!(f, "\n\tteacher id: '{}'", teacher_id),
        }
    }
}
