/// Catalog service: the entry point for registering, adding, lending and returning
use crate::application::identifiers::IdGenerator;
use crate::domain::aggregates::{
    AddBookOutcome, BorrowOutcome, Catalog, CatalogStatistics, RegisterMemberOutcome,
    ReturnOutcome,
};
use crate::domain::base::DomainError;
use crate::domain::entities::{Book, Member};
use crate::domain::value_objects::{
    BookId, BookKey, BookType, CardNumber, DownloadLink, Email, IdFormat, Isbn, MemberId,
    MemberType, DEFAULT_ID_LENGTH, DEFAULT_SERIAL_LENGTH,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    /// User-supplied data was rejected; the request had no effect
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    /// An internal consistency check failed. This is a bug, not a user mistake.
    #[error("System error: {0}")]
    System(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Service owning the catalog. Takes raw input, validates it, assigns ids and
/// reports every operation as a named outcome.
pub struct CatalogService<G: IdGenerator> {
    catalog: Catalog,
    generator: G,
    serial_length: usize,
    card_length: usize,
}

impl<G: IdGenerator> CatalogService<G> {
    pub fn new(generator: G) -> Self {
        CatalogService {
            catalog: Catalog::default(),
            generator,
            serial_length: DEFAULT_SERIAL_LENGTH,
            card_length: DEFAULT_ID_LENGTH,
        }
    }

    /// Use `id_format` for book and member ids, and the given lengths for ISBNs
    /// and student/teacher card numbers. Must be called before anything is added.
    pub fn with_id_lengths(mut self, id_format: IdFormat, serial_length: usize, card_length: usize) -> Self {
        self.catalog = Catalog::new(id_format);
        self.serial_length = serial_length;
        self.card_length = card_length;
        self
    }

    /// Add a book. `type_field` is the shelf location of a physical book or the
    /// download link of an e-book.
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        book_type: BookType,
        type_field: &str,
    ) -> CatalogResult<AddBookOutcome> {
        let book = self.build_book(title, author, book_type, type_field).inspect_err(|e| {
            warn!("Rejected {} book '{}' by '{}': {}", book_type, title, author, e);
        })?;
        let key = BookKey::new(book.title().clone(), book.author().clone(), book_type);

        let outcome = self.catalog.add_book(book);
        match &outcome {
            AddBookOutcome::Added(book_id) => info!("Added book {} with id {}", key, book_id),
            AddBookOutcome::AlreadyExists => debug!("Book {} already exists", key),
        }
        Ok(outcome)
    }

    fn build_book(
        &mut self,
        title: &str,
        author: &str,
        book_type: BookType,
        type_field: &str,
    ) -> CatalogResult<Book> {
        BookKey::parse(title, author, book_type)?;
        if book_type == BookType::Electronic {
            DownloadLink::new(type_field)?;
        }

        let id = BookId::new(self.generator.next_id(self.catalog.id_format().length()))?;
        let isbn = Isbn::new(self.generator.next_id(self.serial_length))?;

        let book = match book_type {
            BookType::Physical => Book::new_physical(id, isbn, title, author, type_field)?,
            BookType::Electronic => Book::new_ebook(id, isbn, title, author, type_field)?,
        };
        Ok(book)
    }

    /// Register a member. Names must be non-blank and the email valid; the email
    /// alone decides whether the member is already registered.
    pub fn register_member(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        member_type: MemberType,
    ) -> CatalogResult<RegisterMemberOutcome> {
        let member = self
            .build_member(first_name, last_name, email, member_type)
            .inspect_err(|e| warn!("Rejected {} registration for '{}': {}", member_type, email, e))?;
        let email = member.email().clone();

        let outcome = self.catalog.register_member(member);
        match &outcome {
            RegisterMemberOutcome::Registered(member_id) => {
                info!("Registered {} {} with id {}", member_type, email, member_id)
            }
            RegisterMemberOutcome::AlreadyExists => debug!("Member {} already registered", email),
        }
        Ok(outcome)
    }

    fn build_member(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        member_type: MemberType,
    ) -> CatalogResult<Member> {
        if first_name.trim().is_empty() {
            return Err(DomainError::InvalidValue(format!(
                "member's first name can't be empty, got '{}'",
                first_name
            ))
            .into());
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::InvalidValue(format!(
                "member's last name can't be empty, got '{}'",
                last_name
            ))
            .into());
        }
        Email::new(email)?;

        let id = MemberId::new(self.generator.next_id(self.catalog.id_format().length()))?;
        let card = CardNumber::new(self.generator.next_id(self.card_length))?;

        let member = match member_type {
            MemberType::Student => Member::new_student(id, card, first_name, last_name, email)?,
            MemberType::Teacher => Member::new_teacher(id, card, first_name, last_name, email)?,
        };
        Ok(member)
    }

    /// Lend a book to a member.
    ///
    /// An email that is not a valid address cannot belong to a member and a blank
    /// title or author cannot name a book, so those come back as not-found outcomes.
    pub fn borrow_book(
        &mut self,
        email: &str,
        title: &str,
        author: &str,
        book_type: BookType,
    ) -> CatalogResult<BorrowOutcome> {
        let Ok(member_email) = Email::new(email) else {
            debug!("Borrow by unknown member '{}'", email);
            return Ok(BorrowOutcome::MemberNotFound);
        };
        let Ok(key) = BookKey::parse(title, author, book_type) else {
            debug!("Borrow of unknown book '{}' by '{}'", title, author);
            return Ok(BorrowOutcome::BookNotFound);
        };

        match self.catalog.borrow_book(&member_email, &key) {
            Ok(BorrowOutcome::Success) => {
                info!("Book {} borrowed by {}", key, member_email);
                Ok(BorrowOutcome::Success)
            }
            Ok(outcome) => {
                debug!("Borrow of {} by {}: {:?}", key, member_email, outcome);
                Ok(outcome)
            }
            Err(e) => {
                error!("Borrow of {} by {} failed consistency check: {}", key, member_email, e);
                Err(CatalogError::System(e.to_string()))
            }
        }
    }

    /// Take a book back from the member who borrowed it
    pub fn return_book(
        &mut self,
        email: &str,
        title: &str,
        author: &str,
        book_type: BookType,
    ) -> CatalogResult<ReturnOutcome> {
        let Ok(member_email) = Email::new(email) else {
            debug!("Return by unknown member '{}'", email);
            return Ok(ReturnOutcome::MemberNotFound);
        };
        let Ok(key) = BookKey::parse(title, author, book_type) else {
            debug!("Return of unknown book '{}' by '{}'", title, author);
            return Ok(ReturnOutcome::BookNotFound);
        };

        match self.catalog.return_book(&member_email, &key) {
            Ok(ReturnOutcome::Success) => {
                info!("Book {} returned by {}", key, member_email);
                Ok(ReturnOutcome::Success)
            }
            Ok(outcome) => {
                debug!("Return of {} by {}: {:?}", key, member_email, outcome);
                Ok(outcome)
            }
            Err(e) => {
                error!("Return of {} by {} failed consistency check: {}", key, member_email, e);
                Err(CatalogError::System(e.to_string()))
            }
        }
    }

    /// Every book title, once per book, in the order books were added
    pub fn list_all_titles(&self) -> Vec<String> {
        self.catalog.titles()
    }

    /// Exact-match lookup with the same normalization books get on insert
    pub fn find_book(&self, title: &str, author: &str, book_type: BookType) -> Option<&Book> {
        let key = BookKey::parse(title, author, book_type).ok()?;
        self.catalog.find_book(&key)
    }

    pub fn find_member(&self, email: &str) -> Option<&Member> {
        let email = Email::new(email).ok()?;
        self.catalog.find_member(&email)
    }

    pub fn statistics(&self) -> CatalogStatistics {
        self.catalog.statistics()
    }

    /// Read-only view of the underlying aggregate, for the finer-grained counts
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
