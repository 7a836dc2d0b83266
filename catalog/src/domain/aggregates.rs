/// Domain aggregates
use super::base::{DomainResult, Entity, NaturalKey};
use super::entities::{Book, Member};
use super::value_objects::{BookId, BookKey, BookType, Email, IdFormat, MemberId, MemberType};
use std::collections::HashMap;

/// Result of inserting a book into the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddBookOutcome {
    Added(BookId),
    AlreadyExists,
}

/// Result of inserting a member into the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterMemberOutcome {
    Registered(MemberId),
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    Success,
    MemberNotFound,
    BookNotFound,
    /// Someone, possibly the same member, already has the book
    AlreadyBorrowed,
    /// The member's own record already lists the book while the book is not
    /// flagged as borrowed; only reachable if state was corrupted
    MemberAlreadyHoldsIt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    Success,
    MemberNotFound,
    BookNotFound,
    NotBorrowed,
    /// The book is out, but with a different member
    NotHeldByMember,
}

/// Point-in-time counts over the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStatistics {
    pub total_books: usize,
    pub physical_books: usize,
    pub ebooks: usize,
    pub borrowed_physical_books: usize,
    pub borrowed_ebooks: usize,
    pub total_members: usize,
    pub students: usize,
    pub teachers: usize,
}

impl std::fmt::Display for CatalogStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Books:    {}", self.total_books)?;
        writeln!(
            f,
            "Physical books: {} of which {} are borrowed",
            self.physical_books, self.borrowed_physical_books
        )?;
        writeln!(
            f,
            "E-books:        {} of which {} are borrowed",
            self.ebooks, self.borrowed_ebooks
        )?;
        writeln!(f)?;
        writeln!(f, "Total Members:  {}", self.total_members)?;
        writeln!(f, "Teachers:       {}", self.teachers)?;
        write!(f, "Students:       {}", self.students)
    }
}

/// The Catalog is the aggregate root owning every Book and Member.
///
/// Books are keyed by title, author and type; members by email. The aggregate
/// keeps a book's borrowed flag and the members' borrowed-id sets in step:
/// a book is borrowed exactly when one member lists its id.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: HashMap<BookKey, Book>,
    book_order: Vec<BookKey>,
    members: HashMap<Email, Member>,
    id_format: IdFormat,
}

impl Catalog {
    /// Create an empty catalog whose book ids have the shape of `id_format`
    pub fn new(id_format: IdFormat) -> Self {
        Catalog {
            books: HashMap::new(),
            book_order: Vec::new(),
            members: HashMap::new(),
            id_format,
        }
    }

    pub fn id_format(&self) -> IdFormat {
        self.id_format
    }

    /// Add a book unless an equal one (same title, author and type) is already present
    pub fn add_book(&mut self, book: Book) -> AddBookOutcome {
        let key = book.natural_key();
        if self.books.contains_key(&key) {
            return AddBookOutcome::AlreadyExists;
        }

        let book_id = book.id().clone();
        self.books.insert(key.clone(), book);
        self.book_order.push(key);
        AddBookOutcome::Added(book_id)
    }

    /// Register a member unless one with the same email is already present
    pub fn register_member(&mut self, member: Member) -> RegisterMemberOutcome {
        let key = member.natural_key();
        if self.members.contains_key(&key) {
            return RegisterMemberOutcome::AlreadyExists;
        }

        let member_id = member.id().clone();
        self.members.insert(key, member);
        RegisterMemberOutcome::Registered(member_id)
    }

    pub fn find_book(&self, key: &BookKey) -> Option<&Book> {
        self.books.get(key)
    }

    pub fn find_member(&self, email: &Email) -> Option<&Member> {
        self.members.get(email)
    }

    /// Lend the book identified by `key` to the member with `email`.
    ///
    /// The member's record is updated first and the book is flagged only when
    /// that succeeded, so a failure never leaves a borrowed book without a holder.
    /// An `Err` means a malformed book id reached the member record.
    pub fn borrow_book(&mut self, email: &Email, key: &BookKey) -> DomainResult<BorrowOutcome> {
        let Some(member) = self.members.get_mut(email) else {
            return Ok(BorrowOutcome::MemberNotFound);
        };
        let Some(book) = self.books.get_mut(key) else {
            return Ok(BorrowOutcome::BookNotFound);
        };

        if book.is_borrowed() {
            return Ok(BorrowOutcome::AlreadyBorrowed);
        }

        if !member.borrow_book(book.id(), self.id_format)? {
            return Ok(BorrowOutcome::MemberAlreadyHoldsIt);
        }

        book.borrow();
        Ok(BorrowOutcome::Success)
    }

    /// Take the book identified by `key` back from the member with `email`
    pub fn return_book(&mut self, email: &Email, key: &BookKey) -> DomainResult<ReturnOutcome> {
        let Some(member) = self.members.get_mut(email) else {
            return Ok(ReturnOutcome::MemberNotFound);
        };
        let Some(book) = self.books.get_mut(key) else {
            return Ok(ReturnOutcome::BookNotFound);
        };

        if !book.is_borrowed() {
            return Ok(ReturnOutcome::NotBorrowed);
        }

        if !member.try_return_book(book.id(), self.id_format)? {
            return Ok(ReturnOutcome::NotHeldByMember);
        }

        book.return_book();
        Ok(ReturnOutcome::Success)
    }

    /// The member currently holding the book with `book_id`, if any
    pub fn holder_of(&self, book_id: &BookId) -> Option<&Member> {
        self.members
            .values()
            .find(|member| member.borrowed_book_ids().contains(book_id))
    }

    /// Whether every book's borrowed flag matches exactly one holder
    pub fn is_borrow_state_consistent(&self) -> bool {
        self.books.values().all(|book| {
            let holders = self
                .members
                .values()
                .filter(|member| member.borrowed_book_ids().contains(book.id()))
                .count();
            if book.is_borrowed() {
                holders == 1
            } else {
                holders == 0
            }
        })
    }

    /// All titles, once per book, in the order the books were added
    pub fn titles(&self) -> Vec<String> {
        self.book_order
            .iter()
            .filter_map(|key| self.books.get(key))
            .map(|book| book.title().as_str().to_string())
            .collect()
    }

    /// Get all books in the order they were added
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.book_order.iter().filter_map(|key| self.books.get(key))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn books_of_type(&self, book_type: BookType) -> usize {
        self.books
            .values()
            .filter(|book| book.book_type() == book_type)
            .count()
    }

    pub fn borrowed_books_of_type(&self, book_type: BookType) -> usize {
        self.books
            .values()
            .filter(|book| book.book_type() == book_type && book.is_borrowed())
            .count()
    }

    pub fn members_of_type(&self, member_type: MemberType) -> usize {
        self.members
            .values()
            .filter(|member| member.member_type() == member_type)
            .count()
    }

    pub fn statistics(&self) -> CatalogStatistics {
        CatalogStatistics {
            total_books: self.book_count(),
            physical_books: self.books_of_type(BookType::Physical),
            ebooks: self.books_of_type(BookType::Electronic),
            borrowed_physical_books: self.borrowed_books_of_type(BookType::Physical),
            borrowed_ebooks: self.borrowed_books_of_type(BookType::Electronic),
            total_members: self.member_count(),
            students: self.members_of_type(MemberType::Student),
            teachers: self.members_of_type(MemberType::Teacher),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(IdFormat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::base::DomainError;
    use crate::domain::value_objects::{CardNumber, Isbn};

    fn physical(id: &str, title: &str, author: &str, shelf: &str) -> Book {
        Book::new_physical(
            BookId::new(id).unwrap(),
            Isbn::new(format!("isbn{}", id)).unwrap(),
            title,
            author,
            shelf,
        )
        .unwrap()
    }

    fn ebook(id: &str, title: &str, author: &str) -> Book {
        Book::new_ebook(
            BookId::new(id).unwrap(),
            Isbn::new(format!("isbn{}", id)).unwrap(),
            title,
            author,
            "https://example.com/download",
        )
        .unwrap()
    }

    fn student(id: &str, email: &str) -> Member {
        Member::new_student(
            MemberId::new(id).unwrap(),
            CardNumber::new(format!("card{}", id)).unwrap(),
            "Jane",
            "Doe",
            email,
        )
        .unwrap()
    }

    fn teacher(id: &str, email: &str) -> Member {
        Member::new_teacher(
            MemberId::new(id).unwrap(),
            CardNumber::new(format!("card{}", id)).unwrap(),
            "John",
            "Smith",
            email,
        )
        .unwrap()
    }

    fn dune_key() -> BookKey {
        BookKey::parse("Dune", "Herbert", BookType::Physical).unwrap()
    }

    fn email(raw: &str) -> Email {
        Email::new(raw).unwrap()
    }

    fn catalog_with_dune_and_jane() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.add_book(physical("0000000a", "Dune", "Herbert", "A1"));
        catalog.register_member(student("aaaa0001", "jane@x.com"));
        catalog
    }

    #[test]
    fn test_create_catalog() {
        let catalog = Catalog::default();

        assert_eq!(catalog.book_count(), 0);
        assert_eq!(catalog.member_count(), 0);
        assert!(catalog.titles().is_empty());
        assert_eq!(catalog.statistics(), CatalogStatistics::default());
    }

    #[test]
    fn test_add_duplicate_book_rejected() {
        let mut catalog = Catalog::default();

        let outcome = catalog.add_book(physical("0000000a", "Dune", "Herbert", "A1"));
        assert_eq!(outcome, AddBookOutcome::Added(BookId::new("0000000a").unwrap()));

        let outcome = catalog.add_book(physical("0000000b", "dune", " Herbert ", "A2"));
        assert_eq!(outcome, AddBookOutcome::AlreadyExists);
        assert_eq!(catalog.book_count(), 1);

        // the first copy stays
        let stored = catalog.find_book(&dune_key()).unwrap();
        assert_eq!(stored.shelf_location(), Some("A1"));
    }

    #[test]
    fn test_same_title_different_type_is_a_different_book() {
        let mut catalog = Catalog::default();

        catalog.add_book(physical("0000000a", "Dune", "Herbert", "A1"));
        let outcome = catalog.add_book(ebook("0000000b", "Dune", "Herbert"));

        assert!(matches!(outcome, AddBookOutcome::Added(_)));
        assert_eq!(catalog.book_count(), 2);
    }

    #[test]
    fn test_register_duplicate_email_rejected() {
        let mut catalog = Catalog::default();

        let outcome = catalog.register_member(student("aaaa0001", "A@B.com"));
        assert!(matches!(outcome, RegisterMemberOutcome::Registered(_)));

        let outcome = catalog.register_member(teacher("aaaa0002", "a@b.com"));
        assert_eq!(outcome, RegisterMemberOutcome::AlreadyExists);
        assert_eq!(catalog.member_count(), 1);
    }

    #[test]
    fn test_borrow_and_return_round_trip() {
        let mut catalog = catalog_with_dune_and_jane();
        let jane = email("jane@x.com");
        let key = dune_key();

        assert_eq!(catalog.borrow_book(&jane, &key), Ok(BorrowOutcome::Success));

        let book_id = catalog.find_book(&key).unwrap().id().clone();
        assert!(catalog.find_book(&key).unwrap().is_borrowed());
        assert!(catalog.find_member(&jane).unwrap().borrowed_book_ids().contains(&book_id));
        assert_eq!(catalog.holder_of(&book_id).map(|m| m.email()), Some(&jane));
        assert!(catalog.is_borrow_state_consistent());

        assert_eq!(catalog.return_book(&jane, &key), Ok(ReturnOutcome::Success));
        assert!(!catalog.find_book(&key).unwrap().is_borrowed());
        assert!(catalog.find_member(&jane).unwrap().borrowed_book_ids().is_empty());
        assert!(catalog.holder_of(&book_id).is_none());
        assert!(catalog.is_borrow_state_consistent());
    }

    #[test]
    fn test_borrow_unknown_member_or_book() {
        let mut catalog = catalog_with_dune_and_jane();

        assert_eq!(
            catalog.borrow_book(&email("nobody@x.com"), &dune_key()),
            Ok(BorrowOutcome::MemberNotFound)
        );

        let missing = BookKey::parse("Emma", "Austen", BookType::Physical).unwrap();
        assert_eq!(
            catalog.borrow_book(&email("jane@x.com"), &missing),
            Ok(BorrowOutcome::BookNotFound)
        );
    }

    #[test]
    fn test_borrow_already_borrowed_book() {
        let mut catalog = catalog_with_dune_and_jane();
        catalog.register_member(teacher("aaaa0002", "john@x.com"));
        let jane = email("jane@x.com");
        let john = email("john@x.com");

        catalog.borrow_book(&jane, &dune_key()).unwrap();

        assert_eq!(catalog.borrow_book(&jane, &dune_key()), Ok(BorrowOutcome::AlreadyBorrowed));
        assert_eq!(catalog.borrow_book(&john, &dune_key()), Ok(BorrowOutcome::AlreadyBorrowed));
        assert!(catalog.find_member(&john).unwrap().borrowed_book_ids().is_empty());
        assert_eq!(catalog.find_member(&jane).unwrap().borrowed_book_ids().len(), 1);
        assert!(catalog.is_borrow_state_consistent());
    }

    #[test]
    fn test_return_not_borrowed_book() {
        let mut catalog = catalog_with_dune_and_jane();

        assert_eq!(
            catalog.return_book(&email("jane@x.com"), &dune_key()),
            Ok(ReturnOutcome::NotBorrowed)
        );
        assert!(catalog.is_borrow_state_consistent());
    }

    #[test]
    fn test_return_book_held_by_someone_else() {
        let mut catalog = catalog_with_dune_and_jane();
        catalog.register_member(teacher("aaaa0002", "john@x.com"));
        let jane = email("jane@x.com");
        let john = email("john@x.com");

        catalog.borrow_book(&jane, &dune_key()).unwrap();

        assert_eq!(catalog.return_book(&john, &dune_key()), Ok(ReturnOutcome::NotHeldByMember));
        assert!(catalog.find_book(&dune_key()).unwrap().is_borrowed());
        assert_eq!(catalog.find_member(&jane).unwrap().borrowed_book_ids().len(), 1);
        assert!(catalog.is_borrow_state_consistent());
    }

    #[test]
    fn test_malformed_book_id_is_a_system_error() {
        let mut catalog = Catalog::default();
        catalog.add_book(physical("not-hex!", "Dune", "Herbert", "A1"));
        catalog.register_member(student("aaaa0001", "jane@x.com"));

        let result = catalog.borrow_book(&email("jane@x.com"), &dune_key());

        assert!(matches!(result, Err(DomainError::InvalidIdentifier(_))));
        assert!(!catalog.find_book(&dune_key()).unwrap().is_borrowed());
        assert!(catalog.is_borrow_state_consistent());
    }

    #[test]
    fn test_member_record_out_of_step_with_book() {
        let mut catalog = Catalog::default();
        catalog.add_book(physical("0000000a", "Dune", "Herbert", "A1"));

        let mut jane = student("aaaa0001", "jane@x.com");
        jane.borrow_book(&BookId::new("0000000a").unwrap(), IdFormat::default())
            .unwrap();
        catalog.register_member(jane);

        let outcome = catalog.borrow_book(&email("jane@x.com"), &dune_key());

        assert_eq!(outcome, Ok(BorrowOutcome::MemberAlreadyHoldsIt));
        assert!(!catalog.find_book(&dune_key()).unwrap().is_borrowed());
    }

    #[test]
    fn test_titles_in_insertion_order() {
        let mut catalog = Catalog::default();
        catalog.add_book(physical("0000000a", "Dune", "Herbert", "A1"));
        catalog.add_book(ebook("0000000b", "Emma", "Austen"));
        catalog.add_book(physical("0000000c", "DUNE", "Herbert", "A3"));
        catalog.add_book(physical("0000000d", "Ulysses", "Joyce", "B2"));

        assert_eq!(catalog.titles(), vec!["dune", "emma", "ulysses"]);
        assert_eq!(catalog.books().count(), 3);
    }

    #[test]
    fn test_statistics() {
        let mut catalog = catalog_with_dune_and_jane();
        catalog.add_book(ebook("0000000b", "Emma", "Austen"));
        catalog.add_book(ebook("0000000c", "Ulysses", "Joyce"));
        catalog.register_member(teacher("aaaa0002", "john@x.com"));
        catalog.register_member(teacher("aaaa0003", "ann@x.com"));

        let emma = BookKey::parse("Emma", "Austen", BookType::Electronic).unwrap();
        catalog.borrow_book(&email("jane@x.com"), &emma).unwrap();

        let stats = catalog.statistics();
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.physical_books, 1);
        assert_eq!(stats.ebooks, 2);
        assert_eq!(stats.borrowed_physical_books, 0);
        assert_eq!(stats.borrowed_ebooks, 1);
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.students, 1);
        assert_eq!(stats.teachers, 2);

        let text = stats.to_string();
        assert!(text.contains("E-books:        2 of which 1 are borrowed"));
    }
}
