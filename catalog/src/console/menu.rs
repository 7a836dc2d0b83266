/// Interactive menu over the catalog service
use super::prompt::{AnswerKind, InputSource};
use crate::application::identifiers::IdGenerator;
use crate::application::services::{CatalogError, CatalogService};
use crate::domain::aggregates::{AddBookOutcome, BorrowOutcome, RegisterMemberOutcome, ReturnOutcome};
use crate::domain::value_objects::{BookType, MemberType};
use std::io;
use tracing::{debug, error};

/// The commands a menu key can stand for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Exit,
    Statistics,
    AddBook,
    BorrowBook,
    ReturnBook,
    ListTitles,
    RegisterMember,
}

/// What the menu loop does after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: &'static str,
    pub description: &'static str,
    pub command: MenuCommand,
}

impl MenuOption {
    const fn new(key: &'static str, description: &'static str, command: MenuCommand) -> Self {
        MenuOption {
            key,
            description,
            command,
        }
    }
}

const MAIN_OPTIONS: [MenuOption; 7] = [
    MenuOption::new("X", "Exit", MenuCommand::Exit),
    MenuOption::new("0", "Show statistics", MenuCommand::Statistics),
    MenuOption::new("1", "Add a new book", MenuCommand::AddBook),
    MenuOption::new("2", "Borrow a book", MenuCommand::BorrowBook),
    MenuOption::new("3", "Return a book", MenuCommand::ReturnBook),
    MenuOption::new("4", "List all book titles", MenuCommand::ListTitles),
    MenuOption::new("5", "Register a new member", MenuCommand::RegisterMember),
];

/// Menu loop reading from an `InputSource` and acting on a `CatalogService`
pub struct Menu<G: IdGenerator, I: InputSource> {
    service: CatalogService<G>,
    input: I,
    options: Vec<MenuOption>,
}

impl<G: IdGenerator, I: InputSource> Menu<G, I> {
    pub fn new(service: CatalogService<G>, input: I) -> Self {
        Menu {
            service,
            input,
            options: MAIN_OPTIONS.to_vec(),
        }
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// Option for `key`, ignoring case and surrounding whitespace
    pub fn find_option(&self, key: &str) -> Option<&MenuOption> {
        let key = key.trim();
        self.options
            .iter()
            .find(|option| option.key.eq_ignore_ascii_case(key))
    }

    pub fn service(&self) -> &CatalogService<G> {
        &self.service
    }

    pub fn into_parts(self) -> (CatalogService<G>, I) {
        (self.service, self.input)
    }

    fn render(&self) -> String {
        let mut text = String::from("[MENU]:");
        for option in &self.options {
            text.push_str(&format!("\n  {} => {}", option.key, option.description));
        }
        text
    }

    /// Show the menu and run commands until Exit is chosen or the input ends
    pub fn run(&mut self) -> io::Result<()> {
        self.input.say("Welcome to the library catalog")?;

        loop {
            let menu = self.render();
            self.input.say(&menu)?;

            let Some(choice) = self.input.ask("Choice: ", AnswerKind::Text)? else {
                break;
            };
            let Some(command) = self.find_option(&choice).map(|option| option.command) else {
                self.input.say("Not a valid choice")?;
                continue;
            };

            debug!("Menu command {:?}", command);
            if self.execute(command)? == MenuAction::Quit {
                break;
            }
        }

        self.input.say("Goodbye")
    }

    pub fn execute(&mut self, command: MenuCommand) -> io::Result<MenuAction> {
        match command {
            MenuCommand::Exit => Ok(MenuAction::Quit),
            MenuCommand::Statistics => self.show_statistics(),
            MenuCommand::AddBook => self.add_book(),
            MenuCommand::BorrowBook => self.borrow_book(),
            MenuCommand::ReturnBook => self.return_book(),
            MenuCommand::ListTitles => self.list_titles(),
            MenuCommand::RegisterMember => self.register_member(),
        }
    }

    fn show_statistics(&mut self) -> io::Result<MenuAction> {
        let statistics = self.service.statistics();
        self.input.say(&format!("[STATISTICS]:\n{}", statistics))?;
        Ok(MenuAction::Continue)
    }

    fn list_titles(&mut self) -> io::Result<MenuAction> {
        let titles = self.service.list_all_titles();
        if titles.is_empty() {
            self.input.say("[ALERT]: No book titles found!!")?;
            return Ok(MenuAction::Continue);
        }

        let mut text = String::from("Book titles:");
        for title in &titles {
            text.push_str(&format!("\n\t'{}',", title));
        }
        self.input.say(&text)?;
        Ok(MenuAction::Continue)
    }

    fn ask_book_type(&mut self) -> io::Result<Option<BookType>> {
        let names = BookType::ALL.map(|book_type| book_type.name());
        let choice = self.input.select("Select book type:", &names)?;
        Ok(choice.map(|index| BookType::ALL[index]))
    }

    fn ask_member_type(&mut self) -> io::Result<Option<MemberType>> {
        let names = MemberType::ALL.map(|member_type| member_type.name());
        let choice = self.input.select("Select member type:", &names)?;
        Ok(choice.map(|index| MemberType::ALL[index]))
    }

    /// Title, author and type of the book a command is about
    fn ask_book(&mut self) -> io::Result<Option<(String, String, BookType)>> {
        let Some(title) = self.input.ask("Enter book title: ", AnswerKind::Text)? else {
            return Ok(None);
        };
        let Some(author) = self.input.ask("Enter book author: ", AnswerKind::Text)? else {
            return Ok(None);
        };
        let Some(book_type) = self.ask_book_type()? else {
            return Ok(None);
        };
        Ok(Some((title, author, book_type)))
    }

    fn report_member_not_found(&mut self, email: &str) -> io::Result<()> {
        self.input.say(&format!(
            "[NOT FOUND]: Operation failed because member with email = '{}' doesn't exist in the system\n[SYSTEM SUGGESTION]: Sign up by registering a new member",
            email
        ))
    }

    fn report_error(&mut self, err: &CatalogError) -> io::Result<()> {
        match err {
            CatalogError::InvalidInput(_) => self.input.say(&format!("[ERROR]: {}", err)),
            CatalogError::System(_) => {
                error!("Command failed: {}", err);
                self.input.say(&format!("[SYSTEM ERROR]: {}", err))
            }
        }
    }

    fn add_book(&mut self) -> io::Result<MenuAction> {
        let Some((title, author, book_type)) = self.ask_book()? else {
            return Ok(MenuAction::Quit);
        };
        let request = match book_type {
            BookType::Physical => "Enter book shelf location: ",
            BookType::Electronic => "Enter book download link: ",
        };
        let Some(type_field) = self.input.ask(request, AnswerKind::Text)? else {
            return Ok(MenuAction::Quit);
        };

        let result = self.service.add_book(&title, &author, book_type, &type_field);
        let details = self
            .service
            .find_book(&title, &author, book_type)
            .map(|book| book.to_string())
            .unwrap_or_default();

        match result {
            Ok(AddBookOutcome::Added(_)) => self.input.say(&format!(
                "[SUCCESS]: {} book has been successfully added to the system!!\n{}",
                book_type, details
            ))?,
            Ok(AddBookOutcome::AlreadyExists) => self.input.say(&format!(
                "[ALERT]: {} book with the following details already exists in the system!!\n{}",
                book_type, details
            ))?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(MenuAction::Continue)
    }

    fn register_member(&mut self) -> io::Result<MenuAction> {
        let Some(first_name) = self.input.ask("Enter member first name: ", AnswerKind::Text)? else {
            return Ok(MenuAction::Quit);
        };
        let Some(last_name) = self.input.ask("Enter member last name: ", AnswerKind::Text)? else {
            return Ok(MenuAction::Quit);
        };
        let Some(email) = self.input.ask("Enter member email: ", AnswerKind::Email)? else {
            return Ok(MenuAction::Quit);
        };
        let Some(member_type) = self.ask_member_type()? else {
            return Ok(MenuAction::Quit);
        };

        let result = self
            .service
            .register_member(&first_name, &last_name, &email, member_type);
        let details = self
            .service
            .find_member(&email)
            .map(|member| member.to_string())
            .unwrap_or_default();

        match result {
            Ok(RegisterMemberOutcome::Registered(_)) => self.input.say(&format!(
                "[SUCCESS]: {} has been successfully registered!!\n{}",
                member_type, details
            ))?,
            Ok(RegisterMemberOutcome::AlreadyExists) => self.input.say(&format!(
                "[ALERT]: A member with email '{}' already exists in the system!!\n{}",
                email, details
            ))?,
            Err(e) => self.report_error(&e)?,
        }
        Ok(MenuAction::Continue)
    }

    fn borrow_book(&mut self) -> io::Result<MenuAction> {
        let Some(email) = self.input.ask("Enter member email: ", AnswerKind::Email)? else {
            return Ok(MenuAction::Quit);
        };
        if self.service.find_member(&email).is_none() {
            self.report_member_not_found(&email)?;
            return Ok(MenuAction::Continue);
        }
        let Some((title, author, book_type)) = self.ask_book()? else {
            return Ok(MenuAction::Quit);
        };

        let message = match self.service.borrow_book(&email, &title, &author, book_type) {
            Ok(BorrowOutcome::Success) => format!(
                "[SUCCESS]: {} book '{}' by '{}' has been borrowed by '{}'",
                book_type, title, author, email
            ),
            Ok(BorrowOutcome::MemberNotFound) => {
                self.report_member_not_found(&email)?;
                return Ok(MenuAction::Continue);
            }
            Ok(BorrowOutcome::BookNotFound) => format!(
                "[NOT FOUND]: {} book '{}' by '{}' doesn't exist in the system",
                book_type, title, author
            ),
            Ok(BorrowOutcome::AlreadyBorrowed) => format!(
                "[ALERT]: {} book '{}' by '{}' is already borrowed by another member",
                book_type, title, author
            ),
            Ok(BorrowOutcome::MemberAlreadyHoldsIt) => format!(
                "[ALERT]: Member '{}' has already borrowed {} book '{}' by '{}'",
                email, book_type, title, author
            ),
            Err(e) => {
                self.report_error(&e)?;
                return Ok(MenuAction::Continue);
            }
        };
        self.input.say(&message)?;
        Ok(MenuAction::Continue)
    }

    fn return_book(&mut self) -> io::Result<MenuAction> {
        let Some(email) = self.input.ask("Enter member email: ", AnswerKind::Email)? else {
            return Ok(MenuAction::Quit);
        };
        if self.service.find_member(&email).is_none() {
            self.report_member_not_found(&email)?;
            return Ok(MenuAction::Continue);
        }
        let Some((title, author, book_type)) = self.ask_book()? else {
            return Ok(MenuAction::Quit);
        };

        let message = match self.service.return_book(&email, &title, &author, book_type) {
            Ok(ReturnOutcome::Success) => format!(
                "[SUCCESS]: {} book '{}' by '{}' has been returned by '{}'",
                book_type, title, author, email
            ),
            Ok(ReturnOutcome::MemberNotFound) => {
                self.report_member_not_found(&email)?;
                return Ok(MenuAction::Continue);
            }
            Ok(ReturnOutcome::BookNotFound) => format!(
                "[NOT FOUND]: {} book '{}' by '{}' doesn't exist in the system",
                book_type, title, author
            ),
            Ok(ReturnOutcome::NotBorrowed) => format!(
                "[ALERT]: {} book '{}' by '{}' is not borrowed",
                book_type, title, author
            ),
            Ok(ReturnOutcome::NotHeldByMember) => format!(
                "[ERROR]: {} book '{}' by '{}' was not borrowed by member '{}'",
                book_type, title, author, email
            ),
            Err(e) => {
                self.report_error(&e)?;
                return Ok(MenuAction::Continue);
            }
        };
        self.input.say(&message)?;
        Ok(MenuAction::Continue)
    }
}
