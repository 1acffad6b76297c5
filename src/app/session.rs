use crate::core::library::Library;
use crate::core::{Book, Clock};
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{parse_copies, require_text};
use std::io::{BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

const MENU: &[(u32, &str)] = &[
    (1, "Add a book"),
    (2, "List books"),
    (3, "Search for a book"),
    (4, "Add a member"),
    (5, "List members"),
    (6, "Borrow a book"),
    (7, "List active loans"),
    (8, "Return a book"),
    (9, "Calculate overdue fines"),
    (10, "Exit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ListBooks,
    SearchBook,
    AddMember,
    ListMembers,
    Borrow,
    ListLoans,
    Return,
    Fines,
    Exit,
}

impl TryFrom<u32> for MenuChoice {
    type Error = LibraryError;

    fn try_from(value: u32) -> Result<Self> {
        Ok(match value {
            1 => MenuChoice::AddBook,
            2 => MenuChoice::ListBooks,
            3 => MenuChoice::SearchBook,
            4 => MenuChoice::AddMember,
            5 => MenuChoice::ListMembers,
            6 => MenuChoice::Borrow,
            7 => MenuChoice::ListLoans,
            8 => MenuChoice::Return,
            9 => MenuChoice::Fines,
            10 => MenuChoice::Exit,
            other => {
                return Err(LibraryError::invalid_input(
                    "menu choice",
                    &other.to_string(),
                    "choose a number from 1 to 10",
                ))
            }
        })
    }
}

impl MenuChoice {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let number = trimmed.parse::<u32>().map_err(|_| {
            LibraryError::invalid_input("menu choice", trimmed, "enter a number from 1 to 10")
        })?;
        Self::try_from(number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Menu-driven front end. Holds no lending state of its own.
pub struct Session<'a, C: Clock, R: BufRead, W: Write> {
    library: &'a mut Library<C>,
    input: R,
    output: W,
}

impl<'a, C: Clock, R: BufRead, W: Write> Session<'a, C, R, W> {
    pub fn new(library: &'a mut Library<C>, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
        }
    }

    /// Run until the exit choice or end of input. Only I/O failures escape.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Select an operation (1-10)")? else {
                break;
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            tracing::debug!(?choice, "dispatching");

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(choice)));
            match outcome {
                Ok(Ok(Flow::Exit)) => break,
                Ok(Ok(Flow::Continue)) => {}
                Ok(Err(LibraryError::IoError(e))) => return Err(LibraryError::IoError(e)),
                Ok(Err(e)) => self.report(&e)?,
                Err(payload) => {
                    let detail = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown failure".to_string());
                    tracing::error!("command {:?} panicked: {}", choice, detail);
                    writeln!(self.output, "Internal error: {}", detail)?;
                }
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::AddBook => self.add_book(),
            MenuChoice::ListBooks => self.list_books(),
            MenuChoice::SearchBook => self.search_book(),
            MenuChoice::AddMember => self.add_member(),
            MenuChoice::ListMembers => self.list_members(),
            MenuChoice::Borrow => self.borrow(),
            MenuChoice::ListLoans => self.list_loans(),
            MenuChoice::Return => self.return_book(),
            MenuChoice::Fines => self.fines(),
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    fn add_book(&mut self) -> Result<Flow> {
        let Some(book_id) = self.prompt("Book ID")? else {
            return Ok(Flow::Exit);
        };
        let Some(title) = self.prompt("Title")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.prompt("Author")? else {
            return Ok(Flow::Exit);
        };
        let Some(copies) = self.prompt("Number of copies")? else {
            return Ok(Flow::Exit);
        };

        let book_id = require_text("book id", &book_id)?;
        let title = require_text("title", &title)?;
        let author = require_text("author", &author)?;
        let copies = parse_copies("copies", &copies)?;
        let book = self.library.add_book(&book_id, &title, &author, copies)?;
        writeln!(
            self.output,
            "Added book '{}' (ID: {}, author: {}, copies: {}).",
            book.title, book.book_id, book.author, book.total_copies
        )?;
        Ok(Flow::Continue)
    }

    fn list_books(&mut self) -> Result<Flow> {
        let books = self.library.list_books();
        if books.is_empty() {
            writeln!(self.output, "No books are registered.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "--- Books ---")?;
        for book in books {
            writeln!(self.output, "{}", book_line(book))?;
        }
        Ok(Flow::Continue)
    }

    fn search_book(&mut self) -> Result<Flow> {
        let Some(book_id) = self.prompt("Book ID")? else {
            return Ok(Flow::Exit);
        };
        let book = self.library.find_book(&require_text("book id", &book_id)?)?;
        writeln!(self.output, "{}", book_line(book))?;
        Ok(Flow::Continue)
    }

    fn add_member(&mut self) -> Result<Flow> {
        let Some(member_id) = self.prompt("Member ID")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Name")? else {
            return Ok(Flow::Exit);
        };

        let member_id = require_text("member id", &member_id)?;
        let name = require_text("name", &name)?;
        let member = self.library.add_member(&member_id, &name)?;
        writeln!(
            self.output,
            "Added member '{}' (ID: {}).",
            member.name, member.member_id
        )?;
        Ok(Flow::Continue)
    }

    fn list_members(&mut self) -> Result<Flow> {
        let members = self.library.list_members();
        if members.is_empty() {
            writeln!(self.output, "No members are registered.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "--- Members ---")?;
        for member in members {
            writeln!(self.output, "ID: {}, Name: {}", member.member_id, member.name)?;
        }
        Ok(Flow::Continue)
    }

    fn borrow(&mut self) -> Result<Flow> {
        let Some((book_id, member_id)) = self.prompt_pair()? else {
            return Ok(Flow::Exit);
        };
        let loan = self.library.borrow(&book_id, &member_id)?;
        writeln!(
            self.output,
            "Lent '{}' to {}. Due date: {}",
            loan.title, loan.member_name, loan.due_date
        )?;
        Ok(Flow::Continue)
    }

    fn list_loans(&mut self) -> Result<Flow> {
        let loans = self.library.active_loans()?;
        writeln!(self.output, "--- Active loans ---")?;
        if loans.is_empty() {
            writeln!(self.output, "No books are currently on loan.")?;
            return Ok(Flow::Continue);
        }

        for loan in loans {
            writeln!(
                self.output,
                "Book: {} (ID: {}), Member: {} (ID: {}), Borrowed: {}, Due: {}",
                loan.title,
                loan.book_id,
                loan.member_name,
                loan.member_id,
                loan.borrow_date,
                loan.due_date
            )?;
        }
        Ok(Flow::Continue)
    }

    fn return_book(&mut self) -> Result<Flow> {
        let Some((book_id, member_id)) = self.prompt_pair()? else {
            return Ok(Flow::Exit);
        };
        let loan = self.library.return_book(&book_id, &member_id)?;
        writeln!(self.output, "'{}' has been returned.", loan.title)?;
        Ok(Flow::Continue)
    }

    fn fines(&mut self) -> Result<Flow> {
        let lines = self.library.fines()?;
        writeln!(
            self.output,
            "--- Overdue fines (as of {}) ---",
            self.library.today()
        )?;
        if lines.is_empty() {
            writeln!(self.output, "No books are currently on loan.")?;
            return Ok(Flow::Continue);
        }

        let currency = &self.library.policy().currency;
        for line in lines {
            writeln!(
                self.output,
                "Book: {} (ID: {}), Member: {} (ID: {}), Due: {}, Overdue: {} days, Fine: {} {}",
                line.title,
                line.book_id,
                line.member_name,
                line.member_id,
                line.due_date,
                line.overdue_days,
                line.fine,
                currency
            )?;
        }
        Ok(Flow::Continue)
    }

    fn prompt_pair(&mut self) -> Result<Option<(String, String)>> {
        let Some(book_id) = self.prompt("Book ID")? else {
            return Ok(None);
        };
        let Some(member_id) = self.prompt("Member ID")? else {
            return Ok(None);
        };
        Ok(Some((
            require_text("book id", &book_id)?,
            require_text("member id", &member_id)?,
        )))
    }

    /// `None` means the input stream is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Library menu:")?;
        for (number, label) in MENU {
            writeln!(self.output, "{}: {}", number, label)?;
        }
        Ok(())
    }

    fn report(&mut self, error: &LibraryError) -> Result<()> {
        writeln!(self.output, "Error: {}", error.user_friendly_message())?;
        writeln!(self.output, "Hint: {}", error.recovery_suggestion())?;
        Ok(())
    }
}

fn book_line(book: &Book) -> String {
    format!(
        "ID: {}, Title: {}, Author: {}, Total: {}, Available: {}, On loan: {}",
        book.book_id,
        book.title,
        book.author,
        book.total_copies,
        book.available_copies,
        book.on_loan()
    )
}
