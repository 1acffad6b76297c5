use chrono::NaiveDate;
use library_ledger::core::Clock;
use library_ledger::{FixedClock, LendingPolicy, Library, Session};
use std::io::Cursor;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()
}

/// Feed `script` to a fresh session and return everything it printed.
fn run_script(library: &mut Library<FixedClock>, script: &str) -> String {
    let mut output = Vec::new();
    Session::new(library, Cursor::new(script.as_bytes()), &mut output)
        .run()
        .unwrap();
    String::from_utf8(output).unwrap()
}

fn new_library() -> Library<FixedClock> {
    Library::new(LendingPolicy::default(), FixedClock(today()))
}

#[test]
fn test_full_menu_walkthrough() {
    let mut library = new_library();
    let script = "\
1\nB1\nDune\nFrank Herbert\n2\n\
4\nM1\nAlice\n\
6\nB1\nM1\n\
2\n\
5\n\
7\n\
9\n\
8\nB1\nM1\n\
7\n\
10\n";

    let out = run_script(&mut library, script);

    assert!(out.contains("Added book 'Dune' (ID: B1, author: Frank Herbert, copies: 2)."));
    assert!(out.contains("Added member 'Alice' (ID: M1)."));
    assert!(out.contains("Lent 'Dune' to Alice. Due date: 2024-12-31"));
    assert!(out.contains("ID: B1, Title: Dune, Author: Frank Herbert, Total: 2, Available: 1"));
    assert!(out.contains("ID: M1, Name: Alice"));
    assert!(out.contains(
        "Book: Dune (ID: B1), Member: Alice (ID: M1), Borrowed: 2024-12-24, Due: 2024-12-31"
    ));
    assert!(out.contains("--- Overdue fines (as of 2024-12-24) ---"));
    assert!(out.contains("Overdue: 0 days, Fine: 0 JPY"));
    assert!(out.contains("'Dune' has been returned."));
    assert!(out.contains("No books are currently on loan."));
    assert!(out.trim_end().ends_with("Goodbye."));

    assert_eq!(library.find_book("B1").unwrap().available_copies, 2);
}

#[test]
fn test_search_prompts_for_the_id() {
    let mut library = new_library();
    library.add_book("B7", "Emma", "Jane Austen", 1).unwrap();

    let out = run_script(&mut library, "3\nB7\n3\nB8\n10\n");

    assert!(out.contains("Book ID: "));
    assert!(out.contains("ID: B7, Title: Emma, Author: Jane Austen, Total: 1, Available: 1"));
    assert!(out.contains("Error: No book with ID 'B8' exists."));
}

#[test]
fn test_invalid_menu_input_keeps_the_loop_alive() {
    let mut library = new_library();

    let out = run_script(&mut library, "abc\n42\n\n2\n10\n");

    assert_eq!(out.matches("Error: Invalid menu choice").count(), 3);
    assert!(out.contains("No books are registered."));
    assert!(out.contains("Goodbye."));
}

#[test]
fn test_non_integer_copies_is_reported_and_nothing_added() {
    let mut library = new_library();

    let script = "1\nB1\nDune\nFrank Herbert\ntwo\n1\nB2\nEmma\nAusten\n-1\n10\n";
    let out = run_script(&mut library, script);

    assert!(out.contains("Error: Invalid copies: must be a whole number."));
    assert!(out.contains("Error: Invalid copies: must not be negative."));
    assert!(library.list_books().is_empty());
}

#[test]
fn test_lending_errors_are_reported() {
    let mut library = new_library();
    library.add_book("B1", "Dune", "Frank Herbert", 1).unwrap();
    library.add_member("M1", "Alice").unwrap();
    library.add_member("M2", "Bob").unwrap();

    let script = "6\nB1\nM1\n6\nB1\nM2\n8\nB1\nM2\n4\nM1\nAgain\n6\nB1\nM9\n10\n";
    let out = run_script(&mut library, script);

    assert!(out.contains("Error: 'Dune' has no copies available for loan right now."));
    assert!(out.contains("Error: Member 'M2' is not currently borrowing book 'B1'."));
    assert!(out.contains("Error: A member with ID 'M1' already exists."));
    assert!(out.contains("Error: No member with ID 'M9' exists."));
    assert!(out.contains("Hint: "));
    assert_eq!(library.loan_records().len(), 1);
}

#[test]
fn test_end_of_input_ends_the_session() {
    let mut library = new_library();

    let out = run_script(&mut library, "1\nB1\nDune\n");

    assert!(out.trim_end().ends_with("Goodbye."));
    assert!(library.list_books().is_empty());
}

#[test]
fn test_empty_listings_report_explicitly() {
    let mut library = new_library();

    let out = run_script(&mut library, "2\n5\n7\n9\n10\n");

    assert!(out.contains("No books are registered."));
    assert!(out.contains("No members are registered."));
    assert_eq!(out.matches("No books are currently on loan.").count(), 2);
}

#[test]
fn test_blank_title_or_author_is_rejected() {
    let mut library = new_library();

    let out = run_script(&mut library, "1\nB1\n\nFrank Herbert\n1\n1\nB1\nDune\n  \n1\n10\n");

    assert!(out.contains("Error: Invalid title: must not be empty."));
    assert!(out.contains("Error: Invalid author: must not be empty."));
    assert!(library.list_books().is_empty());
}

#[test]
fn test_book_line_shows_copies_on_loan() {
    let mut library = new_library();
    library.add_book("B1", "Dune", "Frank Herbert", 3).unwrap();
    library.add_member("M1", "Alice").unwrap();
    library.borrow("B1", "M1").unwrap();

    let out = run_script(&mut library, "3\nB1\n10\n");

    assert!(out.contains("Total: 3, Available: 2, On loan: 1"));
}

/// Clock whose date cannot be read; every dated command fails hard.
struct BrokenClock;

impl Clock for BrokenClock {
    fn today(&self) -> NaiveDate {
        panic!("clock unavailable")
    }
}

#[test]
fn test_failing_command_does_not_end_the_session() {
    let mut library = Library::new(LendingPolicy::default(), BrokenClock);
    library.add_book("B1", "Dune", "Frank Herbert", 1).unwrap();
    library.add_member("M1", "Alice").unwrap();

    let mut output = Vec::new();
    Session::new(&mut library, Cursor::new(&b"6\nB1\nM1\n2\n10\n"[..]), &mut output)
        .run()
        .unwrap();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("Internal error: clock unavailable"));
    assert!(out.contains("ID: B1, Title: Dune, Author: Frank Herbert, Total: 1, Available: 1"));
    assert!(out.trim_end().ends_with("Goodbye."));
    assert!(library.loan_records().is_empty());
}
