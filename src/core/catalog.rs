use crate::domain::model::Book;
use crate::utils::error::{Entity, LibraryError, Result};
use std::collections::HashMap;

/// Books in insertion order, indexed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(
        &mut self,
        book_id: &str,
        title: &str,
        author: &str,
        copies: u32,
    ) -> Result<&Book> {
        if self.index.contains_key(book_id) {
            return Err(LibraryError::DuplicateId {
                entity: Entity::Book,
                id: book_id.to_string(),
            });
        }

        let slot = self.books.len();
        self.books.push(Book::new(
            book_id.to_string(),
            title.to_string(),
            author.to_string(),
            copies,
        ));
        self.index.insert(book_id.to_string(), slot);
        Ok(&self.books[slot])
    }

    pub fn find_book(&self, book_id: &str) -> Result<&Book> {
        self.index
            .get(book_id)
            .map(|&slot| &self.books[slot])
            .ok_or_else(|| not_found(book_id))
    }

    pub fn list_books(&self) -> &[Book] {
        &self.books
    }

    /// Ledger hook: one copy goes out on loan.
    pub(crate) fn decrement_available(&mut self, book_id: &str) -> Result<()> {
        let book = self.find_book_mut(book_id)?;
        if book.available_copies == 0 {
            return Err(out_of_bounds(book));
        }
        book.available_copies -= 1;
        Ok(())
    }

    /// Ledger hook: one copy comes back.
    pub(crate) fn increment_available(&mut self, book_id: &str) -> Result<()> {
        let book = self.find_book_mut(book_id)?;
        if book.available_copies >= book.total_copies {
            return Err(out_of_bounds(book));
        }
        book.available_copies += 1;
        Ok(())
    }

    fn find_book_mut(&mut self, book_id: &str) -> Result<&mut Book> {
        match self.index.get(book_id) {
            Some(&slot) => Ok(&mut self.books[slot]),
            None => Err(not_found(book_id)),
        }
    }
}

fn not_found(book_id: &str) -> LibraryError {
    LibraryError::NotFound {
        entity: Entity::Book,
        id: book_id.to_string(),
    }
}

fn out_of_bounds(book: &Book) -> LibraryError {
    tracing::error!(
        book_id = %book.book_id,
        available = book.available_copies,
        total = book.total_copies,
        "copy count would leave its bounds"
    );
    LibraryError::CopyCountOutOfBounds {
        book_id: book.book_id.clone(),
        available: book.available_copies,
        total: book.total_copies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find_book() {
        let mut catalog = Catalog::new();
        catalog.add_book("B1", "Dune", "Frank Herbert", 2).unwrap();

        let book = catalog.find_book("B1").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.total_copies, 2);
        assert_eq!(book.available_copies, 2);
        assert!(matches!(
            catalog.find_book("B2"),
            Err(LibraryError::NotFound { entity: Entity::Book, .. })
        ));
    }

    #[test]
    fn test_duplicate_book_leaves_original_untouched() {
        let mut catalog = Catalog::new();
        catalog.add_book("B1", "Dune", "Frank Herbert", 2).unwrap();

        let err = catalog.add_book("B1", "Emma", "Jane Austen", 9).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId { entity: Entity::Book, .. }));

        let book = catalog.find_book("B1").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.total_copies, 2);
        assert_eq!(catalog.list_books().len(), 1);
    }

    #[test]
    fn test_list_books_keeps_insertion_order() {
        let mut catalog = Catalog::new();
        for id in ["B3", "B1", "B2"] {
            catalog.add_book(id, "t", "a", 1).unwrap();
        }
        let ids: Vec<&str> = catalog
            .list_books()
            .iter()
            .map(|b| b.book_id.as_str())
            .collect();
        assert_eq!(ids, vec!["B3", "B1", "B2"]);
    }

    #[test]
    fn test_copy_count_hooks_enforce_bounds() {
        let mut catalog = Catalog::new();
        catalog.add_book("B1", "Dune", "Frank Herbert", 1).unwrap();

        assert!(matches!(
            catalog.increment_available("B1"),
            Err(LibraryError::CopyCountOutOfBounds { .. })
        ));
        catalog.decrement_available("B1").unwrap();
        assert_eq!(catalog.find_book("B1").unwrap().available_copies, 0);
        assert!(matches!(
            catalog.decrement_available("B1"),
            Err(LibraryError::CopyCountOutOfBounds { .. })
        ));
        catalog.increment_available("B1").unwrap();
        assert_eq!(catalog.find_book("B1").unwrap().available_copies, 1);
    }

    #[test]
    fn test_zero_copy_book_is_allowed() {
        let mut catalog = Catalog::new();
        let book = catalog.add_book("B0", "Rare", "Anon", 0).unwrap();
        assert_eq!(book.available_copies, 0);
    }
}
