//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use readshelf::application::service::LibraryService;
use readshelf::domain::model::book::{Book, ReadingProgress};
use readshelf::domain::repository::LibraryRepository;
use readshelf::interface::console::Console;
use readshelf::interface::menu::Session;

pub const TEST_YEAR: i32 = 2025;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。cloneは同じ保存先を共有する。
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    store: Rc<RefCell<Option<String>>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: &[Book]) -> Self {
        let repo = Self::new();
        repo.save(books).unwrap();
        repo
    }

    /// 最後に保存された内容。未保存ならNone。
    pub fn saved_books(&self) -> Option<Vec<Book>> {
        self.load().unwrap()
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error> {
        match self.store.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json).unwrap())),
            None => Ok(None),
        }
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        let json = serde_json::to_string(books).unwrap();
        *self.store.borrow_mut() = Some(json);
        Ok(())
    }
}

/// 保存が常に失敗するリポジトリ。
pub struct FailingRepo;

impl LibraryRepository for FailingRepo {
    type Error = std::io::Error;

    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error> {
        Ok(None)
    }

    fn save(&self, _books: &[Book]) -> Result<(), Self::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn genres(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

pub fn reading(title: &str, current: u32, total: u32) -> Book {
    let progress = ReadingProgress::new("2024-01-01", current, total).unwrap();
    Book::unread(title, "Someone", 2000, genres(&["Novel"]), Some(progress))
}

/// 標準的なテスト用ライブラリ:
/// ```text
/// Dune            Frank Herbert    1965  Sci-Fi, Classic  Read
/// Emma            Jane Austen      1815  Classic          Unread 120/474
/// Neuromancer     William Gibson   1984  Cyberpunk        Unread (not started)
/// ```
pub fn standard_books() -> Vec<Book> {
    vec![
        Book::read("Dune", "Frank Herbert", 1965, genres(&["Sci-Fi", "Classic"])),
        Book::unread(
            "Emma",
            "Jane Austen",
            1815,
            genres(&["Classic"]),
            Some(ReadingProgress::new("2024-05-01", 120, 474).unwrap()),
        ),
        Book::unread(
            "Neuromancer",
            "William Gibson",
            1984,
            genres(&["Cyberpunk"]),
            None,
        ),
    ]
}

// =============================================================================
// Session driver
// =============================================================================

/// 入力文字列でメニューを最後まで回し、サービスと出力を返す。
pub fn drive<R: LibraryRepository>(repo: R, input: &str) -> (LibraryService<R>, String) {
    let (service, _) = LibraryService::open(repo);
    let console = Console::new(input.as_bytes(), Vec::new());
    let mut session = Session::new(service, console, TEST_YEAR);
    session.run().unwrap();

    let (service, console) = session.into_parts();
    let output = String::from_utf8(console.into_output()).unwrap();
    (service, output)
}

pub fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|b| b.title()).collect()
}
