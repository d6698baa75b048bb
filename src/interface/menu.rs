//! Interactive menu for readshelf
//!
//! stdin/stdout <-> application::LibraryService / CatalogView
//!
//! 8 choices: add, remove, search, list, statistics, filter, sort, exit

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Datelike;

use crate::application::error::AppError;
use crate::application::render::CatalogView;
use crate::application::service::{LibraryService, LoadOutcome};
use crate::domain::error::ValidationError;
use crate::domain::model::book::{Book, ReadingProgress};
use crate::domain::model::library::{SearchField, SortKey};
use crate::domain::repository::LibraryRepository;
use crate::domain::validate::{parse_page, validate_nonempty, validate_pages, validate_year};
use crate::infra::json_store::JsonLibraryRepository;

use super::console::{Console, ConsoleError};

pub const DEFAULT_LIBRARY_FILE: &str = "library_data.json";

const MAIN_MENU: &str = "Welcome to your Personal Library Manager!
1. Add a book
2. Remove a book
3. Search for a book
4. Display all books
5. Display statistics
6. Filter by genre
7. Sort library
8. Exit
Enter your choice: ";

const EMPTY_LIBRARY: &str = "Your library is empty.";

// =============================================================================
// Public entry point
// =============================================================================

/// 対話セッションを開始する。終了（選択肢8またはEOF）まで戻らない。
pub fn run(library_path: PathBuf) -> anyhow::Result<()> {
    let repo = JsonLibraryRepository::new(library_path);
    tracing::debug!(path = %repo.path().display(), "starting session");
    let (service, outcome) = LibraryService::open(repo);

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let current_year = chrono::Local::now().year();

    let mut session = Session::new(service, console, current_year);
    session.report_load(&outcome)?;
    session.run()?;
    Ok(())
}

// =============================================================================
// Menu choices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    List,
    Statistics,
    FilterByGenre,
    Sort,
    Exit,
}

impl MenuChoice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Search),
            "4" => Some(Self::List),
            "5" => Some(Self::Statistics),
            "6" => Some(Self::FilterByGenre),
            "7" => Some(Self::Sort),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// 1回の選択を処理した後の遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// =============================================================================
// Session
// =============================================================================

pub struct Session<R: LibraryRepository, I, O> {
    service: LibraryService<R>,
    console: Console<I, O>,
    current_year: i32,
}

impl<R: LibraryRepository, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(service: LibraryService<R>, console: Console<I, O>, current_year: i32) -> Self {
        Self {
            service,
            console,
            current_year,
        }
    }

    pub fn into_parts(self) -> (LibraryService<R>, Console<I, O>) {
        (self.service, self.console)
    }

    pub fn report_load(&mut self, outcome: &LoadOutcome) -> Result<(), ConsoleError> {
        match outcome {
            LoadOutcome::Loaded(_) => self.console.say("Library data loaded successfully!"),
            LoadOutcome::NotFound => self
                .console
                .say("No existing library found. Starting with empty library."),
            LoadOutcome::Failed(e) => self.console.say(&format!("Error loading library: {e}")),
        }
    }

    /// メニューループ。EOFは終了選択と同じく保存して抜ける。
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => continue,
                Ok(Flow::Exit) => return Ok(()),
                Err(ConsoleError::Closed) => {
                    tracing::debug!("input closed, exiting");
                    self.exit()?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 1回分：選択を読んで実行する。
    pub fn step(&mut self) -> Result<Flow, ConsoleError> {
        let input = self.console.ask(MAIN_MENU)?;
        let Some(choice) = MenuChoice::parse(&input) else {
            self.console
                .say("Invalid choice. Please enter a number between 1 and 8.")?;
            return Ok(Flow::Continue);
        };
        tracing::debug!(?choice, "menu choice");

        match choice {
            MenuChoice::Add => self.add_book()?,
            MenuChoice::Remove => self.remove_book()?,
            MenuChoice::Search => self.search()?,
            MenuChoice::List => self.list()?,
            MenuChoice::Statistics => self.statistics()?,
            MenuChoice::FilterByGenre => self.filter_by_genre()?,
            MenuChoice::Sort => self.sort()?,
            MenuChoice::Exit => return self.exit(),
        }
        Ok(Flow::Continue)
    }

    // --- operations ---

    fn add_book(&mut self) -> Result<(), ConsoleError> {
        self.console.say("\nAdding a new book:")?;
        self.console.say(&"-".repeat(30))?;

        let title = self.console.ask_until("Enter book title: ", validate_nonempty)?;
        if self.service.library().has_title(&title) {
            self.console.say(&format!(
                "Warning: A book with the title '{title}' already exists."
            ))?;
            let answer = self.console.ask("Do you want to continue? (yes/no): ")?;
            if answer.trim().to_lowercase() != "yes" {
                return Ok(());
            }
        }

        let author = self
            .console
            .ask_until("Enter book author: ", validate_nonempty)?;
        let current_year = self.current_year;
        let year = self.console.ask_until("Enter publication year: ", |s| {
            let s = validate_nonempty(s)?;
            validate_year(&s, current_year)
        })?;

        self.console.say("\nEnter genres (press Enter when done):")?;
        let genres = self.collect_genres()?;

        let book = if self.ask_yes_no("Have you read this book? (yes/no): ")? {
            Book::read(title, author, year, genres)
        } else {
            self.console.say("\nEnter reading progress:")?;
            let progress = self.collect_reading_progress()?;
            Book::unread(title, author, year, genres, Some(progress))
        };

        let line = CatalogView::format_book(&book, None);
        let saved = self.service.add(book);
        self.report_save(saved)?;

        self.console.say("\nBook added successfully!")?;
        self.console.say("Book details:")?;
        self.console.say(&line)
    }

    fn remove_book(&mut self) -> Result<(), ConsoleError> {
        let query = self
            .console
            .ask("Enter the title of the book to remove: ")?;
        let query = query.trim();

        // Errは削除後の保存失敗のみ
        match self.service.remove(query) {
            Ok(None) => {
                return self
                    .console
                    .say(&format!("Book '{query}' not found in your library."));
            }
            Ok(Some(_)) => self.report_save(Ok(()))?,
            Err(e) => self.report_save(Err(e))?,
        }
        self.console
            .say(&format!("Book '{query}' has been removed successfully!"))
    }

    fn search(&mut self) -> Result<(), ConsoleError> {
        self.console.say("\nSearch by:")?;
        self.console.say("1. Title")?;
        self.console.say("2. Author")?;
        let choice = self.console.ask("Enter your choice: ")?;

        let (field, prompt) = match choice.trim() {
            "1" => (SearchField::Title, "Enter the title: "),
            "2" => (SearchField::Author, "Enter the author: "),
            _ => return self.console.say("Invalid choice!"),
        };
        let query = self.console.ask(prompt)?;

        let lines: Vec<String> = self
            .service
            .library()
            .search(field, query.trim())
            .into_iter()
            .map(|b| CatalogView::format_book(b, None))
            .collect();

        self.console.say("\nMatching Books:")?;
        if lines.is_empty() {
            return self.console.say("No books found matching your search.");
        }
        for line in &lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<(), ConsoleError> {
        let library = self.service.library();
        if library.is_empty() {
            return self.console.say(EMPTY_LIBRARY);
        }
        let listing = CatalogView::render_listing(library.books());
        self.console.say("\nYour Library:")?;
        self.console.say(&listing)
    }

    fn statistics(&mut self) -> Result<(), ConsoleError> {
        let library = self.service.library();
        if library.is_empty() {
            return self.console.say(EMPTY_LIBRARY);
        }
        let text = CatalogView::render_statistics(&library.statistics());
        self.console.say("")?;
        self.console.say(&text)
    }

    fn filter_by_genre(&mut self) -> Result<(), ConsoleError> {
        let library = self.service.library();
        if library.is_empty() {
            return self.console.say(EMPTY_LIBRARY);
        }
        let available: Vec<String> = library.genres().iter().map(|g| format!("- {g}")).collect();

        self.console.say("\nAvailable genres:")?;
        for line in &available {
            self.console.say(line)?;
        }

        let genre = self.console.ask("\nEnter genre to filter by: ")?;
        let genre = genre.trim();
        let hits = self.service.library().filter_by_genre(genre);
        if hits.is_empty() {
            return self
                .console
                .say(&format!("No books found in genre '{genre}'"));
        }
        let listing = CatalogView::render_listing(hits);
        self.console.say(&format!("\nBooks in genre '{genre}':"))?;
        self.console.say(&listing)
    }

    fn sort(&mut self) -> Result<(), ConsoleError> {
        if self.service.library().is_empty() {
            return self.console.say(EMPTY_LIBRARY);
        }
        self.console.say("\nSort by:")?;
        self.console.say("1. Title")?;
        self.console.say("2. Author")?;
        self.console.say("3. Publication Year")?;
        self.console.say("4. Reading Progress")?;
        let choice = self.console.ask("Enter your choice: ")?;

        let key = match choice.trim() {
            "1" => SortKey::Title,
            "2" => SortKey::Author,
            "3" => SortKey::Year,
            "4" => SortKey::Progress,
            _ => return self.console.say("Invalid choice!"),
        };
        self.service.sort(key);

        let listing = CatalogView::render_listing(self.service.library().books());
        self.console.say("\nSorted Library:")?;
        self.console.say(&listing)
    }

    fn exit(&mut self) -> Result<Flow, ConsoleError> {
        match self.service.save() {
            Ok(()) => {
                self.console.say("Library data saved successfully!")?;
                self.console.say("Library saved to file. Goodbye!")?;
            }
            Err(e) => {
                self.console.say(&format!("Error saving library: {e}"))?;
                self.console.say("Goodbye!")?;
            }
        }
        Ok(Flow::Exit)
    }

    // --- collectors ---

    /// 空行が入力されるまでジャンルを集める。最低1つ必要。
    fn collect_genres(&mut self) -> Result<Vec<String>, ConsoleError> {
        let mut genres = Vec::new();
        loop {
            let genre = self
                .console
                .ask("Enter a genre (or press Enter to finish): ")?;
            let genre = genre.trim();
            if !genre.is_empty() {
                genres.push(genre.to_string());
                continue;
            }
            if genres.is_empty() {
                self.console.say("Please enter at least one genre.")?;
                continue;
            }
            return Ok(genres);
        }
    }

    /// 開始日（未検証）とページ数を集める。ページ数が不正なら聞き直す。
    fn collect_reading_progress(&mut self) -> Result<ReadingProgress, ConsoleError> {
        let start_date = self
            .console
            .ask("When did you start reading? (YYYY-MM-DD): ")?;
        loop {
            match self.read_pages(start_date.trim())? {
                Ok(progress) => return Ok(progress),
                Err(e) => self.console.say(&e.to_string())?,
            }
        }
    }

    /// 現在ページが数値でなければ総ページ数を聞かずに戻る。
    /// 負数と大小関係は2つ揃ってから検証する。
    fn read_pages(
        &mut self,
        start_date: &str,
    ) -> Result<Result<ReadingProgress, ValidationError>, ConsoleError> {
        let current = match parse_page(&self.console.ask("Current page number: ")?) {
            Ok(n) => n,
            Err(e) => return Ok(Err(e)),
        };
        let total = match parse_page(&self.console.ask("Total pages: ")?) {
            Ok(n) => n,
            Err(e) => return Ok(Err(e)),
        };
        Ok(validate_pages(current, total)
            .and_then(|(current, total)| ReadingProgress::new(start_date, current, total)))
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        loop {
            let answer = self.console.ask(prompt)?.trim().to_lowercase();
            match answer.as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => self.console.say("Please enter 'yes' or 'no'")?,
            }
        }
    }

    fn report_save(&mut self, saved: Result<(), AppError>) -> Result<(), ConsoleError> {
        match saved {
            Ok(()) => self.console.say("Library data saved successfully!"),
            Err(e) => self.console.say(&format!("Error saving library: {e}")),
        }
    }
}
