use std::collections::{BTreeMap, BTreeSet};

use super::book::Book;
use super::stats::Stats;

/// 検索対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

/// 並び替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Year,
    /// 進捗率の降順
    Progress,
}

/// 本の順序付きコレクション — 集約ルート。
/// 順序は挿入順で、sortでのみ並び替わる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 大文字小文字を無視して同じタイトルがあるか。重複は警告のみで許可される。
    pub fn has_title(&self, title: &str) -> bool {
        let needle = title.to_lowercase();
        self.books.iter().any(|b| b.title().to_lowercase() == needle)
    }

    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// タイトル部分一致（case-insensitive）の最初の1冊を削除する。
    pub fn remove_first_match(&mut self, query: &str) -> Option<Book> {
        let needle = query.to_lowercase();
        let pos = self
            .books
            .iter()
            .position(|b| b.title().to_lowercase().contains(&needle))?;
        Some(self.books.remove(pos))
    }

    /// 指定フィールドの部分一致（case-insensitive）。元の順序を保つ。
    pub fn search(&self, field: SearchField, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                let haystack = match field {
                    SearchField::Title => b.title(),
                    SearchField::Author => b.author(),
                };
                haystack.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// ジャンルラベルの完全一致（case-insensitive）で絞り込む。
    pub fn filter_by_genre(&self, genre: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.has_genre(genre)).collect()
    }

    /// 登録済みジャンルの一覧（重複なし、ラベル順）
    pub fn genres(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .books
            .iter()
            .flat_map(|b| b.genres().iter().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    /// その場で並び替える。安定ソートなので同値は元の順序を保つ。
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Title => self.books.sort_by_cached_key(|b| b.title().to_lowercase()),
            SortKey::Author => self.books.sort_by_cached_key(|b| b.author().to_lowercase()),
            SortKey::Year => self.books.sort_by_key(Book::publication_year),
            SortKey::Progress => self
                .books
                .sort_by(|a, b| b.progress_percentage().total_cmp(&a.progress_percentage())),
        }
    }

    pub fn statistics(&self) -> Stats {
        let total = self.books.len();
        let read = self.books.iter().filter(|b| b.is_read()).count();
        let read_percentage = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };

        let mut genres = BTreeMap::new();
        for genre in self.books.iter().flat_map(|b| b.genres()) {
            *genres.entry(genre.clone()).or_insert(0) += 1;
        }

        let in_progress = self
            .books
            .iter()
            .filter_map(|b| {
                b.progress()
                    .map(|p| (b.title().to_string(), p.progress_percentage()))
            })
            .collect();

        Stats {
            total,
            read,
            unread: total - read,
            read_percentage,
            genres,
            in_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::book::ReadingProgress;

    fn reading(title: &str, current: u32, total: u32) -> Book {
        let progress = ReadingProgress::new("2024-01-01", current, total).unwrap();
        Book::unread(title, "Someone", 2000, vec!["Novel".into()], Some(progress))
    }

    fn make_library() -> Library {
        Library::from_books(vec![
            Book::read(
                "Dune",
                "Frank Herbert",
                1965,
                vec!["Sci-Fi".into(), "Classic".into()],
            ),
            Book::unread("emma", "Jane Austen", 1815, vec!["Classic".into()], None),
            Book::read("Children of Dune", "Frank Herbert", 1976, vec!["Sci-Fi".into()]),
        ])
    }

    #[test]
    fn remove_takes_first_substring_match_only() {
        let mut lib = make_library();
        let removed = lib.remove_first_match("DUNE").unwrap();
        assert_eq!(removed.title(), "Dune");
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.books()[1].title(), "Children of Dune");
    }

    #[test]
    fn remove_without_match_leaves_collection_untouched() {
        let mut lib = make_library();
        let before = lib.clone();
        assert!(lib.remove_first_match("Ulysses").is_none());
        assert_eq!(lib, before);
    }

    #[test]
    fn search_by_author_preserves_order() {
        let lib = make_library();
        let hits: Vec<&str> = lib
            .search(SearchField::Author, "herbert")
            .iter()
            .map(|b| b.title())
            .collect();
        assert_eq!(hits, vec!["Dune", "Children of Dune"]);
    }

    #[test]
    fn search_on_empty_library_is_empty() {
        let lib = Library::new();
        assert!(lib.search(SearchField::Title, "x").is_empty());
    }

    #[test]
    fn sort_by_title_ignores_case() {
        let mut lib = make_library();
        lib.sort(SortKey::Title);
        let titles: Vec<&str> = lib.books().iter().map(|b| b.title()).collect();
        assert_eq!(titles, vec!["Children of Dune", "Dune", "emma"]);
    }

    #[test]
    fn sort_by_progress_descending_with_absent_as_zero() {
        let mut lib = Library::from_books(vec![
            reading("Ten", 30, 300),
            Book::read("Done", "Someone", 1999, vec!["Novel".into()]),
            reading("Fifty", 150, 300),
        ]);
        lib.sort(SortKey::Progress);
        let titles: Vec<&str> = lib.books().iter().map(|b| b.title()).collect();
        assert_eq!(titles, vec!["Fifty", "Ten", "Done"]);
    }

    #[test]
    fn genres_are_distinct_and_sorted() {
        let lib = make_library();
        assert_eq!(lib.genres(), vec!["Classic", "Sci-Fi"]);
    }

    #[test]
    fn statistics_counts_and_tallies() {
        let mut lib = make_library();
        lib.add(reading("Halfway", 50, 100));
        let stats = lib.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.unread, 2);
        assert_eq!(stats.read_percentage, 50.0);
        assert_eq!(stats.genres["Classic"], 2);
        assert_eq!(stats.genres["Sci-Fi"], 2);
        assert_eq!(stats.genres["Novel"], 1);
        assert_eq!(stats.in_progress, vec![("Halfway".to_string(), 50.0)]);
    }

    #[test]
    fn statistics_of_empty_library_is_zero() {
        let stats = Library::new().statistics();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.read_percentage, 0.0);
        assert!(stats.genres.is_empty());
        assert!(stats.in_progress.is_empty());
    }
}
