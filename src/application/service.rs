use crate::domain::model::book::Book;
use crate::domain::model::library::{Library, SortKey};
use crate::domain::repository::LibraryRepository;

use super::error::AppError;

/// 起動時ロードの結果。どの場合もサービスは使用可能。
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(usize),
    NotFound,
    /// 破損・読み込み不可。空のライブラリで続行する。
    Failed(AppError),
}

/// ライブラリに対するユースケース。
/// メモリ上のLibraryが正で、変更のたびに全体を保存する。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    library: Library,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// 空のライブラリで開始する（ロードしない）。
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            library: Library::new(),
        }
    }

    /// リポジトリからロードして開始する。失敗しても空で続行する。
    pub fn open(repo: R) -> (Self, LoadOutcome) {
        let outcome = match repo.load() {
            Ok(Some(books)) => {
                let count = books.len();
                tracing::info!(count, "library loaded");
                let svc = Self {
                    repo,
                    library: Library::from_books(books),
                };
                return (svc, LoadOutcome::Loaded(count));
            }
            Ok(None) => {
                tracing::info!("no library file, starting empty");
                LoadOutcome::NotFound
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load library, starting empty");
                LoadOutcome::Failed(AppError::Storage(Box::new(e)))
            }
        };
        (Self::new(repo), outcome)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// 本を追加して保存する。Errでもメモリ上には追加済み。
    pub fn add(&mut self, book: Book) -> Result<(), AppError> {
        tracing::debug!(title = book.title(), "adding book");
        self.library.add(book);
        self.save()
    }

    /// タイトル部分一致の最初の1冊を削除する。見つかった場合のみ保存する。
    pub fn remove(&mut self, query: &str) -> Result<Option<Book>, AppError> {
        let Some(removed) = self.library.remove_first_match(query) else {
            tracing::debug!(query, "no book matched for removal");
            return Ok(None);
        };
        tracing::debug!(title = removed.title(), "removed book");
        self.save()?;
        Ok(Some(removed))
    }

    /// その場で並び替える。保存は次の変更か終了時。
    pub fn sort(&mut self, key: SortKey) {
        tracing::debug!(?key, "sorting library");
        self.library.sort(key);
    }

    /// 全体を上書き保存する。
    pub fn save(&self) -> Result<(), AppError> {
        self.repo.save(self.library.books()).map_err(|e| {
            tracing::warn!(error = %e, "failed to save library");
            AppError::Storage(Box::new(e))
        })
    }
}
