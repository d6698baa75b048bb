use super::model::book::Book;

/// 永続化の抽象。Infra層が実装する。
/// 保存先が存在しなければ `load` は `Ok(None)` を返す。
pub trait LibraryRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error>;
    fn save(&self, books: &[Book]) -> Result<(), Self::Error>;
}
