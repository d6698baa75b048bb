use crate::domain::model::book::Book;
use crate::domain::model::stats::Stats;

/// Book / Stats → 表示用テキスト
pub struct CatalogView;

impl CatalogView {
    /// 1冊を1行に整形する。`number` は1始まりの表示番号。
    pub fn format_book(book: &Book, number: Option<usize>) -> String {
        let status = if book.is_read() { "Read" } else { "Unread" };
        let mut line = format!(
            "{} by {} ({}) - {} - {}",
            book.title(),
            book.author(),
            book.publication_year(),
            book.genres().join(", "),
            status
        );
        if let Some(p) = book.progress() {
            line.push_str(&format!(
                " - Progress: {:.1}% ({}/{} pages)",
                p.progress_percentage(),
                p.current_page(),
                p.total_pages()
            ));
        }
        match number {
            Some(n) => format!("{n}. {line}"),
            None => line,
        }
    }

    /// 番号付き一覧。1行1冊、末尾改行なし。
    pub fn render_listing<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
        books
            .into_iter()
            .enumerate()
            .map(|(i, b)| Self::format_book(b, Some(i + 1)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_statistics(stats: &Stats) -> String {
        let mut buf = String::from("Library Statistics:\n");
        buf.push_str(&format!("Total books: {}\n", stats.total));
        buf.push_str(&format!("Books Read: {}\n", stats.read));
        buf.push_str(&format!("Books Unread: {}\n", stats.unread));
        buf.push_str(&format!(
            "Percentage read: {:.1}%\n",
            stats.read_percentage
        ));

        buf.push_str("\nBooks by Genre:\n");
        for (genre, count) in &stats.genres {
            buf.push_str(&format!("{genre}: {count}\n"));
        }

        if !stats.in_progress.is_empty() {
            buf.push_str("\nCurrently Reading:\n");
            for (title, pct) in &stats.in_progress {
                buf.push_str(&format!("{title}: {pct:.1}% complete\n"));
            }
        }

        buf.truncate(buf.trim_end().len());
        buf
    }
}
