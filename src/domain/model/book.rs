use serde::{Deserialize, Serialize};

use crate::domain::error::ValidationError;

/// 読書中の本の進捗。作成時に割合を計算して保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    #[serde(rename = "Start_Date")]
    start_date: String,
    #[serde(rename = "Current_Page")]
    current_page: u32,
    #[serde(rename = "Total_Pages")]
    total_pages: u32,
    #[serde(rename = "Progress_Percentage")]
    progress_percentage: f64,
}

impl ReadingProgress {
    /// ページ数を検証して進捗を作る。`current <= total` かつ `total > 0`。
    pub fn new(
        start_date: impl Into<String>,
        current_page: u32,
        total_pages: u32,
    ) -> Result<Self, ValidationError> {
        if total_pages == 0 {
            return Err(ValidationError::ZeroTotalPages);
        }
        if current_page > total_pages {
            return Err(ValidationError::PagesExceedTotal {
                current: current_page,
                total: total_pages,
            });
        }
        Ok(Self {
            start_date: start_date.into(),
            current_page,
            total_pages,
            progress_percentage: percentage(current_page, total_pages),
        })
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progress_percentage
    }
}

/// `current / total * 100` を小数第1位で丸める。
/// ちょうど中間の値は偶数側に丸める（既存ファイルの値と一致させる）。
pub fn percentage(current: u32, total: u32) -> f64 {
    let raw = f64::from(current) / f64::from(total) * 100.0;
    format!("{raw:.1}").parse().unwrap_or(raw)
}

/// カタログ上の1冊。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: String,
    #[serde(rename = "Publication_Year")]
    publication_year: i32,
    #[serde(rename = "Genres")]
    genres: Vec<String>,
    #[serde(rename = "Read_Status")]
    read_status: bool,
    #[serde(rename = "Reading_Progress", default)]
    reading_progress: Option<ReadingProgress>,
}

impl Book {
    /// 読了済みの本。進捗は持たない。
    pub fn read(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genres: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            genres,
            read_status: true,
            reading_progress: None,
        }
    }

    /// 未読の本。`progress` が None なら未着手。
    pub fn unread(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genres: Vec<String>,
        progress: Option<ReadingProgress>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            genres,
            read_status: false,
            reading_progress: progress,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> i32 {
        self.publication_year
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn is_read(&self) -> bool {
        self.read_status
    }

    /// 未読かつ進捗が記録されている場合のみ返す。
    pub fn progress(&self) -> Option<&ReadingProgress> {
        if self.read_status {
            return None;
        }
        self.reading_progress.as_ref()
    }

    /// ソート用の進捗率。進捗なし（読了含む）は0。
    pub fn progress_percentage(&self) -> f64 {
        self.progress()
            .map(ReadingProgress::progress_percentage)
            .unwrap_or(0.0)
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        let needle = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == needle)
    }
}
