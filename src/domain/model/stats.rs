use std::collections::BTreeMap;

/// ライブラリ全体の集計結果。
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    /// 空なら0。
    pub read_percentage: f64,
    /// ジャンル名 → 冊数（ラベル順）
    pub genres: BTreeMap<String, usize>,
    /// 読書中の本のタイトルと進捗率（コレクション順）
    pub in_progress: Vec<(String, f64)>,
}
