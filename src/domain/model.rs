use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 條目的一次儲存版本，聚合只讀 `timestamp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub content: Option<String>,
}

/// 單日編輯次數，`count` 永遠 >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCountEntry {
    pub day: NaiveDate,
    pub count: u32,
}

/// 依日期遞增排序、每日唯一的編輯次數表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditCountTable {
    entries: Vec<EditCountEntry>,
}

impl EditCountTable {
    /// 呼叫端需保證 entries 已依日期排序且不重複
    pub(crate) fn from_sorted(entries: Vec<EditCountEntry>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].day < w[1].day));
        Self { entries }
    }

    pub fn entries(&self) -> &[EditCountEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_edits(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.count)).sum()
    }

    pub fn max_count(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.count).max()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.entries.first().map(|e| e.day)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 30,
            left: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 960,
            height: 500,
            margins: Margins::default(),
        }
    }
}

impl ChartSettings {
    pub fn inner_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margins.left)
            .saturating_sub(self.margins.right)
    }

    pub fn inner_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margins.top)
            .saturating_sub(self.margins.bottom)
    }
}

/// 送往 API 的查詢內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionQuery {
    pub title: String,
    pub rvprop: String,
    pub limit: Option<u32>,
}

impl RevisionQuery {
    pub const DEFAULT_RVPROP: &'static str = "timestamp|content";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rvprop: Self::DEFAULT_RVPROP.to_string(),
            limit: None,
        }
    }

    pub fn with_rvprop(mut self, rvprop: impl Into<String>) -> Self {
        self.rvprop = rvprop.into();
        self
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }
}

/// 一次執行的結果：編輯次數表與寫出的檔案位置
#[derive(Debug, Clone)]
pub struct TrendOutput {
    pub table: EditCountTable,
    pub chart_path: String,
    pub csv_path: Option<String>,
}
