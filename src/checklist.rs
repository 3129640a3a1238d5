//! Checklist Layout Module
//!
//! 週間献立から印刷用「FOOD CHECK-LIST」のレイアウトを構築するモジュール。
//! 食事区分ごとに1シート、各シートには品目のある曜日ごとのブロックを作り、
//! 品目を指定列数に振り分けます。

use std::fmt::Write as _;

use chrono::{Duration, NaiveDate};

use crate::api::DateFormat;
use crate::types::{Day, MealSlot, WeeklySchedule};

/// 既定の会社名
pub(crate) const DEFAULT_COMPANY: &str = "Red-Brick";

/// 既定のブランド名
pub(crate) const DEFAULT_BRAND: &str = "BHOOK";

/// 既定のブランドタグライン
pub(crate) const DEFAULT_TAGLINE: &str = "Chemical Free Food Experience";

/// 既定の品目列数
pub(crate) const DEFAULT_COLUMNS: usize = 3;

/// チェックリストのレイアウト設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChecklistOptions {
    /// 会社名
    pub company: String,

    /// ブランド名
    pub brand: String,

    /// ブランドのタグライン
    pub tagline: String,

    /// 品目を振り分ける列数
    pub columns: usize,

    /// 週の開始日（月曜日）。設定時は日付欄に日付を併記する
    pub week_start: Option<NaiveDate>,

    /// 日付の出力形式
    pub date_format: DateFormat,
}

impl Default for ChecklistOptions {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            columns: DEFAULT_COLUMNS,
            week_start: None,
            date_format: DateFormat::Iso8601,
        }
    }
}

/// チェックリスト文書全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistDocument {
    pub company: String,
    pub brand: String,
    pub tagline: String,

    /// 品目列の数
    pub columns: usize,

    /// 品目のある食事区分ごとのシート（生成順）
    pub sheets: Vec<ChecklistSheet>,
}

/// 食事区分1つ分のシート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSheet {
    pub meal: MealSlot,

    /// 品目のある曜日のブロック（曜日順）
    pub days: Vec<DayBlock>,
}

/// 1曜日分のブロック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBlock {
    pub day: Day,

    /// 整形済みの日付（週の開始日が設定されている場合）
    pub date: Option<String>,

    /// 列ごとの品目
    pub columns: Vec<Vec<String>>,

    /// 品目行の数（フッター行を除く）
    pub rows: usize,
}

impl ChecklistDocument {
    /// 週間献立からレイアウトを構築
    pub(crate) fn build(schedule: &WeeklySchedule, options: &ChecklistOptions) -> Self {
        let sheets = MealSlot::ALL
            .into_iter()
            .filter_map(|meal| {
                let days: Vec<DayBlock> = schedule
                    .iter()
                    .filter_map(|(day, menu)| {
                        let items = printable_items(menu.items(meal));
                        (!items.is_empty()).then(|| DayBlock {
                            day,
                            date: day_date(day, options),
                            columns: distribute(&items, options.columns),
                            rows: chunk_size(items.len(), options.columns),
                        })
                    })
                    .collect();

                (!days.is_empty()).then_some(ChecklistSheet { meal, days })
            })
            .collect();

        Self {
            company: options.company.clone(),
            brand: options.brand.clone(),
            tagline: options.tagline.clone(),
            columns: options.columns.max(1),
            sheets,
        }
    }

    /// 出力するシートがないかを判定（"no data detected"状態）
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// 1段目の見出し（例: `"Company - Red-Brick"`）
    pub fn company_heading(&self) -> String {
        format!("Company - {}", self.company)
    }
}

impl ChecklistSheet {
    /// 2段目の見出し（例: `"Red-Brick * LUNCH *"`）
    pub fn title(&self, company: &str) -> String {
        format!("{} * {} *", company, self.meal.label())
    }
}

impl DayBlock {
    /// 日付欄の表示（例: `"Monday"`、`"Monday (2025-11-24)"`）
    pub fn date_label(&self) -> String {
        match &self.date {
            Some(date) => format!("{} ({})", self.day, date),
            None => self.day.to_string(),
        }
    }

    /// 指定された行・列の品目
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.columns
            .get(col)
            .and_then(|column| column.get(row))
            .map(String::as_str)
    }
}

/// 印刷対象の品目（空白のみの品目を除き、前後の空白を除去）
fn printable_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 1列あたりの品目数（最小1）
fn chunk_size(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1)).max(1)
}

/// 品目を列に振り分ける
///
/// 列`c`には`[c * chunk, (c + 1) * chunk)`の品目が入ります。
/// 後ろの列は空になる場合があります。
fn distribute(items: &[String], columns: usize) -> Vec<Vec<String>> {
    let columns = columns.max(1);
    let chunk = chunk_size(items.len(), columns);

    (0..columns)
        .map(|c| {
            let start = (c * chunk).min(items.len());
            let end = ((c + 1) * chunk).min(items.len());
            items[start..end].to_vec()
        })
        .collect()
}

/// 週の開始日から曜日の日付を計算して整形
fn day_date(day: Day, options: &ChecklistOptions) -> Option<String> {
    let week_start = options.week_start?;
    let date = week_start.checked_add_signed(Duration::days(i64::from(day.offset())))?;
    format_date(date, &options.date_format)
}

/// 日付を整形
///
/// 不正なフォーマット文字列の場合は`None`を返します。
pub(crate) fn format_date(date: NaiveDate, format: &DateFormat) -> Option<String> {
    let pattern = match format {
        DateFormat::Iso8601 => "%Y-%m-%d",
        DateFormat::Custom(pattern) => pattern.as_str(),
    };

    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}
