//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 生のセル値（`CellValue` / `RawGrid`）と、正規化済みの週間献立
//! （`WeeklySchedule` / `DayMenu`）を提供します。

use std::fmt;
use std::io::Read;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MenuSheetError;

/// 曜日
///
/// 宣言順（月曜始まり）がそのまま出力順になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// 全曜日（月曜から日曜の順）
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// 表示名（例: `"Monday"`）
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// 月曜日からのオフセット（0〜6）
    pub fn offset(self) -> u32 {
        self as u32
    }

    /// `chrono::Weekday`に変換
    pub fn to_weekday(self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 食事区分
///
/// 宣言順がチェックリストの生成順になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snacks,
    MidnightSnacks,
    Dinner,
}

impl MealSlot {
    /// 全食事区分（生成順）
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snacks,
        MealSlot::MidnightSnacks,
        MealSlot::Dinner,
    ];

    /// シリアライズ時のキー（例: `"midnightSnacks"`）
    pub fn key(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snacks => "snacks",
            MealSlot::MidnightSnacks => "midnightSnacks",
            MealSlot::Dinner => "dinner",
        }
    }

    /// チェックリスト見出し用のラベル（例: `"MIDNIGHT SNACKS"`）
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "BREAKFAST",
            MealSlot::Lunch => "LUNCH",
            MealSlot::Snacks => "SNACKS",
            MealSlot::MidnightSnacks => "MIDNIGHT SNACKS",
            MealSlot::Dinner => "DINNER",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// スプレッドシートから取り出した生のセル値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル
    Empty,

    /// 文字列
    String(String),

    /// 数値（日付セルはシリアル値として格納）
    Number(f64),

    /// 論理値
    Bool(bool),
}

impl CellValue {
    /// 正規化したテキストを取得
    ///
    /// 文字列は前後の空白を除去し、空セルは空文字列になります。
    /// 数値は`f64`の`Display`表現（整数値は小数点なし）を使用します。
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// 正規化後に空文字列となるかを判定
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// 生のグリッド（行 × セル）
///
/// 行ごとに長さが異なってもかまいません。
pub type RawGrid = Vec<Vec<CellValue>>;

/// 1日分の献立（食事区分ごとの品目リスト）
///
/// 5つの食事区分は常に存在します（空リストの場合あり）。
/// 品目の順序は発見順で、重複は除去しません。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayMenu {
    #[serde(deserialize_with = "deserialize_items")]
    breakfast: Vec<String>,
    #[serde(deserialize_with = "deserialize_items")]
    lunch: Vec<String>,
    #[serde(deserialize_with = "deserialize_items")]
    snacks: Vec<String>,
    #[serde(deserialize_with = "deserialize_items")]
    midnight_snacks: Vec<String>,
    #[serde(deserialize_with = "deserialize_items")]
    dinner: Vec<String>,
}

/// 編集済みの品目リストを読み込む
///
/// パーサーの出力と同じく、前後の空白を除去し、空の品目は除外します。
fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<String>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| {
            let trimmed = item.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect())
}

impl DayMenu {
    /// 指定された食事区分の品目
    pub fn items(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snacks => &self.snacks,
            MealSlot::MidnightSnacks => &self.midnight_snacks,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// 指定された食事区分の品目（可変参照）
    pub fn items_mut(&mut self, slot: MealSlot) -> &mut Vec<String> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snacks => &mut self.snacks,
            MealSlot::MidnightSnacks => &mut self.midnight_snacks,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// 品目の総数
    pub fn item_count(&self) -> usize {
        MealSlot::ALL.iter().map(|slot| self.items(*slot).len()).sum()
    }

    /// 品目が1つもないかを判定
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// 週間献立（曜日 → 食事区分 → 品目）
///
/// 7曜日すべてが常に存在します。パーサーが生成した後は不変として扱い、
/// 編集結果は新しい`WeeklySchedule`として丸ごと置き換えます。
///
/// # JSON表現
///
/// ```json
/// {
///   "Monday": { "breakfast": ["Idli"], "lunch": [], "snacks": [],
///               "midnightSnacks": [], "dinner": [] },
///   "Tuesday": { ... }
/// }
/// ```
///
/// 読み込み時に欠けている曜日・食事区分は空リストで補われます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WeeklySchedule {
    monday: DayMenu,
    tuesday: DayMenu,
    wednesday: DayMenu,
    thursday: DayMenu,
    friday: DayMenu,
    saturday: DayMenu,
    sunday: DayMenu,
}

impl WeeklySchedule {
    /// 全曜日・全食事区分が空のスケジュールを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定された曜日の献立
    pub fn day(&self, day: Day) -> &DayMenu {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }

    /// 指定された曜日の献立（可変参照）
    pub fn day_mut(&mut self, day: Day) -> &mut DayMenu {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }

    /// 指定された曜日・食事区分の品目
    pub fn items(&self, day: Day, slot: MealSlot) -> &[String] {
        self.day(day).items(slot)
    }

    /// 曜日順のイテレーター
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayMenu)> {
        Day::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    /// 品目の総数
    pub fn item_count(&self) -> usize {
        self.iter().map(|(_, menu)| menu.item_count()).sum()
    }

    /// 品目が1つもないかを判定（"no data detected"状態）
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// いずれかの曜日に品目がある食事区分（生成順）
    pub fn meals_with_items(&self) -> Vec<MealSlot> {
        MealSlot::ALL
            .into_iter()
            .filter(|slot| self.iter().any(|(_, menu)| !menu.items(*slot).is_empty()))
            .collect()
    }

    /// JSONから読み込む（編集済みスケジュールの取り込み用）
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, MenuSheetError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// JSON文字列から読み込む
    pub fn from_json_str(json: &str) -> Result<Self, MenuSheetError> {
        Ok(serde_json::from_str(json)?)
    }
}
