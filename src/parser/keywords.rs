//! Keyword Classification Module
//!
//! セル文字列の分類（曜日名、食事区分キーワード、タイトル行）と
//! 品目の分割を提供するモジュール。
//!
//! 曜日名は完全一致（大文字小文字を区別しない）、食事区分は部分一致で判定します。
//! 曜日名は見出しセル単体で現れ、食事区分は長い語句に埋め込まれて現れるためです。

use crate::types::{Day, MealSlot};

/// 食事区分キーワードの判定ルール（評価順）
///
/// `"snack"`は`"evening snack"`や`"midnight snacks"`にも一致するため、
/// `"midnight"`より先に評価される点に注意してください。
pub(crate) const MEAL_RULES: [(&str, MealSlot); 5] = [
    ("breakfast", MealSlot::Breakfast),
    ("lunch", MealSlot::Lunch),
    ("snack", MealSlot::Snacks),
    ("midnight", MealSlot::MidnightSnacks),
    ("dinner", MealSlot::Dinner),
];

/// タイトル行判定で使用する食事キーワード
const TITLE_MEAL_WORDS: [&str; 4] = ["breakfast", "lunch", "dinner", "snack"];

/// 食事区分の判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealMatch {
    /// どのキーワードにも一致しない
    NoMatch,

    /// 食事区分に一致
    Meal(MealSlot),
}

impl MealMatch {
    /// 一致した食事区分を取得
    pub fn slot(self) -> Option<MealSlot> {
        match self {
            MealMatch::NoMatch => None,
            MealMatch::Meal(slot) => Some(slot),
        }
    }
}

/// セル文字列を食事区分に分類
///
/// 小文字化した文字列に対して[`MEAL_RULES`]を順に評価し、
/// 最初に一致したルールの食事区分を返します。
pub fn classify_meal(text: &str) -> MealMatch {
    if text.is_empty() {
        return MealMatch::NoMatch;
    }

    let lower = text.to_lowercase();
    MEAL_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(MealMatch::NoMatch, |(_, slot)| MealMatch::Meal(*slot))
}

/// セル文字列が曜日名と完全一致するかを判定（大文字小文字を区別しない）
///
/// 呼び出し側で前後の空白を除去しておく必要があります。
pub fn match_day(text: &str) -> Option<Day> {
    if text.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    Day::ALL
        .into_iter()
        .find(|day| day.name().to_lowercase() == lower)
}

/// タイトル行（例: `"Menu - Awfis Lunch Nov 24th to 28th 2025"`）かを判定
///
/// `"menu"`を含み、かつ食事キーワードのいずれかを含む場合に`true`を返します。
/// `"Menu Dosa Lunch Special"`のような品目名も抑止されます。
pub fn is_menu_title(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let lower = text.to_lowercase();
    if !lower.contains("menu") {
        return false;
    }

    TITLE_MEAL_WORDS.iter().any(|word| lower.contains(word))
}

/// セル文字列をカンマで品目に分割
///
/// 各品目は前後の空白を除去し、空の品目は除外します。
pub fn split_items(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}
