//! Parser Module
//!
//! ワークブックのデコードと、生のグリッドから週間献立を復元する処理。

mod keywords;
mod schedule;
mod workbook;

pub use keywords::{classify_meal, is_menu_title, match_day, split_items, MealMatch};
pub use schedule::{
    parse, parse_with_report, ColumnDayIndex, Emission, ParseReport, ParseState, RowKind,
    StepOutcome,
};
pub(crate) use workbook::WorkbookParser;
