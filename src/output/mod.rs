//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use std::io::Write;

use crate::checklist::ChecklistDocument;
use crate::error::MenuSheetError;
use crate::types::WeeklySchedule;

pub use formatters::*;

/// 空の文書に対して出力する通知
pub const NO_ITEMS_NOTICE: &str = "No menu items detected for Breakfast / Lunch / Snacks / \
     Midnight Snacks / Dinner in this file. Please check the Excel format.";

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（Markdown, HTML, JSON, CSV）をenumとして表現します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatter {
    Markdown,
    Html,
    Json,
    Csv,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: crate::api::OutputFormat) -> Self {
        match format {
            crate::api::OutputFormat::Markdown => OutputFormatter::Markdown,
            crate::api::OutputFormat::Html => OutputFormatter::Html,
            crate::api::OutputFormat::Json => OutputFormatter::Json,
            crate::api::OutputFormat::Csv => OutputFormatter::Csv,
        }
    }

    /// チェックリストを指定されたフォーマットで出力する
    ///
    /// Markdown / HTMLはレイアウト済みの`document`を、
    /// JSON / CSVは`schedule`をそのまま出力します。
    ///
    /// # 引数
    ///
    /// * `document` - レイアウト済みのチェックリスト
    /// * `schedule` - レイアウト元の週間献立
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(MenuSheetError)` - 書き込みに失敗した場合
    pub fn render<W: Write>(
        &self,
        document: &ChecklistDocument,
        schedule: &WeeklySchedule,
        writer: &mut W,
    ) -> Result<(), MenuSheetError> {
        match self {
            OutputFormatter::Markdown => MarkdownFormatter.render(document, writer),
            OutputFormatter::Html => HtmlFormatter.render(document, writer),
            OutputFormatter::Json => JsonFormatter.render(&document.company, schedule, writer),
            OutputFormatter::Csv => CsvFormatter.render(&document.company, schedule, writer),
        }
    }
}
