//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{BufWriter, Read, Write};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate, Weekday};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::api::{DateFormat, OutputFormat, SheetSelector};
use crate::checklist::{ChecklistDocument, ChecklistOptions};
use crate::error::MenuSheetError;
use crate::output::OutputFormatter;
use crate::parser::{parse_with_report, ParseReport, WorkbookParser};
use crate::security::SecurityConfig;
use crate::state::AppState;
use crate::types::{RawGrid, WeeklySchedule};

/// 品目列数の上限
const MAX_COLUMNS: usize = 12;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// チェックリストのレイアウト設定
    pub checklist: ChecklistOptions,
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use menusheet::{ConverterBuilder, OutputFormat, SheetSelector};
///
/// # fn main() -> Result<(), menusheet::MenuSheetError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Index(0))
///     .with_output_format(OutputFormat::Html)
///     .with_company("Acme Foods")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 出力フォーマット: Markdown
    /// - 会社名: `Red-Brick`
    /// - ブランド: `BHOOK`（`Chemical Free Food Experience`）
    /// - 品目列数: 3
    /// - 週の開始日: なし（日付欄は曜日名のみ）
    /// - 日付形式: ISO 8601 (YYYY-MM-DD)
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 献立として読み込むシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use menusheet::{ConverterBuilder, SheetSelector};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Week 48".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// チェックリストの見出しに表示する会社名を指定する
    ///
    /// 前後の空白は取り除かれます。空白のみの場合は`build()`時にエラーになります。
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.config.checklist.company = company.into().trim().to_string();
        self
    }

    /// ブランド名とタグラインを指定する
    pub fn with_brand(mut self, brand: impl Into<String>, tagline: impl Into<String>) -> Self {
        self.config.checklist.brand = brand.into();
        self.config.checklist.tagline = tagline.into();
        self
    }

    /// 品目を振り分ける列数を指定する（1〜12）
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.config.checklist.columns = columns;
        self
    }

    /// 週の開始日（月曜日）を指定する
    ///
    /// 指定すると日付欄に各曜日の日付が併記されます。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use chrono::NaiveDate;
    /// use menusheet::ConverterBuilder;
    ///
    /// let monday = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
    /// let builder = ConverterBuilder::new().with_week_start(monday);
    /// ```
    pub fn with_week_start(mut self, week_start: NaiveDate) -> Self {
        self.config.checklist.week_start = Some(week_start);
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.checklist.date_format = format;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `MenuSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * 会社名が空
    ///   * 品目列数が1〜12の範囲外
    ///   * 週の開始日が月曜日でない
    ///   * カスタム日付形式が不正な書式文字列
    pub fn build(self) -> Result<Converter, MenuSheetError> {
        let checklist = &self.config.checklist;

        // 1. 会社名の検証
        if checklist.company.is_empty() {
            return Err(MenuSheetError::Config(
                "Company name must not be empty".to_string(),
            ));
        }

        // 2. 列数の検証
        if !(1..=MAX_COLUMNS).contains(&checklist.columns) {
            return Err(MenuSheetError::Config(format!(
                "Invalid column count: {} (expected 1..={})",
                checklist.columns, MAX_COLUMNS
            )));
        }

        // 3. 週の開始日の検証
        if let Some(week_start) = checklist.week_start {
            if week_start.weekday() != Weekday::Mon {
                return Err(MenuSheetError::Config(format!(
                    "Week start must be a Monday: {} is a {}",
                    week_start,
                    week_start.weekday()
                )));
            }
        }

        // 4. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = checklist.date_format {
            let invalid = format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error));
            if invalid {
                return Err(MenuSheetError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        Ok(Converter::new(self.config))
    }
}

/// ワークブック1件分の検査結果（`inspect`サブコマンド用）
#[derive(Debug, Clone)]
pub struct WorkbookSummary {
    /// ワークブック内のすべてのシート名
    pub sheet_names: Vec<String>,

    /// 読み込んだシート名
    pub sheet: String,

    /// 読み込んだシートの行数
    pub rows: usize,

    /// パーサーの統計情報
    pub report: ParseReport,

    /// 復元された週間献立
    pub schedule: WeeklySchedule,
}

/// 変換処理のファサード
///
/// 献立ワークブックを週間献立に復元し、チェックリストとして出力するための
/// メインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use menusheet::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), menusheet::MenuSheetError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("menu.xlsx")?;
/// let output = File::create("checklist.md")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// 見出しに使用する会社名
    pub fn company(&self) -> &str {
        &self.config.checklist.company
    }

    /// 出力フォーマット
    pub fn output_format(&self) -> OutputFormat {
        self.config.output_format
    }

    /// ワークブックを読み込み、週間献立を復元する
    ///
    /// # 戻り値
    ///
    /// * `Ok(WeeklySchedule)` - 復元された献立（品目が1つもない場合も成功）
    /// * `Err(MenuSheetError)` - ワークブックとしてデコードできない場合、
    ///   またはシート選択に失敗した場合
    pub fn parse<R: Read>(&self, input: R) -> Result<WeeklySchedule, MenuSheetError> {
        let parser = WorkbookParser::open(input)?;
        self.parse_workbook(parser).map(|summary| summary.schedule)
    }

    /// メモリ上のバイト列から週間献立を復元する
    pub fn parse_bytes(&self, data: &[u8]) -> Result<WeeklySchedule, MenuSheetError> {
        self.parse_owned(data.to_vec())
    }

    /// 複数のワークブックを並列に解析する
    ///
    /// 結果は入力と同じ順序で返されます。1件の失敗は他の結果に影響しません。
    pub fn parse_batch(&self, inputs: Vec<Vec<u8>>) -> Vec<Result<WeeklySchedule, MenuSheetError>> {
        debug!(workbooks = inputs.len(), "parsing batch");
        inputs
            .into_par_iter()
            .map(|data| self.parse_owned(data))
            .collect()
    }

    /// ワークブックを解析し、シート情報と統計情報を返す
    pub fn inspect<R: Read>(&self, input: R) -> Result<WorkbookSummary, MenuSheetError> {
        let parser = WorkbookParser::open(input)?;
        self.parse_workbook(parser)
    }

    /// 週間献立からチェックリストのレイアウトを構築する
    pub fn checklist(&self, schedule: &WeeklySchedule) -> ChecklistDocument {
        ChecklistDocument::build(schedule, &self.config.checklist)
    }

    /// 週間献立を設定された形式で出力する
    pub fn render<W: Write>(
        &self,
        schedule: &WeeklySchedule,
        output: W,
    ) -> Result<(), MenuSheetError> {
        let document = self.checklist(schedule);
        if document.is_empty() {
            info!("no menu items detected");
        }

        let mut writer = BufWriter::new(output);
        OutputFormatter::from_format(self.config.output_format).render(
            &document,
            schedule,
            &mut writer,
        )?;
        writer.flush()?;
        Ok(())
    }

    /// ワークブックを読み込み、チェックリストとして出力する
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<(), MenuSheetError> {
        let schedule = self.parse(input)?;
        self.render(&schedule, output)
    }

    /// ワークブックを読み込み、チェックリストを文字列として返す
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, MenuSheetError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            MenuSheetError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// ワークブックを読み込み、アプリケーション状態の献立を置き換える
    ///
    /// デコードに失敗した場合、状態は変更されません。
    pub fn load_into<R: Read>(
        &self,
        state: &AppState,
        input: R,
    ) -> Result<Arc<WeeklySchedule>, MenuSheetError> {
        let schedule = self.parse(input)?;
        Ok(state.replace_schedule(schedule))
    }

    fn parse_owned(&self, data: Vec<u8>) -> Result<WeeklySchedule, MenuSheetError> {
        let parser = WorkbookParser::from_bytes(data, &SecurityConfig::default())?;
        self.parse_workbook(parser).map(|summary| summary.schedule)
    }

    fn parse_workbook(&self, mut parser: WorkbookParser) -> Result<WorkbookSummary, MenuSheetError> {
        let sheet = parser.select_sheet(&self.config.sheet_selector)?;
        let grid: RawGrid = parser.read_grid(&sheet)?;
        let (schedule, report) = parse_with_report(&grid);

        if report.day_header_rows == 0 && !grid.is_empty() {
            warn!(sheet = %sheet, "no day header row found");
        }

        Ok(WorkbookSummary {
            sheet_names: parser.sheet_names(),
            sheet,
            rows: grid.len(),
            report,
            schedule,
        })
    }
}
