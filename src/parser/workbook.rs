//! Workbook Decoder Module
//!
//! calamineを使用してアップロードされたワークブックをデコードし、
//! 1枚のシートを生のグリッド（`RawGrid`）として取り出します。
//! 1行目をヘッダーとして解釈することはなく、すべての行をデータとして渡します。

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read};
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::MenuSheetError;
use crate::security::{check_zip_archive, SecurityConfig};
use crate::types::{CellValue, RawGrid};

/// ワークブックパーサー
///
/// calamineのラッパーとして、シート選択とグリッド抽出を提供します。
/// XLSX / XLSM / XLSB / XLS / ODS を自動判別します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// リーダーからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックのバイト列を読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - デコードに成功した場合
    /// * `Err(MenuSheetError)` - サイズ制限違反、またはワークブックとして解釈できない場合
    pub fn open<R: Read>(mut reader: R) -> Result<Self, MenuSheetError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        Self::from_bytes(buffer, &SecurityConfig::default())
    }

    /// メモリ上のバイト列からワークブックを開く
    pub fn from_bytes(
        buffer: Vec<u8>,
        security_config: &SecurityConfig,
    ) -> Result<Self, MenuSheetError> {
        // セキュリティ: ファイルサイズ制限を適用
        if buffer.len() as u64 > security_config.max_input_file_size {
            return Err(MenuSheetError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                buffer.len(),
                security_config.max_input_file_size
            )));
        }

        // ZIPベースの形式（XLSX/ODS）は展開前に中身を検査する
        if buffer.starts_with(b"PK\x03\x04") {
            check_zip_archive(Cursor::new(buffer.as_slice()), security_config)?;
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを1枚選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(MenuSheetError::EmptyWorkbook)` - シートが1枚もない場合
    /// * `Err(MenuSheetError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, MenuSheetError> {
        let all_sheet_names = self.sheet_names();

        if all_sheet_names.is_empty() {
            return Err(MenuSheetError::EmptyWorkbook);
        }

        match selector {
            SheetSelector::Index(index) => {
                all_sheet_names.get(*index).cloned().ok_or_else(|| {
                    MenuSheetError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index,
                        all_sheet_names.len()
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(MenuSheetError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートの使用範囲を生のグリッドとして読み込む
    ///
    /// calamineの使用範囲は最初の非空セルから始まるため、
    /// 列位置はシート上の絶対位置ではなく範囲内の相対位置になります。
    /// パーサーは行間で列位置が一貫していることだけを前提とするため、問題ありません。
    pub fn read_grid(&mut self, sheet_name: &str) -> Result<RawGrid, MenuSheetError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        let grid: RawGrid = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        if grid.is_empty() {
            warn!(sheet = sheet_name, "selected sheet has no cells");
        }
        debug!(
            sheet = sheet_name,
            rows = grid.len(),
            cols = range.width(),
            "read raw grid"
        );

        Ok(grid)
    }
}

/// calamineのセル値を`CellValue`に変換
///
/// 日付セルはシリアル値、エラーセルは空セルとして扱います。
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        _ => CellValue::Empty,
    }
}
