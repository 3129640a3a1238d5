//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::NO_ITEMS_NOTICE;
use crate::checklist::{ChecklistDocument, ChecklistSheet, DayBlock};
use crate::error::MenuSheetError;
use crate::types::WeeklySchedule;

/// 文書タイトル
const DOCUMENT_TITLE: &str = "FOOD CHECK-LIST";

/// 各曜日ブロックのフッター（記入欄）
const FOOTER_TEXT: &str =
    "Time: __________________   Handler: __________________   Supervisor: __________________";

/// 品目のチェックボックス
const CHECKBOX: &str = "☐";

/// Markdown形式のフォーマッター
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        document: &ChecklistDocument,
        writer: &mut W,
    ) -> Result<(), MenuSheetError> {
        writeln!(writer, "# {}", DOCUMENT_TITLE)?;
        writeln!(writer)?;
        writeln!(
            writer,
            "**{}** | {} ({})",
            escape_markdown(&document.company_heading()),
            escape_markdown(&document.brand),
            escape_markdown(&document.tagline)
        )?;
        writeln!(writer)?;

        if document.is_empty() {
            writeln!(writer, "> {}", NO_ITEMS_NOTICE)?;
            writer.flush()?;
            return Ok(());
        }

        for (index, sheet) in document.sheets.iter().enumerate() {
            // シート間の区切り
            if index > 0 {
                writeln!(writer, "---")?;
                writeln!(writer)?;
            }

            writeln!(writer, "## {}", escape_markdown(&sheet.title(&document.company)))?;
            writeln!(writer)?;

            let rows = markdown_rows(sheet, document.columns);
            write_markdown_table(writer, &rows)?;
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// シートをテーブルの行（ヘッダー行を含む）に展開
fn markdown_rows(sheet: &ChecklistSheet, columns: usize) -> Vec<Vec<String>> {
    let mut header = vec!["Date".to_string()];
    header.extend((0..columns).map(|c| if c == 0 { "Menu".to_string() } else { String::new() }));
    header.push("Wastage".to_string());

    let mut rows = vec![header];

    for block in &sheet.days {
        for row in 0..block.rows {
            let mut line = Vec::with_capacity(columns + 2);
            line.push(if row == 0 {
                escape_markdown(&block.date_label())
            } else {
                String::new()
            });
            line.extend((0..columns).map(|col| match block.cell(row, col) {
                Some(item) => format!("{} {}", CHECKBOX, escape_markdown(item)),
                None => String::new(),
            }));
            line.push(String::new());
            rows.push(line);
        }

        // フッター行は先頭の品目列に記入欄を置く
        let mut footer = vec![String::new(); columns + 2];
        footer[1] = FOOTER_TEXT.to_string();
        rows.push(footer);
    }

    rows
}

/// 行データを表示幅で揃えたMarkdownテーブルとして出力
///
/// 最初の行をヘッダーとし、その後に区切り行を挿入します。
/// 全角文字（日本語など）は表示幅2として計算します。
fn write_markdown_table<W: Write>(
    writer: &mut W,
    rows: &[Vec<String>],
) -> Result<(), MenuSheetError> {
    let col_widths = calculate_column_widths(rows);
    let separator = generate_separator(&col_widths);

    for (row_idx, row) in rows.iter().enumerate() {
        write!(writer, "|")?;

        for (col_idx, &width) in col_widths.iter().enumerate() {
            let content = row.get(col_idx).map(|s| s.trim()).unwrap_or("");
            let padding = width.saturating_sub(content.width());
            write!(writer, " {}{} |", content, " ".repeat(padding))?;
        }

        writeln!(writer)?;

        if row_idx == 0 {
            writeln!(writer, "{}", separator)?;
        }
    }

    Ok(())
}

/// 列幅を計算（最小幅は3文字）
fn calculate_column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![3; cols];

    for row in rows {
        for (col_idx, cell) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(cell.trim().width());
        }
    }

    widths
}

/// ヘッダー区切り行を生成
///
/// セルの前後のスペース（各1文字）を含めた幅のハイフンを`|`で連結します。
fn generate_separator(col_widths: &[usize]) -> String {
    let mut separator = String::from("|");
    for &width in col_widths {
        separator.push_str(&"-".repeat(width + 2));
        separator.push('|');
    }
    separator
}

/// Markdownテーブル内で意味を持つ文字をエスケープ
fn escape_markdown(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "<br>")
}

/// HTML形式のフォーマッター
///
/// 食事区分ごとに印刷用シート（`<table class="food-checklist-table">`）を出力します。
/// 2枚目以降のシートには`page-break`クラスを付与します。
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn render<W: Write>(
        &self,
        document: &ChecklistDocument,
        writer: &mut W,
    ) -> Result<(), MenuSheetError> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html>")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta charset=\"utf-8\">")?;
        writeln!(
            writer,
            "  <title>{} - {}</title>",
            DOCUMENT_TITLE,
            escape_html(&document.company)
        )?;
        writeln!(
            writer,
            "  <style>.page-break {{ page-break-before: always; }}</style>"
        )?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;

        if document.is_empty() {
            writeln!(writer, "<p class=\"no-data\">{}</p>", escape_html(NO_ITEMS_NOTICE))?;
        }

        for (index, sheet) in document.sheets.iter().enumerate() {
            render_html_sheet(writer, document, sheet, index > 0)?;
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        writer.flush()?;
        Ok(())
    }
}

fn render_html_sheet<W: Write>(
    writer: &mut W,
    document: &ChecklistDocument,
    sheet: &ChecklistSheet,
    page_break: bool,
) -> Result<(), MenuSheetError> {
    let columns = document.columns;
    // 1段目の見出しは全体で「日付 + 品目列 + 廃棄量」の幅になるよう配分する
    let (company_span, title_span) = if columns > 1 {
        (2, columns - 1)
    } else {
        (1, 1)
    };

    let class = if page_break {
        "print-sheet meal-sheet page-break"
    } else {
        "print-sheet meal-sheet"
    };

    writeln!(writer, "<div class=\"{}\">", class)?;
    writeln!(writer, "<table class=\"food-checklist-table\">")?;
    writeln!(writer, "  <thead>")?;
    writeln!(writer, "    <tr>")?;
    writeln!(
        writer,
        "      <th class=\"table-header company-cell\" colspan=\"{}\">{}</th>",
        company_span,
        escape_html(&document.company_heading())
    )?;
    writeln!(
        writer,
        "      <th class=\"table-header title-cell\" colspan=\"{}\"><span class=\"food-badge\">{}</span></th>",
        title_span, DOCUMENT_TITLE
    )?;
    writeln!(
        writer,
        "      <th class=\"table-header brand-cell\"><div>{}</div><div class=\"brand-sub\">{}</div></th>",
        escape_html(&document.brand),
        escape_html(&document.tagline)
    )?;
    writeln!(writer, "    </tr>")?;
    writeln!(writer, "    <tr>")?;
    writeln!(writer, "      <th class=\"date-head\">Date</th>")?;
    writeln!(
        writer,
        "      <th class=\"menu-head\" colspan=\"{}\">{}</th>",
        columns,
        escape_html(&sheet.title(&document.company))
    )?;
    writeln!(writer, "      <th class=\"wastage-head\">Wastage</th>")?;
    writeln!(writer, "    </tr>")?;
    writeln!(writer, "  </thead>")?;
    writeln!(writer, "  <tbody>")?;

    for block in &sheet.days {
        render_html_block(writer, block, columns)?;
    }

    writeln!(writer, "  </tbody>")?;
    writeln!(writer, "</table>")?;
    writeln!(writer, "</div>")?;
    Ok(())
}

/// 1曜日分の行を出力
///
/// 日付欄と廃棄量欄は品目行とフッター行をまとめて`rowspan`で結合します。
fn render_html_block<W: Write>(
    writer: &mut W,
    block: &DayBlock,
    columns: usize,
) -> Result<(), MenuSheetError> {
    let span = block.rows + 1;

    for row in 0..block.rows {
        writeln!(writer, "    <tr>")?;
        if row == 0 {
            writeln!(
                writer,
                "      <td class=\"date-cell\" rowspan=\"{}\">{}</td>",
                span,
                escape_html(&block.date_label())
            )?;
        }

        for col in 0..columns {
            match block.cell(row, col) {
                Some(item) => writeln!(
                    writer,
                    "      <td class=\"item-col\"><label class=\"item-label\"><input type=\"checkbox\" class=\"item-checkbox\"><span>{}</span></label></td>",
                    escape_html(item)
                )?,
                None => writeln!(writer, "      <td class=\"item-col\"></td>")?,
            }
        }

        if row == 0 {
            writeln!(
                writer,
                "      <td class=\"wastage-cell\" rowspan=\"{}\"></td>",
                span
            )?;
        }
        writeln!(writer, "    </tr>")?;
    }

    writeln!(writer, "    <tr class=\"footer-row\">")?;
    writeln!(
        writer,
        "      <td class=\"footer-cell\" colspan=\"{}\">{}</td>",
        columns + 1,
        FOOTER_TEXT
    )?;
    writeln!(writer, "    </tr>")?;
    Ok(())
}

/// HTML特殊文字をエスケープ
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON出力の形
#[derive(Serialize)]
struct JsonOutput<'a> {
    company: &'a str,
    schedule: &'a WeeklySchedule,
}

/// JSON形式のフォーマッター
///
/// `render`サブコマンドで読み戻せる形（`{"company": ..., "schedule": ...}`）で出力します。
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        company: &str,
        schedule: &WeeklySchedule,
        writer: &mut W,
    ) -> Result<(), MenuSheetError> {
        let output = JsonOutput { company, schedule };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

/// CSV形式のフォーマッター
///
/// 1品目1行で`company,day,meal,position,item`を出力します。`position`は1始まりです。
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(
        &self,
        company: &str,
        schedule: &WeeklySchedule,
        writer: &mut W,
    ) -> Result<(), MenuSheetError> {
        writeln!(writer, "company,day,meal,position,item")?;

        let company = escape_csv(company);
        for (day, menu) in schedule.iter() {
            for meal in crate::types::MealSlot::ALL {
                let items = menu
                    .items(meal)
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty());
                for (position, item) in items.enumerate() {
                    writeln!(
                        writer,
                        "{},{},{},{},{}",
                        company,
                        day,
                        meal.key(),
                        position + 1,
                        escape_csv(item)
                    )?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
