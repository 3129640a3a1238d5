//! Boundary Tests for menusheet
//!
//! Degenerate workbooks and grids: empty sheets, missing headers, short rows,
//! duplicated day names and non-text cells.

use menusheet::{parse, CellValue, ConverterBuilder, Day, MealSlot, OutputFormat, NO_ITEMS_NOTICE};
use rust_xlsxwriter::*;
use std::io::Cursor;

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// Generate a workbook with an empty sheet (no cells)
    pub fn generate_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("EmptySheet")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a menu without any day header row
    pub fn generate_no_header() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Breakfast")?;
        worksheet.write_string(0, 1, "Idli")?;
        worksheet.write_string(1, 0, "Lunch")?;
        worksheet.write_string(1, 1, "Rice")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a sheet with non-text cells below a header
    pub fn generate_mixed_types() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 1, "Monday")?;
        worksheet.write_string(0, 2, "Tuesday")?;
        worksheet.write_string(0, 3, "Wednesday")?;
        worksheet.write_string(1, 0, "Dinner")?;
        worksheet.write_number(1, 1, 1.5)?;
        worksheet.write_boolean(1, 2, true)?;
        worksheet.write_number(1, 3, 7.0)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a menu whose data starts far away from A1
    pub fn generate_offset_table() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(20, 5, "Saturday")?;
        worksheet.write_string(20, 6, "Sunday")?;
        worksheet.write_string(21, 4, "Brunch / Breakfast")?;
        worksheet.write_string(21, 5, "Pancakes")?;
        worksheet.write_string(21, 6, "Waffles, Juice")?;

        Ok(workbook.save_to_buffer()?)
    }
}

fn row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

#[test]
fn test_empty_sheet() {
    let data = fixtures::generate_empty_sheet().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let schedule = converter.parse(Cursor::new(data.clone())).unwrap();
    assert!(schedule.is_empty());

    // 空の結果はエラーではなく通知として出力される
    let markdown = converter.convert_to_string(Cursor::new(data)).unwrap();
    assert!(markdown.contains(NO_ITEMS_NOTICE));
}

#[test]
fn test_no_day_header_yields_empty_schedule() {
    let data = fixtures::generate_no_header().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let summary = converter.inspect(Cursor::new(data)).unwrap();
    assert!(summary.schedule.is_empty());
    assert_eq!(summary.report.day_header_rows, 0);
    assert_eq!(summary.report.meal_marker_rows, 2);
}

#[test]
fn test_mixed_cell_types_are_normalized() {
    let data = fixtures::generate_mixed_types().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let schedule = converter.parse(Cursor::new(data)).unwrap();
    assert_eq!(schedule.items(Day::Monday, MealSlot::Dinner), ["1.5"]);
    assert_eq!(schedule.items(Day::Tuesday, MealSlot::Dinner), ["true"]);
    assert_eq!(schedule.items(Day::Wednesday, MealSlot::Dinner), ["7"]);
}

#[test]
fn test_offset_table() {
    let data = fixtures::generate_offset_table().unwrap();
    let converter = ConverterBuilder::new()
        .with_output_format(OutputFormat::Csv)
        .build()
        .unwrap();

    let schedule = converter.parse(Cursor::new(data.clone())).unwrap();
    assert_eq!(schedule.items(Day::Saturday, MealSlot::Breakfast), ["Pancakes"]);
    assert_eq!(
        schedule.items(Day::Sunday, MealSlot::Breakfast),
        ["Waffles", "Juice"]
    );

    let csv = converter.convert_to_string(Cursor::new(data)).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_empty_grid() {
    let grid: Vec<Vec<CellValue>> = Vec::new();
    assert!(parse(&grid).is_empty());
}

#[test]
fn test_rows_of_only_empty_cells() {
    let grid = vec![vec![CellValue::Empty; 10]; 50];
    let schedule = parse(&grid);
    assert!(schedule.is_empty());
}

#[test]
fn test_short_rows_do_not_panic() {
    let grid = vec![
        row(&["", "", "", "", "Friday"]),
        row(&["Lunch"]),
        row(&["", "Rice"]),
        row(&["", "", "", "", "Pulao"]),
    ];

    let schedule = parse(&grid);
    assert_eq!(schedule.items(Day::Friday, MealSlot::Lunch), ["Pulao"]);
    assert_eq!(schedule.item_count(), 1);
}

#[test]
fn test_duplicate_day_in_header_later_column_wins() {
    let grid = vec![
        row(&["", "Monday", "Monday"]),
        row(&["Lunch", "Left", "Right"]),
    ];

    let schedule = parse(&grid);
    assert_eq!(schedule.items(Day::Monday, MealSlot::Lunch), ["Right"]);
}

#[test]
fn test_day_names_must_match_exactly() {
    let grid = vec![
        row(&["", "Mon", "Monday Special", " tuesday "]),
        row(&["Lunch", "A", "B", "C"]),
    ];

    let schedule = parse(&grid);
    assert!(schedule.items(Day::Monday, MealSlot::Lunch).is_empty());
    // セル文字列は正規化時にtrimされる
    assert_eq!(schedule.items(Day::Tuesday, MealSlot::Lunch), ["C"]);
}

#[test]
fn test_only_commas_and_whitespace() {
    let grid = vec![
        row(&["", "Monday"]),
        row(&["Dinner", " , ,, "]),
    ];

    assert!(parse(&grid).is_empty());
}

#[test]
fn test_unicode_items() {
    let grid = vec![
        row(&["", "Thursday"]),
        row(&["Snacks", "समोसा, 抹茶ラテ , Crème brûlée"]),
    ];

    let schedule = parse(&grid);
    assert_eq!(
        schedule.items(Day::Thursday, MealSlot::Snacks),
        ["समोसा", "抹茶ラテ", "Crème brûlée"]
    );
}

#[test]
fn test_midnight_snacks_label_resolves_to_snacks() {
    // "snack"は"midnight"より先に評価される
    let grid = vec![
        row(&["", "Saturday"]),
        row(&["Midnight Snacks", "Maggi"]),
        row(&["Midnight", "Noodles"]),
    ];

    let schedule = parse(&grid);
    assert_eq!(schedule.items(Day::Saturday, MealSlot::Snacks), ["Maggi"]);
    assert_eq!(
        schedule.items(Day::Saturday, MealSlot::MidnightSnacks),
        ["Noodles"]
    );
}

#[test]
fn test_large_grid() {
    let mut grid = vec![row(&[
        "", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ])];
    grid.push(row(&["Lunch"]));
    for i in 0..5_000 {
        let item = format!("Item {}", i);
        grid.push(vec![CellValue::Empty, CellValue::from(item.as_str())]);
    }

    let schedule = parse(&grid);
    assert_eq!(schedule.items(Day::Monday, MealSlot::Lunch).len(), 5_000);
    assert_eq!(schedule.items(Day::Monday, MealSlot::Lunch)[4_999], "Item 4999");
}
