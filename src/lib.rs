//! menusheet - Tolerant parser for weekly food-menu spreadsheets
//!
//! This crate reads a free-form weekly menu workbook (XLSX, XLS, XLSB, ODS),
//! recovers a `WeeklySchedule` of items per day and meal slot, and renders it
//! as a printable FOOD CHECK-LIST in Markdown, HTML, JSON or CSV.
//!
//! The schedule parser never fails: any grid, however malformed, yields a
//! complete seven-day, five-meal schedule (possibly empty).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use menusheet::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("menu.xlsx")?;
//!     let output = File::create("checklist.md")?;
//!
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Parsing a Grid Directly
//!
//! ```rust
//! use menusheet::{parse, CellValue, Day, MealSlot};
//!
//! let grid: Vec<Vec<CellValue>> = vec![
//!     vec!["Weekly Menu - Breakfast & Lunch".into()],
//!     vec!["".into(), "Monday".into(), "Tuesday".into()],
//!     vec!["Lunch".into(), "Rice, Dal".into(), "Biryani".into()],
//! ];
//!
//! let schedule = parse(&grid);
//! assert_eq!(schedule.items(Day::Monday, MealSlot::Lunch), ["Rice", "Dal"]);
//! assert!(schedule.items(Day::Monday, MealSlot::Breakfast).is_empty());
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use chrono::NaiveDate;
//! use menusheet::{ConverterBuilder, OutputFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("Week 48".to_string()))
//!         .with_output_format(OutputFormat::Html)
//!         .with_company("Acme Foods")
//!         .with_week_start(NaiveDate::from_ymd_opt(2025, 11, 24).unwrap())
//!         .build()?;
//!
//!     let html = converter.convert_to_string(File::open("menu.xlsx")?)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod checklist;
mod error;
mod output;
mod parser;
mod security;
mod state;
mod types;

// 公開API
pub use api::{DateFormat, OutputFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder, WorkbookSummary};
pub use checklist::{ChecklistDocument, ChecklistSheet, DayBlock};
pub use error::MenuSheetError;
pub use output::{OutputFormatter, NO_ITEMS_NOTICE};
pub use parser::{
    classify_meal, is_menu_title, match_day, parse, parse_with_report, split_items,
    ColumnDayIndex, Emission, MealMatch, ParseReport, ParseState, RowKind, StepOutcome,
};
pub use state::AppState;
pub use types::{CellValue, Day, DayMenu, MealSlot, RawGrid, WeeklySchedule};
