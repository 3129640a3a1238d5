//! パフォーマンスベンチマーク
//!
//! 献立表の解析とチェックリスト出力の処理時間を測定します。
//!
//! 実装するベンチマーク:
//! - グリッド解析（ワークブックのデコードを含まない純粋な走査）
//! - 1ファイルの変換（デコード・解析・Markdown/HTML出力）
//! - 複数ファイルの並列解析（`parse_batch`）
//!
//! フィクスチャは`rust_xlsxwriter`でメモリ上に生成するため、事前準備は不要です。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use menusheet::{parse, CellValue, ConverterBuilder, OutputFormat};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MEALS: [&str; 5] = ["Breakfast", "Lunch", "Snacks", "Midnight", "Dinner"];

/// 曜日見出し行と食事区分ごとの品目行を`weeks`週分積み重ねたグリッドを生成
fn synthetic_grid(weeks: usize, rows_per_meal: usize) -> Vec<Vec<CellValue>> {
    let mut grid = Vec::new();

    for week in 0..weeks {
        let mut header = vec![CellValue::Empty];
        header.extend(DAYS.iter().map(|day| CellValue::from(*day)));
        grid.push(header);

        for meal in MEALS {
            for row in 0..rows_per_meal {
                let mut cells = vec![if row == 0 {
                    CellValue::from(meal)
                } else {
                    CellValue::Empty
                }];
                for day in 0..DAYS.len() {
                    cells.push(CellValue::from(
                        format!("Item {}-{}-{}, Side {}", week, day, row, row).as_str(),
                    ));
                }
                grid.push(cells);
            }
        }

        grid.push(Vec::new());
    }

    grid
}

/// 1週分の献立表ワークブックを生成
fn synthetic_workbook(rows_per_meal: usize) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Menu")?;

    for (col, day) in DAYS.iter().enumerate() {
        worksheet.write_string(0, (col + 1) as u16, *day)?;
    }

    let mut row = 1u32;
    for meal in MEALS {
        worksheet.write_string(row, 0, meal)?;
        for line in 0..rows_per_meal {
            for col in 0..DAYS.len() {
                worksheet.write_string(
                    row,
                    (col + 1) as u16,
                    format!("{} dish {}, side {}", meal, line, col),
                )?;
            }
            row += 1;
        }
    }

    workbook.save_to_buffer()
}

/// グリッド解析のベンチマーク
fn benchmark_parse_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_grid");

    for weeks in [1usize, 10, 100] {
        let grid = synthetic_grid(weeks, 4);
        group.throughput(Throughput::Elements(grid.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(weeks), &grid, |b, grid| {
            b.iter(|| black_box(parse(black_box(grid))));
        });
    }

    group.finish();
}

/// 1ファイル変換のベンチマーク
fn benchmark_convert_file(c: &mut Criterion) {
    let data = synthetic_workbook(6).unwrap();

    let mut group = c.benchmark_group("convert_file");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for format in [OutputFormat::Markdown, OutputFormat::Html] {
        let converter = ConverterBuilder::new()
            .with_output_format(format)
            .build()
            .unwrap();

        group.bench_function(format!("{:?}", format).to_lowercase(), |b| {
            b.iter(|| {
                let mut output = Vec::new();
                converter
                    .convert(Cursor::new(black_box(&data)), &mut output)
                    .unwrap();
                black_box(output)
            });
        });
    }

    group.finish();
}

/// 並列バッチ解析のベンチマーク
fn benchmark_batch_processing(c: &mut Criterion) {
    let data = synthetic_workbook(4).unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("batch_processing");
    group.sample_size(10);
    group.throughput(Throughput::Elements(50));

    group.bench_function("parse_50_files", |b| {
        b.iter(|| {
            let batch = vec![data.clone(); 50];
            let results = converter.parse_batch(black_box(batch));
            black_box(results)
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(10))
        .warm_up_time(std::time::Duration::from_secs(3));
    targets = benchmark_parse_grid, benchmark_convert_file, benchmark_batch_processing
}

criterion_main!(benches);
