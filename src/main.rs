use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use menusheet::{
    Converter, ConverterBuilder, MealSlot, MenuSheetError, OutputFormat, SheetSelector,
    WeeklySchedule,
};
use serde::Deserialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// デコード失敗時に表示する利用者向けメッセージ
const DECODE_FAILURE_MESSAGE: &str = "Excel file format issue. Please re-check the template.";

/// menusheet - Weekly food-menu spreadsheet to printable checklist
#[derive(Parser)]
#[command(name = "menusheet", version)]
#[command(about = "Convert weekly food-menu spreadsheets into printable checklists", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse menu workbooks and render checklists
    Convert {
        /// Workbook files (.xlsx, .xls, .xlsb, .ods)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (multiple inputs). Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render a checklist from an edited schedule JSON file
    Render {
        /// Schedule JSON (either `{"company": ..., "schedule": ...}` or a bare schedule)
        schedule: PathBuf,

        /// Output file. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Show how a workbook is parsed
    Inspect {
        /// Workbook file
        input: PathBuf,

        #[command(flatten)]
        sheet: SheetArgs,
    },
}

#[derive(Args)]
struct SheetArgs {
    /// Sheet to read, by zero-based index
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Sheet to read, by name
    #[arg(long)]
    sheet_name: Option<String>,
}

impl SheetArgs {
    fn selector(&self) -> SheetSelector {
        match (&self.sheet_name, self.sheet_index) {
            (Some(name), _) => SheetSelector::Name(name.clone()),
            (None, Some(index)) => SheetSelector::Index(index),
            (None, None) => SheetSelector::default(),
        }
    }
}

#[derive(Args)]
struct RenderArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Markdown)]
    format: FormatArg,

    /// Company name shown in the checklist headers
    #[arg(long)]
    company: Option<String>,

    /// Number of item columns per day
    #[arg(long)]
    columns: Option<usize>,

    /// Monday of the menu week (YYYY-MM-DD); adds dates next to day names
    #[arg(long)]
    week_start: Option<NaiveDate>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Html,
    Json,
    Csv,
}

impl FormatArg {
    fn to_output_format(self) -> OutputFormat {
        match self {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            FormatArg::Markdown => "md",
            FormatArg::Html => "html",
            FormatArg::Json => "json",
            FormatArg::Csv => "csv",
        }
    }
}

/// `render`サブコマンドが受け付けるJSON
#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleDocument {
    WithCompany {
        company: Option<String>,
        schedule: WeeklySchedule,
    },
    Bare(WeeklySchedule),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            inputs,
            output,
            sheet,
            render,
        } => convert_command(&inputs, output.as_deref(), &sheet, &render),
        Commands::Render {
            schedule,
            output,
            render,
        } => render_command(&schedule, output.as_deref(), &render),
        Commands::Inspect { input, sheet } => inspect_command(&input, &sheet),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(None, &e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_converter(
    selector: SheetSelector,
    args: &RenderArgs,
    company: Option<&str>,
) -> Result<Converter, MenuSheetError> {
    let mut builder = ConverterBuilder::new()
        .with_sheet_selector(selector)
        .with_output_format(args.format.to_output_format());

    if let Some(company) = args.company.as_deref().or(company) {
        builder = builder.with_company(company);
    }
    if let Some(columns) = args.columns {
        builder = builder.with_columns(columns);
    }
    if let Some(week_start) = args.week_start {
        builder = builder.with_week_start(week_start);
    }

    builder.build()
}

fn convert_command(
    inputs: &[PathBuf],
    output: Option<&Path>,
    sheet: &SheetArgs,
    args: &RenderArgs,
) -> Result<ExitCode, MenuSheetError> {
    let converter = build_converter(sheet.selector(), args, None)?;
    let into_directory = inputs.len() > 1;
    let mut failed = false;

    // 出力先は入力順に決める（読み込みに失敗した入力も名前を予約する）
    let mut reserved = HashSet::new();
    let mut readable = Vec::with_capacity(inputs.len());
    let mut workbooks = Vec::with_capacity(inputs.len());
    for path in inputs {
        let target = match output {
            Some(dir) if into_directory => {
                Some(output_path(dir, path, args.format, &mut reserved))
            }
            Some(file) => Some(file.to_path_buf()),
            None => None,
        };

        match fs::read(path) {
            Ok(data) => {
                readable.push((path, target));
                workbooks.push(data);
            }
            Err(e) => {
                report_error(Some(path.as_path()), &MenuSheetError::from(e));
                failed = true;
            }
        }
    }

    if into_directory {
        if let Some(dir) = output {
            fs::create_dir_all(dir)?;
        }
    }

    let results = converter.parse_batch(workbooks);
    let mut printed = 0usize;

    for ((path, target), result) in readable.into_iter().zip(results) {
        let schedule = match result {
            Ok(schedule) => schedule,
            Err(e) => {
                report_error(Some(path.as_path()), &e);
                failed = true;
                continue;
            }
        };
        info!(input = %path.display(), items = schedule.item_count(), "parsed workbook");

        let written = match target.as_deref() {
            Some(file) => {
                debug!(output = %file.display(), "writing checklist");
                File::create(file)
                    .map_err(MenuSheetError::from)
                    .and_then(|file| converter.render(&schedule, file))
            }
            None => write_to_stdout(&converter, &schedule, printed > 0),
        };

        match written {
            Ok(()) => printed += 1,
            Err(e) => {
                report_error(Some(path.as_path()), &e);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// 標準出力に書き出す（2件目以降は空行で区切る）
fn write_to_stdout(
    converter: &Converter,
    schedule: &WeeklySchedule,
    separate: bool,
) -> Result<(), MenuSheetError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if separate {
        writeln!(handle)?;
    }
    converter.render(schedule, &mut handle)
}

fn render_command(
    schedule_path: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<ExitCode, MenuSheetError> {
    let document: ScheduleDocument = serde_json::from_reader(File::open(schedule_path)?)?;
    let (company, schedule) = match document {
        ScheduleDocument::WithCompany { company, schedule } => (company, schedule),
        ScheduleDocument::Bare(schedule) => (None, schedule),
    };

    let converter = build_converter(SheetSelector::default(), args, company.as_deref())?;
    match output {
        Some(file) => converter.render(&schedule, File::create(file)?)?,
        None => converter.render(&schedule, io::stdout().lock())?,
    }

    Ok(ExitCode::SUCCESS)
}

fn inspect_command(input: &Path, sheet: &SheetArgs) -> Result<ExitCode, MenuSheetError> {
    let converter = ConverterBuilder::new()
        .with_sheet_selector(sheet.selector())
        .build()?;

    let summary = match converter.inspect(File::open(input)?) {
        Ok(summary) => summary,
        Err(e) => {
            report_error(Some(input), &e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = &summary.report;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Sheets:            {}", summary.sheet_names.join(", "))?;
    writeln!(out, "Selected sheet:    {}", summary.sheet)?;
    writeln!(out, "Rows scanned:      {}", report.rows_scanned)?;
    writeln!(out, "Blank rows:        {}", report.blank_rows)?;
    writeln!(out, "Day header rows:   {}", report.day_header_rows)?;
    writeln!(out, "Meal marker rows:  {}", report.meal_marker_rows)?;
    writeln!(out, "Titles suppressed: {}", report.titles_suppressed)?;
    writeln!(out, "Items extracted:   {}", report.items_extracted)?;
    writeln!(out)?;

    if summary.schedule.is_empty() {
        writeln!(out, "{}", menusheet::NO_ITEMS_NOTICE)?;
        return Ok(ExitCode::SUCCESS);
    }

    write!(out, "{:<10}", "")?;
    for meal in MealSlot::ALL {
        write!(out, " {:>15}", meal.label())?;
    }
    writeln!(out)?;

    for (day, menu) in summary.schedule.iter() {
        write!(out, "{:<10}", day.name())?;
        for meal in MealSlot::ALL {
            write!(out, " {:>15}", menu.items(meal).len())?;
        }
        writeln!(out)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// 複数入力時の出力ファイルパス（入力ファイル名の拡張子を置き換える）
///
/// 同じファイル名が既に予約されている場合は`menu-2.md`のように番号を付けます。
/// 大文字小文字だけが異なる名前も衝突として扱います。
fn output_path(
    dir: &Path,
    input: &Path,
    format: FormatArg,
    reserved: &mut HashSet<String>,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "menu".to_string());

    let mut name = format!("{}.{}", stem, format.extension());
    let mut suffix = 2;
    while !reserved.insert(name.to_lowercase()) {
        name = format!("{}-{}.{}", stem, suffix, format.extension());
        suffix += 1;
    }

    dir.join(name)
}

fn report_error(path: Option<&Path>, e: &MenuSheetError) {
    debug!(error = ?e, "command failed");

    let prefix = path
        .map(|p| format!("{}: ", p.display()))
        .unwrap_or_default();

    if e.is_decode_failure() {
        eprintln!("{}{}", prefix, DECODE_FAILURE_MESSAGE);
    } else {
        eprintln!("{}{}", prefix, e);
    }
}
