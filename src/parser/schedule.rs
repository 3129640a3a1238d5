//! Schedule Parser Module
//!
//! 生のグリッドから週間献立を復元するパーサー。
//!
//! 入力シートには固定のスキーマがないため、行を上から順に1回だけ走査し、
//! 「現在の食事区分」と「現在の列→曜日対応」の2つの状態を持ち越しながら
//! 各行を次のいずれかとして扱います。
//!
//! 1. 空行: 状態を変えずにスキップ
//! 2. 曜日見出し行: 列→曜日対応を置き換えて次の行へ
//! 3. それ以外: 食事区分キーワードがあれば現在の食事区分を更新し、
//!    両方の状態が揃っていれば曜日列のセルから品目を抽出
//!
//! パーサーは失敗しません。どのような形のグリッドに対しても、
//! 7曜日 × 5食事区分がそろった`WeeklySchedule`を返します。

use tracing::{debug, trace};

use crate::parser::keywords::{classify_meal, is_menu_title, match_day, split_items, MealMatch};
use crate::types::{CellValue, Day, MealSlot, WeeklySchedule};

/// 列→曜日の対応（直近の曜日見出し行から推定したテーブルレイアウト）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnDayIndex {
    columns: [Option<usize>; 7],
}

impl ColumnDayIndex {
    /// 正規化済みの行から曜日見出しを検出
    ///
    /// 曜日名に完全一致するセルが1つもなければ`None`を返します。
    /// 同じ曜日が複数回現れた場合は、後ろの列が優先されます。
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        let mut index = Self::default();
        let mut found = false;

        for (col, cell) in cells.iter().enumerate() {
            if let Some(day) = match_day(cell) {
                index.columns[day.offset() as usize] = Some(col);
                found = true;
            }
        }

        found.then_some(index)
    }

    /// 指定された曜日の列
    pub fn column(&self, day: Day) -> Option<usize> {
        self.columns[day.offset() as usize]
    }

    /// 曜日順に`(曜日, 列)`を列挙
    pub fn iter(&self) -> impl Iterator<Item = (Day, usize)> + '_ {
        Day::ALL
            .into_iter()
            .filter_map(move |day| self.column(day).map(|col| (day, col)))
    }

    /// 対応付けられた曜日の数
    pub fn len(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// 対応付けられた曜日がないかを判定
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 行の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// 全セルが空の行
    Blank,

    /// 曜日見出し行
    DayHeader,

    /// 食事区分の見出し、データ、またはその両方を含む行
    Content,
}

/// 抽出された1品目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub day: Day,
    pub slot: MealSlot,
    pub item: String,
}

/// 1行分の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub kind: RowKind,

    /// この行に食事区分キーワードを含むセルがあったか
    pub meal_marker: bool,

    /// タイトル行として抑止したセル数
    pub titles_suppressed: usize,

    /// 抽出した品目（曜日順、セル内は分割順）
    pub emissions: Vec<Emission>,
}

impl StepOutcome {
    fn new(kind: RowKind) -> Self {
        Self {
            kind,
            meal_marker: false,
            titles_suppressed: 0,
            emissions: Vec::new(),
        }
    }
}

/// 走査中の状態
///
/// どちらも`None`から始まり、上書きされるまで次の行へ持ち越されます。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    pub current_meal: Option<MealSlot>,
    pub day_index: Option<ColumnDayIndex>,
}

impl ParseState {
    /// 1行を処理し、次の状態と処理結果を返す
    ///
    /// 状態を変更しない純粋関数です。
    pub fn step(self, row: &[CellValue]) -> (ParseState, StepOutcome) {
        let cells: Vec<String> = row.iter().map(CellValue::to_text).collect();

        if cells.iter().all(String::is_empty) {
            return (self, StepOutcome::new(RowKind::Blank));
        }

        // 曜日見出し行は食事区分・品目を含まないものとして扱う
        if let Some(index) = ColumnDayIndex::from_cells(&cells) {
            let next = ParseState {
                day_index: Some(index),
                ..self
            };
            return (next, StepOutcome::new(RowKind::DayHeader));
        }

        let mut next = self;
        let mut outcome = StepOutcome::new(RowKind::Content);

        // 行内で最後に一致したセルが優先
        for cell in &cells {
            if let MealMatch::Meal(slot) = classify_meal(cell) {
                next.current_meal = Some(slot);
                outcome.meal_marker = true;
            }
        }

        let (Some(slot), Some(index)) = (next.current_meal, next.day_index) else {
            return (next, outcome);
        };

        for (day, col) in index.iter() {
            let cell = match cells.get(col) {
                Some(cell) if !cell.is_empty() => cell,
                _ => continue,
            };

            if is_menu_title(cell) {
                trace!(day = %day, column = col, cell = %cell, "suppressed title cell");
                outcome.titles_suppressed += 1;
                continue;
            }

            outcome
                .emissions
                .extend(split_items(cell).map(|item| Emission {
                    day,
                    slot,
                    item: item.to_string(),
                }));
        }

        (next, outcome)
    }
}

/// 解析の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// 走査した行数
    pub rows_scanned: usize,

    /// スキップした空行の数
    pub blank_rows: usize,

    /// 曜日見出し行の数
    pub day_header_rows: usize,

    /// 食事区分キーワードを含む行の数
    pub meal_marker_rows: usize,

    /// タイトル行として抑止したセルの数
    pub titles_suppressed: usize,

    /// 抽出した品目の数
    pub items_extracted: usize,
}

impl ParseReport {
    fn record(&mut self, outcome: &StepOutcome) {
        self.rows_scanned += 1;
        match outcome.kind {
            RowKind::Blank => self.blank_rows += 1,
            RowKind::DayHeader => self.day_header_rows += 1,
            RowKind::Content => {}
        }
        if outcome.meal_marker {
            self.meal_marker_rows += 1;
        }
        self.titles_suppressed += outcome.titles_suppressed;
        self.items_extracted += outcome.emissions.len();
    }
}

/// グリッドを週間献立に変換
///
/// 失敗しません。曜日見出し行が一度も現れない場合は、
/// すべて空の献立を返します。
///
/// # 使用例
///
/// ```rust
/// use menusheet::{parse, CellValue, Day, MealSlot};
///
/// let grid: Vec<Vec<CellValue>> = vec![
///     vec!["".into(), "Monday".into(), "Tuesday".into()],
///     vec!["Breakfast".into(), "Idli".into(), "Dosa, Vada".into()],
/// ];
///
/// let schedule = parse(&grid);
/// assert_eq!(schedule.items(Day::Monday, MealSlot::Breakfast), ["Idli"]);
/// assert_eq!(schedule.items(Day::Tuesday, MealSlot::Breakfast), ["Dosa", "Vada"]);
/// ```
pub fn parse(grid: &[Vec<CellValue>]) -> WeeklySchedule {
    parse_with_report(grid).0
}

/// グリッドを週間献立に変換し、統計情報も返す
pub fn parse_with_report(grid: &[Vec<CellValue>]) -> (WeeklySchedule, ParseReport) {
    let mut schedule = WeeklySchedule::new();
    let mut report = ParseReport::default();

    let final_state = grid.iter().fold(ParseState::default(), |state, row| {
        let (next, outcome) = state.step(row);
        report.record(&outcome);

        for emission in outcome.emissions {
            schedule
                .day_mut(emission.day)
                .items_mut(emission.slot)
                .push(emission.item);
        }

        next
    });

    debug!(
        rows = report.rows_scanned,
        day_headers = report.day_header_rows,
        meal_markers = report.meal_marker_rows,
        titles_suppressed = report.titles_suppressed,
        items = report.items_extracted,
        header_seen = final_state.day_index.is_some(),
        "parsed weekly schedule"
    );

    (schedule, report)
}
