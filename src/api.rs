//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 日付の出力形式
///
/// 週の開始日が設定されている場合、チェックリストの日付欄に曜日と並べて
/// 出力する日付の形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（YYYY-MM-DD）
    ///
    /// 例: `2025-11-24`
    #[default]
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%b`: 月の略称（例: Nov）
    /// - `%e`: 日（先頭ゼロなし）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use menusheet::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), menusheet::MenuSheetError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d %b".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

/// シート選択方式
///
/// 献立として読み込むシートを1枚選択します。複数シートの結合は行いません。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択（デフォルト）
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Week 48".to_string())`
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

/// 出力フォーマット
///
/// 週間献立をチェックリストとして出力する際の形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Markdown形式（デフォルト）
    ///
    /// 食事区分ごとにセクションを作り、曜日ごとのチェックボックス付き
    /// テーブルを出力します。
    #[default]
    Markdown,

    /// HTML形式
    ///
    /// 印刷用のチェックリストテーブルを出力します。
    /// 日付欄と廃棄量欄は`rowspan`で結合されます。
    Html,

    /// JSON形式
    ///
    /// 会社名と週間献立をそのまま出力します。
    ///
    /// ```json
    /// {
    ///   "company": "Red-Brick",
    ///   "schedule": { "Monday": { "breakfast": ["Idli"], ... }, ... }
    /// }
    /// ```
    Json,

    /// CSV形式
    ///
    /// 1品目1行で`company,day,meal,position,item`を出力します。
    Csv,
}
