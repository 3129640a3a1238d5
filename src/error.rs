//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! スケジュールパーサー自体は失敗しません。ここで定義するエラーは、
//! ワークブックのデコード、設定の検証、出力処理で発生するものです。

use thiserror::Error;

/// menusheetクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Decode`: ワークブックのデコード中に発生したエラー（calamine由来）
/// - `Zip`: ZIPアーカイブとして読めなかったエラー
/// - `EmptyWorkbook`: シートを1枚も含まないワークブック
/// - `SecurityViolation`: 入力サイズ制限などに違反したエラー
/// - `Json`: スケジュールJSONの読み書きエラー
/// - `Config`: 設定の検証に失敗したエラー
///
/// `Decode`、`Zip`、`EmptyWorkbook`、`SecurityViolation`はいずれも
/// 「アップロードされたファイルをワークブックとして解釈できなかった」ことを表し、
/// [`MenuSheetError::is_decode_failure`]でまとめて判定できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use menusheet::MenuSheetError;
/// use std::fs::File;
///
/// fn open_menu(path: &str) -> Result<File, MenuSheetError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum MenuSheetError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックのデコード中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to decode workbook: {0}")]
    Decode(#[from] calamine::Error),

    /// ZIPアーカイブの解析エラー
    ///
    /// XLSX/ODS（ZIPアーカイブ）の事前検査中に発生したエラーです。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// シートを含まないワークブック
    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    /// スケジュールJSONのシリアライズ・デシリアライズエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時や`AppState::replace_company()`時に
    /// 無効な値が検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use menusheet::{ConverterBuilder, MenuSheetError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_columns(0)  // 無効な列数
    ///     .build();
    ///
    /// match result {
    ///     Err(MenuSheetError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb、パストラバーサル、入力ファイルサイズ制限などに
    /// 違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl MenuSheetError {
    /// アップロードされたファイルをワークブックとして解釈できなかったかを判定
    ///
    /// `true`の場合、ユーザーには「テンプレートを再確認してください」という
    /// ブロッキングメッセージを表示し、保持中のスケジュールは置き換えません。
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            MenuSheetError::Decode(_)
                | MenuSheetError::Zip(_)
                | MenuSheetError::EmptyWorkbook
                | MenuSheetError::SecurityViolation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: MenuSheetError = io_err.into();

        match error {
            MenuSheetError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_decode_error_display() {
        let decode_err = calamine::Error::Msg("Corrupted file");
        let error: MenuSheetError = decode_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to decode workbook"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_config_error_display() {
        let error = MenuSheetError::Config("Company name must not be empty".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.starts_with("Configuration error"));
        assert!(error_msg.contains("Company name must not be empty"));
    }

    #[test]
    fn test_json_error_conversion() {
        fn load() -> Result<serde_json::Value, MenuSheetError> {
            Ok(serde_json::from_str("{ not json")?)
        }

        match load() {
            Err(MenuSheetError::Json(_)) => {}
            other => panic!("Expected Json error, got {:?}", other),
        }
    }

    // デコード失敗の分類
    #[test]
    fn test_is_decode_failure() {
        assert!(MenuSheetError::Decode(calamine::Error::Msg("bad")).is_decode_failure());
        assert!(MenuSheetError::Zip("bad zip".to_string()).is_decode_failure());
        assert!(MenuSheetError::EmptyWorkbook.is_decode_failure());
        assert!(MenuSheetError::SecurityViolation("too big".to_string()).is_decode_failure());

        assert!(!MenuSheetError::Config("x".to_string()).is_decode_failure());
        assert!(!MenuSheetError::Io(io::Error::other("x")).is_decode_failure());
    }

    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), MenuSheetError> {
            let _file = std::fs::File::open("nonexistent_menu_file.xlsx")?;
            Ok(())
        }

        match io_operation() {
            Err(MenuSheetError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }
}
