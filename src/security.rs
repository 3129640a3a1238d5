//! Security Module
//!
//! アップロードされたファイルに対するセキュリティ対策を実装するモジュール。
//! 入力サイズ制限、ZIP bomb攻撃、パストラバーサル攻撃への対策を提供します。

use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::error::MenuSheetError;

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 展開後の最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600,       // 100MB
            max_input_file_size: 104_857_600, // 100MB
        }
    }
}

/// ZIPアーカイブの事前検査
///
/// calamineに渡す前に、エントリ数・各エントリの展開後サイズ・
/// 展開後サイズの合計・エントリパスを検査します。
///
/// # 戻り値
///
/// * `Ok(())` - 検査に合格した場合
/// * `Err(MenuSheetError::Zip)` - ZIPアーカイブとして読めない場合
/// * `Err(MenuSheetError::SecurityViolation)` - 制限に違反した場合
pub(crate) fn check_zip_archive<R: Read + Seek>(
    reader: R,
    config: &SecurityConfig,
) -> Result<(), MenuSheetError> {
    let mut archive = ZipArchive::new(reader).map_err(|e| MenuSheetError::Zip(e.to_string()))?;

    // セキュリティチェック: ファイル数の上限
    if archive.len() > config.max_file_count {
        return Err(MenuSheetError::SecurityViolation(format!(
            "ZIP archive contains too many files: {} (max: {})",
            archive.len(),
            config.max_file_count
        )));
    }

    let mut total_decompressed_size = 0u64;
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| MenuSheetError::Zip(e.to_string()))?;

        // パストラバーサル対策
        let file_name = file.name();
        validate_zip_path(file_name).map_err(|e| {
            MenuSheetError::SecurityViolation(format!("Invalid ZIP path: {}", e))
        })?;

        let file_size = file.size();
        if file_size > config.max_file_size {
            return Err(MenuSheetError::SecurityViolation(format!(
                "File '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                file_name, file_size, config.max_file_size
            )));
        }

        total_decompressed_size = total_decompressed_size
            .checked_add(file_size)
            .ok_or_else(|| {
                MenuSheetError::SecurityViolation(
                    "Total decompressed size calculation overflow".to_string(),
                )
            })?;

        if total_decompressed_size > config.max_decompressed_size {
            return Err(MenuSheetError::SecurityViolation(format!(
                "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total_decompressed_size, config.max_decompressed_size
            )));
        }
    }

    Ok(())
}

/// ファイルパスの検証
///
/// パストラバーサル攻撃を防ぐため、ZIPエントリのパスを検証します。
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.contains("..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    fn build_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut data = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut data));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            for (name, body) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(body).unwrap();
            }
            zip.finish().unwrap();
        }
        data
    }

    #[test]
    fn test_validate_zip_path_valid() {
        assert!(validate_zip_path("xl/workbook.xml").is_ok());
        assert!(validate_zip_path("xl/worksheets/sheet1.xml").is_ok());
        assert!(validate_zip_path("content.xml").is_ok());
    }

    #[test]
    fn test_validate_zip_path_rejected() {
        assert!(validate_zip_path("").is_err());
        assert!(validate_zip_path("/etc/passwd").is_err());
        assert!(validate_zip_path("c:\\xl\\workbook.xml").is_err());
        assert!(validate_zip_path("xl/../../etc/passwd").is_err());
        assert!(validate_zip_path("xl\\workbook.xml").is_err());
    }

    #[test]
    fn test_check_zip_archive_ok() {
        let data = build_zip(&[("xl/workbook.xml", b"<workbook/>".to_vec())]);
        assert!(check_zip_archive(Cursor::new(data), &SecurityConfig::default()).is_ok());
    }

    #[test]
    fn test_check_zip_archive_too_many_files() {
        let data = build_zip(&[
            ("a.xml", b"a".to_vec()),
            ("b.xml", b"b".to_vec()),
            ("c.xml", b"c".to_vec()),
        ]);
        let config = SecurityConfig {
            max_file_count: 2,
            ..SecurityConfig::default()
        };

        match check_zip_archive(Cursor::new(data), &config) {
            Err(MenuSheetError::SecurityViolation(msg)) => assert!(msg.contains("too many files")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_zip_archive_total_size() {
        let data = build_zip(&[("a.xml", vec![0u8; 600]), ("b.xml", vec![0u8; 600])]);
        let config = SecurityConfig {
            max_decompressed_size: 1_000,
            ..SecurityConfig::default()
        };

        match check_zip_archive(Cursor::new(data), &config) {
            Err(MenuSheetError::SecurityViolation(msg)) => {
                assert!(msg.contains("Total decompressed size"))
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_zip_archive_path_traversal() {
        let data = build_zip(&[("../evil.xml", b"x".to_vec())]);
        let result = check_zip_archive(Cursor::new(data), &SecurityConfig::default());
        assert!(matches!(result, Err(MenuSheetError::SecurityViolation(_))));
    }

    #[test]
    fn test_check_zip_archive_not_a_zip() {
        let data = b"PK\x03\x04garbage".to_vec();
        let result = check_zip_archive(Cursor::new(data), &SecurityConfig::default());
        assert!(matches!(result, Err(MenuSheetError::Zip(_))));
    }
}
