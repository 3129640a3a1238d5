//! Application State Module
//!
//! 会社名と現在の週間献立を保持する共有状態。
//! 献立は常に丸ごと置き換えられ、読み出し側は`Arc`を通じて不変のスナップショットを受け取ります。

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::checklist::DEFAULT_COMPANY;
use crate::error::MenuSheetError;
use crate::types::WeeklySchedule;

/// アプリケーション状態
///
/// `Send + Sync`であり、`Arc<AppState>`としてスレッド間で共有できます。
/// ロック内の値は常に丸ごと置き換えるため、ポイズンされたロックも
/// 中身をそのまま使用します。
///
/// # 使用例
///
/// ```rust
/// use menusheet::{AppState, WeeklySchedule};
///
/// let state = AppState::new();
/// assert_eq!(state.company(), "Red-Brick");
/// assert!(state.schedule().is_none());
///
/// state.replace_schedule(WeeklySchedule::new());
/// assert!(state.schedule().is_some());
/// ```
#[derive(Debug)]
pub struct AppState {
    company: RwLock<String>,
    schedule: RwLock<Option<Arc<WeeklySchedule>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// 既定の会社名で、献立を持たない状態を作成
    pub fn new() -> Self {
        Self::with_company(DEFAULT_COMPANY)
    }

    /// 会社名を指定して作成
    pub fn with_company(company: impl Into<String>) -> Self {
        Self {
            company: RwLock::new(company.into()),
            schedule: RwLock::new(None),
        }
    }

    /// 現在の会社名
    pub fn company(&self) -> String {
        self.company
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 会社名を置き換える
    ///
    /// 前後の空白は取り除かれます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 置き換えた場合
    /// * `Err(MenuSheetError::Config)` - 空白のみの名前が渡された場合（状態は変更されない）
    pub fn replace_company(&self, name: &str) -> Result<(), MenuSheetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MenuSheetError::Config(
                "Company name must not be empty".to_string(),
            ));
        }

        *self
            .company
            .write()
            .unwrap_or_else(PoisonError::into_inner) = name.to_string();
        debug!(company = name, "company replaced");
        Ok(())
    }

    /// 現在の週間献立（未読み込みの場合は`None`）
    pub fn schedule(&self) -> Option<Arc<WeeklySchedule>> {
        self.schedule
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 週間献立を丸ごと置き換える
    pub fn replace_schedule(&self, schedule: WeeklySchedule) -> Arc<WeeklySchedule> {
        let schedule = Arc::new(schedule);
        info!(items = schedule.item_count(), "schedule replaced");

        *self
            .schedule
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&schedule));
        schedule
    }

    /// 週間献立を破棄する
    pub fn clear_schedule(&self) {
        *self
            .schedule
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        debug!("schedule cleared");
    }
}
