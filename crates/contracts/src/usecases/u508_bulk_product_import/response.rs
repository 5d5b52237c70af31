use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::job::{BulkJob, UserError, WebhookSubscription};

/// Состояние прогона пайплайна
///
/// Прогон движется только вперед:
/// `Init -> SlotRequested -> PayloadSent -> JobTriggered -> {Subscribed | Skipped}`.
/// Ошибка на любом шаге переводит его в соответствующее `*Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Init,
    SlotRequested,
    PayloadSent,
    JobTriggered,
    Subscribed,
    Skipped,
    SlotRequestFailed,
    PayloadFailed,
    TriggerFailed,
    SubscribeFailed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Subscribed
                | RunState::Skipped
                | RunState::SlotRequestFailed
                | RunState::PayloadFailed
                | RunState::TriggerFailed
                | RunState::SubscribeFailed
        )
    }
}

/// Итог прогона bulk-импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// ID прогона (для поиска в логах)
    pub run_id: String,

    pub state: RunState,

    /// Сколько товаров ушло в JSONL
    pub record_count: usize,

    /// Путь загруженного файла (`key` из staged upload)
    pub staged_path: Option<String>,

    pub job: Option<BulkJob>,

    pub subscription: Option<WebhookSubscription>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Тело ответа при неуспешном прогоне
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportErrorResponse {
    pub run_id: String,

    /// Состояние, в котором прогон остановился
    pub state: RunState,

    /// Машинный код ошибки, например `TRANSFER_ERROR`
    pub code: String,

    pub message: String,

    /// Ошибки полей от платформы (для показа пользователю)
    #[serde(default)]
    pub user_errors: Vec<UserError>,

    /// Последнее известное состояние операции, если она была создана
    #[serde(default)]
    pub job: Option<BulkJob>,
}
