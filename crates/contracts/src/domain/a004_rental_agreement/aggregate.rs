use crate::domain::a002_app_user::aggregate::AppUser;
use crate::domain::a003_tool::aggregate::Tool;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalAgreementId(pub Uuid);

impl RentalAgreementId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for RentalAgreementId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(RentalAgreementId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalAgreement {
    #[serde(flatten)]
    pub base: BaseAggregate<RentalAgreementId>,

    /// Период аренды. Пара осмысленна только вместе; порядок start <= end
    /// нигде не проверяется.
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,

    /// Ссылка на инструмент (None = не назначен)
    pub tool_id: Option<String>,
    /// Ссылка на пользователя-арендатора (None = не назначен)
    pub user_id: Option<String>,

    /// Развёрнутые связи, заполняются только по запросу relations=tool,user.
    /// Вложенность — один уровень.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool: Option<Tool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user: Option<AppUser>,
}

impl RentalAgreement {
    pub fn new_for_insert(
        start_date: chrono::DateTime<chrono::Utc>,
        end_date: chrono::DateTime<chrono::Utc>,
        tool_id: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(RentalAgreementId::new_v4()),
            start_date,
            end_date,
            tool_id,
            user_id,
            tool: None,
            user: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id().as_string()
    }

    pub fn update(&mut self, dto: &RentalAgreementDto) {
        if let Some(start_date) = dto.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = dto.end_date {
            self.end_date = end_date;
        }
        self.tool_id = dto.tool_id.clone();
        self.user_id = dto.user_id.clone();
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if let Some(tool_id) = &self.tool_id {
            if Uuid::parse_str(tool_id).is_err() {
                report.add("tool_id", "Некорректный идентификатор инструмента");
            }
        }
        if let Some(user_id) = &self.user_id {
            if Uuid::parse_str(user_id).is_err() {
                report.add("user_id", "Некорректный идентификатор пользователя");
            }
        }
        report
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for RentalAgreement {
    type Id = RentalAgreementId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn entity_name() -> &'static str {
        "rental_agreement"
    }

    fn route_segment() -> &'static str {
        "rental-agreements"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RentalAgreementDto {
    pub id: Option<String>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub tool_id: Option<String>,
    pub user_id: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RentalAgreementDto {
    /// Клиентская схема валидации. Запускается только на submit, не на
    /// изменение поля: start_date/end_date обязательны, tool_id/user_id
    /// допускают отсутствие (null), но должны быть валидными UUID.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.start_date.is_none() {
            report.add("start_date", "Дата начала обязательна для заполнения");
        }
        if self.end_date.is_none() {
            report.add("end_date", "Дата окончания обязательна для заполнения");
        }
        if let Some(tool_id) = &self.tool_id {
            if Uuid::parse_str(tool_id).is_err() {
                report.add("tool_id", "Некорректный идентификатор инструмента");
            }
        }
        if let Some(user_id) = &self.user_id {
            if Uuid::parse_str(user_id).is_err() {
                report.add("user_id", "Некорректный идентификатор пользователя");
            }
        }
        report
    }
}

// ============================================================================
// Query filter
// ============================================================================
/// Фильтр выборки: точное совпадение, отсутствие поля = "без фильтра"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RentalAgreementQuery {
    pub id: Option<String>,
    pub tool_id: Option<String>,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto_with_dates() -> RentalAgreementDto {
        RentalAgreementDto {
            start_date: Some(chrono::Utc::now()),
            end_date: Some(chrono::Utc::now()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_start_date_is_invalid() {
        let mut dto = dto_with_dates();
        dto.start_date = None;
        let report = dto.validate();
        assert!(!report.is_valid());
        assert!(report.error("start_date").is_some());
        assert!(report.error("end_date").is_none());
    }

    #[test]
    fn missing_end_date_is_invalid() {
        let mut dto = dto_with_dates();
        dto.end_date = None;
        let report = dto.validate();
        assert!(!report.is_valid());
        assert!(report.error("end_date").is_some());
    }

    #[test]
    fn absent_references_are_permitted() {
        let dto = dto_with_dates();
        assert!(dto.validate().is_valid());
    }

    #[test]
    fn references_must_be_uuid_strings() {
        let mut dto = dto_with_dates();
        dto.tool_id = Some("not-a-uuid".to_string());
        let report = dto.validate();
        assert!(!report.is_valid());
        assert!(report.error("tool_id").is_some());

        dto.tool_id = Some(Uuid::new_v4().to_string());
        dto.user_id = Some(Uuid::new_v4().to_string());
        assert!(dto.validate().is_valid());
    }

    #[test]
    fn date_order_is_not_enforced() {
        // start > end проходит валидацию: кросс-полевого правила нет
        let mut dto = dto_with_dates();
        dto.start_date = Some(chrono::Utc::now() + chrono::Duration::days(10));
        assert!(dto.validate().is_valid());
    }
}
