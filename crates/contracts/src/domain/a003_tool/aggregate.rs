use crate::domain::a001_company::aggregate::Company;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(pub Uuid);

impl ToolId {
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

impl AggregateId for ToolId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ToolId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(flatten)]
    pub base: BaseAggregate<ToolId>,

    /// Наименование — отображаемая метка инструмента
    pub name: String,

    /// Статус (свободный текст: "available", "rented", "maintenance")
    pub status: String,

    /// Ссылка на компанию-владельца (None = не привязан)
    pub company_id: Option<String>,

    /// Развёрнутая компания, заполняется только по запросу relations=company
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company: Option<Company>,

    /// Количество договоров аренды по инструменту (по запросу)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rental_agreement_count: Option<i64>,
}

impl Tool {
    pub fn new_for_insert(name: String, status: String, company_id: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(ToolId::new_v4()),
            name,
            status,
            company_id,
            company: None,
            rental_agreement_count: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id().as_string()
    }

    pub fn update(&mut self, dto: &ToolDto) {
        self.name = dto.name.clone();
        self.status = dto.status.clone();
        self.company_id = dto.company_id.clone();
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.name.trim().is_empty() {
            report.add("name", "Наименование обязательно для заполнения");
        }
        if self.status.trim().is_empty() {
            report.add("status", "Статус обязателен для заполнения");
        }
        if let Some(company_id) = &self.company_id {
            if Uuid::parse_str(company_id).is_err() {
                report.add("company_id", "Некорректный идентификатор компании");
            }
        }
        report
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Tool {
    type Id = ToolId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn entity_name() -> &'static str {
        "tool"
    }

    fn route_segment() -> &'static str {
        "tools"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolDto {
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub company_id: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// Query filter
// ============================================================================
/// Фильтр выборки: отсутствие поля означает "без фильтра по этому полю"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolQuery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub company_id: Option<String>,
}
