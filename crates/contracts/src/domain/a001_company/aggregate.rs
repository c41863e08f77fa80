use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
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

impl AggregateId for CompanyId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CompanyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    #[serde(flatten)]
    pub base: BaseAggregate<CompanyId>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl Company {
    pub fn new_for_insert(name: String, description: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(CompanyId::new_v4()),
            name,
            description,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id().as_string()
    }

    pub fn update(&mut self, dto: &CompanyDto) {
        self.name = dto.name.clone();
        self.description = dto.description.clone();
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.name.trim().is_empty() {
            report.add("name", "Наименование обязательно для заполнения");
        }
        report
    }

    pub fn before_write(&mut self) {
        self.base.touch();
        self.base.metadata.increment_version();
    }
}

impl AggregateRoot for Company {
    type Id = CompanyId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn entity_name() -> &'static str {
        "company"
    }

    fn route_segment() -> &'static str {
        "companies"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompanyDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
