use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppUserId(pub Uuid);

impl AppUserId {
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

impl AggregateId for AppUserId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(AppUserId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Бизнес-пользователь (арендатор). Не путать с системными учетными
/// записями, которыми управляет system::auth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUser {
    #[serde(flatten)]
    pub base: BaseAggregate<AppUserId>,

    /// Email — отображаемая метка пользователя в списках и селектах
    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,

    /// Ссылка на компанию (None = не привязан)
    pub company_id: Option<String>,
}

impl AppUser {
    pub fn new_for_insert(
        email: String,
        first_name: Option<String>,
        last_name: Option<String>,
        company_id: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(AppUserId::new_v4()),
            email,
            first_name,
            last_name,
            company_id,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id().as_string()
    }

    pub fn update(&mut self, dto: &AppUserDto) {
        self.email = dto.email.clone();
        self.first_name = dto.first_name.clone();
        self.last_name = dto.last_name.clone();
        self.company_id = dto.company_id.clone();
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.email.trim().is_empty() {
            report.add("email", "Email обязателен для заполнения");
        } else if !self.email.contains('@') {
            report.add("email", "Некорректный email");
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

impl AggregateRoot for AppUser {
    type Id = AppUserId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn entity_name() -> &'static str {
        "user"
    }

    fn route_segment() -> &'static str {
        "users"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppUserDto {
    pub id: Option<String>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_id: Option<String>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============================================================================
// Query filter
// ============================================================================
/// Фильтр выборки: отсутствие поля означает "без фильтра по этому полю"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppUserQuery {
    pub id: Option<String>,
    pub email: Option<String>,
    pub company_id: Option<String>,
}
