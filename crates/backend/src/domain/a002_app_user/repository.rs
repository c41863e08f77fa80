use chrono::Utc;
use contracts::domain::a002_app_user::aggregate::{AppUser, AppUserId, AppUserQuery};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AppUser {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        AppUser {
            base: BaseAggregate::with_metadata(AppUserId(uuid), metadata),
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            company_id: m.company_id,
        }
    }
}

fn active_model(aggregate: &AppUser) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        email: Set(aggregate.email.clone()),
        first_name: Set(aggregate.first_name.clone()),
        last_name: Set(aggregate.last_name.clone()),
        company_id: Set(aggregate.company_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Выборка с точечным фильтром. Отсутствие поля фильтра = без ограничения.
pub async fn list(filter: &AppUserQuery) -> anyhow::Result<Vec<AppUser>> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(id) = &filter.id {
        select = select.filter(Column::Id.eq(id.clone()));
    }
    if let Some(email) = &filter.email {
        select = select.filter(Column::Email.eq(email.clone()));
    }
    if let Some(company_id) = &filter.company_id {
        select = select.filter(Column::CompanyId.eq(company_id.clone()));
    }

    let mut items: Vec<AppUser> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.email.to_lowercase().cmp(&b.email.to_lowercase()));
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<AppUser>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &AppUser) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &AppUser) -> anyhow::Result<()> {
    let mut active = active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
