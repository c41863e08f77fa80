use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a001_company::aggregate::Company;
use contracts::domain::a003_tool::aggregate::{Tool, ToolId, ToolQuery};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, Set, Statement};

use crate::domain::a001_company::repository as company_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_tool")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub status: String,
    pub company_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Tool {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        Tool {
            base: BaseAggregate::with_metadata(ToolId(uuid), metadata),
            name: m.name,
            status: m.status,
            company_id: m.company_id,
            company: None,
            rental_agreement_count: None,
        }
    }
}

fn active_model(aggregate: &Tool) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        name: Set(aggregate.name.clone()),
        status: Set(aggregate.status.clone()),
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

/// Выборка с фильтром и развёртыванием связей.
/// relations поддерживает "company" (владелец) и "rental_agreement_count"
/// (число живых договоров по инструменту). Вложенность — один уровень.
pub async fn list(filter: &ToolQuery, relations: &[String]) -> anyhow::Result<Vec<Tool>> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(id) = &filter.id {
        select = select.filter(Column::Id.eq(id.clone()));
    }
    if let Some(name) = &filter.name {
        select = select.filter(Column::Name.eq(name.clone()));
    }
    if let Some(status) = &filter.status {
        select = select.filter(Column::Status.eq(status.clone()));
    }
    if let Some(company_id) = &filter.company_id {
        select = select.filter(Column::CompanyId.eq(company_id.clone()));
    }

    let mut items: Vec<Tool> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if relations.iter().any(|r| r == "company") {
        attach_companies(&mut items).await?;
    }
    if relations.iter().any(|r| r == "rental_agreement_count") {
        attach_agreement_counts(&mut items).await?;
    }

    Ok(items)
}

pub async fn get_by_id(id: Uuid, relations: &[String]) -> anyhow::Result<Option<Tool>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    let Some(model) = result else {
        return Ok(None);
    };

    let mut items = vec![Tool::from(model)];
    if relations.iter().any(|r| r == "company") {
        attach_companies(&mut items).await?;
    }
    if relations.iter().any(|r| r == "rental_agreement_count") {
        attach_agreement_counts(&mut items).await?;
    }

    Ok(items.pop())
}

pub async fn insert(aggregate: &Tool) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Tool) -> anyhow::Result<()> {
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

/// Одним запросом подтянуть компании для всех инструментов выборки
async fn attach_companies(items: &mut [Tool]) -> anyhow::Result<()> {
    let ids: Vec<String> = items
        .iter()
        .filter_map(|t| t.company_id.clone())
        .collect();
    if ids.is_empty() {
        return Ok(());
    }

    let companies: HashMap<String, Company> = company_repository::Entity::find()
        .filter(company_repository::Column::Id.is_in(ids))
        .all(conn())
        .await?
        .into_iter()
        .map(|m| (m.id.clone(), Company::from(m)))
        .collect();

    for tool in items.iter_mut() {
        if let Some(company_id) = &tool.company_id {
            tool.company = companies.get(company_id).cloned();
        }
    }
    Ok(())
}

/// Сгруппированный подсчет живых договоров аренды по инструментам
async fn attach_agreement_counts(items: &mut [Tool]) -> anyhow::Result<()> {
    let rows = conn()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT tool_id, COUNT(*) AS cnt FROM a004_rental_agreement
             WHERE is_deleted = 0 AND tool_id IS NOT NULL
             GROUP BY tool_id",
            [],
        ))
        .await?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for row in rows {
        let tool_id: String = row.try_get("", "tool_id")?;
        let cnt: i64 = row.try_get("", "cnt")?;
        counts.insert(tool_id, cnt);
    }

    for tool in items.iter_mut() {
        let id = tool.to_string_id();
        tool.rental_agreement_count = Some(counts.get(&id).copied().unwrap_or(0));
    }
    Ok(())
}
