use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a002_app_user::aggregate::AppUser;
use contracts::domain::a003_tool::aggregate::Tool;
use contracts::domain::a004_rental_agreement::aggregate::{
    RentalAgreement, RentalAgreementId, RentalAgreementQuery,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::a002_app_user::repository as app_user_repository;
use crate::domain::a003_tool::repository as tool_repository;
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_rental_agreement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub tool_id: Option<String>,
    pub user_id: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RentalAgreement {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        RentalAgreement {
            base: BaseAggregate::with_metadata(RentalAgreementId(uuid), metadata),
            start_date: m.start_date,
            end_date: m.end_date,
            tool_id: m.tool_id,
            user_id: m.user_id,
            tool: None,
            user: None,
        }
    }
}

fn active_model(aggregate: &RentalAgreement) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        start_date: Set(aggregate.start_date),
        end_date: Set(aggregate.end_date),
        tool_id: Set(aggregate.tool_id.clone()),
        user_id: Set(aggregate.user_id.clone()),
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
/// relations поддерживает "tool" и "user"; связи подтягиваются пакетно
/// (по одному запросу на связь), вложенность — один уровень.
pub async fn list(
    filter: &RentalAgreementQuery,
    relations: &[String],
) -> anyhow::Result<Vec<RentalAgreement>> {
    let mut select = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::StartDate);

    if let Some(id) = &filter.id {
        select = select.filter(Column::Id.eq(id.clone()));
    }
    if let Some(tool_id) = &filter.tool_id {
        select = select.filter(Column::ToolId.eq(tool_id.clone()));
    }
    if let Some(user_id) = &filter.user_id {
        select = select.filter(Column::UserId.eq(user_id.clone()));
    }

    let mut items: Vec<RentalAgreement> = select
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    attach_relations(&mut items, relations).await?;
    Ok(items)
}

pub async fn get_by_id(
    id: Uuid,
    relations: &[String],
) -> anyhow::Result<Option<RentalAgreement>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    let Some(model) = result else {
        return Ok(None);
    };

    let mut items = vec![RentalAgreement::from(model)];
    attach_relations(&mut items, relations).await?;
    Ok(items.pop())
}

pub async fn insert(aggregate: &RentalAgreement) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    active_model(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &RentalAgreement) -> anyhow::Result<()> {
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

async fn attach_relations(
    items: &mut [RentalAgreement],
    relations: &[String],
) -> anyhow::Result<()> {
    if relations.iter().any(|r| r == "tool") {
        attach_tools(items).await?;
    }
    if relations.iter().any(|r| r == "user") {
        attach_users(items).await?;
    }
    Ok(())
}

async fn attach_tools(items: &mut [RentalAgreement]) -> anyhow::Result<()> {
    let ids: Vec<String> = items.iter().filter_map(|a| a.tool_id.clone()).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let tools: HashMap<String, Tool> = tool_repository::Entity::find()
        .filter(tool_repository::Column::Id.is_in(ids))
        .all(conn())
        .await?
        .into_iter()
        .map(|m| (m.id.clone(), Tool::from(m)))
        .collect();

    for agreement in items.iter_mut() {
        if let Some(tool_id) = &agreement.tool_id {
            agreement.tool = tools.get(tool_id).cloned();
        }
    }
    Ok(())
}

async fn attach_users(items: &mut [RentalAgreement]) -> anyhow::Result<()> {
    let ids: Vec<String> = items.iter().filter_map(|a| a.user_id.clone()).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let users: HashMap<String, AppUser> = app_user_repository::Entity::find()
        .filter(app_user_repository::Column::Id.is_in(ids))
        .all(conn())
        .await?
        .into_iter()
        .map(|m| (m.id.clone(), AppUser::from(m)))
        .collect();

    for agreement in items.iter_mut() {
        if let Some(user_id) = &agreement.user_id {
            agreement.user = users.get(user_id).cloned();
        }
    }
    Ok(())
}
