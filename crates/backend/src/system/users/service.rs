use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};

use super::repository;
use crate::system::auth::password;

/// Create a new system user
pub async fn create(dto: CreateUserDto) -> Result<String> {
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(&dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    if let Some(ref email) = dto.email {
        if !email.trim().is_empty() && !email.contains('@') {
            return Err(anyhow::anyhow!("Invalid email format"));
        }
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: dto.username,
        email: dto.email,
        full_name: dto.full_name,
        is_active: true,
        role: dto.role,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user.id)
}

/// Verify credentials; Ok(None) = неверный логин/пароль или выключенная
/// учетная запись (не различаем, чтобы не раскрывать существование логина)
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username).await? else {
        return Ok(None);
    };

    if !user.is_active {
        return Ok(None);
    }

    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };

    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }

    repository::touch_last_login(&user.id).await?;

    Ok(Some(user))
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn count() -> Result<i64> {
    repository::count().await
}
