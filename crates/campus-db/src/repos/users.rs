//! User repository.

use chrono::Utc;

use campus_core::entities::User;
use campus_core::enums::{EntityType, UserRole};

use crate::error::DatabaseError;
use crate::events::WriteEvent;
use crate::helpers::{
    SetClauses, get_bool, get_opt_string, is_unique_violation, parse_datetime, parse_enum,
};
use crate::service::CampusService;
use crate::updates::user::UserUpdate;

const USER_COLUMNS: &str = "id, username, email, role, bio, is_active, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        bio: get_opt_string(row, 4)?,
        is_active: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Turn a UNIQUE failure on `users` into a conflict naming the column.
fn taken(e: &libsql::Error) -> DatabaseError {
    let msg = e.to_string();
    if msg.contains("users.email") {
        DatabaseError::conflict("email is already registered")
    } else {
        DatabaseError::conflict("username is already taken")
    }
}

impl CampusService {
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        role: UserRole,
        bio: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() {
            return Err(DatabaseError::validation("username must not be empty"));
        }
        if !email.contains('@') {
            return Err(DatabaseError::validation(format!(
                "'{email}' is not an email address"
            )));
        }

        let now = Utc::now();
        let inserted = self
            .insert_returning_id(
                "INSERT INTO users (username, email, role, bio, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6) RETURNING id",
                libsql::params![
                    username,
                    email,
                    role.as_str(),
                    bio,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;
        let id = match inserted {
            Ok(id) => id.ok_or(DatabaseError::NoResult)?,
            Err(e) if is_unique_violation(&e) => return Err(taken(&e)),
            Err(e) => return Err(e.into()),
        };

        self.emit(WriteEvent::created(EntityType::User, id)).await?;

        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            role,
            bio: bio.map(String::from),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, id))?;
        row_to_user(&row)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
        let mut rows = self.db().conn().query(&sql, [username]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_users(
        &self,
        role: Option<UserRole>,
        limit: u32,
    ) -> Result<Vec<User>, DatabaseError> {
        let mut rows = match role {
            Some(role) => {
                let sql = format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE role = ?1 ORDER BY id LIMIT {limit}"
                );
                self.db().conn().query(&sql, [role.as_str()]).await?
            }
            None => {
                let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT {limit}");
                self.db().conn().query(&sql, ()).await?
            }
        };

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    pub async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, DatabaseError> {
        let mut sets = SetClauses::new();
        if let Some(ref email) = update.email {
            if !email.contains('@') {
                return Err(DatabaseError::validation(format!(
                    "'{email}' is not an email address"
                )));
            }
            sets.push("email", email.trim());
        }
        if let Some(role) = update.role {
            sets.push("role", role.as_str());
        }
        if let Some(ref bio) = update.bio {
            sets.push("bio", bio.as_deref());
        }
        if let Some(is_active) = update.is_active {
            sets.push("is_active", i64::from(is_active));
        }

        if sets.is_empty() {
            return self.get_user(id).await;
        }
        self.require(EntityType::User, id).await?;

        let (sql, params) = sets.into_sql("users", id, Utc::now());
        match self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await
        {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(taken(&e)),
            Err(e) => return Err(e.into()),
        }

        self.emit(WriteEvent::updated(EntityType::User, id).with_detail(&update))
            .await?;
        self.get_user(id).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .await?;
        if deleted == 0 {
            return Err(DatabaseError::not_found(EntityType::User, id));
        }
        self.emit(WriteEvent::deleted(EntityType::User, id)).await
    }
}
