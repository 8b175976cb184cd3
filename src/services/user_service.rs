use crate::entities::user_entity as users;
use crate::error::AppResult;
use crate::external::Auth0Claims;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 依据令牌声明创建或刷新身份记录。
    /// 只做归属留痕, 不参与任何业务规则; email/name 缺失时保留旧值
    pub async fn sync_user(&self, claims: &Auth0Claims) -> AppResult<users::Model> {
        let now = Utc::now();

        match users::Entity::find_by_id(claims.sub.clone())
            .one(&self.pool)
            .await?
        {
            Some(existing) => {
                let mut user = existing.into_active_model();
                if claims.email.is_some() {
                    user.email = Set(claims.email.clone());
                }
                if claims.name.is_some() {
                    user.name = Set(claims.name.clone());
                }
                user.last_login = Set(Some(now));
                Ok(user.update(&self.pool).await?)
            }
            None => {
                let user = users::ActiveModel {
                    id: Set(claims.sub.clone()),
                    email: Set(claims.email.clone()),
                    name: Set(claims.name.clone()),
                    created_at: Set(now),
                    last_login: Set(Some(now)),
                };
                Ok(user.insert(&self.pool).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_first_login_creates_record() {
        let stored = users::Model {
            id: "auth0|abc123".to_string(),
            email: Some("operator@example.com".to_string()),
            name: None,
            created_at: Utc::now(),
            last_login: Some(Utc::now()),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let claims = Auth0Claims {
            sub: "auth0|abc123".to_string(),
            email: Some("operator@example.com".to_string()),
            name: None,
            exp: 0,
        };
        let user = UserService::new(db).sync_user(&claims).await.unwrap();
        assert_eq!(user.id, "auth0|abc123");
        assert!(user.last_login.is_some());
    }
}
