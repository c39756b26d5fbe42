use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::models::registration::Registration;
use crate::secrets::SECRET_MANAGER;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new() -> Result<Self, sqlx::Error> {
        let database_url = SECRET_MANAGER.get("DATABASE_URL");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Pool handle that never dials; router tests exercise error paths only.
    #[cfg(test)]
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new().connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_registration(&self, registration: &Registration) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO wedding_registration (name, amount, food, track_suggestion, spotify_id, other)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&registration.name)
        .bind(registration.amount)
        .bind(&registration.food)
        .bind(&registration.track_suggestion)
        .bind(&registration.spotify_id)
        .bind(&registration.other)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
