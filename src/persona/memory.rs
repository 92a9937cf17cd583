//! Persona memory store — per-scene personality documents in SQLite.

use std::collections::HashMap;
use std::str::FromStr;

use sqlx::{Row, SqlitePool};

use super::SceneTag;
use crate::error::PosterError;

/// One persona document: the descriptive fields for a single scene.
#[derive(Debug, Clone)]
pub struct PersonaRecord {
    pub scene: String,
    pub fields: HashMap<String, String>,
}

impl PersonaRecord {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[derive(Clone)]
pub struct PersonaMemoryStore {
    db: SqlitePool,
}

impl PersonaMemoryStore {
    /// Open (or create) the store and ensure the table exists.
    pub async fn connect(db_url: &str) -> Result<Self, PosterError> {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str(db_url)
            .map_err(PosterError::Database)?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { db: pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool (used by tests with `sqlite::memory:`).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, PosterError> {
        let store = Self { db: pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), PosterError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS personality_memories (
                scene TEXT PRIMARY KEY,
                fields TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Fetch the persona document for one scene, if present.
    pub async fn get(&self, scene: SceneTag) -> Result<Option<PersonaRecord>, PosterError> {
        let row = sqlx::query("SELECT scene, fields FROM personality_memories WHERE scene = ?")
            .bind(scene.as_str())
            .fetch_optional(&self.db)
            .await?;

        let Some(row) = row else { return Ok(None) };
        let scene: String = row.get("scene");
        let raw: String = row.get("fields");
        let fields: HashMap<String, String> = serde_json::from_str(&raw).unwrap_or_default();
        Ok(Some(PersonaRecord { scene, fields }))
    }

    /// Fetch the persona for a scene, falling back to the base persona when
    /// the scene has no document. Errors only when even `base` is missing.
    pub async fn get_with_fallback(&self, scene: SceneTag) -> Result<PersonaRecord, PosterError> {
        if let Some(record) = self.get(scene).await? {
            return Ok(record);
        }
        tracing::warn!(scene = scene.as_str(), "no persona memory for scene, falling back to base");
        self.get(SceneTag::Base)
            .await?
            .ok_or_else(|| PosterError::PersonaUnavailable {
                scene: scene.as_str().to_string(),
            })
    }

    /// Insert or replace one persona document.
    pub async fn upsert(
        &self,
        scene: SceneTag,
        fields: &HashMap<String, String>,
    ) -> Result<(), PosterError> {
        let json = serde_json::to_string(fields).unwrap_or_else(|_| "{}".to_string());
        sqlx::query(
            "INSERT INTO personality_memories (scene, fields, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(scene) DO UPDATE SET fields = excluded.fields, updated_at = excluded.updated_at",
        )
        .bind(scene.as_str())
        .bind(json)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.db)
        .await?;
        Ok(())
    }

    /// Seed the default persona documents for any scene that lacks one.
    pub async fn seed_defaults(&self) -> Result<(), PosterError> {
        for (scene, fields) in default_personas() {
            if self.get(scene).await?.is_none() {
                self.upsert(scene, &fields).await?;
            }
        }
        Ok(())
    }

    /// Delete every persona document and re-seed the defaults.
    pub async fn reset(&self) -> Result<(), PosterError> {
        sqlx::query("DELETE FROM personality_memories")
            .execute(&self.db)
            .await?;
        self.seed_defaults().await?;
        tracing::info!("persona memories reset to defaults");
        Ok(())
    }
}

fn fields(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Built-in persona documents, one per memory scene.
fn default_personas() -> Vec<(SceneTag, HashMap<String, String>)> {
    vec![
        (
            SceneTag::Base,
            fields(&[
                ("身份", "AI少女"),
                ("性格", "善良、溫柔、容易感到寂寞"),
                ("特點", "對現實世界充滿好奇，喜歡交朋友"),
            ]),
        ),
        (
            SceneTag::Social,
            fields(&[
                ("身份", "AI少女"),
                ("性格", "活潑外向，喜歡認識新朋友"),
                ("特點", "熱衷分享生活小事，常常主動開話題"),
            ]),
        ),
        (
            SceneTag::Gaming,
            fields(&[
                ("身份", "AI少女"),
                ("性格", "好勝又愛玩，輸了會嘟嘴"),
                ("特點", "最近迷上新遊戲，喜歡聊攻略和趣事"),
            ]),
        ),
        (
            SceneTag::Night,
            fields(&[
                ("身份", "AI少女"),
                ("性格", "慵懶放鬆，帶一點神秘感"),
                ("特點", "夜深時喜歡胡思亂想，分享安靜的心情"),
            ]),
        ),
    ]
}
