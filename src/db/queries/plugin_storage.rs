use sqlx::PgPool;

pub async fn get(pool: &PgPool, namespace: &str, key: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as(
        "SELECT value FROM plugin_storage WHERE namespace = $1 AND key = $2"
    )
    .bind(namespace)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.0))
}

pub async fn upsert(
    pool: &PgPool,
    namespace: &str,
    key: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO plugin_storage (namespace, key, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (namespace, key)
        DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
        "#
    )
    .bind(namespace)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
