//! SurrealDB schema for the content tables
//!
//! Every collection shares one row shape (`uid`, `key`, `seq`, `body`), so the
//! tables are defined identically apart from the snippet key index.

use surrealdb::engine::any::Any;
use surrealdb::Surreal;

use super::{StoreError, StoreResult};
use crate::domain::models::CollectionKind;

/// Run all schema definitions; safe to repeat
pub async fn run_migrations(db: &Surreal<Any>) -> StoreResult<()> {
    tracing::info!("Running content schema migrations...");

    for collection in CollectionKind::ALL {
        define_collection_table(db, collection).await?;
    }

    tracing::info!("Content schema migrations completed");
    Ok(())
}

fn table_definition(collection: CollectionKind) -> String {
    let table = collection.table_name();
    let mut sql = format!(
        r#"
        DEFINE TABLE IF NOT EXISTS {table} SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS uid ON {table} TYPE string;
        DEFINE FIELD IF NOT EXISTS key ON {table} TYPE option<string>;
        DEFINE FIELD IF NOT EXISTS seq ON {table} TYPE int;
        DEFINE FIELD IF NOT EXISTS body ON {table} TYPE string;

        DEFINE INDEX IF NOT EXISTS idx_{table}_uid ON {table} FIELDS uid UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_{table}_seq ON {table} FIELDS seq;
        "#
    );

    if collection == CollectionKind::Snippets {
        sql.push_str(&format!(
            "DEFINE INDEX IF NOT EXISTS idx_{table}_key ON {table} FIELDS key UNIQUE;\n"
        ));
    }

    sql
}

async fn define_collection_table(db: &Surreal<Any>, collection: CollectionKind) -> StoreResult<()> {
    db.query(table_definition(collection))
        .await
        .and_then(|response| response.check())
        .map_err(|e| {
            StoreError::Query(format!(
                "Failed to create {} table: {}",
                collection.table_name(),
                e
            ))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_snippets_index_key() {
        assert!(table_definition(CollectionKind::Snippets).contains("idx_cms_content_key"));
        assert!(!table_definition(CollectionKind::Services).contains("_key ON"));
    }
}
