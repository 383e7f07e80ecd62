use sqlx::PgPool;

/// Tables other than the migration ledger, in name order.
async fn tables(pool: &PgPool) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT table_name::text
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(pool)
    .await
    .unwrap()
}

/// Every `id` column is a bigint identity.
#[sqlx::test(migrations = "./migrations")]
async fn test_ids_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, data_type::text
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 3);
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "{table}.id should be bigint");
    }
}

/// Every table carries `created_at`/`updated_at` and a trigger keeping
/// `updated_at` current.
#[sqlx::test(migrations = "./migrations")]
async fn test_tables_have_timestamps_and_trigger(pool: PgPool) {
    for table in tables(&pool).await {
        for col in ["created_at", "updated_at"] {
            let data_type: Option<String> = sqlx::query_scalar(
                "SELECT data_type::text
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name::text = $1
                   AND column_name::text = $2",
            )
            .bind(&table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();
            assert_eq!(
                data_type.as_deref(),
                Some("timestamp with time zone"),
                "{table}.{col} should be timestamptz"
            );
        }

        let has_trigger: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.triggers
                WHERE event_object_table::text = $1
                  AND action_statement LIKE '%set_updated_at%'
            )",
        )
        .bind(&table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(has_trigger, "{table} is missing its updated_at trigger");
    }
}

/// Every foreign key column has an index of its own.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_keys_are_indexed(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT tc.table_name::text, kcu.column_name::text
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty());
    for (table, column) in &fk_columns {
        let indexed: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename::text = $1
                  AND indexdef LIKE '%(' || $2 || ')%'
            )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(indexed, "FK column {table}.{column} has no index");
    }
}

/// No foreign key is left with the implicit `NO ACTION` rules.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_keys_have_explicit_rules(pool: PgPool) {
    let rules: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT constraint_name::text, delete_rule::text, update_rule::text
         FROM information_schema.referential_constraints
         WHERE constraint_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (constraint, delete_rule, update_rule) in &rules {
        assert!(
            delete_rule != "NO ACTION" || update_rule != "NO ACTION",
            "FK {constraint} has no explicit ON DELETE / ON UPDATE rule"
        );
    }
}
