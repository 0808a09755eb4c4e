//! Catalog database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::debug!(from = current_version, to = SCHEMA_VERSION, "migrated catalog schema");
    }

    Ok(())
}

/// Migration v1: Initial schema
///
/// Row ids double as provider order: recipes, line items, products, offers,
/// facts, and rules are all read back `ORDER BY id`.
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- RECIPES
        -- ============================================
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE line_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            ingredient TEXT NOT NULL,
            uom_amount REAL NOT NULL CHECK(uom_amount >= 0),
            uom_name TEXT NOT NULL,
            uom_type TEXT NOT NULL CHECK(uom_type IN ('mass', 'volume', 'count'))
        );

        CREATE INDEX idx_line_items_recipe ON line_items(recipe_id);

        -- ============================================
        -- PRODUCTS
        -- Candidate products per ingredient, with supplier offers
        -- ============================================
        CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ingredient TEXT NOT NULL,
            product_name TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX idx_products_ingredient ON products(ingredient);

        CREATE TABLE supplier_products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            supplier_name TEXT NOT NULL DEFAULT '',
            supplier_price REAL NOT NULL,
            uom_amount REAL NOT NULL CHECK(uom_amount >= 0),
            uom_name TEXT NOT NULL,
            uom_type TEXT NOT NULL CHECK(uom_type IN ('mass', 'volume', 'count'))
        );

        CREATE INDEX idx_supplier_products_product ON supplier_products(product_id);

        CREATE TABLE nutrient_facts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            nutrient_name TEXT NOT NULL,
            amount_value REAL NOT NULL CHECK(amount_value >= 0),
            amount_name TEXT NOT NULL,
            amount_type TEXT NOT NULL,
            per_value REAL NOT NULL CHECK(per_value >= 0),
            per_name TEXT NOT NULL,
            per_type TEXT NOT NULL
        );

        CREATE INDEX idx_nutrient_facts_product ON nutrient_facts(product_id);

        -- ============================================
        -- UNITS
        -- ============================================
        CREATE TABLE base_units (
            uom_type TEXT PRIMARY KEY CHECK(uom_type IN ('mass', 'volume', 'count')),
            uom_amount REAL NOT NULL CHECK(uom_amount >= 0),
            uom_name TEXT NOT NULL
        );

        -- Single row: the unit every nutrient quantity is normalized into
        CREATE TABLE nutrient_base_unit (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            uom_amount REAL NOT NULL,
            uom_name TEXT NOT NULL,
            uom_type TEXT NOT NULL
        );

        CREATE TABLE conversion_rules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            from_name TEXT NOT NULL,
            from_type TEXT NOT NULL,
            to_name TEXT NOT NULL,
            to_type TEXT NOT NULL,
            factor REAL NOT NULL CHECK(factor >= 0)
        );
        "#,
    )?;

    Ok(())
}

/// Highest applied migration, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn test_schema_version_surfaces_errors() {
        // no schema_migrations table yet
        let conn = Connection::open_in_memory().unwrap();
        assert!(get_schema_version(&conn).is_err());
    }

    #[test]
    fn test_recipe_names_may_repeat() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute("INSERT INTO recipes (name) VALUES ('Stock')", []).unwrap();
        conn.execute("INSERT INTO recipes (name) VALUES ('Stock')", []).unwrap();
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert!(conn
            .execute(
                "INSERT INTO conversion_rules (from_name, from_type, to_name, to_type, factor)
                 VALUES ('kilograms', 'mass', 'grams', 'mass', -1000)",
                [],
            )
            .is_err());
        assert!(conn
            .execute(
                "INSERT INTO base_units (uom_type, uom_amount, uom_name) VALUES ('mass', -1, 'grams')",
                [],
            )
            .is_err());
    }
}
