//! SQLite-backed catalog
//!
//! Reads reference data from a catalog database and imports JSON catalogs
//! into it.

use std::path::Path;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::connection::{Database, DbResult};
use super::memory::InMemoryCatalog;
use super::migrations::run_migrations;
use super::{Catalog, CatalogError, CatalogResult};
use crate::models::{
    ConversionRule, LineItem, NutrientFact, Product, Recipe, SupplierProduct, UnitOfMeasure,
    UoMName, UoMType,
};
use crate::nutrition::units::NUTRIENT_BASE_UOM;

impl ToSql for UoMName {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_db_str()))
    }
}

impl FromSql for UoMName {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        UoMName::from_db_str(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown unit name '{}'", s).into()))
    }
}

impl ToSql for UoMType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_db_str()))
    }
}

impl FromSql for UoMType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        UoMType::from_db_str(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown unit type '{}'", s).into()))
    }
}

/// Read a unit of measure spread over three columns
fn uom_from_row(row: &Row, amount: &str, name: &str, uom_type: &str) -> rusqlite::Result<UnitOfMeasure> {
    Ok(UnitOfMeasure::new(
        row.get(amount)?,
        row.get(name)?,
        row.get(uom_type)?,
    ))
}

/// Row counts for a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub recipes: i64,
    pub line_items: i64,
    pub products: i64,
    pub supplier_products: i64,
    pub nutrient_facts: i64,
    pub conversion_rules: i64,
}

/// Catalog stored in SQLite
#[derive(Clone)]
pub struct SqliteCatalog {
    database: Database,
}

impl SqliteCatalog {
    /// Open a catalog file, creating and migrating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Self::from_database(Database::new(path)?)
    }

    /// Open an empty, migrated in-memory catalog
    pub fn in_memory() -> CatalogResult<Self> {
        Self::from_database(Database::in_memory()?)
    }

    /// Wrap an existing pool, running migrations first
    pub fn from_database(database: Database) -> CatalogResult<Self> {
        database.with_conn(run_migrations)?;
        Ok(Self { database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Replace the catalog contents with the given catalog
    pub fn import(&self, catalog: &InMemoryCatalog) -> CatalogResult<CatalogStats> {
        let stats = self.database.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            clear_catalog(&tx)?;
            let stats = insert_catalog(&tx, catalog)?;
            tx.commit()?;
            Ok(stats)
        })?;

        tracing::info!(
            recipes = stats.recipes,
            products = stats.products,
            conversion_rules = stats.conversion_rules,
            "imported catalog"
        );
        Ok(stats)
    }

    /// Count the rows in each catalog table
    pub fn stats(&self) -> CatalogResult<CatalogStats> {
        Ok(self.database.with_conn(|conn| {
            let count = |table: &str| -> DbResult<i64> {
                Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?)
            };
            Ok(CatalogStats {
                recipes: count("recipes")?,
                line_items: count("line_items")?,
                products: count("products")?,
                supplier_products: count("supplier_products")?,
                nutrient_facts: count("nutrient_facts")?,
                conversion_rules: count("conversion_rules")?,
            })
        })?)
    }
}

fn clear_catalog(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "DELETE FROM nutrient_facts;
         DELETE FROM supplier_products;
         DELETE FROM products;
         DELETE FROM line_items;
         DELETE FROM recipes;
         DELETE FROM base_units;
         DELETE FROM nutrient_base_unit;
         DELETE FROM conversion_rules;",
    )?;
    Ok(())
}

fn insert_catalog(conn: &Connection, catalog: &InMemoryCatalog) -> DbResult<CatalogStats> {
    let mut stats = CatalogStats::default();

    for recipe in &catalog.recipes {
        conn.execute("INSERT INTO recipes (name) VALUES (?1)", [&recipe.recipe_name])?;
        let recipe_id = conn.last_insert_rowid();
        stats.recipes += 1;

        for item in &recipe.line_items {
            let uom = &item.unit_of_measure;
            conn.execute(
                "INSERT INTO line_items (recipe_id, ingredient, uom_amount, uom_name, uom_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![recipe_id, item.ingredient, uom.amount, uom.name, uom.uom_type],
            )?;
            stats.line_items += 1;
        }
    }

    for (ingredient, products) in &catalog.products_by_ingredient {
        for product in products {
            conn.execute(
                "INSERT INTO products (ingredient, product_name) VALUES (?1, ?2)",
                params![ingredient, product.product_name],
            )?;
            let product_id = conn.last_insert_rowid();
            stats.products += 1;

            for offer in &product.supplier_products {
                let uom = &offer.supplier_product_uom;
                conn.execute(
                    "INSERT INTO supplier_products
                        (product_id, supplier_name, supplier_price, uom_amount, uom_name, uom_type)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        product_id,
                        offer.supplier_name,
                        offer.supplier_price,
                        uom.amount,
                        uom.name,
                        uom.uom_type,
                    ],
                )?;
                stats.supplier_products += 1;
            }

            for fact in &product.nutrient_facts {
                let amount = &fact.quantity_amount;
                let per = &fact.quantity_per;
                conn.execute(
                    "INSERT INTO nutrient_facts
                        (product_id, nutrient_name, amount_value, amount_name, amount_type,
                         per_value, per_name, per_type)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        product_id,
                        fact.nutrient_name,
                        amount.amount,
                        amount.name,
                        amount.uom_type,
                        per.amount,
                        per.name,
                        per.uom_type,
                    ],
                )?;
                stats.nutrient_facts += 1;
            }
        }
    }

    // First base unit per category wins, matching `InMemoryCatalog::base_uom`
    for base in &catalog.base_units {
        conn.execute(
            "INSERT OR IGNORE INTO base_units (uom_type, uom_amount, uom_name) VALUES (?1, ?2, ?3)",
            params![base.uom_type, base.amount, base.name],
        )?;
    }

    let nutrient_base = &catalog.nutrient_base_uom;
    conn.execute(
        "INSERT INTO nutrient_base_unit (id, uom_amount, uom_name, uom_type) VALUES (1, ?1, ?2, ?3)",
        params![nutrient_base.amount, nutrient_base.name, nutrient_base.uom_type],
    )?;

    for rule in &catalog.conversion_rules {
        conn.execute(
            "INSERT INTO conversion_rules (from_name, from_type, to_name, to_type, factor)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![rule.from_name, rule.from_type, rule.to_name, rule.to_type, rule.factor],
        )?;
        stats.conversion_rules += 1;
    }

    Ok(stats)
}

fn load_line_items(conn: &Connection, recipe_id: i64) -> DbResult<Vec<LineItem>> {
    let mut stmt = conn.prepare(
        "SELECT ingredient, uom_amount, uom_name, uom_type
         FROM line_items WHERE recipe_id = ?1 ORDER BY id",
    )?;
    let items = stmt
        .query_map([recipe_id], |row| {
            Ok(LineItem {
                ingredient: row.get("ingredient")?,
                unit_of_measure: uom_from_row(row, "uom_amount", "uom_name", "uom_type")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

fn load_supplier_products(conn: &Connection, product_id: i64) -> DbResult<Vec<SupplierProduct>> {
    let mut stmt = conn.prepare(
        "SELECT supplier_name, supplier_price, uom_amount, uom_name, uom_type
         FROM supplier_products WHERE product_id = ?1 ORDER BY id",
    )?;
    let offers = stmt
        .query_map([product_id], |row| {
            Ok(SupplierProduct {
                supplier_name: row.get("supplier_name")?,
                supplier_price: row.get("supplier_price")?,
                supplier_product_uom: uom_from_row(row, "uom_amount", "uom_name", "uom_type")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(offers)
}

fn load_nutrient_facts(conn: &Connection, product_id: i64) -> DbResult<Vec<NutrientFact>> {
    let mut stmt = conn.prepare(
        "SELECT nutrient_name, amount_value, amount_name, amount_type, per_value, per_name, per_type
         FROM nutrient_facts WHERE product_id = ?1 ORDER BY id",
    )?;
    let facts = stmt
        .query_map([product_id], |row| {
            Ok(NutrientFact {
                nutrient_name: row.get("nutrient_name")?,
                quantity_amount: uom_from_row(row, "amount_value", "amount_name", "amount_type")?,
                quantity_per: uom_from_row(row, "per_value", "per_name", "per_type")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(facts)
}

impl Catalog for SqliteCatalog {
    fn recipes(&self) -> CatalogResult<Vec<Recipe>> {
        Ok(self.database.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM recipes ORDER BY id")?;
            let heads = stmt
                .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;

            heads
                .into_iter()
                .map(|(id, recipe_name)| -> DbResult<Recipe> {
                    Ok(Recipe {
                        recipe_name,
                        line_items: load_line_items(conn, id)?,
                    })
                })
                .collect()
        })?)
    }

    fn products_for_ingredient(&self, ingredient: &str) -> CatalogResult<Vec<Product>> {
        Ok(self.database.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, product_name FROM products WHERE ingredient = ?1 ORDER BY id",
            )?;
            let heads = stmt
                .query_map([ingredient], |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            heads
                .into_iter()
                .map(|(id, product_name)| -> DbResult<Product> {
                    Ok(Product {
                        product_name,
                        supplier_products: load_supplier_products(conn, id)?,
                        nutrient_facts: load_nutrient_facts(conn, id)?,
                    })
                })
                .collect()
        })?)
    }

    fn base_uom(&self, uom_type: UoMType) -> CatalogResult<UnitOfMeasure> {
        let base = self.database.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT uom_amount, uom_name, uom_type FROM base_units WHERE uom_type = ?1",
                    [uom_type],
                    |row| uom_from_row(row, "uom_amount", "uom_name", "uom_type"),
                )
                .optional()?)
        })?;
        base.ok_or(CatalogError::BaseUnitMissing(uom_type))
    }

    fn units_data(&self) -> CatalogResult<Vec<ConversionRule>> {
        Ok(self.database.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT from_name, from_type, to_name, to_type, factor
                 FROM conversion_rules ORDER BY id",
            )?;
            let rules = stmt
                .query_map([], |row| {
                    Ok(ConversionRule {
                        from_name: row.get("from_name")?,
                        from_type: row.get("from_type")?,
                        to_name: row.get("to_name")?,
                        to_type: row.get("to_type")?,
                        factor: row.get("factor")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rules)
        })?)
    }

    /// Falls back to grams when no nutrient base unit has been imported
    fn nutrient_base_uom(&self) -> CatalogResult<UnitOfMeasure> {
        let base = self.database.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT uom_amount, uom_name, uom_type FROM nutrient_base_unit WHERE id = 1",
                    [],
                    |row| uom_from_row(row, "uom_amount", "uom_name", "uom_type"),
                )
                .optional()?)
        })?;
        Ok(base.unwrap_or(NUTRIENT_BASE_UOM))
    }
}
