//! Locator-dispatched CRUD provider over the pet catalog.
//!
//! # Responsibility
//! - Route logical operations (query/insert/update/delete) by locator
//!   shape and map them onto store operations.
//! - Enforce payload validation before any SQL mutation.
//! - Publish change notifications after successful mutations.
//!
//! # Invariants
//! - Validation failures abort before any store access; partial writes
//!   never occur.
//! - Zero-row update/delete outcomes are successes, not errors, and
//!   publish no notification.
//! - The provider holds no record state; the store handle is the sole
//!   owner of persisted data.

use crate::db::DbError;
use crate::locator::{Locator, LocatorKind, LocatorMatcher};
use crate::model::pet::{Gender, Pet, PetValidationError, PetValues};
use crate::notify::ChangeNotifier;
use crate::store::PetStore;
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider-level error taxonomy.
///
/// Locator-shape errors (`InvalidLocator`, `Unsupported`) indicate a
/// caller bug and are fatal to the call; `Validation` is bad user input,
/// reported as a caller-visible message with the store untouched.
#[derive(Debug)]
pub enum ProviderError {
    InvalidLocator(Locator),
    Unsupported {
        operation: &'static str,
        locator: Locator,
    },
    Validation(PetValidationError),
    InvalidData(String),
    Db(DbError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocator(locator) => write!(f, "unrecognized locator `{locator}`"),
            Self::Unsupported { operation, locator } => {
                write!(f, "{operation} is not supported for `{locator}`")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted pet data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidLocator(_) | Self::Unsupported { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<PetValidationError> for ProviderError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ProviderError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Projectable columns of the pet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetColumn {
    Id,
    Name,
    Breed,
    Gender,
    Weight,
}

impl PetColumn {
    pub const ALL: [PetColumn; 5] = [
        PetColumn::Id,
        PetColumn::Name,
        PetColumn::Breed,
        PetColumn::Gender,
        PetColumn::Weight,
    ];

    fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Breed => "breed",
            Self::Gender => "gender",
            Self::Weight => "weight",
        }
    }
}

/// Sort specification for collection queries.
#[derive(Debug, Clone, Copy)]
pub struct PetSort {
    pub column: PetColumn,
    pub descending: bool,
}

impl PetSort {
    pub fn ascending(column: PetColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: PetColumn) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Caller-supplied row filter for collection update/delete.
///
/// `expr` is a SQL predicate over the pet columns using unnumbered `?`
/// placeholders; `args` binds them in order.
#[derive(Debug, Clone)]
pub struct RowFilter {
    pub expr: String,
    pub args: Vec<Value>,
}

impl RowFilter {
    pub fn new(expr: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            expr: expr.into(),
            args,
        }
    }
}

/// Query options: projection, filter and sort.
///
/// An empty projection selects all columns. The filter is accepted for
/// interface uniformity but never honored: collection queries are always
/// whole-table reads, and item queries rewrite the filter to the
/// locator's id.
#[derive(Debug, Clone, Default)]
pub struct PetQuery {
    pub projection: Vec<PetColumn>,
    pub filter: Option<RowFilter>,
    pub sort: Option<PetSort>,
}

/// One projected result row; absent columns were not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub weight: Option<i64>,
}

impl PetRow {
    /// Recovers the full record from an unprojected row.
    pub fn into_pet(self) -> Option<Pet> {
        Some(Pet {
            id: self.id?,
            name: self.name?,
            breed: self.breed?,
            gender: self.gender?,
            weight: self.weight?,
        })
    }
}

/// Stateless router + CRUD layer over the pet store.
///
/// Observers that want to track a locator register on the injected
/// [`ChangeNotifier`] and re-issue `query` when a change for that
/// locator is published; the provider never pushes data.
pub struct PetProvider<'store> {
    store: &'store PetStore,
    matcher: LocatorMatcher,
    notifier: ChangeNotifier,
}

impl<'store> PetProvider<'store> {
    /// Creates a provider over `store` for locators under `authority`.
    pub fn new(
        store: &'store PetStore,
        authority: impl Into<String>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            store,
            matcher: LocatorMatcher::new(authority),
            notifier,
        }
    }

    pub fn matcher(&self) -> &LocatorMatcher {
        &self.matcher
    }

    /// Returns the collection locator this provider serves.
    pub fn collection_locator(&self) -> Locator {
        self.matcher.collection_locator()
    }

    /// Queries records addressed by `locator`.
    ///
    /// Collection locators return all rows ordered per the sort spec;
    /// item locators return at most one row matching the locator's id.
    pub fn query(&self, locator: &Locator, query: &PetQuery) -> ProviderResult<Vec<PetRow>> {
        let projection: Vec<PetColumn> = if query.projection.is_empty() {
            PetColumn::ALL.to_vec()
        } else {
            query.projection.clone()
        };

        let columns = projection
            .iter()
            .map(|column| column.as_sql())
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("SELECT {columns} FROM pets");
        let mut args: Vec<Value> = Vec::new();

        match self.matcher.classify(locator) {
            LocatorKind::Collection => {}
            LocatorKind::Item(id) => {
                // Caller-supplied filters are discarded: the locator is
                // the filter.
                sql.push_str(" WHERE id = ?");
                args.push(Value::Integer(id));
            }
            LocatorKind::Unrecognized => {
                return Err(ProviderError::InvalidLocator(locator.clone()));
            }
        }

        if let Some(sort) = query.sort {
            sql.push_str(" ORDER BY ");
            sql.push_str(sort.column.as_sql());
            if sort.descending {
                sql.push_str(" DESC");
            }
        }

        let conn = self.store.readable()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(args))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(parse_pet_row(row, &projection)?);
        }

        Ok(result)
    }

    /// Inserts a new record under a collection locator.
    ///
    /// Returns the item locator for the store-assigned id and publishes
    /// a change for the collection locator.
    pub fn insert(&self, locator: &Locator, values: &PetValues) -> ProviderResult<Locator> {
        match self.matcher.classify(locator) {
            LocatorKind::Collection => {}
            LocatorKind::Item(_) | LocatorKind::Unrecognized => {
                return Err(ProviderError::Unsupported {
                    operation: "insert",
                    locator: locator.clone(),
                });
            }
        }

        if let Err(err) = values.validate_create() {
            warn!(
                "event=pet_insert module=provider status=invalid field={} error={err}",
                err.field()
            );
            return Err(err.into());
        }

        let conn = self.store.writable()?;
        // All four fields are `Some` after create validation.
        conn.execute(
            "INSERT INTO pets (name, breed, gender, weight) VALUES (?1, ?2, ?3, ?4);",
            params![values.name, values.breed, values.gender, values.weight],
        )?;
        let id = conn.last_insert_rowid();

        info!("event=pet_insert module=provider status=ok id={id}");
        self.notifier.publish(locator);
        Ok(locator.with_appended_id(id))
    }

    /// Applies a partial update to the records addressed by `locator`.
    ///
    /// Collection locators honor the caller filter; item locators force
    /// the filter to the locator's id. Returns the number of rows
    /// changed; an empty payload is a no-op success of zero rows.
    pub fn update(
        &self,
        locator: &Locator,
        values: &PetValues,
        filter: Option<&RowFilter>,
    ) -> ProviderResult<usize> {
        let item_id = match self.matcher.classify(locator) {
            LocatorKind::Collection => None,
            LocatorKind::Item(id) => Some(id),
            LocatorKind::Unrecognized => {
                return Err(ProviderError::Unsupported {
                    operation: "update",
                    locator: locator.clone(),
                });
            }
        };

        if values.is_empty() {
            return Ok(0);
        }

        if let Err(err) = values.validate_update() {
            warn!(
                "event=pet_update module=provider status=invalid field={} error={err}",
                err.field()
            );
            return Err(err.into());
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut args: Vec<Value> = Vec::new();
        if let Some(name) = &values.name {
            assignments.push("name = ?");
            args.push(Value::Text(name.clone()));
        }
        if let Some(breed) = &values.breed {
            assignments.push("breed = ?");
            args.push(Value::Text(breed.clone()));
        }
        if let Some(gender) = values.gender {
            assignments.push("gender = ?");
            args.push(Value::Integer(gender));
        }
        if let Some(weight) = values.weight {
            assignments.push("weight = ?");
            args.push(Value::Integer(weight));
        }

        let mut sql = format!("UPDATE pets SET {}", assignments.join(", "));
        match item_id {
            // Caller filters apply to the collection only; an item
            // locator is its own filter.
            None => {
                if let Some(filter) = filter {
                    sql.push_str(" WHERE ");
                    sql.push_str(&filter.expr);
                    args.extend(filter.args.iter().cloned());
                }
            }
            Some(id) => {
                sql.push_str(" WHERE id = ?");
                args.push(Value::Integer(id));
            }
        }

        let conn = self.store.writable()?;
        let changed = conn.execute(&sql, params_from_iter(args))?;

        info!("event=pet_update module=provider status=ok rows={changed}");
        if changed > 0 {
            // List observers watch the collection locator, so the owning
            // collection is published rather than the raw item locator.
            self.notifier.publish(&self.collection_locator());
        }
        Ok(changed)
    }

    /// Deletes the records addressed by `locator`.
    ///
    /// A collection delete also resets the table's identity counter so
    /// the next insert restarts numbering ("clear the catalog"). Returns
    /// the number of rows deleted.
    pub fn delete(&self, locator: &Locator, filter: Option<&RowFilter>) -> ProviderResult<usize> {
        let item_id = match self.matcher.classify(locator) {
            LocatorKind::Collection => None,
            LocatorKind::Item(id) => Some(id),
            LocatorKind::Unrecognized => {
                return Err(ProviderError::Unsupported {
                    operation: "delete",
                    locator: locator.clone(),
                });
            }
        };

        let conn = self.store.writable()?;
        let deleted = match item_id {
            None => {
                let mut sql = String::from("DELETE FROM pets");
                let mut args: Vec<Value> = Vec::new();
                if let Some(filter) = filter {
                    sql.push_str(" WHERE ");
                    sql.push_str(&filter.expr);
                    args.extend(filter.args.iter().cloned());
                }
                let deleted = conn.execute(&sql, params_from_iter(args))?;
                // Restart numbering so the next insert begins at the
                // initial sequence value.
                conn.execute("DELETE FROM sqlite_sequence WHERE name = 'pets';", [])?;
                deleted
            }
            Some(id) => conn.execute("DELETE FROM pets WHERE id = ?1;", params![id])?,
        };

        info!("event=pet_delete module=provider status=ok rows={deleted}");
        if deleted > 0 {
            self.notifier.publish(&self.collection_locator());
        }
        Ok(deleted)
    }
}

fn parse_pet_row(row: &rusqlite::Row<'_>, projection: &[PetColumn]) -> ProviderResult<PetRow> {
    let mut pet_row = PetRow::default();
    for (index, column) in projection.iter().enumerate() {
        match column {
            PetColumn::Id => pet_row.id = Some(row.get(index)?),
            PetColumn::Name => pet_row.name = Some(row.get(index)?),
            PetColumn::Breed => pet_row.breed = Some(row.get(index)?),
            PetColumn::Gender => {
                let code: i64 = row.get(index)?;
                let gender = Gender::from_code(code).ok_or_else(|| {
                    ProviderError::InvalidData(format!(
                        "invalid gender code `{code}` in pets.gender"
                    ))
                })?;
                pet_row.gender = Some(gender);
            }
            PetColumn::Weight => pet_row.weight = Some(row.get(index)?),
        }
    }
    Ok(pet_row)
}
