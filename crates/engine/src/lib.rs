use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, PaginatorTrait, QueryOrder, prelude::*};

pub use currencies::Currency;
pub use error::EngineError;

mod currencies;
mod error;

type ResultEngine<T> = Result<T, EngineError>;

/// The persistence delegate behind the currency endpoints.
///
/// Every operation is a single stateless round trip to the database; the
/// engine keeps no in-memory copy of the catalog.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Return one page of currencies ordered by creation time, newest first.
    ///
    /// `page` is 0-based. A zero `size` yields an empty page.
    pub async fn list(&self, page: u64, size: u64) -> ResultEngine<Vec<Currency>> {
        if size == 0 {
            return Ok(Vec::new());
        }

        let models = currencies::Entity::find()
            .order_by_desc(currencies::Column::CreatedAt)
            .paginate(&self.database, size)
            .fetch_page(page)
            .await?;

        Ok(models.into_iter().map(Currency::from).collect())
    }

    /// Return the currency stored under `code`.
    pub async fn currency(&self, code: &str) -> ResultEngine<Currency> {
        currencies::Entity::find_by_id(code)
            .one(&self.database)
            .await?
            .map(Currency::from)
            .ok_or_else(|| EngineError::NotFound(code.to_string()))
    }

    /// Whether a currency with `code` is stored.
    pub async fn exists(&self, code: &str) -> ResultEngine<bool> {
        let count = currencies::Entity::find_by_id(code)
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }

    /// Store a new currency.
    ///
    /// Uniqueness is enforced with an existence pre-check, not a transaction:
    /// two concurrent creates for the same code can both pass the check and
    /// race at the insert. The primary key on `code` makes the loser fail
    /// with a [`EngineError::Database`] instead of silently overwriting.
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Currency> {
        if self.exists(code).await? {
            return Err(EngineError::AlreadyExists(code.to_string()));
        }

        let currency = Currency::new(code.to_string(), name.to_string(), created_at);
        currencies::ActiveModel::from(&currency)
            .insert(&self.database)
            .await?;

        Ok(currency)
    }

    /// Replace the mutable fields of the currency stored under `code`.
    ///
    /// The code itself is the lookup key and is never rewritten.
    pub async fn update_by_code(&self, code: &str, name: Option<&str>) -> ResultEngine<Currency> {
        let model = currencies::Entity::find_by_id(code)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(code.to_string()))?;

        let Some(name) = name else {
            return Ok(Currency::from(model));
        };

        let mut active: currencies::ActiveModel = model.into();
        active.name = ActiveValue::Set(name.to_string());
        let model = active.update(&self.database).await?;

        Ok(Currency::from(model))
    }

    /// Delete the currency stored under `code`.
    ///
    /// Deleting an absent code reports [`EngineError::NotFound`]; whether to
    /// surface that to the caller is the endpoint's decision.
    pub async fn delete_by_code(&self, code: &str) -> ResultEngine<()> {
        let result = currencies::Entity::delete_by_id(code)
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::NotFound(code.to_string()));
        }

        Ok(())
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
