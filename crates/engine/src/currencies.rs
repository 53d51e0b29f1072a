//! The module contains the `Currency` struct and its database entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

/// A catalog currency.
///
/// The `code` is the unique identifier (an ISO-style code such as `EUR` or
/// `USD`) and doubles as the primary key: a currency can be renamed but its
/// code never changes. `created_at` exists only to give listings a stable
/// newest-first ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Currency {
    pub fn new(code: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            name,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Currency> for ActiveModel {
    fn from(value: &Currency) -> Self {
        Self {
            code: ActiveValue::Set(value.code.clone()),
            name: ActiveValue::Set(value.name.clone()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl From<Model> for Currency {
    fn from(value: Model) -> Self {
        Self {
            code: value.code,
            name: value.name,
            created_at: value.created_at,
        }
    }
}
