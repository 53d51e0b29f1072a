use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod currency {
    use super::*;

    /// Request body for creating a currency.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyNew {
        pub code: String,
        pub name: String,
    }

    /// Request body for PATCH/PUT.
    ///
    /// Absent fields leave the stored value unchanged. The code is the
    /// lookup key and cannot be patched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CurrencyUpdate {
        pub name: Option<String>,
    }

    /// A currency as it appears on the wire.
    ///
    /// The creation timestamp is serialized as `createdDate`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CurrencyView {
        pub code: String,
        pub name: String,
        pub created_date: DateTime<Utc>,
    }
}
