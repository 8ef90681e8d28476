use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Collateral left by the renter for the duration of a rental.
///
/// Stored and serialized as its short code (`ID`, `ACCESS`, `DRIVER`, `KEY`,
/// `MONEY`, `Autre`). Existing rows depend on these exact literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Guarantee {
    /// Identity card
    #[serde(rename = "ID")]
    Id,
    /// Campus access card
    #[serde(rename = "ACCESS")]
    Access,
    /// Driver's license
    #[serde(rename = "DRIVER")]
    Driver,
    /// Keys
    #[serde(rename = "KEY")]
    Key,
    /// Cash, the amount is written in the comments
    #[serde(rename = "MONEY")]
    Money,
    /// Anything else, described in the comments
    #[serde(rename = "Autre")]
    Other,
}

impl Guarantee {
    pub fn code(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Access => "ACCESS",
            Self::Driver => "DRIVER",
            Self::Key => "KEY",
            Self::Money => "MONEY",
            Self::Other => "Autre",
        }
    }

    /// Label shown to club staff
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Carte d'identité",
            Self::Access => "Carte d'accès",
            Self::Driver => "Permis de conduire",
            Self::Key => "Clés",
            Self::Money => "Cash : voir le montant en commentaire",
            Self::Other => "Autre : voir en commentaire",
        }
    }
}

impl FromStr for Guarantee {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ID" => Ok(Self::Id),
            "ACCESS" => Ok(Self::Access),
            "DRIVER" => Ok(Self::Driver),
            "KEY" => Ok(Self::Key),
            "MONEY" => Ok(Self::Money),
            "Autre" => Ok(Self::Other),
            _ => Err(format!("Unknown guarantee code: {s}")),
        }
    }
}

impl Display for Guarantee {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.code())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for Guarantee {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "Guarantee".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<Guarantee> for Value {
    fn from(guarantee: Guarantee) -> Self {
        Value::String(Some(Box::new(guarantee.code().to_owned())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for Guarantee {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e: String| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to decode Guarantee: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for Guarantee {
    fn null() -> Value {
        Value::String(None)
    }
}
