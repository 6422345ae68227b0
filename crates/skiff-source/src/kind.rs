use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use skiff_common::error::CommonError;

/// Category of a data source.
///
/// Every source descriptor carries exactly one kind. Reader variants declare
/// the kinds they implement, and dispatch matches on kind membership, so
/// `match` arms over this enum stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A columnar file dataset (one or more Parquet files).
    Parquet,
    /// A delimited text file set.
    Csv,
    /// A semi-structured (JSON) file.
    Json,
    /// A query against an external engine or database.
    Query,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Parquet => "parquet",
            SourceKind::Csv => "csv",
            SourceKind::Json => "json",
            SourceKind::Query => "query",
        };
        f.write_str(name)
    }
}

impl FromStr for SourceKind {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parquet" => Ok(SourceKind::Parquet),
            "csv" => Ok(SourceKind::Csv),
            "json" => Ok(SourceKind::Json),
            "query" => Ok(SourceKind::Query),
            _ => Err(CommonError::invalid(format!("unknown source kind: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_kind_round_trip() {
        for kind in [
            SourceKind::Parquet,
            SourceKind::Csv,
            SourceKind::Json,
            SourceKind::Query,
        ] {
            let parsed: SourceKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_unknown() {
        assert!("avro".parse::<SourceKind>().is_err());
    }
}
