mod arrow;
mod datafusion;
mod duckdb;
mod polars;

pub use arrow::ArrowParquetVariant;
pub use datafusion::DataFusionParquetVariant;
pub use duckdb::{DuckDbPolarsVariant, DuckDbVariant};
pub use polars::{PolarsCsvVariant, PolarsParquetVariant};
