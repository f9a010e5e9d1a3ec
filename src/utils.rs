use polars::prelude::*;

/// True for the primitive integer and floating point dtypes.
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

pub(crate) fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Parses a single cell as a finite `f64`. Anything else is treated as missing.
pub(crate) fn parse_cell(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The column as `Float64` with every `NaN` or infinite value turned into null.
pub(crate) fn finite_values(column: &Column) -> PolarsResult<Series> {
    let as_float = column.cast(&DataType::Float64)?;
    Ok(Float64Chunked::from_iter_options(
        column.name().clone(),
        as_float.f64()?.into_iter().map(|v| v.filter(|x| x.is_finite())),
    )
    .into_series())
}

/// Null count, plus non-finite values for float columns.
pub(crate) fn missing_count(column: &Column) -> usize {
    if !is_float_dtype(column.dtype()) {
        return column.null_count();
    }
    finite_values(column)
        .map(|s| s.null_count())
        .unwrap_or_else(|_| column.null_count())
}

/// Rounds half away from zero to `decimals` places, same as the frame rounding stage.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round() / multiplier
}
