use crate::domain::model::{ChartSettings, RevisionQuery};
use crate::utils::error::{Result, TrendError};
use url::Url;

/// MediaWiki 的 rvlimit 上限；要求 content 時上限更低
pub const MAX_REVISION_LIMIT: u32 = 500;
pub const MAX_CONTENT_REVISION_LIMIT: u32 = 50;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TrendError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| TrendError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TrendError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 圖表尺寸必須合理，且邊距扣除後仍要留下繪圖區
pub fn validate_chart_settings(field_prefix: &str, chart: &ChartSettings) -> Result<()> {
    validate_range(&format!("{}.width", field_prefix), chart.width, 100, 10_000)?;
    validate_range(&format!("{}.height", field_prefix), chart.height, 100, 10_000)?;

    if chart.inner_width() == 0 || chart.inner_height() == 0 {
        return Err(TrendError::ConfigValidationError {
            field: format!("{}.margins", field_prefix),
            message: format!(
                "Margins {:?} leave no drawing area inside {}x{}",
                chart.margins, chart.width, chart.height
            ),
        });
    }

    Ok(())
}

/// 標題不可空白、rvprop 必須含 timestamp，否則回應無法分桶
pub fn validate_revision_query(field_prefix: &str, query: &RevisionQuery) -> Result<()> {
    validate_non_empty_string(&format!("{}.title", field_prefix), &query.title)?;

    if !query.rvprop.split('|').any(|prop| prop == "timestamp") {
        return Err(TrendError::ConfigValidationError {
            field: format!("{}.rvprop", field_prefix),
            message: format!("'{}' must include 'timestamp'", query.rvprop),
        });
    }

    if let Some(limit) = query.limit {
        let max = if query.rvprop.split('|').any(|prop| prop == "content") {
            MAX_CONTENT_REVISION_LIMIT
        } else {
            MAX_REVISION_LIMIT
        };
        validate_range(&format!("{}.revision_limit", field_prefix), limit, 1, max)?;
    }

    Ok(())
}
