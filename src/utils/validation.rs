use crate::utils::error::{EnrichError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> EnrichError {
    EnrichError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 端點覆寫只接受 http / https，方便指向本機 mock server
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(invalid(field, endpoint, "endpoint is blank; unset it to use the provider default"));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field, endpoint, format!("endpoint is not an absolute URL ({})", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field,
            endpoint,
            format!("places endpoint must use http or https, not {}", scheme),
        )),
    }
}

pub fn validate_input_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "no CSV file given; pass a path to --file"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "CSV path contains a NUL character"));
    }
    Ok(())
}

/// 輸出檔寫在輸入檔旁邊，因此只能是單純的檔名
pub fn validate_output_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(invalid(field, name, "output file name is blank"));
    }
    if name.contains('\0') {
        return Err(invalid(field, name, "output file name contains a NUL character"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(invalid(
            field,
            name,
            "output is written beside the input file; give a bare file name without directories",
        ));
    }
    Ok(())
}

pub fn validate_at_least(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(invalid(
            field,
            value,
            format!("must be at least {} so every batch looks up at least one row", min),
        ));
    }
    Ok(())
}

pub fn validate_location(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field,
            value,
            "search location is blank; omit it to use the default location",
        ));
    }
    Ok(())
}
