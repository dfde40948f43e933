use netgrade_core::normalize::validate_prefix;
use netgrade_core::report::OutputFormat;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a two-octet address prefix such as `10.0`
pub fn parse_prefix(s: &str) -> std::result::Result<String, String> {
    validate_prefix(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
