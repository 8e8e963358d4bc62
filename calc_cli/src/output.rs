//! Result rendering for text and JSON output.

use calc_core::{CalcError, Output};
use serde_json::json;

use crate::parse::ParseError;
use crate::settings::{OutputFormat, Settings};

fn format_float(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) if value.is_finite() => format!("{value:.p$}"),
        _ => value.to_string(),
    }
}

/// Render a successful command result.
pub fn render_output(output: &Output, settings: &Settings) -> String {
    match settings.output {
        OutputFormat::Json => json!({ "ok": output }).to_string(),
        OutputFormat::Text => match output {
            Output::Value { value } => format!("= {}", format_float(*value, settings.precision)),
            Output::Integer { value } => format!("= {value}"),
            Output::Number { value } => format!("= {value}"),
            Output::Chain { value } => format!("chain = {}", format_float(*value, settings.precision)),
            Output::Done => "ok".to_string(),
        },
    }
}

/// Render a calculation error.
pub fn render_error(error: &CalcError, settings: &Settings) -> String {
    match settings.output {
        OutputFormat::Json => json!({ "error": error }).to_string(),
        OutputFormat::Text => format!("error[{}]: {error}", error.error_code()),
    }
}

/// Render a malformed-input error.
pub fn render_parse_error(error: &ParseError, settings: &Settings) -> String {
    match settings.output {
        OutputFormat::Json => json!({ "parse_error": error.to_string() }).to_string(),
        OutputFormat::Text => format!("parse error: {error}"),
    }
}
