//! Decode command implementation.

use super::output::{describe_groups, JsonGroup};
use super::{CliError, OutputFormat};
use exprga::ga::bit_string_to_expression;
use exprga::BitString;
use serde::Serialize;

/// JSON-serializable decode result.
#[derive(Debug, Serialize)]
struct JsonDecode {
    bit_string: String,
    groups: Vec<JsonGroup>,
    expression: String,
    value: f64,
}

/// Execute the decode command.
///
/// # Errors
///
/// Returns an error if the input is not a bit string.
pub(crate) fn execute(bits: &str, format: OutputFormat) -> Result<(), CliError> {
    let bit_string: BitString = bits.trim().parse()?;
    let expression = bit_string_to_expression(&bit_string);
    let value = expression.evaluate();
    let groups = describe_groups(&bit_string);

    match format {
        OutputFormat::Text => {
            for group in &groups {
                println!("  {:<4}  {}", group.bits, group.symbol.as_deref().unwrap_or("-"));
            }
            println!();
            if expression.is_empty() {
                println!("(empty expression) = {value}");
            } else {
                println!("{expression} = {value}");
            }
        }
        OutputFormat::Json => {
            let result = JsonDecode {
                bit_string: bit_string.to_string(),
                groups,
                expression: expression.to_string(),
                value,
            };
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
