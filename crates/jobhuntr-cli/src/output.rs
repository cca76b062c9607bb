use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use jobhuntr_core::responses::Confirmation;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn raw_is_single_line() {
        let confirmation = Confirmation::opportunity_created("opp-00000001");
        let raw = render(&confirmation, OutputFormat::Raw).unwrap();
        assert_eq!(
            raw,
            r#"{"message":"successfully created opportunity","id":"opp-00000001"}"#
        );
    }

    #[test]
    fn json_is_pretty() {
        let rendered = render(&serde_json::json!({"a": 1}), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"a\": 1\n}");
    }
}
