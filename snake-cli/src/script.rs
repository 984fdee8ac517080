//! Button scripts: `button@ms` lists on the command line or JSON files.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use snake_core::{Button, ScriptedInput};

/// Parse `"up@300,down@900,select@1500"`. Buttons accept their full name or
/// first letter.
pub fn parse_inputs(input: &str) -> Result<Vec<ScriptedInput>> {
    let mut inputs = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (button, at) = token
            .split_once('@')
            .ok_or_else(|| anyhow!("expected button@ms, got '{token}'"))?;
        let button: Button = button
            .parse()
            .with_context(|| format!("bad button in '{token}'"))?;
        let at_ms = at
            .trim()
            .parse::<u64>()
            .with_context(|| format!("bad time in '{token}'"))?;
        inputs.push(ScriptedInput { at_ms, button });
    }
    inputs.sort_by_key(|input| input.at_ms);
    Ok(inputs)
}

/// A JSON array of `{"at_ms": .., "button": ..}` objects.
pub fn load_script(path: &Path) -> Result<Vec<ScriptedInput>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading script {}", path.display()))?;
    let mut inputs: Vec<ScriptedInput> = serde_json::from_str(&data)
        .with_context(|| format!("invalid script {}", path.display()))?;
    inputs.sort_by_key(|input| input.at_ms);
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_parse_and_come_back_in_time_order() {
        let inputs = parse_inputs("down@900, u@300,SELECT@1500,").unwrap();
        assert_eq!(
            inputs,
            vec![
                ScriptedInput {
                    at_ms: 300,
                    button: Button::Up
                },
                ScriptedInput {
                    at_ms: 900,
                    button: Button::Down
                },
                ScriptedInput {
                    at_ms: 1_500,
                    button: Button::Select
                },
            ]
        );
    }

    #[test]
    fn malformed_tokens_are_reported() {
        assert!(parse_inputs("up").is_err());
        assert!(parse_inputs("left@100").is_err());
        assert!(parse_inputs("up@soon").is_err());
        assert!(parse_inputs("").unwrap().is_empty());
    }
}
