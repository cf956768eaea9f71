//! Subcommand: `intentdesk check` — parse a script and report its intents.

use std::path::Path;

use anyhow::Context;

use intentdesk_engine::Registry;

/// Parse the script and print its intents in probe order.
///
/// Any lex or parse error propagates out and exits the process non-zero.
pub fn cmd_check(script: &Path) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read {}", script.display()))?;

    let registry = Registry::build(&source)
        .with_context(|| format!("failed to build registry from {}", script.display()))?;

    println!("{}: {} intent(s)", script.display(), registry.len());
    for def in registry.iter() {
        let next = def
            .next_state
            .as_deref()
            .map(|s| format!(" -> {s}"))
            .unwrap_or_default();
        println!(
            "  {:<24} priority {:<4} {} pattern(s){next}",
            def.name,
            def.priority,
            def.patterns.len(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn valid_script_passes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"intent G {{ patterns: ["hi"]; response: "hello"; }}"#
        )
        .unwrap();

        assert!(cmd_check(file.path()).is_ok());
    }

    #[test]
    fn duplicate_intent_name_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "intent G {{ patterns: [\"a\"]; response: \"r\"; }}\n\
             intent G {{ patterns: [\"b\"]; response: \"r\"; }}"
        )
        .unwrap();

        assert!(cmd_check(file.path()).is_err());
    }

    #[test]
    fn missing_file_fails() {
        assert!(cmd_check(Path::new("/no/such/script.dsl")).is_err());
    }
}
