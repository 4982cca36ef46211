use std::io::{self, Write};

/// Format a key-value pair for display.
pub fn kv(key: &str, value: &str) -> String {
    format!("{key:>16}: {value}")
}

/// Format a header line.
pub fn header(title: &str) -> String {
    format!("=== {title} ===")
}

pub fn notice(msg: &str) -> String {
    format!("note: {msg}")
}

pub fn prompt_input(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// ANSI sequence clearing the terminal and homing the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_right_aligns_keys() {
        assert_eq!(kv("Impact", "7"), "          Impact: 7");
    }

    #[test]
    fn header_wraps_title() {
        assert_eq!(header("Master"), "=== Master ===");
    }
}
