// Output formatting for CLI

use std::io::Write;

use anyhow::Result;

use super::config::OutputFormat;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    pub quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output a JSON document in the configured format
    pub fn output_value(&self, value: &serde_json::Value, writer: &mut dyn Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(value)?)?;
            }
            OutputFormat::KeyValue => {
                self.output_key_value(value, writer)?;
            }
            OutputFormat::Table => {
                self.output_table(value, writer)?;
            }
        }
        Ok(())
    }

    /// Output as `path: value` lines, nested objects flattened with dots
    fn output_key_value(&self, value: &serde_json::Value, writer: &mut dyn Write) -> Result<()> {
        let mut items = Vec::new();
        flatten("", value, &mut items);
        for (key, value) in items {
            writeln!(writer, "{}: {}", key, value)?;
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &serde_json::Value, writer: &mut dyn Write) -> Result<()> {
        let mut items = Vec::new();
        flatten("", value, &mut items);
        let max_key_len = items.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        for (key, value) in &items {
            writeln!(
                writer,
                "{:<width$} {}",
                format!("{}:", key),
                value,
                width = max_key_len + 2
            )?;
        }
        writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            eprintln!("  {}", message);
        }
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        serde_json::Value::Object(obj) => {
            for (key, value) in obj {
                flatten(&join(key), value, out);
            }
        }
        serde_json::Value::Array(arr) if !arr.is_empty() => {
            for (index, value) in arr.iter().enumerate() {
                flatten(&join(&index.to_string()), value, out);
            }
        }
        other => out.push((prefix.to_string(), format_value(other))),
    }
}

/// Format a JSON scalar for display
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "(null)".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Array(_) => "[]".to_string(),
        serde_json::Value::Object(_) => "{}".to_string(),
    }
}

/// Progress indicator for batch operations
pub struct ProgressBar {
    total: usize,
    current: usize,
    show: bool,
}

impl ProgressBar {
    pub fn new(total: usize, show: bool) -> Self {
        Self {
            total,
            current: 0,
            show,
        }
    }

    pub fn increment(&mut self, label: &str) {
        self.current += 1;
        if self.show && self.total > 0 {
            let percent = (self.current * 100) / self.total;
            eprint!("\r[{}/{}] ({}%) {}", self.current, self.total, percent, label);
            if self.current == self.total {
                eprintln!();
            }
            std::io::stderr().flush().ok();
        }
    }
}
