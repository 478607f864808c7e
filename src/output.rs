use crate::error::Result;
use crate::lookup::Report;
use crate::row::Row;
use clap::ValueEnum;
use std::io::Write;

/// How lookup results are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<count> (<cell>, ...)`, one line
    #[default]
    Text,
    /// JSON objects keyed by column name
    Json,
}

pub fn write_report<W: Write>(out: &mut W, format: OutputFormat, report: &Report) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn write_rows<W: Write>(out: &mut W, format: OutputFormat, rows: &[Row]) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{row}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn report() -> Report {
        Report {
            count: 1,
            first_row: Row::new(
                vec!["email".into(), "name".into()],
                vec![Value::from("a@aol.com"), Value::from("Alice")],
            ),
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_report() {
        let text = render(|out| write_report(out, OutputFormat::Text, &report()));
        assert_eq!(text, "1 ('a@aol.com', 'Alice')\n");
    }

    #[test]
    fn json_report() {
        let text = render(|out| write_report(out, OutputFormat::Json, &report()));
        assert_eq!(
            text,
            "{\"count\":1,\"first_row\":{\"email\":\"a@aol.com\",\"name\":\"Alice\"}}\n"
        );
    }

    #[test]
    fn rows_in_both_formats() {
        let rows = vec![report().first_row];
        let text = render(|out| write_rows(out, OutputFormat::Text, &rows));
        assert_eq!(text, "('a@aol.com', 'Alice')\n");
        let json = render(|out| write_rows(out, OutputFormat::Json, &[]));
        assert_eq!(json, "[]\n");
    }
}
