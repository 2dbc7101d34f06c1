use colored::Colorize;
use std::error::Error;
use std::io::Write;

/// Build one report line: `<name>==<version> #<license>`.
///
/// With color enabled the license segment is green/bold when accepted and
/// red/bold otherwise; with color disabled the text goes out unmodified.
pub fn format_line(
    name: &str,
    version: &str,
    license: &str,
    accepted: bool,
    color: bool
) -> String {
    let license = if color {
        // Avoid sending garbage to the output when being piped; the caller
        // decides via the detected capability.
        let colored = if accepted { license.green().bold() } else { license.red().bold() };
        colored.to_string()
    } else {
        license.to_string()
    };

    format!("{}=={} #{}", name, version, license)
}

/// Write one report line plus a trailing newline to the output sink.
pub fn display(
    out: &mut dyn Write,
    name: &str,
    version: &str,
    license: &str,
    accepted: bool,
    color: bool
) -> Result<(), Box<dyn Error>> {
    let line = format_line(name, version, license, accepted, color);
    writeln!(out, "{}", line)?;
    Ok(())
}
