//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `casa_core` linkage without the Flutter runtime.
//! - Print a month grid as the calendar screen lays it out.
//!
//! Usage: `casa_cli` or `casa_cli grid <year> <month>`.

use casa_core::{GridCell, MonthGrid, YearMonth};
use std::process::ExitCode;

const WEEKDAY_HEADER: &str = " Do Se Te Qu Qu Se Sa";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            println!("casa_core ping={}", casa_core::ping());
            println!("casa_core version={}", casa_core::core_version());
            ExitCode::SUCCESS
        }
        [command, year, month] if command == "grid" => match parse_month(year, month) {
            Ok(ym) => {
                print!("{}", render_grid(ym));
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: casa_cli [grid <year> <month>]");
            ExitCode::from(2)
        }
    }
}

fn parse_month(year: &str, month: &str) -> Result<YearMonth, String> {
    let year: i32 = year.parse().map_err(|_| format!("invalid year `{year}`"))?;
    let month: u32 = month.parse().map_err(|_| format!("invalid month `{month}`"))?;
    YearMonth::new(year, month).map_err(|err| err.to_string())
}

fn render_grid(ym: YearMonth) -> String {
    let mut out = format!("{:02}/{}\n{WEEKDAY_HEADER}\n", ym.month(), ym.year());
    for week in MonthGrid::build(ym).weeks() {
        for cell in week {
            match cell {
                GridCell::Blank => out.push_str("   "),
                GridCell::Day(day) => out.push_str(&format!("{day:>3}")),
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{parse_month, render_grid};

    #[test]
    fn february_2026_starts_on_sunday() {
        let rendered = render_grid(parse_month("2026", "2").unwrap());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "02/2026");
        assert_eq!(lines[2], "  1  2  3  4  5  6  7");
        assert_eq!(lines.len(), 2 + 4);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_month("dois mil", "1").is_err());
        assert!(parse_month("2026", "0").is_err());
    }
}
