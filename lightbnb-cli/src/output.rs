//! Rendering records for the terminal
//!
//! Text output is one line per record; `--json` prints the records as
//! pretty JSON for scripts.

use std::io::Write;

use anyhow::Result;
use lightbnb_db::db::BuiltQuery;
use lightbnb_db::models::{Property, PropertyListing, ReservationListing, User};
use serde::Serialize;

/// Output format selected by the global `--json` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render cents as dollars, e.g. `93061` -> `$930.61`
pub fn format_cents(cents: i32) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = i64::from(cents).abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "-".to_string())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_user(out: &mut impl Write, user: &User, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, user),
        OutputFormat::Text => {
            writeln!(out, "{}\t{} <{}>", user.id, user.name, user.email)?;
            Ok(())
        }
    }
}

pub fn write_property(out: &mut impl Write, property: &Property, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, property),
        OutputFormat::Text => {
            writeln!(
                out,
                "{}\t{}/night\t{}, {}\t{}",
                property.id,
                format_cents(property.cost_per_night),
                property.city,
                property.province,
                property.title
            )?;
            Ok(())
        }
    }
}

pub fn write_properties(
    out: &mut impl Write,
    listings: &[PropertyListing],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, listings),
        OutputFormat::Text => {
            if listings.is_empty() {
                writeln!(out, "No properties found")?;
            }
            for listing in listings {
                let p = &listing.property;
                writeln!(
                    out,
                    "{}\t{}/night\t★ {}\t{}, {}\t{}",
                    p.id,
                    format_cents(p.cost_per_night),
                    format_rating(listing.average_rating),
                    p.city,
                    p.province,
                    p.title
                )?;
            }
            Ok(())
        }
    }
}

pub fn write_reservations(
    out: &mut impl Write,
    listings: &[ReservationListing],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, listings),
        OutputFormat::Text => {
            if listings.is_empty() {
                writeln!(out, "No reservations found")?;
            }
            for listing in listings {
                let r = &listing.reservation;
                writeln!(
                    out,
                    "{}\t{} → {} ({} nights)\t{}/night\t★ {}\t{}",
                    r.id,
                    r.start_date,
                    r.end_date,
                    r.nights(),
                    format_cents(listing.property.cost_per_night),
                    format_rating(listing.average_rating),
                    listing.property.title
                )?;
            }
            Ok(())
        }
    }
}

pub fn write_query(out: &mut impl Write, query: &BuiltQuery, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, query),
        OutputFormat::Text => {
            writeln!(out, "{}", query.sql)?;
            writeln!(out)?;
            for (i, param) in query.params.iter().enumerate() {
                writeln!(out, "${} = {}", i + 1, param)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbnb_db::db::build_property_query;
    use lightbnb_db::models::{Limit, PropertyFilter};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cents_as_dollars() {
        assert_eq!(format_cents(93061), "$930.61");
        assert_eq!(format_cents(5000), "$50.00");
        assert_eq!(format_cents(7), "$0.07");
        assert_eq!(format_cents(-150), "-$1.50");
    }

    #[test]
    fn user_text_line() {
        let user = User {
            id: 3,
            name: "Sue Luna".into(),
            email: "jasonvincent@gmx.com".into(),
            password: "hash".into(),
        };
        let text = render(|out| write_user(out, &user, OutputFormat::Text));
        assert_eq!(text, "3\tSue Luna <jasonvincent@gmx.com>\n");

        let json = render(|out| write_user(out, &user, OutputFormat::Json));
        assert!(json.contains("\"jasonvincent@gmx.com\""));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn empty_lists_say_so() {
        let text = render(|out| write_properties(out, &[], OutputFormat::Text));
        assert_eq!(text, "No properties found\n");

        let json = render(|out| write_reservations(out, &[], OutputFormat::Json));
        assert_eq!(json.trim(), "[]");
    }

    #[test]
    fn query_text_lists_params() {
        let filter = PropertyFilter {
            city: Some("van".into()),
            ..Default::default()
        };
        let query = build_property_query(&filter, Limit::default());
        let text = render(|out| write_query(out, &query, OutputFormat::Text));

        assert!(text.contains("WHERE city LIKE $1"));
        assert!(text.contains("$1 = '%van%'\n"));
        assert!(text.ends_with("$2 = 10\n"));
    }
}
