//! `lightbnb properties` - search and add listings

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use lightbnb_db::db::build_property_query;
use lightbnb_db::models::{NewProperty, PropertyFilter};
use lightbnb_db::BookingStore;
use tracing::debug;

use super::Context;
use crate::output::{write_properties, write_property, write_query};

#[derive(Parser, Debug)]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// Search properties, cheapest first
    List(ListArgs),
    /// Add a property from a JSON file
    Add {
        /// JSON object with the property's columns (`-` for stdin)
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// City substring (case-sensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub min_price: Option<f64>,

    /// Maximum nightly price in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub max_price: Option<f64>,

    /// Minimum average review score
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum rows to return (0-100)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Print the generated SQL and parameters instead of running it
    #[arg(long)]
    pub print_sql: bool,
}

impl ListArgs {
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

pub async fn run_properties(args: PropertiesArgs, ctx: &Context) -> Result<()> {
    let mut stdout = io::stdout();

    // --print-sql never touches the database
    if let PropertiesCommand::List(list) = &args.command {
        if list.print_sql {
            let query = build_property_query(&list.filter(), ctx.config.limit(list.limit));
            return write_query(&mut stdout, &query, ctx.format);
        }
    }

    let store = ctx.connect().await?;
    execute(&store, args.command, ctx, &mut stdout).await
}

pub async fn execute<S: BookingStore + ?Sized>(
    store: &S,
    command: PropertiesCommand,
    ctx: &Context,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        PropertiesCommand::List(list) => {
            let filter = list.filter();
            let limit = ctx.config.limit(list.limit);
            debug!(?filter, limit = limit.get(), "searching properties");

            let listings = store
                .get_all_properties(&filter, limit)
                .await
                .context("Failed to search properties")?;
            write_properties(out, &listings, ctx.format)
        }
        PropertiesCommand::Add { from } => {
            let property = read_new_property(&from)?;
            let created = store
                .add_property(&property)
                .await
                .context("Failed to add property")?;
            write_property(out, &created, ctx.format)
        }
    }
}

fn read_new_property(path: &Path) -> Result<NewProperty> {
    let contents = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("Failed to read property from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid property JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{new_property, FakeStore};
    use crate::output::OutputFormat;

    fn ctx() -> Context {
        Context::default()
    }

    #[test]
    fn list_args_map_to_filter() {
        let args = ListArgs {
            city: Some("Van".into()),
            owner_id: Some(3),
            min_price: Some(50.0),
            max_price: Some(250.5),
            min_rating: Some(4.0),
            ..Default::default()
        };
        let filter = args.filter();
        assert_eq!(filter.city(), Some("Van"));
        assert_eq!(filter.owner_id(), Some(3));
        assert_eq!(filter.minimum_price_per_night(), Some(50.0));
        assert_eq!(filter.maximum_price_per_night(), Some(250.5));
        assert_eq!(filter.minimum_rating(), Some(4.0));
    }

    #[tokio::test]
    async fn add_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("property.json");
        let json = serde_json::to_string(&new_property(1, "Speed lamp", 93061)).unwrap();
        std::fs::write(&path, json).unwrap();

        let store = FakeStore::default();
        let mut out = Vec::new();
        execute(&store, PropertiesCommand::Add { from: path }, &ctx(), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("$930.61/night"));
        assert!(text.contains("Speed lamp"));
        assert_eq!(store.properties.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn add_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"title": "no owner"}"#).unwrap();

        let store = FakeStore::default();
        let err = execute(&store, PropertiesCommand::Add { from: path }, &ctx(), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid property JSON"));
        assert!(store.properties.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_owner_and_limits() {
        let store = FakeStore::default();
        for (owner, title) in [(1, "a"), (2, "b"), (1, "c"), (1, "d")] {
            store.add_property(&new_property(owner, title, 100)).await.unwrap();
        }

        let list = ListArgs {
            owner_id: Some(1),
            limit: Some(2),
            ..Default::default()
        };
        let json = Context {
            format: OutputFormat::Json,
            ..ctx()
        };
        let mut out = Vec::new();
        execute(&store, PropertiesCommand::List(list), &json, &mut out)
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let titles: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let store = FakeStore::default();
        let mut out = Vec::new();
        execute(
            &store,
            PropertiesCommand::List(ListArgs::default()),
            &ctx(),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No properties found\n");
    }
}
