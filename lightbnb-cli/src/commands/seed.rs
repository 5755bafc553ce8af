//! `lightbnb seed` - load users and properties from JSON fixtures
//!
//! Fixture files are either an array of records or an object keyed by id:
//!
//! ```json
//! { "1": { "id": 1, "name": "Devin Sanders", "email": "...", "password": "..." } }
//! ```
//!
//! Rows are inserted one at a time and seeding stops at the first error.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use lightbnb_db::models::{NewProperty, NewUser};
use lightbnb_db::BookingStore;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::Context;

#[derive(Parser, Debug, Default)]
pub struct SeedArgs {
    /// Users fixture (JSON)
    #[arg(long, value_name = "FILE")]
    pub users: Option<PathBuf>,

    /// Properties fixture (JSON); owner ids of seeded users are remapped
    #[arg(long, value_name = "FILE")]
    pub properties: Option<PathBuf>,
}

/// A fixture file, in either shape
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Fixture<T> {
    List(Vec<T>),
    Keyed(BTreeMap<String, T>),
}

impl<T> Fixture<T> {
    /// Records in file order for lists, numeric key order for keyed objects.
    fn into_records(self) -> Vec<T> {
        match self {
            Fixture::List(records) => records,
            Fixture::Keyed(map) => {
                let mut entries: Vec<_> = map.into_iter().collect();
                entries.sort_by_key(|(key, _)| key.parse::<i64>().unwrap_or(i64::MAX));
                entries.into_iter().map(|(_, record)| record).collect()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FixtureUser {
    #[serde(default)]
    id: Option<i32>,
    name: String,
    email: String,
    password: String,
}

/// What a seed run inserted
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub properties: usize,
}

pub async fn run_seed(args: SeedArgs, ctx: &Context) -> Result<()> {
    if args.users.is_none() && args.properties.is_none() {
        bail!("Nothing to seed. Pass --users and/or --properties");
    }

    let store = ctx.connect().await?;
    let report = execute(&store, &args).await?;
    info!(users = report.users, properties = report.properties, "seed complete");

    writeln!(
        io::stdout(),
        "Seeded {} users and {} properties",
        report.users,
        report.properties
    )?;
    Ok(())
}

pub async fn execute<S: BookingStore + ?Sized>(store: &S, args: &SeedArgs) -> Result<SeedReport> {
    let mut report = SeedReport::default();
    let mut owner_ids = HashMap::new();

    if let Some(path) = &args.users {
        let users: Vec<FixtureUser> = read_fixture(path)?;
        for user in users {
            let new_user = NewUser::new(user.name, &user.email, user.password)
                .with_context(|| format!("Invalid user '{}' in {}", user.email, path.display()))?;
            let created = store.add_user(&new_user).await.with_context(|| {
                format!(
                    "Failed to add user '{}' after seeding {} users",
                    new_user.email.as_str(),
                    report.users
                )
            })?;

            if let Some(fixture_id) = user.id {
                owner_ids.insert(fixture_id, created.id);
            }
            debug!(fixture_id = ?user.id, id = created.id, "seeded user");
            report.users += 1;
        }
    }

    if let Some(path) = &args.properties {
        let properties: Vec<NewProperty> = read_fixture(path)?;
        for mut property in properties {
            if let Some(&id) = owner_ids.get(&property.owner_id) {
                property.owner_id = id;
            }
            let created = store.add_property(&property).await.with_context(|| {
                format!(
                    "Failed to add property '{}' after seeding {} users and {} properties",
                    property.title, report.users, report.properties
                )
            })?;
            debug!(id = created.id, owner_id = created.owner_id, "seeded property");
            report.properties += 1;
        }
    }

    Ok(report)
}

fn read_fixture<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixture: Fixture<T> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid fixture {}", path.display()))?;
    Ok(fixture.into_records())
}
