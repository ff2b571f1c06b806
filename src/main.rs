#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use foodies::{
    admin::{self, ChangeList, ChangeListQuery},
    config::{database, taxonomy},
    core::taxonomy::seed_taxonomy,
    errors::Result,
};
use std::{env, path::Path};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_changelist(page: &ChangeList) {
    println!(
        "{} ({} rows, page {} of {})",
        page.model_name,
        page.total,
        page.page + 1,
        page.num_pages.max(1)
    );
    println!("{}", page.headers.join(" | "));
    for row in &page.rows {
        println!("{}", row.join(" | "));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed the taxonomy when a config file is present
    let config_path = taxonomy::config_path();
    if Path::new(&config_path).exists() {
        let config = taxonomy::load_default_config()?;
        let summary = seed_taxonomy(&db, &config)
            .await
            .inspect_err(|e| error!("Failed to seed taxonomy: {}", e))?;
        info!(
            "Seeded {} categories, {} dietary restrictions, {} cuisine types",
            summary.categories, summary.dietary_restrictions, summary.cuisine_types
        );
    } else {
        info!("No taxonomy config at {}, skipping seed", config_path);
    }

    // 5. Print the requested changelist
    let mut args = env::args().skip(1);
    let Some(model) = args.next() else {
        println!("usage: foodies <model> [search]");
        println!("models: {}", admin::MODEL_NAMES.join(", "));
        return Ok(());
    };
    let query = ChangeListQuery {
        search: args.next(),
        ..Default::default()
    };

    let page = admin::changelist_for(&model, &db, &query).await?;
    print_changelist(&page);

    Ok(())
}
