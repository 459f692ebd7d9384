// src/main.rs
//
// Bootstrap: resolve the database, make sure the schema is in place and
// report what the store holds.

use anyhow::Context;
use log::info;

use tabloid::db::{get_database_stats, verify_database_integrity};
use tabloid::{initialize_database, resolve_connection_string, ConnectionProvider, DatabaseConnector};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let connection_string =
        resolve_connection_string().context("could not resolve database location")?;
    info!("Using database at {}", connection_string);

    let connector = DatabaseConnector::new(connection_string);

    // Scoped so the connection is released before the process exits.
    let stats = {
        let conn = connector.connect().context("could not open database")?;
        initialize_database(&conn).context("schema initialization failed")?;
        verify_database_integrity(&conn)?;
        get_database_stats(&conn)?
    };

    info!(
        "{} blog(s), {} tag(s), {} post(s), {} bytes on disk",
        stats.blog_count, stats.tag_count, stats.post_count, stats.size_bytes
    );

    Ok(())
}
