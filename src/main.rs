// src/main.rs
use std::env;

use dotenvy::dotenv;
use fire_planner::{backend, cli, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "server" {
        log::info!("starting backend server");

        let pool = database::db::connection::get_db_pool().await?;
        database::db::migrate::run_migrations(&pool).await?;
        backend::run_server(pool).await?;
    } else {
        cli::run().await?;
    }
    Ok(())
}
