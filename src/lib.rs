pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod schedule;
pub mod services;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, OverrideArgs};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let mut log_level = config.general.log_level.clone();
    if config.general.suppress_connection_errors {
        log_level.push_str(",reqwest::retry=off,hyper_util=off");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Created config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }

        Commands::Add {
            title,
            mal_id,
            anilist_id,
            season,
            status,
        } => cli::cmd_add_item(&config, &title.join(" "), mal_id, anilist_id, season, status).await,

        Commands::List { season } => cli::cmd_list_items(&config, season).await,

        Commands::Show { id } => cli::cmd_show_item(&config, id).await,

        Commands::Today { timezone } => cli::cmd_today(&config, timezone.as_deref()).await,

        Commands::Link {
            id,
            mal_id,
            anilist_id,
        } => cli::cmd_link_item(&config, id, mal_id, anilist_id).await,

        Commands::Override(OverrideArgs {
            id,
            day,
            time,
            timezone,
            clear,
        }) => match (day, time) {
            (Some(day), Some(time)) if !clear => {
                cli::cmd_set_override(&config, id, &day, &time, timezone.as_deref()).await
            }
            _ => cli::cmd_clear_override(&config, id).await,
        },

        Commands::Schedule { id, enable, .. } => {
            cli::cmd_set_schedule_active(&config, id, enable).await
        }

        Commands::Search { query, provider } => {
            cli::cmd_search(&config, &query.join(" "), provider).await
        }

        Commands::Remove { id } => cli::cmd_remove_item(&config, id).await,
    }
}
