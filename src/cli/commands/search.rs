use crate::cli::SearchProvider;
use crate::clients::{AnilistClient, JikanClient};
use crate::config::Config;
use crate::models::provider::SearchResult;

pub async fn cmd_search(
    config: &Config,
    query: &str,
    provider: SearchProvider,
) -> anyhow::Result<()> {
    println!("Searching for: {query}");
    println!("{:-<60}", "");

    let results = match provider {
        SearchProvider::Anilist => {
            AnilistClient::with_options(&config.providers.anilist_options())
                .search(query)
                .await?
        }
        SearchProvider::Mal => {
            JikanClient::with_options(&config.providers.jikan_options())
                .search(query)
                .await?
        }
    };

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for result in &results {
        print_result(result);
    }

    println!();
    println!("Add with: animehub add \"title\" --mal-id <MAL> --anilist-id <AniList>");

    Ok(())
}

fn print_result(result: &SearchResult) {
    let episodes = result
        .episode_count
        .map(|n| format!(" ({n} eps)"))
        .unwrap_or_default();
    let year = result.year.map(|y| format!(" [{y}]")).unwrap_or_default();

    println!("• {}{year}{episodes}", result.title);
    if let Some(english) = &result.title_english
        && english != &result.title
    {
        println!("  EN: {english}");
    }

    let mal = result
        .mal_id
        .map_or_else(|| "-".to_string(), |v| v.to_string());
    let anilist = result
        .anilist_id
        .map_or_else(|| "-".to_string(), |v| v.to_string());
    println!(
        "  Status: {} | MAL: {mal} | AniList: {anilist}",
        result.status
    );
}
