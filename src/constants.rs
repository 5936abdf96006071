pub mod schedule {

    /// Zone that provider weekday/time pairs are expressed in when unset.
    pub const DEFAULT_SOURCE_TIMEZONE: &str = "Asia/Tokyo";

    /// Label used for unconverted fallback strings.
    pub const DEFAULT_SOURCE_LABEL: &str = "JST";
}

pub mod providers {
    use std::time::Duration;

    pub const ANILIST_API: &str = "https://graphql.anilist.co";

    pub const JIKAN_API: &str = "https://api.jikan.moe/v4";

    pub const USER_AGENT: &str = "AnimeHub/1.0";

    /// Delay before the single retry after an HTTP 429.
    pub const RATE_LIMIT_RETRY_DELAY: Duration = Duration::from_millis(1000);

    /// Minimum spacing between Jikan requests from one client.
    pub const JIKAN_REQUEST_INTERVAL: Duration = Duration::from_millis(350);

    /// Upcoming airings fetched alongside `nextAiringEpisode`.
    pub const UPCOMING_EPISODES: i32 = 5;
}

pub mod limits {

    pub const MAX_SEARCH_RESULTS: usize = 10;
}
