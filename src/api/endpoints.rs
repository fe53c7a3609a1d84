// URL builders for the Riot endpoints the tool consumes

pub const ACCOUNT_PATH: &str = "riot/account/v1/accounts/by-riot-id";
pub const MATCH_IDS_PATH: &str = "lol/match/v5/matches/by-puuid";
pub const MATCH_PATH: &str = "lol/match/v5/matches";

/// Regional routing value that serves account and match data for a platform.
pub fn regional_routing(region: &str) -> &'static str {
    match region.to_ascii_lowercase().as_str() {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas", // default
    }
}

pub fn routing_base_url(region: &str) -> String {
    format!("https://{}.api.riotgames.com", regional_routing(region))
}

// Riot IDs may contain spaces and non-ASCII letters.
pub fn account_url(base: &str, game_name: &str, tag_line: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        base,
        ACCOUNT_PATH,
        urlencoding::encode(game_name),
        urlencoding::encode(tag_line)
    )
}

pub fn match_ids_url(
    base: &str,
    puuid: &str,
    start: usize,
    count: usize,
    start_time: Option<i64>,
    end_time: Option<i64>,
) -> String {
    let mut url = format!(
        "{}/{}/{}/ids?start={}&count={}",
        base, MATCH_IDS_PATH, puuid, start, count
    );
    if let Some(start_time) = start_time {
        url.push_str(&format!("&startTime={}", start_time));
    }
    if let Some(end_time) = end_time {
        url.push_str(&format!("&endTime={}", end_time));
    }
    url
}

pub fn match_url(base: &str, match_id: &str) -> String {
    format!("{}/{}/{}", base, MATCH_PATH, match_id)
}
