pub mod client;
pub mod endpoints;
pub mod models;

use crate::error::AppError;
use models::{AccountDto, MatchDto};

/// Blocking access to account lookup, match listing and match detail.
pub trait MatchSource {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError>;

    /// One page of match ids, most recent first. An empty page ends the history.
    fn get_match_ids(&self, puuid: &str, start: usize, count: usize)
        -> Result<Vec<String>, AppError>;

    fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError>;
}
