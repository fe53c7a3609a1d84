use super::stats_node::{MatchSample, StatsNode};
use crate::api::models::{MatchDto, MatchInfo};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

/// Groups matches by (game mode, game type, queue id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeKey {
    pub game_mode: String,
    pub game_type: String,
    pub queue_id: i32,
}

impl ModeKey {
    pub fn new(game_mode: &str, game_type: &str, queue_id: i32) -> Self {
        ModeKey {
            game_mode: game_mode.to_string(),
            game_type: game_type.to_string(),
            queue_id,
        }
    }

    pub fn of(info: &MatchInfo) -> Self {
        Self::new(&info.game_mode, &info.game_type, info.queue_id)
    }
}

impl fmt::Display for ModeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} (queue {})", self.game_mode, self.game_type, self.queue_id)
    }
}

/// Mode-level totals plus per-champion and per-role breakdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeStats {
    pub totals: StatsNode,
    pub champions: BTreeMap<String, StatsNode>,
    pub roles: BTreeMap<String, StatsNode>,
}

impl ModeStats {
    fn record(&mut self, champion: &str, role: &str, sample: &MatchSample) {
        let champion_node = self.champions.entry(champion.to_string()).or_default();
        let role_node = self.roles.entry(role.to_string()).or_default();
        StatsNode::record_all([&mut self.totals, champion_node, role_node], sample);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    Folded,
    ParticipantMissing,
    AlreadyFolded,
}

/// Counts for one call to [`AggregationTree::fold`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldSummary {
    pub folded: usize,
    pub skipped_missing_participant: usize,
    pub skipped_duplicate: usize,
}

#[derive(Debug, Default)]
pub struct AggregationTree {
    modes: BTreeMap<ModeKey, ModeStats>,
    folded_ids: HashSet<String>,
    skipped_missing_participant: usize,
    skipped_duplicate: usize,
}

impl AggregationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, records: &[MatchDto], puuid: &str) -> FoldSummary {
        let mut summary = FoldSummary::default();
        for record in records {
            match self.fold_match(record, puuid) {
                FoldOutcome::Folded => summary.folded += 1,
                FoldOutcome::ParticipantMissing => summary.skipped_missing_participant += 1,
                FoldOutcome::AlreadyFolded => summary.skipped_duplicate += 1,
            }
        }
        summary
    }

    /// Folds one match into its mode, champion and role nodes.
    ///
    /// Matches are keyed by id; a second fold of the same id is a no-op.
    pub fn fold_match(&mut self, record: &MatchDto, puuid: &str) -> FoldOutcome {
        let match_id = match_identity(record);
        if self.folded_ids.contains(&match_id) {
            self.skipped_duplicate += 1;
            debug!(match_id = %match_id, "match already folded");
            return FoldOutcome::AlreadyFolded;
        }

        let Some(participant) = record.participant(puuid) else {
            self.skipped_missing_participant += 1;
            debug!(match_id = %match_id, "player not in match, skipping");
            return FoldOutcome::ParticipantMissing;
        };

        let sample = MatchSample::from_participant(participant, record.info.game_duration);
        self.modes
            .entry(ModeKey::of(&record.info))
            .or_default()
            .record(&participant.champion_name, participant.role_key(), &sample);

        self.folded_ids.insert(match_id);
        FoldOutcome::Folded
    }

    pub fn modes(&self) -> &BTreeMap<ModeKey, ModeStats> {
        &self.modes
    }

    pub fn mode(&self, key: &ModeKey) -> Option<&ModeStats> {
        self.modes.get(key)
    }

    pub fn folded_count(&self) -> usize {
        self.folded_ids.len()
    }

    pub fn skipped_missing_participant(&self) -> usize {
        self.skipped_missing_participant
    }

    pub fn skipped_duplicate(&self) -> usize {
        self.skipped_duplicate
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

// The listing id when present, the numeric game id otherwise.
fn match_identity(record: &MatchDto) -> String {
    if record.metadata.match_id.is_empty() {
        format!("game:{}", record.info.game_id)
    } else {
        record.metadata.match_id.clone()
    }
}
