use crate::api::models::ParticipantDto;

/// One player's numbers from one match, ready to be folded.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSample {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub gold_earned: i64,
    pub damage_dealt: i64,
    pub vision_score: i64,
    pub double_kills: i64,
    pub triple_kills: i64,
    pub quadra_kills: i64,
    pub penta_kills: i64,
    pub spell_casts: [i64; 4],
    /// Lane minions plus both jungles.
    pub minions: i64,
    pub minions_per_minute: f64,
    /// Seconds.
    pub game_duration: i64,
    /// Seconds.
    pub time_dead: i64,
    pub win: bool,
}

impl MatchSample {
    pub fn from_participant(participant: &ParticipantDto, game_duration: i64) -> Self {
        let minions = participant.total_minions_killed
            + participant.total_ally_jungle_minions_killed
            + participant.total_enemy_jungle_minions_killed;

        let minutes = game_duration as f64 / 60.0;
        let minions_per_minute = if minutes > 0.0 {
            minions as f64 / minutes
        } else {
            0.0
        };

        MatchSample {
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            gold_earned: participant.gold_earned,
            damage_dealt: participant.total_damage_dealt_to_champions,
            vision_score: participant.vision_score,
            double_kills: participant.double_kills,
            triple_kills: participant.triple_kills,
            quadra_kills: participant.quadra_kills,
            penta_kills: participant.penta_kills,
            spell_casts: [
                participant.spell1_casts,
                participant.spell2_casts,
                participant.spell3_casts,
                participant.spell4_casts,
            ],
            minions,
            minions_per_minute,
            game_duration,
            time_dead: participant.total_time_spent_dead,
            win: participant.win,
        }
    }
}

/// Running totals and high scores ("hs_") over every match folded into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsNode {
    pub games_played: u32,
    pub wins: u32,

    pub total_kills: i64,
    pub total_deaths: i64,
    pub total_assists: i64,
    pub total_gold_earned: i64,
    pub total_damage_dealt: i64,
    pub total_double_kills: i64,
    pub total_triple_kills: i64,
    pub total_quadra_kills: i64,
    pub total_penta_kills: i64,
    pub total_spell_casts: [i64; 4],
    pub total_minions: i64,
    pub total_game_duration: i64,
    pub total_time_dead: i64,

    pub hs_kills: i64,
    pub hs_deaths: i64,
    pub hs_assists: i64,
    pub hs_gold_earned: i64,
    pub hs_damage_dealt: i64,
    pub hs_vision_score: i64,
    pub hs_minions: i64,
    pub hs_minions_per_minute: f64,
    pub hs_game_duration: i64,
    pub hs_time_dead: i64,
}

impl StatsNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: &MatchSample) {
        self.hs_kills = self.hs_kills.max(sample.kills);
        self.hs_deaths = self.hs_deaths.max(sample.deaths);
        self.hs_assists = self.hs_assists.max(sample.assists);
        self.hs_gold_earned = self.hs_gold_earned.max(sample.gold_earned);
        self.hs_damage_dealt = self.hs_damage_dealt.max(sample.damage_dealt);
        self.hs_vision_score = self.hs_vision_score.max(sample.vision_score);
        self.hs_minions = self.hs_minions.max(sample.minions);
        self.hs_minions_per_minute = self.hs_minions_per_minute.max(sample.minions_per_minute);
        self.hs_game_duration = self.hs_game_duration.max(sample.game_duration);
        self.hs_time_dead = self.hs_time_dead.max(sample.time_dead);

        self.total_kills += sample.kills;
        self.total_deaths += sample.deaths;
        self.total_assists += sample.assists;
        self.total_gold_earned += sample.gold_earned;
        self.total_damage_dealt += sample.damage_dealt;
        self.total_double_kills += sample.double_kills;
        self.total_triple_kills += sample.triple_kills;
        self.total_quadra_kills += sample.quadra_kills;
        self.total_penta_kills += sample.penta_kills;
        for (total, casts) in self.total_spell_casts.iter_mut().zip(sample.spell_casts) {
            *total += casts;
        }
        self.total_minions += sample.minions;
        self.total_game_duration += sample.game_duration;
        self.total_time_dead += sample.time_dead;

        self.games_played += 1;
        if sample.win {
            self.wins += 1;
        }
    }

    /// Folds one sample into the mode, champion and role nodes of a match.
    pub fn record_all(nodes: [&mut StatsNode; 3], sample: &MatchSample) {
        for node in nodes {
            node.record(sample);
        }
    }

    /// (kills + assists) / deaths, or `None` for a deathless record.
    pub fn kda(&self) -> Option<f64> {
        if self.total_deaths == 0 {
            None
        } else {
            Some((self.total_kills + self.total_assists) as f64 / self.total_deaths as f64)
        }
    }

    pub fn losses(&self) -> u32 {
        self.games_played - self.wins
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }

    pub fn total_ability_casts(&self) -> i64 {
        self.total_spell_casts.iter().sum()
    }

    pub fn average_minions_per_minute(&self) -> f64 {
        if self.total_game_duration == 0 {
            0.0
        } else {
            self.total_minions as f64 / (self.total_game_duration as f64 / 60.0)
        }
    }

    pub fn per_game(&self, total: i64) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            total as f64 / self.games_played as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(kills: i64, deaths: i64, assists: i64) -> ParticipantDto {
        ParticipantDto {
            puuid: "P".to_string(),
            kills,
            deaths,
            assists,
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_counts_both_jungles_in_minions() {
        let p = ParticipantDto {
            total_minions_killed: 150,
            total_ally_jungle_minions_killed: 20,
            total_enemy_jungle_minions_killed: 10,
            ..participant(0, 0, 0)
        };

        let sample = MatchSample::from_participant(&p, 1800);
        assert_eq!(sample.minions, 180);
        assert!((sample.minions_per_minute - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_duration_game_has_no_minion_rate() {
        let p = ParticipantDto {
            total_minions_killed: 5,
            ..participant(0, 0, 0)
        };
        let sample = MatchSample::from_participant(&p, 0);
        assert_eq!(sample.minions_per_minute, 0.0);
    }

    #[test]
    fn test_record_sums_and_maxes() {
        let mut node = StatsNode::new();
        let mut first = MatchSample::from_participant(&participant(10, 2, 5), 1500);
        first.win = true;
        first.spell_casts = [100, 50, 40, 5];
        let mut second = MatchSample::from_participant(&participant(4, 6, 12), 2100);
        second.spell_casts = [80, 60, 30, 7];

        node.record(&first);
        node.record(&second);

        assert_eq!(node.games_played, 2);
        assert_eq!(node.wins, 1);
        assert_eq!(node.losses(), 1);
        assert_eq!(node.total_kills, 14);
        assert_eq!(node.total_deaths, 8);
        assert_eq!(node.total_assists, 17);
        assert_eq!(node.hs_kills, 10);
        assert_eq!(node.hs_deaths, 6);
        assert_eq!(node.hs_assists, 12);
        assert_eq!(node.total_game_duration, 3600);
        assert_eq!(node.hs_game_duration, 2100);
        assert_eq!(node.total_spell_casts, [180, 110, 70, 12]);
        assert_eq!(node.total_ability_casts(), 372);
        assert_eq!(node.per_game(node.total_kills), 7.0);
    }

    fn full_sample(seed: i64, minions_per_minute: f64, win: bool) -> MatchSample {
        MatchSample {
            kills: seed,
            deaths: seed + 1,
            assists: seed + 2,
            gold_earned: seed * 1000,
            damage_dealt: seed * 5000,
            vision_score: seed * 3,
            double_kills: seed,
            triple_kills: seed * 2,
            quadra_kills: seed * 3,
            penta_kills: seed * 4,
            spell_casts: [seed, seed * 10, seed * 100, seed * 1000],
            minions: seed * 50,
            minions_per_minute,
            game_duration: 600 + seed * 100,
            time_dead: seed * 7,
            win,
        }
    }

    #[test]
    fn test_record_tracks_every_total_and_high_score() {
        let mut node = StatsNode::new();
        // Best minion rate comes from the shortest game, not the biggest haul.
        node.record(&full_sample(2, 9.5, true));
        node.record(&full_sample(5, 4.0, false));
        node.record(&full_sample(3, 6.25, true));

        assert_eq!(node.games_played, 3);
        assert_eq!(node.wins, 2);

        assert_eq!(node.total_kills, 10);
        assert_eq!(node.total_deaths, 13);
        assert_eq!(node.total_assists, 16);
        assert_eq!(node.total_gold_earned, 10_000);
        assert_eq!(node.total_damage_dealt, 50_000);
        assert_eq!(node.total_double_kills, 10);
        assert_eq!(node.total_triple_kills, 20);
        assert_eq!(node.total_quadra_kills, 30);
        assert_eq!(node.total_penta_kills, 40);
        assert_eq!(node.total_spell_casts, [10, 100, 1000, 10_000]);
        assert_eq!(node.total_minions, 500);
        assert_eq!(node.total_game_duration, 2800);
        assert_eq!(node.total_time_dead, 70);

        assert_eq!(node.hs_kills, 5);
        assert_eq!(node.hs_deaths, 6);
        assert_eq!(node.hs_assists, 7);
        assert_eq!(node.hs_gold_earned, 5000);
        assert_eq!(node.hs_damage_dealt, 25_000);
        assert_eq!(node.hs_vision_score, 15);
        assert_eq!(node.hs_minions, 250);
        assert_eq!(node.hs_minions_per_minute, 9.5);
        assert_eq!(node.hs_game_duration, 1100);
        assert_eq!(node.hs_time_dead, 35);
    }

    #[test]
    fn test_record_all_updates_every_node() {
        let mut mode = StatsNode::new();
        let mut champion = StatsNode::new();
        let mut role = StatsNode::new();
        let sample = MatchSample::from_participant(&participant(3, 1, 4), 1200);

        StatsNode::record_all([&mut mode, &mut champion, &mut role], &sample);

        assert_eq!(mode, champion);
        assert_eq!(champion, role);
        assert_eq!(mode.total_kills, 3);
    }

    #[test]
    fn test_kda_guards_zero_deaths() {
        let mut node = StatsNode::new();
        assert_eq!(node.kda(), None);

        node.record(&MatchSample::from_participant(&participant(5, 0, 7), 1200));
        assert_eq!(node.kda(), None);

        node.record(&MatchSample::from_participant(&participant(1, 4, 3), 1200));
        assert_eq!(node.kda(), Some(4.0));
    }

    #[test]
    fn test_rates_on_empty_node() {
        let node = StatsNode::new();
        assert_eq!(node.win_rate(), 0.0);
        assert_eq!(node.average_minions_per_minute(), 0.0);
        assert_eq!(node.per_game(10), 0.0);
    }
}
