use serde::Deserialize;

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// Match V5 response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MatchDto {
    pub metadata: MatchMetadata,
    pub info: MatchInfo,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub game_mode: String,
    pub game_type: String,
    #[serde(default)]
    pub queue_id: i32,
    #[serde(default)]
    pub game_id: i64,
    /// Seconds.
    pub game_duration: i64,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

/// Per-player statistics of one match. Absent counters decode as zero.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub win: bool,
    pub role: String,                // SOLO, DUO, CARRY, SUPPORT, NONE
    pub individual_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub double_kills: i64,
    pub triple_kills: i64,
    pub quadra_kills: i64,
    pub penta_kills: i64,
    pub gold_earned: i64,
    pub total_damage_dealt_to_champions: i64,
    pub vision_score: i64,
    pub total_time_spent_dead: i64,
    pub spell1_casts: i64,
    pub spell2_casts: i64,
    pub spell3_casts: i64,
    pub spell4_casts: i64,
    pub total_minions_killed: i64,
    pub total_ally_jungle_minions_killed: i64,
    pub total_enemy_jungle_minions_killed: i64,
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    /// Both the metadata roster and the stats list must be populated.
    pub fn has_participants(&self) -> bool {
        !self.metadata.participants.is_empty() && !self.info.participants.is_empty()
    }
}

impl ParticipantDto {
    /// Lane position when the API assigned one, otherwise the raw role.
    pub fn role_key(&self) -> &str {
        match self.individual_position.as_str() {
            "" | "Invalid" => &self.role,
            position => position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_decodes_consumed_fields() {
        let body = json!({
            "metadata": {
                "dataVersion": "2",
                "matchId": "EUW1_7000000001",
                "participants": ["puuid-a", "puuid-b"]
            },
            "info": {
                "gameMode": "ARAM",
                "gameType": "MATCHED_GAME",
                "queueId": 450,
                "gameId": 7000000001i64,
                "gameDuration": 1260,
                "participants": [
                    {
                        "puuid": "puuid-a",
                        "championName": "Ahri",
                        "individualPosition": "MIDDLE",
                        "role": "SOLO",
                        "kills": 11,
                        "deaths": 3,
                        "assists": 20,
                        "pentaKills": 1,
                        "spell1Casts": 120,
                        "spell4Casts": 9,
                        "totalDamageDealtToChampions": 31000,
                        "totalMinionsKilled": 40,
                        "totalAllyJungleMinionsKilled": 2,
                        "totalEnemyJungleMinionsKilled": 1,
                        "win": true,
                        "someFieldWeIgnore": {"nested": true}
                    },
                    { "puuid": "puuid-b", "championName": "Zed" }
                ]
            }
        });

        let parsed: MatchDto = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.metadata.match_id, "EUW1_7000000001");
        assert_eq!(parsed.info.queue_id, 450);
        assert_eq!(parsed.info.game_duration, 1260);
        assert!(parsed.has_participants());

        let ahri = parsed.participant("puuid-a").unwrap();
        assert_eq!(ahri.kills, 11);
        assert_eq!(ahri.penta_kills, 1);
        assert_eq!(ahri.spell4_casts, 9);
        assert_eq!(ahri.total_damage_dealt_to_champions, 31000);
        assert!(ahri.win);

        let zed = parsed.participant("puuid-b").unwrap();
        assert_eq!(zed.kills, 0);
        assert!(!zed.win);
        assert!(parsed.participant("puuid-c").is_none());
    }

    #[test]
    fn test_empty_roster_is_reported() {
        let parsed: MatchDto = serde_json::from_value(json!({
            "metadata": { "participants": [] },
            "info": { "gameMode": "CLASSIC", "gameType": "MATCHED_GAME", "gameDuration": 1800 }
        }))
        .unwrap();

        assert!(!parsed.has_participants());
    }

    #[test]
    fn test_role_key_prefers_position() {
        let mut participant = ParticipantDto {
            role: "CARRY".to_string(),
            individual_position: "BOTTOM".to_string(),
            ..Default::default()
        };
        assert_eq!(participant.role_key(), "BOTTOM");

        participant.individual_position = "Invalid".to_string();
        assert_eq!(participant.role_key(), "CARRY");

        participant.individual_position.clear();
        assert_eq!(participant.role_key(), "CARRY");
    }
}
