use serde::{Deserialize, Serialize};

/// Relay-style list wrapper used by the league backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: String,
    pub reference: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub competitors: Connection<Competitor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: String,
    pub name: Option<String>,
    pub join_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: String,
    pub discord_id: Option<String>,
    pub name: Option<String>,
    pub join_date: Option<String>,
    pub battle_counter: Option<u32>,
    pub badge_counter: Option<u32>,
    pub leagues_counter: Option<u32>,
    pub win_percentage: Option<f64>,
    pub loose_percentage: Option<f64>,
    pub lv: Option<u32>,
    pub exp: Option<u32>,
    pub next_lv: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub id: String,
    pub discord_id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub pokemon_type: Option<String>,
    pub join_date: Option<String>,
    pub battle_counter: Option<u32>,
    pub win_percentage: Option<f64>,
    pub loose_percentage: Option<f64>,
    pub lv: Option<u32>,
    pub exp: Option<u32>,
    pub next_lv: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaderRole {
    GymLeader,
    EliteFour,
    Champion,
}

impl LeaderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderRole::GymLeader => "GYM_LEADER",
            LeaderRole::EliteFour => "ELITE_FOUR",
            LeaderRole::Champion => "CHAMPION",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "gym_leader" | "gym" => Some(LeaderRole::GymLeader),
            "elite_four" | "elite" => Some(LeaderRole::EliteFour),
            "champion" => Some(LeaderRole::Champion),
            _ => None,
        }
    }
}

/// Whether a league registration enrolls a competitor or a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Trainer,
    Leader,
}

impl RegistrationKind {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-t" => Some(RegistrationKind::Trainer),
            "-l" => Some(RegistrationKind::Leader),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_deserializes_with_competitors() {
        let json = r#"{
            "id": "TGVhZ3VlOjE=",
            "reference": "Liga 2020",
            "startDate": "2020-01-01",
            "endDate": null,
            "description": null,
            "competitors": {"edges": [{"node": {"id": "1", "name": "ash", "joinDate": null}}]}
        }"#;
        let league: League = serde_json::from_str(json).unwrap();
        assert_eq!(league.reference, "Liga 2020");
        assert_eq!(league.competitors.len(), 1);
        assert_eq!(league.competitors.into_nodes()[0].name.as_deref(), Some("ash"));
    }

    #[test]
    fn test_leader_role_parsing() {
        assert_eq!(LeaderRole::from_str("gym_leader"), Some(LeaderRole::GymLeader));
        assert_eq!(LeaderRole::from_str("Elite-Four"), Some(LeaderRole::EliteFour));
        assert_eq!(LeaderRole::from_str("CHAMPION"), Some(LeaderRole::Champion));
        assert_eq!(LeaderRole::from_str("rival"), None);
        assert_eq!(
            serde_json::to_string(&LeaderRole::EliteFour).unwrap(),
            "\"ELITE_FOUR\""
        );
    }

    #[test]
    fn test_registration_flags() {
        assert_eq!(RegistrationKind::from_flag("-t"), Some(RegistrationKind::Trainer));
        assert_eq!(RegistrationKind::from_flag("-l"), Some(RegistrationKind::Leader));
        assert_eq!(RegistrationKind::from_flag("-x"), None);
    }
}
