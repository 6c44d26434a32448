use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedResource {
    pub name: String,
}

/// Paged index of a resource, e.g. `pokemon?limit=898`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedResourceList {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: PokemonSprites,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PokemonSprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

impl Pokemon {
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectEntry {
    pub effect: String,
    pub language: Option<NamedResource>,
}

/// Pick the English entry when the API provides several languages.
pub fn english_effect(entries: &[EffectEntry]) -> Option<&str> {
    entries
        .iter()
        .find(|e| e.language.as_ref().map(|l| l.name == "en").unwrap_or(false))
        .or_else(|| entries.first())
        .map(|e| e.effect.as_str())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub sprites: ItemSprites,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    pub category: NamedResource,
    pub fling_power: Option<u32>,
    pub fling_effect: Option<NamedResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSprites {
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub pokemon: Vec<AbilityPokemon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityPokemon {
    pub pokemon: NamedResource,
}

/// Type matchups for one species, from the effectiveness list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effectiveness {
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_deserializes_pokeapi_shape() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "sprites": {"front_default": "https://img/25.png", "back_default": null},
            "types": [{"slot": 1, "type": {"name": "electric", "url": "x"}}],
            "stats": [{"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "x"}}]
        }"#;
        let pokemon: Pokemon = serde_json::from_str(json).unwrap();
        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.type_names(), vec!["electric"]);
        assert_eq!(pokemon.stats[0].base_stat, 90);
    }

    #[test]
    fn test_english_effect_prefers_en() {
        let entries = vec![
            EffectEntry {
                effect: "Wirkung".to_string(),
                language: Some(NamedResource { name: "de".to_string() }),
            },
            EffectEntry {
                effect: "Effect".to_string(),
                language: Some(NamedResource { name: "en".to_string() }),
            },
        ];
        assert_eq!(english_effect(&entries), Some("Effect"));
        assert_eq!(english_effect(&[]), None);
    }
}
