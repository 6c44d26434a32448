use rand::Rng;
use tracing::{debug, warn};

use crate::{
    commands::{Oak, Reply},
    models::{english_effect, Ability, Effectiveness, Item, Pokemon, Result},
    utils::{capitalize, closest_matches},
};

pub const UNKNOWN_POKEMON: &str = "Pokémon not registered in the PokeDex.";
pub const UNKNOWN_ITEM: &str = "Unknown item.";
pub const UNKNOWN_ABILITY: &str = "Unknown ability.";
pub const UNKNOWN_EFFECTIVENESS: &str = "Unknown effectiveness data!";

const MAX_SUGGESTIONS: usize = 3;
const SUGGESTION_CUTOFF: f64 = 0.6;

/// Attacking types a defender with `types` takes no damage from.
pub fn immunities(types: &[String]) -> Vec<&'static str> {
    static IMMUNITIES: [(&str, &[&str]); 7] = [
        ("ghost", &["fighting", "normal"]),
        ("dark", &["psychic"]),
        ("fairy", &["dragon"]),
        ("steel", &["poison"]),
        ("flying", &["ground"]),
        ("normal", &["ghost"]),
        ("ground", &["electric"]),
    ];

    IMMUNITIES
        .iter()
        .filter(|(defender, _)| types.iter().any(|t| t.eq_ignore_ascii_case(defender)))
        .flat_map(|(_, immune_to)| immune_to.iter().copied())
        .collect()
}

pub fn format_effectiveness(effectiveness: Option<&Effectiveness>) -> String {
    match effectiveness {
        None => UNKNOWN_EFFECTIVENESS.to_string(),
        Some(data) => format!(
            "Weakness: {}\nResistance: {}\nImmune: {}",
            data.weaknesses.join(", "),
            data.strengths.join(", "),
            immunities(&data.types).join(", ")
        ),
    }
}

/// Dex miss answer, naming the closest known pokemon when there are any.
pub fn unknown_pokemon(name: &str, known: &[String]) -> String {
    let suggestions = closest_matches(name, known, MAX_SUGGESTIONS, SUGGESTION_CUTOFF);
    if suggestions.is_empty() {
        UNKNOWN_POKEMON.to_string()
    } else {
        format!("{}\nMaybe you meant: {}", UNKNOWN_POKEMON, suggestions.join(", "))
    }
}

pub fn format_dex(pokemon: &Pokemon, effectiveness: Option<&Effectiveness>) -> String {
    let stats = pokemon
        .stats
        .iter()
        .map(|s| format!("{} :{}", s.stat.name, s.base_stat))
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::new();
    if let Some(sprite) = &pokemon.sprites.front_default {
        out.push_str(sprite);
        out.push_str(" \n");
    }
    out.push_str(&format!(
        "Name: {}\nPokedex: {}\nType: {}\nHeight: {} Weight: {}\n",
        capitalize(&pokemon.name),
        pokemon.id,
        pokemon.type_names().join(", "),
        pokemon.height,
        pokemon.weight
    ));
    out.push_str(&format!("\nBase Stats:\n{} \n", stats));
    out.push_str(&format_effectiveness(effectiveness));
    out
}

pub fn format_item(item: &Item) -> String {
    let fling_effect = item
        .fling_effect
        .as_ref()
        .map(|e| e.name.as_str())
        .unwrap_or("None");
    let fling_power = item
        .fling_power
        .map(|p| p.to_string())
        .unwrap_or_else(|| "None".to_string());

    format!(
        "{}\nName: {}\nEffect: \n{}\n\nCategory: {}\nFling effect: {}\nFling Power: {}\n",
        item.sprites.default.as_deref().unwrap_or(""),
        capitalize(&item.name),
        english_effect(&item.effect_entries).unwrap_or(""),
        capitalize(&item.category.name),
        fling_effect,
        fling_power
    )
}

pub fn format_ability(ability: &Ability) -> String {
    let pokemon = ability
        .pokemon
        .iter()
        .map(|p| capitalize(&p.pokemon.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\nName: {}\nEffect: {}\n\nAbility found in the following Pokémon:\n{}",
        capitalize(&ability.name),
        english_effect(&ability.effect_entries).unwrap_or(""),
        pokemon
    )
}

impl Oak {
    pub async fn dex(&self, name: &str) -> Result<Reply> {
        match self.reference.pokemon(name).await? {
            Some(pokemon) => self.dex_reply(&pokemon).await,
            None => {
                let known = self.reference.pokemon_names().await.unwrap_or_else(|e| {
                    warn!("Failed to load pokemon names: {}", e);
                    Vec::new()
                });
                Ok(Reply::text(unknown_pokemon(name, &known)))
            }
        }
    }

    pub async fn random_pokemon(&self) -> Result<Reply> {
        let dex_number = rand::thread_rng().gen_range(1..=self.reference.max_dex_number());
        debug!("Picked dex number {}", dex_number);

        match self.reference.pokemon_by_dex(dex_number).await? {
            Some(pokemon) => self.dex_reply(&pokemon).await,
            None => Ok(Reply::text(UNKNOWN_POKEMON)),
        }
    }

    async fn dex_reply(&self, pokemon: &Pokemon) -> Result<Reply> {
        let effectiveness = self.reference.effectiveness(pokemon.id).await;
        Ok(Reply::text(format_dex(pokemon, effectiveness.as_ref())))
    }

    pub async fn item(&self, name: &str) -> Result<Reply> {
        Ok(Reply::text(match self.reference.item(name).await? {
            Some(item) => format_item(&item),
            None => UNKNOWN_ITEM.to_string(),
        }))
    }

    pub async fn ability(&self, name: &str) -> Result<Reply> {
        Ok(Reply::text(match self.reference.ability(name).await? {
            Some(ability) => format_ability(&ability),
            None => UNKNOWN_ABILITY.to_string(),
        }))
    }
}
