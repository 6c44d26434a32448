use rand::seq::SliceRandom;
use tracing::debug;

use crate::{
    commands::{Card, Oak, Reply, DEFAULT_COLOR},
    models::{Result, Tier, TrainerDbEntry},
    utils::names_match,
};

const NOT_AVAILABLE: &str = "n/a";
const LEAGUE_LOGO_URL: &str = "http://bit.ly/abp_logo";

/// Player whose name or Showdown nickname matches `query`.
pub fn find_player<'a>(players: &'a [TrainerDbEntry], query: &str) -> Option<&'a TrainerDbEntry> {
    players.iter().find(|player| {
        names_match(&player.name, query)
            || player
                .showdown
                .as_deref()
                .map_or(false, |showdown| names_match(showdown, query))
    })
}

fn or_not_available(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Contact card of one player. Colour and badge are drawn at random.
pub fn player_card(player: &TrainerDbEntry) -> Reply {
    let profile = Tier::ALL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(Tier::Straggler);

    let card = Card::new(profile.color())
        .thumbnail(profile.badge_url())
        .field("Discord", or_not_available(&player.discord), false)
        .field("Switch FC", or_not_available(&player.switch_fc), false)
        .field("Showdown", or_not_available(&player.showdown), false);

    Reply::card(format!("**__{}__**", player.name), card)
}

/// One field per player, in the given order.
pub fn players_card(players: &[&TrainerDbEntry]) -> Reply {
    let card = players.iter().fold(
        Card::new(DEFAULT_COLOR).thumbnail(LEAGUE_LOGO_URL),
        |card, player| {
            card.field(
                format!("{} - {}", player.name, or_not_available(&player.discord)),
                format!(
                    "FC: `{}` | SD: `{}`",
                    or_not_available(&player.switch_fc),
                    or_not_available(&player.showdown)
                ),
                false,
            )
        },
    );

    Reply::card("**__Players__** - Run it again to see other players...", card)
}

impl Oak {
    /// Look up one registered player, or list a random sample of them.
    pub async fn trainer_db(&self, name: Option<&str>) -> Result<Reply> {
        let players = self.sheet.trainer_db().await?;

        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(query) => Ok(match find_player(&players, query) {
                Some(player) => player_card(player),
                None => Reply::text("Trainer not found"),
            }),
            None => {
                if players.is_empty() {
                    return Ok(Reply::text("No trainers found!"));
                }

                let sample: Vec<&TrainerDbEntry> = players
                    .choose_multiple(&mut rand::thread_rng(), self.settings.ranked.trainer_db_sample_size)
                    .collect();
                debug!("Showing {} of {} players", sample.len(), players.len());
                Ok(players_card(&sample))
            }
        }
    }
}
