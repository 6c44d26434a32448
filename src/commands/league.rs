use rand::seq::SliceRandom;
use tracing::error;

use crate::{
    commands::{permission_denied, Card, Invocation, Oak, Reply},
    models::{LeaderRole, League, OakError, RegistrationKind, Result},
};

const LEAGUE_LOGO: &str = "http://bit.ly/abp_logo";
const TRY_AGAIN: &str = "Sorry, I could not process this operation.\nPlease try again later";

/// Whether `value` is a chat user mention such as `<@1234>` or `<@!1234>`.
pub fn is_user_mention(value: &str) -> bool {
    value
        .strip_prefix("<@")
        .and_then(|rest| rest.strip_suffix('>'))
        .map(|id| id.strip_prefix('!').unwrap_or(id))
        .map(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

fn usage(title: &str, examples: &[&str]) -> Reply {
    let card = examples
        .iter()
        .enumerate()
        .fold(Card::default(), |card, (i, example)| {
            let name = if examples.len() == 1 {
                "Example".to_string()
            } else {
                format!("Example {}", i + 1)
            };
            card.field(name, format!("`{}`", example), false)
        });
    Reply::card(title, card)
}

/// Friendly reply for a failed registration; unexpected errors are logged.
fn registration_failure(err: OakError, already: &str) -> Reply {
    match err {
        OakError::AlreadyRegistered(_) => Reply::text(already),
        OakError::NotFound(_) => Reply::text("This user is not registered!\n\nHint: `/help new_trainer`"),
        other => {
            error!("Registration failed: {}", other);
            Reply::text(TRY_AGAIN)
        }
    }
}

fn league_summary(league: &League) -> String {
    format!(
        "ID: `{}` | Dates: `{}` to `{}`\n`{}`",
        league.id,
        league.start_date.as_deref().unwrap_or("?"),
        league.end_date.as_deref().unwrap_or("?"),
        league.description.as_deref().unwrap_or("No description")
    )
}

impl Oak {
    pub async fn view_leagues(&self, league_id: Option<&str>) -> Result<Reply> {
        let Some(id) = league_id else {
            let leagues = self.backend.leagues(None).await?;
            let card = leagues
                .iter()
                .fold(Card::default().thumbnail(LEAGUE_LOGO), |card, league| {
                    card.field(&league.reference, league_summary(league), false)
                });
            return Ok(Reply::card("Pokémon Leagues", card));
        };

        let leagues = self.backend.leagues(Some(id)).await?;
        let Some(league) = leagues.into_iter().next() else {
            return Ok(Reply::text(format!("League not found: {}", id)));
        };

        let card = Card::default()
            .thumbnail(LEAGUE_LOGO)
            .field("ID", &league.id, true)
            .field("Reference", &league.reference, true)
            .field("Start", league.start_date.as_deref().unwrap_or("?"), true)
            .field("End", league.end_date.as_deref().unwrap_or("?"), true)
            .field("Competitors", league.competitors.len(), false);
        Ok(Reply::card("Here it is", card))
    }

    /// Admins register anyone; everybody else may only register themselves.
    pub async fn new_trainer(&self, invocation: &Invocation, discord_id: Option<&str>) -> Result<Reply> {
        let Some(discord_id) = discord_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(usage("Please mention the trainer to register!", &["/new_trainer @username"]));
        };

        if !self.is_admin(invocation) && discord_id != invocation.mention() {
            return Ok(permission_denied("register a trainer"));
        }

        if !is_user_mention(discord_id) {
            return Ok(Reply::text("Invalid trainer!"));
        }

        let trainer = match self.backend.create_trainer(discord_id).await {
            Ok(trainer) => trainer,
            Err(e) => return Ok(registration_failure(e, "This trainer is already registered!")),
        };

        let card = Card::default()
            .field("Discord ID:", trainer.discord_id.as_deref().unwrap_or(discord_id), true)
            .field("Name:", trainer.name.as_deref().unwrap_or("?"), true)
            .field("Registered:", trainer.join_date.as_deref().unwrap_or("?"), false)
            .field("Lv:", display_or_unknown(trainer.lv), true)
            .field("Next:", display_or_unknown(trainer.next_lv), true)
            .field("Exp.:", display_or_unknown(trainer.exp), true)
            .field("Battles:", display_or_unknown(trainer.battle_counter), true)
            .field("Badges:", display_or_unknown(trainer.badge_counter), true)
            .field("Leagues:", display_or_unknown(trainer.leagues_counter), true)
            .field("% Wins:", display_or_unknown(trainer.win_percentage), true)
            .field("% Losses:", display_or_unknown(trainer.loose_percentage), true);

        Ok(Reply::card("Welcome to the league.\nHere is your Trainer Card:", card))
    }

    pub async fn new_league(&self, invocation: &Invocation, reference: &[String]) -> Result<Reply> {
        if !self.is_admin(invocation) {
            return Ok(permission_denied("register a league"));
        }

        let reference = reference.join(" ");
        if reference.trim().is_empty() {
            return Ok(usage(
                "Please give this league a name or reference!",
                &["/new_league League 2020"],
            ));
        }

        let league = match self.backend.create_league(reference.trim()).await {
            Ok(league) => league,
            Err(e) => return Ok(registration_failure(e, "This league is already registered!")),
        };

        let card = Card::default()
            .field("ID:", &league.id, true)
            .field("Reference:", &league.reference, true);
        Ok(Reply::card("League registered!", card))
    }

    /// Expects exactly `[mention, pokemon type, role]`.
    pub async fn new_leader(&self, invocation: &Invocation, args: &[String]) -> Result<Reply> {
        if !self.is_admin(invocation) {
            return Ok(permission_denied("register a leader"));
        }

        let [discord_id, pokemon_type, role] = args else {
            return Ok(usage(
                "I need **three** parameters, **exactly** in this order!",
                &[
                    "/new_leader @someone fire gym_leader",
                    "/new_leader @someone fairy elite_four",
                    "/new_leader @someone grass champion",
                ],
            ));
        };

        if !is_user_mention(discord_id) {
            return Ok(Reply::text("Invalid trainer!"));
        }

        let Some(role) = LeaderRole::from_str(role) else {
            return Ok(Reply::text(format!(
                "Unknown role `{}`; use gym_leader, elite_four or champion",
                role
            )));
        };

        let leader = match self.backend.create_leader(discord_id, pokemon_type, role).await {
            Ok(leader) => leader,
            Err(e) => return Ok(registration_failure(e, "This leader is already registered!")),
        };

        let card = Card::default()
            .field("Discord ID:", leader.discord_id.as_deref().unwrap_or(discord_id.as_str()), true)
            .field("Name:", leader.name.as_deref().unwrap_or("?"), true)
            .field("Type:", leader.pokemon_type.as_deref().unwrap_or("?"), true)
            .field("Role:", leader.role.as_deref().unwrap_or(role.as_str()), true)
            .field("Lv:", display_or_unknown(leader.lv), true)
            .field("Next:", display_or_unknown(leader.next_lv), true)
            .field("Exp.:", display_or_unknown(leader.exp), true)
            .field("Battles:", display_or_unknown(leader.battle_counter), true)
            .field("% Wins:", display_or_unknown(leader.win_percentage), true)
            .field("% Losses:", display_or_unknown(leader.loose_percentage), true);
        Ok(Reply::card("Leader registered:", card))
    }

    /// `[-t|-l, mention, league id, ...]`
    pub async fn league_register(&self, invocation: &Invocation, args: &[String]) -> Result<Reply> {
        if !self.is_admin(invocation) {
            return Ok(permission_denied("do that"));
        }

        let [flag, discord_id, league, ..] = args else {
            return Ok(usage(
                "Missing parameters :octagonal_sign:",
                &[
                    "/league_register -t @username league_id",
                    "/league_register -l @username league_id",
                ],
            ));
        };

        let Some(kind) = RegistrationKind::from_flag(flag) else {
            return Ok(Reply::text("Only the `-t` and `-l` options are accepted"));
        };

        match self.backend.register(discord_id, league, kind).await {
            Ok(registration) => Ok(Reply::text(registration)),
            Err(e) => Ok(registration_failure(e, "This user is already registered!")),
        }
    }

    pub async fn quote(&self, phrase: &[String]) -> Result<Reply> {
        let quote = phrase.join(" ");
        if quote.trim().is_empty() {
            return Ok(Reply::text("Give me a pearl of wisdom!"));
        }

        Ok(Reply::text(self.backend.create_quote(quote.trim()).await?))
    }

    pub async fn random_quote(&self) -> Result<Reply> {
        let quotes = self.backend.quotes().await?;
        Ok(Reply::text(
            quotes
                .choose(&mut rand::thread_rng())
                .cloned()
                .unwrap_or_else(|| "No quotes yet!".to_string()),
        ))
    }
}

fn display_or_unknown<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}
