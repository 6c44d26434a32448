use tracing::info;

use crate::{
    commands::{Card, Invocation, Oak, Reply},
    models::{AuditEntry, LeaderboardRow, Result},
    ranking::{classify, tier_from_name},
    utils::{code_block, render_table},
};

/// How `top` lays out the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopView {
    List,
    Table,
}

impl TopView {
    /// Anything other than a table keyword falls back to the list view.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg.map(|a| a.trim().to_lowercase()) {
            Some(a) if a == "table" || a == "tabela" => TopView::Table,
            _ => TopView::List,
        }
    }
}

const AUDIT_HEADERS: [&str; 2] = ["Ln.", "Error"];

pub fn leaderboard_table(rows: &[LeaderboardRow]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(LeaderboardRow::cells).collect();
    code_block(&render_table(&LeaderboardRow::HEADERS, &cells))
}

/// One code-fenced table per `chunk_size` audit entries.
pub fn audit_tables(entries: &[AuditEntry], chunk_size: usize) -> Vec<String> {
    entries
        .chunks(chunk_size.max(1))
        .map(|chunk| {
            let rows: Vec<Vec<String>> = chunk
                .iter()
                .map(|e| vec![e.row.to_string(), e.message.trim_end().to_string()])
                .collect();
            code_block(&render_table(&AUDIT_HEADERS, &rows))
        })
        .collect()
}

impl Oak {
    pub fn ping(&self) -> Reply {
        Reply::text("pong")
    }

    pub async fn top_ranked(&self, view: TopView) -> Result<Reply> {
        let leaderboard = self.sheet.leaderboard().await?;
        let rows = leaderboard.top(self.settings.ranked.top_size);

        Ok(match view {
            TopView::Table => Reply::text(leaderboard_table(&rows)),
            TopView::List => {
                let card = rows.iter().fold(Card::default(), |card, row| {
                    card.field(
                        format!("{}. {}", row.position, row.nickname),
                        format!("{} | {} pts | {} wins in {} battles", row.tier, row.points, row.wins, row.battles),
                        false,
                    )
                });
                Reply::card("**__Top Players__**", card)
            }
        })
    }

    pub async fn ranked_trainer(&self, nickname: &str) -> Result<Reply> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Ok(Reply::text("Give me a nickname\nUsage: `/ranked_trainer <nickname>`"));
        }

        let leaderboard = self.sheet.leaderboard().await?;
        let Some((position, trainer)) = leaderboard.find(nickname) else {
            return Ok(Reply::text("Trainer not found"));
        };

        let tier = classify(trainer.points);
        let card = Card::new(tier.color())
            .thumbnail(tier.badge_url())
            .field("Pos", position, true)
            .field("Elo", tier, true)
            .field("Wins", &trainer.wins, true)
            .field("Losses", &trainer.losses, true)
            .field("Battles", &trainer.battles, true)
            .field("Points", trainer.points, true);

        Ok(Reply::card(format!("**__{}__**", trainer.nickname), card))
    }

    pub async fn ranked_elo(&self, tier_name: &str) -> Result<Reply> {
        let tier_name = tier_name.trim();
        if tier_name.is_empty() {
            return Ok(Reply::text("Give me a rank elo\nUsage: `/ranked_elo <elo>`"));
        }

        let tier = match tier_from_name(tier_name) {
            Ok(tier) => tier,
            Err(e) => return Ok(Reply::text(e.to_string())),
        };

        let leaderboard = self.sheet.leaderboard().await?;
        let rows = leaderboard.by_tier(tier, self.settings.ranked.top_size);
        if rows.is_empty() {
            return Ok(Reply::text(format!("No trainers found for elo: {}", tier)));
        }

        Ok(Reply::text(format!("Top {} trainers for elo: {}", rows.len(), tier))
            .push(leaderboard_table(&rows)))
    }

    /// Audit the battle form. Only answers in the admin channel.
    pub async fn ranked_validate(&self, invocation: &Invocation) -> Result<Reply> {
        if invocation.channel != self.settings.ranked.admin_channel {
            return Ok(Reply::text("Restricted command!"));
        }

        let rows = self.sheet.form_rows().await?;
        let leaderboard = self.sheet.leaderboard().await?;
        let entries = self.auditor().audit(&rows, &leaderboard).await;

        if entries.is_empty() {
            return Ok(Reply::text("All good! 👍"));
        }

        info!("Form audit found {} problems", entries.len());
        let reply = audit_tables(&entries, self.settings.ranked.audit_chunk_size)
            .into_iter()
            .fold(Reply::default(), Reply::push);
        Ok(reply)
    }
}
