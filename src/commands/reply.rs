use serde::Serialize;
use std::fmt;

/// Neutral card colour used for league and registration replies.
pub const DEFAULT_COLOR: u32 = 0x1E1E1E;

/// A titled value shown on a card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich attachment for a message: coloured, optionally with a thumbnail.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card {
    pub color: u32,
    pub thumbnail: Option<String>,
    pub fields: Vec<Field>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            thumbnail: None,
            fields: Vec::new(),
        }
    }
}

impl Card {
    pub fn new(color: u32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl ToString, inline: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.to_string(),
            inline,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Message {
    pub content: String,
    pub card: Option<Card>,
}

/// Everything a command sends back, in order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Reply {
    pub messages: Vec<Message>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::default().push(content)
    }

    pub fn card(content: impl Into<String>, card: Card) -> Self {
        Self {
            messages: vec![Message {
                content: content.into(),
                card: Some(card),
            }],
        }
    }

    pub fn push(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            content: content.into(),
            card: None,
        });
        self
    }

    /// First message body; most commands answer with a single message.
    pub fn content(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", message.content)?;
            if let Some(card) = &message.card {
                if let Some(url) = &card.thumbnail {
                    writeln!(f, "  [{}]", url)?;
                }
                for field in &card.fields {
                    writeln!(f, "  {}: {}", field.name, field.value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_builder_and_lookup() {
        let card = Card::new(0xFFD700)
            .thumbnail("http://img")
            .field("Pos", 1, true)
            .field("Points", "980", true);

        assert_eq!(card.get("Pos"), Some("1"));
        assert_eq!(card.get("Missing"), None);
        assert_eq!(card.thumbnail.as_deref(), Some("http://img"));
    }

    #[test]
    fn test_reply_display() {
        let reply = Reply::card("**__ash__**", Card::default().field("Elo", "Gold", true)).push("second");
        assert_eq!(reply.to_string(), "**__ash__**\n  Elo: Gold\n\nsecond\n");
        assert_eq!(reply.content(), "**__ash__**");
    }
}
