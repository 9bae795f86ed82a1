//! Turns chatbot replies into display-ready chat messages.

use std::fmt;

use crate::models::{ChatbotReply, FeatureBadge, MessageContent, Store, StoreCard};

pub const NO_RESULTS_TEXT: &str = "🔍 No stores found matching your query.";
pub const ERROR_TEXT: &str = "❌ Sorry, I encountered an error. Please try again later.";

/// Icon shown next to a feature flag
pub fn feature_icon(key: &str) -> &'static str {
    match key {
        "24_hours" => "⏰",
        "birthday_party" => "🎉",
        "breakfast" => "🍳",
        "cashless" => "💳",
        "dessert_center" => "🍰",
        "digital_kiosk" => "🖥️",
        "mccafe" => "☕",
        "wifi" => "📶",
        "mcdelivery" => "🛵",
        _ => "✨",
    }
}

/// Short display label for a feature flag, falling back to the raw key
pub fn feature_label(key: &str) -> &str {
    match key {
        "24_hours" => "24H",
        "birthday_party" => "Party",
        "breakfast" => "Breakfast",
        "cashless" => "Cashless",
        "dessert_center" => "Dessert",
        "digital_kiosk" => "Kiosk",
        "mccafe" => "McCafé",
        "wifi" => "WiFi",
        "mcdelivery" => "Delivery",
        other => other,
    }
}

/// Header emoji picked from the reply wording
pub fn header_emoji(response: &str) -> &'static str {
    if response.contains("24-hour") {
        "🍟"
    } else if response.contains("birthday parties") {
        "🎉"
    } else {
        "🍔"
    }
}

/// Build a card from a store, keeping only features that are switched on
pub fn store_card(store: &Store) -> StoreCard {
    let features = store
        .features
        .iter()
        .flatten()
        .filter(|(_, enabled)| **enabled)
        .map(|(key, _)| FeatureBadge {
            key: key.clone(),
            icon: feature_icon(key).to_string(),
            label: feature_label(key).to_string(),
        })
        .collect();

    StoreCard {
        name: store.name.clone(),
        address: store.address.clone(),
        operating_hours: store.operating_hours.clone().filter(|h| !h.is_empty()),
        telephone: store.telephone().filter(|t| !t.is_empty()).map(str::to_string),
        features,
        waze_link: store.waze_link.clone().filter(|l| !l.is_empty()),
    }
}

/// Format a chatbot reply as message content
pub fn format_reply(reply: &ChatbotReply) -> MessageContent {
    match reply.data.as_deref() {
        Some(stores) if !stores.is_empty() => MessageContent::Results {
            header: format!("{} {}", header_emoji(&reply.response), reply.response),
            stores: stores.iter().map(store_card).collect(),
        },
        _ => MessageContent::NoResults {
            text: NO_RESULTS_TEXT.to_string(),
        },
    }
}

pub fn error_content() -> MessageContent {
    MessageContent::Error {
        text: ERROR_TEXT.to_string(),
    }
}

impl fmt::Display for StoreCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if let Some(address) = &self.address {
            writeln!(f, "📍 {}", address)?;
        }
        if let Some(hours) = &self.operating_hours {
            writeln!(f, "⏰ {}", hours)?;
        }
        if let Some(telephone) = &self.telephone {
            writeln!(f, "📞 {}", telephone)?;
        }
        if !self.features.is_empty() {
            let badges = self
                .features
                .iter()
                .map(|b| format!("{} {}", b.icon, b.label))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Features: {}", badges)?;
        }
        if let Some(link) = &self.waze_link {
            writeln!(f, "🗺️ Open in Waze: {}", link)?;
        }
        Ok(())
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageContent::Text { text }
            | MessageContent::NoResults { text }
            | MessageContent::Error { text } => f.write_str(text),
            MessageContent::Results { header, stores } => {
                writeln!(f, "{}", header)?;
                for card in stores {
                    write!(f, "\n{}", card)?;
                }
                Ok(())
            }
        }
    }
}
