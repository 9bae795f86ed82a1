/// Words that mark a query as a store search
const LOCATION_KEYWORDS: &[&str] = &["outlet", "store", "location", "find", "list", "which"];

const GRATITUDE_PHRASES: &[&str] = &["thank you", "thanks", "appreciate it"];
const GREETING_PHRASES: &[&str] = &["hi", "hello", "hey"];
const FAREWELL_PHRASES: &[&str] = &["bye", "goodbye", "see you", "farewell"];

pub const GRATITUDE_REPLY: &str = "You're welcome! Happy to help out! Have a great day!";
pub const GREETING_REPLY: &str = "Hello! 👋 What are you looking for?";
pub const FAREWELL_REPLY: &str = "Goodbye! Come back if you need more help finding a store.";

/// What to do with a chat query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Mentions stores or locations, always sent to the backend
    LocationQuery,
    Gratitude,
    Greeting,
    Farewell,
    /// Anything else, also sent to the backend
    Other,
}

impl Intent {
    /// Canned reply for conversational intents, `None` if the backend must answer
    pub fn canned_reply(self) -> Option<&'static str> {
        match self {
            Intent::Gratitude => Some(GRATITUDE_REPLY),
            Intent::Greeting => Some(GREETING_REPLY),
            Intent::Farewell => Some(FAREWELL_REPLY),
            Intent::LocationQuery | Intent::Other => None,
        }
    }

    pub fn needs_backend(self) -> bool {
        self.canned_reply().is_none()
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify a chat query by plain substring checks.
///
/// Location keywords win over conversational phrases, so "hello, which
/// outlet is open?" still goes to the backend.
pub fn classify(query: &str) -> Intent {
    let query = query.trim().to_lowercase();

    if contains_any(&query, LOCATION_KEYWORDS) {
        Intent::LocationQuery
    } else if contains_any(&query, GRATITUDE_PHRASES) {
        Intent::Gratitude
    } else if contains_any(&query, GREETING_PHRASES) {
        Intent::Greeting
    } else if contains_any(&query, FAREWELL_PHRASES) {
        Intent::Farewell
    } else {
        Intent::Other
    }
}
