use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Coordinate axis, used for range checks and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Absolute bound in decimal degrees
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Errors raised while turning a store's raw coordinates into a position
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("missing {0}")]
    Missing(Axis),

    #[error("{axis} {value:?} is not a number")]
    NotANumber { axis: Axis, value: String },

    #[error("{axis} {value} is outside [-{limit}, {limit}]")]
    OutOfRange { axis: Axis, value: f64, limit: f64 },
}

/// A coordinate as it arrives on the wire.
///
/// The locator API sends decimal-degree strings, the backend database
/// sends plain numbers. Both are accepted and parsed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    /// Parse into decimal degrees, rejecting anything that is not a finite
    /// number within the axis range
    pub fn parse(&self, axis: Axis) -> Result<f64, CoordinateError> {
        let value = match self {
            RawCoordinate::Number(n) => *n,
            RawCoordinate::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                CoordinateError::NotANumber {
                    axis,
                    value: s.clone(),
                }
            })?,
        };

        // "NaN" and "inf" parse successfully as f64
        if !value.is_finite() {
            return Err(CoordinateError::NotANumber {
                axis,
                value: value.to_string(),
            });
        }

        let limit = axis.limit();
        if value.abs() > limit {
            return Err(CoordinateError::OutOfRange { axis, value, limit });
        }

        Ok(value)
    }
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value)
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        RawCoordinate::Text(value.to_string())
    }
}

/// Store contact details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A store as returned by the locator API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<RawCoordinate>,
    #[serde(default)]
    pub longitude: Option<RawCoordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waze_link: Option<String>,
}

impl Store {
    /// Helper to build a store with only a name and coordinates
    pub fn new(
        name: impl Into<String>,
        latitude: impl Into<RawCoordinate>,
        longitude: impl Into<RawCoordinate>,
    ) -> Self {
        Self {
            name: name.into(),
            address: None,
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
            operating_hours: None,
            contact: None,
            features: None,
            waze_link: None,
        }
    }

    /// Helper to get the telephone number, if any
    pub fn telephone(&self) -> Option<&str> {
        self.contact.as_ref().and_then(|c| c.telephone.as_deref())
    }

    /// Parse the raw coordinates into a point (x = longitude, y = latitude)
    pub fn position(&self) -> Result<Point<f64>, CoordinateError> {
        let lat = self
            .latitude
            .as_ref()
            .ok_or(CoordinateError::Missing(Axis::Latitude))?
            .parse(Axis::Latitude)?;
        let lng = self
            .longitude
            .as_ref()
            .ok_or(CoordinateError::Missing(Axis::Longitude))?
            .parse(Axis::Longitude)?;

        Ok(Point::new(lng, lat))
    }
}

/// A store whose coordinates parsed successfully
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedStore {
    pub store: Store,
    pub position: Point<f64>,
}

impl LocatedStore {
    pub fn name(&self) -> &str {
        &self.store.name
    }

    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    pub fn lng(&self) -> f64 {
        self.position.x()
    }
}

impl TryFrom<Store> for LocatedStore {
    type Error = CoordinateError;

    fn try_from(store: Store) -> Result<Self, Self::Error> {
        let position = store.position()?;
        Ok(Self { store, position })
    }
}

/// Position in the shape map widgets expect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<Point<f64>> for LatLng {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lng: point.x(),
        }
    }
}

/// Reply from the remote chatbot endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub data: Option<Vec<Store>>,
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Active feature rendered as a badge on a store card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBadge {
    pub key: String,
    pub icon: String,
    pub label: String,
}

/// Display-ready summary of one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCard {
    pub name: String,
    pub address: Option<String>,
    pub operating_hours: Option<String>,
    pub telephone: Option<String>,
    pub features: Vec<FeatureBadge>,
    pub waze_link: Option<String>,
}

/// Body of a chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    Results { header: String, stores: Vec<StoreCard> },
    NoResults { text: String },
    Error { text: String },
}

/// One entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: MessageContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageContent::Text { text: text.into() })
    }

    pub fn bot_text(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, MessageContent::Text { text: text.into() })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.content, MessageContent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_coordinates() {
        let store = Store::new("KLCC", "3.1579", " 101.7116 ");
        let point = store.position().unwrap();
        assert_eq!(point.y(), 3.1579);
        assert_eq!(point.x(), 101.7116);
    }

    #[test]
    fn test_parse_numeric_coordinates() {
        let store: Store = serde_json::from_str(
            r#"{"name": "Bangsar", "address": "Jalan Telawi", "latitude": 3.13, "longitude": 101.67}"#,
        )
        .unwrap();
        assert_eq!(store.latitude, Some(RawCoordinate::Number(3.13)));
        assert!(store.position().is_ok());
    }

    #[test]
    fn test_unparsable_coordinate_is_reported() {
        let store = Store::new("Broken", "three", "101.7");
        assert_eq!(
            store.position(),
            Err(CoordinateError::NotANumber {
                axis: Axis::Latitude,
                value: "three".to_string(),
            })
        );
    }

    #[test]
    fn test_nan_text_is_rejected() {
        let store = Store::new("NaN store", "3.1", "NaN");
        assert!(matches!(
            store.position(),
            Err(CoordinateError::NotANumber { axis: Axis::Longitude, .. })
        ));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let store = Store::new("Nowhere", "91.0", "0");
        assert!(matches!(
            store.position(),
            Err(CoordinateError::OutOfRange { axis: Axis::Latitude, .. })
        ));
    }

    #[test]
    fn test_null_coordinate_is_missing() {
        let store: Store = serde_json::from_str(
            r#"{"name": "Pending", "address": "Somewhere", "latitude": null, "longitude": "101.6"}"#,
        )
        .unwrap();
        assert_eq!(store.position(), Err(CoordinateError::Missing(Axis::Latitude)));
    }

    #[test]
    fn test_chat_message_serialization() {
        let msg = ChatMessage::bot_text("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["content"]["kind"], "text");
        assert_eq!(json["content"]["text"], "hello");
    }
}
