//! Game state record returned by `list`

use crate::error::{CloudWarsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Current state of the game world.
///
/// Only `Height` is required and must be an integer. Every other field is
/// best-effort: `null` or a value of the wrong type decodes as absent, so a
/// malformed extra never hides a valid height. Unrecognised keys land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameState {
    /// Board height
    pub height: i64,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<i64>,
    /// Updates per second
    #[serde(default, deserialize_with = "lenient")]
    pub game_speed: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub iteration: Option<u64>,
    /// Vapor of all clouds together
    #[serde(default, deserialize_with = "lenient")]
    pub world_vapor: Option<f64>,
    /// Clouds still alive
    #[serde(default, deserialize_with = "lenient")]
    pub alive: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub win_condition: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub leader: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sim_speed_up: Option<i64>,
    #[serde(default, deserialize_with = "lenient_clouds")]
    pub clouds: Vec<Cloud>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GameState {
    /// Decode a structured payload
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(CloudWarsError::Payload(format!(
                "Expected a JSON object, got: {}",
                value
            )));
        }
        serde_json::from_value(value).map_err(Into::into)
    }

    /// First cloud controlled by `name`; the oldest one if several share the name
    pub fn player(&self, name: &str) -> Option<&Cloud> {
        self.clouds.iter().find(|c| c.player == name)
    }
}

/// Decode a field, falling back to its default when the value does not fit
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode the cloud list, skipping entries that are not objects
fn lenient_clouds<'de, D>(deserializer: D) -> std::result::Result<Vec<Cloud>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let clouds = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter(serde_json::Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(clouds)
}

/// A cloud on the board. Neutral clouds have an empty `player`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cloud {
    #[serde(default, deserialize_with = "lenient")]
    pub pos: Position,
    #[serde(default, deserialize_with = "lenient")]
    pub vel: Velocity,
    #[serde(default, deserialize_with = "lenient")]
    pub vapor: f32,
    #[serde(default, deserialize_with = "lenient")]
    pub player: String,
    #[serde(default, deserialize_with = "lenient")]
    pub color: String,
}

impl Cloud {
    /// Radius is always the square root of vapor
    pub fn radius(&self) -> f32 {
        self.vapor.sqrt()
    }

    pub fn is_dead(&self) -> bool {
        self.vapor < 1.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}
