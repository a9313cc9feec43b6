//! Client configuration

use cloudwars_core::{CloudWarsError, Color, Move, Result};

/// Connection and player settings for one session
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Game server host
    pub host: String,
    /// Game server TCP port
    pub port: u16,
    /// Display name registered with `name`
    pub name: String,
    /// Colour declared with `type`
    pub color: Color,
    /// Move submitted once the game state is known
    pub next_move: Move,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3333,
            name: "Mike".to_string(),
            color: Color::Red,
            next_move: Move::from_parts(10, 10, 10, 10),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `CLOUDWARS_HOST`, `CLOUDWARS_PORT`,
    /// `CLOUDWARS_NAME`, `CLOUDWARS_COLOR` and `CLOUDWARS_MOVE`
    pub fn from_env() -> Result<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Apply settings from a key lookup; missing keys keep their current value
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CLOUDWARS_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("CLOUDWARS_PORT") {
            self.port = parse_port(&port)?;
        }
        if let Some(name) = lookup("CLOUDWARS_NAME") {
            self.name = name;
        }
        if let Some(color) = lookup("CLOUDWARS_COLOR") {
            self.color = color.parse()?;
        }
        if let Some(mv) = lookup("CLOUDWARS_MOVE") {
            self.next_move = mv.parse()?;
        }
        Ok(self)
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }
}

/// Parse a TCP port number
pub fn parse_port(value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| CloudWarsError::Config(format!("Invalid port: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3333);
        assert_eq!(config.color, Color::Red);
        assert_eq!(config.next_move.to_command().encode(), "move10,10;10,10");
    }

    #[test]
    fn test_overlay() {
        let config = ClientConfig::default()
            .overlay(lookup(&[
                ("CLOUDWARS_HOST", "game.local"),
                ("CLOUDWARS_PORT", "4444"),
                ("CLOUDWARS_COLOR", "Blue"),
                ("CLOUDWARS_MOVE", "1,0;1,0"),
            ]))
            .unwrap();

        assert_eq!(config.host, "game.local");
        assert_eq!(config.port, 4444);
        assert_eq!(config.name, "Mike");
        assert_eq!(config.color, Color::Blue);
        assert_eq!(config.next_move, Move::from_parts(1, 0, 1, 0));
    }

    #[test]
    fn test_overlay_rejects_bad_values() {
        assert!(matches!(
            ClientConfig::default().overlay(lookup(&[("CLOUDWARS_PORT", "http")])),
            Err(CloudWarsError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::default().overlay(lookup(&[("CLOUDWARS_COLOR", "green")])),
            Err(CloudWarsError::InvalidColor(_))
        ));
        assert!(matches!(
            ClientConfig::default().overlay(lookup(&[("CLOUDWARS_PORT", "70000")])),
            Err(CloudWarsError::Config(_))
        ));
    }
}
