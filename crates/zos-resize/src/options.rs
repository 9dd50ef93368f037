//! Controller configuration and its normalization
//!
//! Options are permissive: unknown handle tokens are dropped and an
//! unusable threshold falls back to [`DEFAULT_THRESHOLD`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::direction::Direction;
use crate::geometry::Delta;
use crate::handler::Callbacks;
use crate::session::{AnchorStrategy, Phase};

/// Default handle thickness in pixels
pub const DEFAULT_THRESHOLD: i32 = 10;

/// Token that selects every direction
const ALL_TOKEN: &str = "all";

/// Set of handle directions, kept in canonical order without duplicates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandleSelection {
    directions: Vec<Direction>,
}

impl Default for HandleSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl HandleSelection {
    /// Every direction
    pub fn all() -> Self {
        Self {
            directions: Direction::ALL.to_vec(),
        }
    }

    /// Parse a whitespace-separated list such as `"e s se"` or `"all"`
    pub fn parse(list: &str) -> Self {
        Self::from_tokens(list.split_whitespace())
    }

    /// Build from individual tokens; `"all"` anywhere selects every direction
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut directions = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            if token == ALL_TOKEN {
                return Self::all();
            }
            if let Some(direction) = Direction::from_token(token) {
                directions.push(direction);
            }
        }
        Self::from_directions(&directions)
    }

    /// Build from an explicit set of directions
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut directions = directions.to_vec();
        directions.sort();
        directions.dedup();
        Self { directions }
    }

    /// Selected directions in canonical order
    #[inline]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

impl From<&str> for HandleSelection {
    fn from(list: &str) -> Self {
        Self::parse(list)
    }
}

impl From<&[Direction]> for HandleSelection {
    fn from(directions: &[Direction]) -> Self {
        Self::from_directions(directions)
    }
}

impl<const N: usize> From<[Direction; N]> for HandleSelection {
    fn from(directions: [Direction; N]) -> Self {
        Self::from_directions(&directions)
    }
}

impl Serialize for HandleSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tokens: Vec<&str> = self.directions.iter().map(Direction::as_str).collect();
        serializer.serialize_str(&tokens.join(" "))
    }
}

impl<'de> Deserialize<'de> for HandleSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawHandles {
            Spaced(String),
            Listed(Vec<String>),
        }

        Ok(match RawHandles::deserialize(deserializer)? {
            RawHandles::Spaced(list) => Self::parse(&list),
            RawHandles::Listed(tokens) => Self::from_tokens(tokens),
        })
    }
}

/// Data part of the controller options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeConfig {
    /// Handles to create
    pub handles: HandleSelection,
    /// Handle thickness in pixels
    #[serde(deserialize_with = "lenient_threshold")]
    pub threshold: f64,
    /// Clamp drag input to the viewport
    pub bound: bool,
    /// How the drag anchor is captured
    pub anchor: AnchorStrategy,
}

/// Accept any JSON value for the threshold; non-numbers fall back to the default
fn lenient_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawThreshold {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let fallback = DEFAULT_THRESHOLD as f64;
    Ok(match RawThreshold::deserialize(deserializer)? {
        RawThreshold::Number(value) => value,
        RawThreshold::Text(text) => text.trim().parse().unwrap_or(fallback),
        RawThreshold::Other(_) => fallback,
    })
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            handles: HandleSelection::all(),
            threshold: DEFAULT_THRESHOLD as f64,
            bound: false,
            anchor: AnchorStrategy::Pointer,
        }
    }
}

impl ResizeConfig {
    /// Half the handle thickness, the unit of all placement math.
    ///
    /// The threshold is truncated to an integer and floor-halved; a result
    /// below one pixel falls back to half the default threshold.
    pub fn half(&self) -> f32 {
        let half = (self.threshold as i32) >> 1;
        if half > 0 {
            half as f32
        } else {
            (DEFAULT_THRESHOLD >> 1) as f32
        }
    }

    /// Resolve into the values the controller works with
    pub fn normalize(&self) -> NormalizedOptions {
        NormalizedOptions {
            handles: self.handles.directions().to_vec(),
            half: self.half(),
            bound: self.bound,
            anchor: self.anchor,
        }
    }
}

/// Options after normalization
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedOptions {
    pub handles: Vec<Direction>,
    pub half: f32,
    pub bound: bool,
    pub anchor: AnchorStrategy,
}

/// Controller options: configuration plus user callbacks
///
/// `E` is the platform's raw event type, passed through to callbacks.
pub struct ResizeOptions<E> {
    pub config: ResizeConfig,
    pub(crate) callbacks: Callbacks<E>,
}

impl<E> Default for ResizeOptions<E> {
    fn default() -> Self {
        Self::from_config(ResizeConfig::default())
    }
}

impl<E> std::fmt::Debug for ResizeOptions<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeOptions")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

impl<E> ResizeOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ResizeConfig) -> Self {
        Self {
            config,
            callbacks: Callbacks::default(),
        }
    }

    pub fn handles(mut self, handles: impl Into<HandleSelection>) -> Self {
        self.config.handles = handles.into();
        self
    }

    pub fn threshold(mut self, threshold: impl Into<f64>) -> Self {
        self.config.threshold = threshold.into();
        self
    }

    pub fn bound(mut self, bound: bool) -> Self {
        self.config.bound = bound;
        self
    }

    pub fn anchor(mut self, anchor: AnchorStrategy) -> Self {
        self.config.anchor = anchor;
        self
    }

    /// Catch-all callback, invoked for every phase before the phase hook
    pub fn callback(mut self, f: impl FnMut(Phase, &Delta, &E) + 'static) -> Self {
        self.callbacks.callback = Some(Box::new(f));
        self
    }

    pub fn on_start(mut self, f: impl FnMut(&Delta, &E) + 'static) -> Self {
        self.callbacks.on_start = Some(Box::new(f));
        self
    }

    pub fn on_move(mut self, f: impl FnMut(&Delta, &E) + 'static) -> Self {
        self.callbacks.on_move = Some(Box::new(f));
        self
    }

    pub fn on_end(mut self, f: impl FnMut(&Delta, &E) + 'static) -> Self {
        self.callbacks.on_end = Some(Box::new(f));
        self
    }

    pub(crate) fn into_parts(self) -> (ResizeConfig, Callbacks<E>) {
        (self.config, self.callbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_all_handles() {
        assert_eq!(HandleSelection::default().directions(), &Direction::ALL);
        assert_eq!(HandleSelection::parse("all").directions(), &Direction::ALL);
    }

    #[test]
    fn test_parse_space_separated_list() {
        let handles = HandleSelection::parse("e s");
        assert_eq!(handles.directions(), &[Direction::E, Direction::S]);
    }

    #[test]
    fn test_parse_normalizes_order_and_drops_unknown() {
        let handles = HandleSelection::parse("  w  bogus n\tw NE se ");
        assert_eq!(handles.directions(), &[Direction::N, Direction::SE, Direction::W]);
    }

    #[test]
    fn test_all_token_wins_anywhere() {
        assert_eq!(HandleSelection::from_tokens(["e", "all"]).directions(), &Direction::ALL);
    }

    #[test]
    fn test_empty_selection() {
        assert!(HandleSelection::parse("").is_empty());
        assert!(HandleSelection::parse("up down").is_empty());
    }

    #[test]
    fn test_half_from_threshold() {
        let config = |threshold: f64| ResizeConfig { threshold, ..Default::default() };
        assert_eq!(config(10.0).half(), 5.0);
        assert_eq!(config(11.0).half(), 5.0);
        assert_eq!(config(20.0).half(), 10.0);
        assert_eq!(config(2.0).half(), 1.0);
    }

    #[test]
    fn test_unusable_threshold_falls_back() {
        let config = |threshold: f64| ResizeConfig { threshold, ..Default::default() };
        assert_eq!(config(0.0).half(), 5.0);
        assert_eq!(config(1.0).half(), 5.0);
        assert_eq!(config(-10.0).half(), 5.0);
        assert_eq!(config(f64::NAN).half(), 5.0);
    }

    #[test]
    fn test_config_from_json() {
        let config: ResizeConfig =
            serde_json::from_str(r#"{"handles":"e s","threshold":16,"bound":true,"anchor":"handle"}"#).unwrap();
        assert_eq!(config.handles.directions(), &[Direction::E, Direction::S]);
        assert_eq!(config.half(), 8.0);
        assert!(config.bound);
        assert_eq!(config.anchor, AnchorStrategy::HandleRect);
    }

    #[test]
    fn test_config_from_json_token_array_and_defaults() {
        let config: ResizeConfig = serde_json::from_str(r#"{"handles":["nw","x","se"]}"#).unwrap();
        assert_eq!(config.handles.directions(), &[Direction::SE, Direction::NW]);
        assert_eq!(config.half(), 5.0);
        assert!(!config.bound);
        assert_eq!(config.anchor, AnchorStrategy::Pointer);

        let empty: ResizeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ResizeConfig::default());
    }

    #[test]
    fn test_json_threshold_is_lenient() {
        let null: ResizeConfig = serde_json::from_str(r#"{"threshold":null}"#).unwrap();
        assert_eq!(null.threshold, DEFAULT_THRESHOLD as f64);
        assert_eq!(null.half(), 5.0);

        let text: ResizeConfig = serde_json::from_str(r#"{"threshold":"20"}"#).unwrap();
        assert_eq!(text.half(), 10.0);

        let junk: ResizeConfig = serde_json::from_str(r#"{"threshold":{"px":4},"bound":true}"#).unwrap();
        assert_eq!(junk.half(), 5.0);
        assert!(junk.bound);

        let zero: ResizeConfig = serde_json::from_str(r#"{"threshold":0}"#).unwrap();
        assert_eq!(zero.half(), 5.0);
    }

    #[test]
    fn test_selection_serializes_as_list() {
        let json = serde_json::to_string(&HandleSelection::parse("s e")).unwrap();
        assert_eq!(json, "\"e s\"");
    }

    #[test]
    fn test_builder() {
        let options: ResizeOptions<()> = ResizeOptions::new()
            .handles("n")
            .threshold(6)
            .bound(true)
            .on_end(|_, _| {});
        let normalized = options.config.normalize();
        assert_eq!(normalized.handles, vec![Direction::N]);
        assert_eq!(normalized.half, 3.0);
        assert!(normalized.bound);
        assert!(options.callbacks.on_end.is_some());
        assert!(options.callbacks.on_start.is_none());
    }
}
