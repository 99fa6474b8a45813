//! Keyframe types.
//!
//! Provides the typed snapshot produced for each data line of a cart-pole
//! log, and the intermediate tokenized forms used while parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of the cart position.
pub const MIN_CART_X: f64 = -4.8;
/// Upper bound of the cart position.
pub const MAX_CART_X: f64 = 4.8;
/// Lower bound of the pole angle, in radians.
pub const MIN_POLE_THETA: f64 = -0.418;
/// Upper bound of the pole angle, in radians.
pub const MAX_POLE_THETA: f64 = 0.418;

/// Number of components in a state vector.
pub const STATE_LEN: usize = 4;

/// Control decision taken at a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Push the cart left (coded `0`).
    Left,
    /// Push the cart right (coded `1`).
    Right,
}

impl Action {
    /// Decode a source action value. Only exactly `0` and `1` are valid.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 0.0 {
            Some(Action::Left)
        } else if code == 1.0 {
            Some(Action::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Left => write!(f, "Left"),
            Action::Right => write!(f, "Right"),
        }
    }
}

/// Terminal signal attached to the frame ending an episode.
///
/// Serialized as the bare number `-1` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Reward {
    /// Episode failed (coded `-1`).
    Negative,
    /// Episode succeeded (coded `1`).
    Positive,
}

impl Reward {
    /// Numeric value of the reward.
    pub fn value(self) -> i8 {
        match self {
            Reward::Negative => -1,
            Reward::Positive => 1,
        }
    }

    /// Decode a source reward value.
    ///
    /// Returns `Some(None)` for `0` (no reward on this frame), `Some(Some(_))`
    /// for `-1` and `1`, and `None` for any other value.
    pub fn from_code(code: f64) -> Option<Option<Self>> {
        if code == 0.0 {
            Some(None)
        } else if code == 1.0 {
            Some(Some(Reward::Positive))
        } else if code == -1.0 {
            Some(Some(Reward::Negative))
        } else {
            None
        }
    }
}

impl From<Reward> for i8 {
    fn from(reward: Reward) -> Self {
        reward.value()
    }
}

impl TryFrom<i8> for Reward {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Reward::Negative),
            1 => Ok(Reward::Positive),
            other => Err(format!("invalid reward {}; expected -1 or 1", other)),
        }
    }
}

/// One validated simulation snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Cart position, within [`MIN_CART_X`, `MAX_CART_X`].
    pub cart_x: f64,
    /// Cart velocity.
    pub cart_dx: f64,
    /// Pole angle, within [`MIN_POLE_THETA`, `MAX_POLE_THETA`].
    pub pole_theta: f64,
    /// Pole angular velocity.
    pub pole_omega: f64,
    /// Action chosen at this frame.
    pub action: Action,
    /// Terminal reward, absent on non-terminal frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,
}

impl Keyframe {
    /// Whether this frame ends an episode.
    pub fn is_terminal(&self) -> bool {
        self.reward.is_some()
    }
}

/// Shape of a single tokenized field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Bracketed, whitespace separated list of numbers: `[1 2.5 -3]`.
    Vector(Vec<f64>),
    /// A single number.
    Scalar(f64),
    /// Anything that is neither.
    Text(String),
}

impl FieldValue {
    /// Classify a raw field.
    ///
    /// Surrounding whitespace is ignored. Text that starts with `[` but is not
    /// a well-formed numeric vector stays `Text`.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Some(values) = parse_vector(trimmed) {
            return FieldValue::Vector(values);
        }

        match trimmed.parse::<f64>() {
            Ok(value) => FieldValue::Scalar(value),
            Err(_) => FieldValue::Text(trimmed.to_string()),
        }
    }

    /// Name of the shape, used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            FieldValue::Vector(_) => "vector",
            FieldValue::Scalar(_) => "number",
            FieldValue::Text(_) => "text",
        }
    }

    /// The vector, if this field holds exactly one state vector.
    pub fn as_state(&self) -> Option<[f64; STATE_LEN]> {
        match self {
            FieldValue::Vector(values) => values.as_slice().try_into().ok(),
            _ => None,
        }
    }

    /// The number, if this field is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FieldValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Vector(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            FieldValue::Scalar(value) => write!(f, "{}", value),
            FieldValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(values: Vec<f64>) -> Self {
        FieldValue::Vector(values)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

/// Parse `[n1 n2 ...]` into numbers.
///
/// Returns `None` for missing brackets or any token that is not a number.
pub(crate) fn parse_vector(s: &str) -> Option<Vec<f64>> {
    let inner = s.strip_prefix('[')?.strip_suffix(']')?;
    inner
        .split_whitespace()
        .map(|token| token.parse::<f64>().ok())
        .collect()
}

/// The first line of a log: the column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Column names as written in the header.
    pub fields: Vec<String>,
}

impl HeaderRecord {
    /// Number of columns named by the header.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the header names no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One tokenized data line, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source.
    pub line: usize,
    /// The source line as given.
    pub text: String,
    /// Fields in source order: state, previous state, action, reward, extra.
    pub fields: Vec<FieldValue>,
}

impl RawRecord {
    /// Create a record from already classified fields.
    pub fn new(line: usize, text: impl Into<String>, fields: Vec<FieldValue>) -> Self {
        Self {
            line,
            text: text.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_vector() {
        assert_eq!(
            FieldValue::classify("[0 -1.0 0.1 0.2]"),
            FieldValue::Vector(vec![0.0, -1.0, 0.1, 0.2])
        );
        assert_eq!(
            FieldValue::classify(" [1  2 3 4] "),
            FieldValue::Vector(vec![1.0, 2.0, 3.0, 4.0])
        );
    }

    #[test]
    fn classify_scalar() {
        assert_eq!(FieldValue::classify("1"), FieldValue::Scalar(1.0));
        assert_eq!(FieldValue::classify("-1.000000"), FieldValue::Scalar(-1.0));
        assert_eq!(FieldValue::classify(" 0.000000\r"), FieldValue::Scalar(0.0));
    }

    #[test]
    fn classify_text() {
        assert_eq!(FieldValue::classify("x"), FieldValue::Text("x".to_string()));
        assert_eq!(FieldValue::classify(""), FieldValue::Text(String::new()));
        assert_eq!(
            FieldValue::classify("[0 1 2"),
            FieldValue::Text("[0 1 2".to_string())
        );
        assert_eq!(
            FieldValue::classify("[0 a 2 3]"),
            FieldValue::Text("[0 a 2 3]".to_string())
        );
    }

    #[test]
    fn single_element_vector_is_not_a_scalar() {
        let field = FieldValue::classify("[1]");
        assert_eq!(field, FieldValue::Vector(vec![1.0]));
        assert_eq!(field.as_scalar(), None);
        assert_eq!(field.as_state(), None);
    }

    #[test]
    fn as_state_requires_four_values() {
        assert_eq!(
            FieldValue::Vector(vec![1.0, 2.0, 3.0, 4.0]).as_state(),
            Some([1.0, 2.0, 3.0, 4.0])
        );
        assert_eq!(FieldValue::Vector(vec![1.0, 2.0, 3.0]).as_state(), None);
        assert_eq!(FieldValue::Scalar(1.0).as_state(), None);
    }

    #[test]
    fn action_codes() {
        assert_eq!(Action::from_code(0.0), Some(Action::Left));
        assert_eq!(Action::from_code(1.0), Some(Action::Right));
        assert_eq!(Action::from_code(42.0), None);
        assert_eq!(Action::from_code(0.5), None);
    }

    #[test]
    fn reward_codes() {
        assert_eq!(Reward::from_code(0.0), Some(None));
        assert_eq!(Reward::from_code(1.0), Some(Some(Reward::Positive)));
        assert_eq!(Reward::from_code(-1.0), Some(Some(Reward::Negative)));
        assert_eq!(Reward::from_code(2.0), None);
    }

    #[test]
    fn keyframe_serializes_reward_as_number() {
        let kf = Keyframe {
            cart_x: 0.0,
            cart_dx: -1.0,
            pole_theta: 0.1,
            pole_omega: 0.2,
            action: Action::Right,
            reward: Some(Reward::Negative),
        };
        let json = serde_json::to_value(kf).unwrap();
        assert_eq!(json["reward"], serde_json::json!(-1));
        assert_eq!(json["action"], serde_json::json!("Right"));

        let back: Keyframe = serde_json::from_value(json).unwrap();
        assert_eq!(back, kf);
    }

    #[test]
    fn keyframe_without_reward_omits_field() {
        let kf = Keyframe {
            cart_x: 0.0,
            cart_dx: 0.0,
            pole_theta: 0.0,
            pole_omega: 0.0,
            action: Action::Left,
            reward: None,
        };
        let json = serde_json::to_value(kf).unwrap();
        assert!(json.get("reward").is_none());
        assert!(!kf.is_terminal());
    }

    #[test]
    fn invalid_reward_fails_to_deserialize() {
        let json = r#"{"cart_x":0,"cart_dx":0,"pole_theta":0,"pole_omega":0,"action":"Left","reward":2}"#;
        assert!(serde_json::from_str::<Keyframe>(json).is_err());
    }
}
