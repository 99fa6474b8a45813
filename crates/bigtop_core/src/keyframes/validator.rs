//! Record validation.
//!
//! Turns one tokenized record into a [`Keyframe`], checking structure first
//! and numeric ranges second. The first failing check wins.
//!
//! # Record layout
//!
//! ```text
//! [cart_x cart_dx pole_theta pole_omega], [unused x4], action, reward[, extra]
//! ```

use super::error::RecordError;
use super::types::{
    Action, FieldValue, Keyframe, RawRecord, Reward, MAX_CART_X, MAX_POLE_THETA, MIN_CART_X,
    MIN_POLE_THETA,
};

/// Fields every record must carry.
pub const MIN_RECORD_FIELDS: usize = 4;
/// Fields a record may carry, counting one ignored trailing field.
pub const MAX_RECORD_FIELDS: usize = 5;

const STATE: usize = 0;
const PREVIOUS_STATE: usize = 1;
const ACTION: usize = 2;
const REWARD: usize = 3;

/// Validate a tokenized record.
pub fn keyframe_from_record(record: &RawRecord) -> Result<Keyframe, RecordError> {
    keyframe_from_fields(&record.fields)
}

/// Validate a list of fields laid out as a record.
///
/// # Returns
/// * `Ok(Keyframe)` - All structural and range checks passed.
/// * `Err(RecordError)` - The first check that failed.
pub fn keyframe_from_fields(fields: &[FieldValue]) -> Result<Keyframe, RecordError> {
    if !(MIN_RECORD_FIELDS..=MAX_RECORD_FIELDS).contains(&fields.len()) {
        return Err(RecordError::Arity {
            count: fields.len(),
        });
    }

    let state = require_state(fields, STATE)?;
    require_state(fields, PREVIOUS_STATE)?;

    let action = fields[ACTION]
        .as_scalar()
        .and_then(Action::from_code)
        .ok_or_else(|| RecordError::Action {
            value: fields[ACTION].to_string(),
            shape: fields[ACTION].shape_name(),
        })?;

    let reward = fields[REWARD]
        .as_scalar()
        .and_then(Reward::from_code)
        .ok_or_else(|| RecordError::Reward {
            value: fields[REWARD].to_string(),
            shape: fields[REWARD].shape_name(),
        })?;

    let [cart_x, cart_dx, pole_theta, pole_omega] = state;

    let cart_x = bounded("cart_x", cart_x, MIN_CART_X, MAX_CART_X)?;
    let cart_dx = finite("cart_dx", cart_dx)?;
    let pole_theta = bounded("pole_theta", pole_theta, MIN_POLE_THETA, MAX_POLE_THETA)?;
    let pole_omega = finite("pole_omega", pole_omega)?;

    Ok(Keyframe {
        cart_x,
        cart_dx,
        pole_theta,
        pole_omega,
        action,
        reward,
    })
}

fn require_state(fields: &[FieldValue], index: usize) -> Result<[f64; 4], RecordError> {
    fields[index]
        .as_state()
        .ok_or_else(|| RecordError::FieldShape {
            field: index,
            value: fields[index].to_string(),
        })
}

fn finite(name: &'static str, value: f64) -> Result<f64, RecordError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RecordError::NonFinite { name, value })
    }
}

/// Bounds are inclusive.
fn bounded(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64, RecordError> {
    let value = finite(name, value)?;
    if value < min || value > max {
        return Err(RecordError::Range {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
