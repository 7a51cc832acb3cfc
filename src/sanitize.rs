//! Replacement of non-finite values before anything is measured or packaged

use crate::array::{Element, NdArray};
use crate::error::{PackError, Result};
use crate::types::DataType;
use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

/// Finite substitutes for NaN and the infinities.
///
/// `pos_inf` / `neg_inf` left unset mean the largest / lowest finite value of
/// the array's element type. Substitutes outside an element type's finite
/// range are clamped to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizePolicy {
    pub nan: f64,
    pub pos_inf: Option<f64>,
    pub neg_inf: Option<f64>,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            nan: 0.0,
            pos_inf: None,
            neg_inf: None,
        }
    }
}

impl SanitizePolicy {
    pub fn with_nan(mut self, value: f64) -> Self {
        self.nan = value;
        self
    }

    pub fn with_pos_inf(mut self, value: f64) -> Self {
        self.pos_inf = Some(value);
        self
    }

    pub fn with_neg_inf(mut self, value: f64) -> Self {
        self.neg_inf = Some(value);
        self
    }

    /// Every configured substitute must itself be finite
    pub fn validate(&self) -> Result<()> {
        let substitutes = [
            ("nan", Some(self.nan)),
            ("pos_inf", self.pos_inf),
            ("neg_inf", self.neg_inf),
        ];
        for (name, value) in substitutes {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(PackError::Configuration(format!(
                        "Substitute for {} must be finite, got {}",
                        name, v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Outcome of a sanitization pass
#[derive(Debug, Clone)]
pub struct Sanitized {
    pub array: NdArray,
    /// Number of elements that were replaced
    pub replaced: usize,
}

/// Return a copy of `array` with every non-finite element substituted.
///
/// Integer arrays cannot hold non-finite values and are returned as-is.
/// The input array is never modified.
pub fn sanitize(array: &NdArray, policy: &SanitizePolicy) -> Result<Sanitized> {
    match array.data_type() {
        DataType::F32 => sanitize_float::<f32>(array, policy),
        DataType::F64 => sanitize_float::<f64>(array, policy),
        _ => Ok(Sanitized {
            array: array.clone(),
            replaced: 0,
        }),
    }
}

fn sanitize_float<T: Element + Float>(array: &NdArray, policy: &SanitizePolicy) -> Result<Sanitized> {
    let mut values = array.to_vec::<T>()?;
    if values.iter().all(|v| v.is_finite()) {
        return Ok(Sanitized {
            array: array.clone(),
            replaced: 0,
        });
    }

    let nan = substitute(Some(policy.nan), T::zero())?;
    let pos_inf = substitute(policy.pos_inf, T::max_value())?;
    let neg_inf = substitute(policy.neg_inf, T::min_value())?;

    let mut replaced = 0;
    for value in values.iter_mut().filter(|v| !v.is_finite()) {
        *value = if value.is_nan() {
            nan
        } else if value.is_sign_positive() {
            pos_inf
        } else {
            neg_inf
        };
        replaced += 1;
    }

    Ok(Sanitized {
        array: NdArray::from_values(array.shape().to_vec(), array.byte_order(), &values)?,
        replaced,
    })
}

fn substitute<T: Float>(requested: Option<f64>, default: T) -> Result<T> {
    let Some(value) = requested else {
        return Ok(default);
    };

    let bounds = T::min_value().to_f64().zip(T::max_value().to_f64());
    let (lowest, highest) = bounds.ok_or_else(|| {
        PackError::Configuration("Element type bounds are not representable".to_string())
    })?;

    <T as NumCast>::from(value.clamp(lowest, highest)).ok_or_else(|| {
        PackError::Configuration(format!("Substitute {} is not representable", value))
    })
}
