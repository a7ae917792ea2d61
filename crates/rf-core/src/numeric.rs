use crate::RfError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, RfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RfError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Aerodynamic coefficients may be zero to disable a term.
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, RfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(RfError::Negative { what, value: v });
    }
    Ok(v)
}

/// Finite and `> 0`. Used for anything that ends up as a divisor.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, RfError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(RfError::NotPositive { what, value: v });
    }
    Ok(v)
}
