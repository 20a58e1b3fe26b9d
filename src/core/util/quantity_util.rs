use crate::core::client::kube_resources::Quantity;
use crate::errors::CacheError;

pub struct QuantityUtil;

impl QuantityUtil {
    /// Parse a Kubernetes quantity (`500m`, `2Gi`, `1e3`, `4`) into base units.
    ///
    /// CPU ends up in cores, memory in bytes, counts as plain numbers.
    pub fn parse(resource: &str, quantity: &Quantity) -> Result<f64, CacheError> {
        let raw = quantity.0.trim();
        let invalid = || CacheError::InvalidQuantity {
            resource: resource.to_string(),
            value: quantity.0.clone(),
        };

        if raw.is_empty() {
            return Err(invalid());
        }

        let split = raw
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(raw.len());
        let (number, suffix) = raw.split_at(split);

        let value: f64 = number.parse().map_err(|_| invalid())?;

        // Decimal exponent form: 1e3, 12E-2
        let parsed = match suffix.strip_prefix(['e', 'E']) {
            Some(exp) if !exp.is_empty() => {
                let exp: i32 = exp.parse().map_err(|_| invalid())?;
                value * 10f64.powi(exp)
            }
            _ => value * Self::suffix_multiplier(suffix).ok_or_else(invalid)?,
        };

        // Overflow to inf is as unusable as garbage
        if !parsed.is_finite() {
            return Err(invalid());
        }
        Ok(parsed)
    }

    fn suffix_multiplier(suffix: &str) -> Option<f64> {
        let m = match suffix {
            "" => 1.0,
            "n" => 1e-9,
            "u" => 1e-6,
            "m" => 1e-3,
            "k" => 1e3,
            "M" => 1e6,
            "G" => 1e9,
            "T" => 1e12,
            "P" => 1e15,
            "E" => 1e18,
            "Ki" => 1024.0,
            "Mi" => 1024f64.powi(2),
            "Gi" => 1024f64.powi(3),
            "Ti" => 1024f64.powi(4),
            "Pi" => 1024f64.powi(5),
            "Ei" => 1024f64.powi(6),
            _ => return None,
        };
        Some(m)
    }
}
