/// Rounds half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(169.705_627, 2), 169.71);
        assert_eq!(round_to(3.141_59, 0), 3.0);
        assert_eq!(round_to(12.25, 1), 12.3);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
