//! Hash algorithm implementations.

mod average;
mod perceptual;

pub use average::{average_hash, average_hash_raster, AVERAGE_HASH_SIZE};
pub use perceptual::{dct_hash, dct_hash_raster, dct_hash_with, DCT_HASH_SIZE, LOW_FREQUENCY_SIZE};

/// Pack one bit per value, most significant bit first: `1` when the value is
/// strictly greater than `threshold`.
fn threshold_bits(values: &[f64], threshold: f64) -> u64 {
    debug_assert!(values.len() <= 64);

    values.iter().fold(0u64, |hash, &value| {
        (hash << 1) | u64::from(value > threshold)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_lands_in_most_significant_bit() {
        let mut values = vec![0.0; 64];
        values[0] = 1.0;
        assert_eq!(threshold_bits(&values, 0.5), 0x8000_0000_0000_0000);
    }

    #[test]
    fn values_equal_to_threshold_are_zero() {
        assert_eq!(threshold_bits(&[3.0; 64], 3.0), 0);
    }
}
