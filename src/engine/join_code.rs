use rand::distributions::Alphanumeric;
use rand::Rng;

pub const JOIN_CODE_LENGTH: usize = 6;

/// Random upper-case alphanumeric join code.
pub fn generate<R: Rng>(rng: &mut R) -> String {
    (0..JOIN_CODE_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_uppercase())
        .collect()
}

/// Normalizes user input to the stored code convention.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_codes_are_upper_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = generate(&mut rng);
            assert_eq!(code.len(), JOIN_CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ab12cd "), "AB12CD");
    }
}
