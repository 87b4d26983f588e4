// SPDX-FileCopyrightText: 2026 Timewarden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time verification code generation.

/// Generates one-time verification codes.
///
/// Injected rather than reached through a global so tests can pin the code;
/// implementations must be thread safe.
pub trait PinGenerator: Send + Sync {
    /// The next four-digit code.
    fn next_pin(&self) -> u32;
}

/// Default generator backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPinGenerator;

impl PinGenerator for RandomPinGenerator {
    fn next_pin(&self) -> u32 {
        use rand::Rng;
        rand::thread_rng().gen_range(1000..=9999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pin_is_four_digits() {
        let generator = RandomPinGenerator;
        for _ in 0..100 {
            let pin = generator.next_pin();
            assert!((1000..=9999).contains(&pin), "pin out of range: {pin}");
        }
    }
}
