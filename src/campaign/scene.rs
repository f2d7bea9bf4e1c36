//! Opening scenes for the Leisure King clips.
//!
//! Scene choice is random in production. The randomness sits behind
//! [`Picker`] so tests can pin the exact output.

use rand::Rng;

/// Chooses an index into a list of options.
pub trait Picker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// A [`Picker`] backed by any random number generator.
#[derive(Debug)]
pub struct RandomPicker<R>(pub R);

impl RandomPicker<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> Picker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

const LUXURY_ACTIONS: &[&str] = &[
    "sipping espresso from a gold cup",
    "eating a shrimp cocktail",
    "reading a leather-bound book",
    "getting a manicure",
    "wearing a silk sleep mask and adjusting it dramatically",
];

const CHAOTIC_ENVIRONMENTS: &[&str] = &[
    "in an active car wash",
    "at a construction site",
    "on a busy highway shoulder",
    "in an industrial freezer",
    "during a middle-school food fight",
];

/// A luxurious action performed somewhere it has no business happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub action: &'static str,
    pub environment: &'static str,
}

impl Scene {
    pub fn pick(picker: &mut dyn Picker) -> Self {
        Self {
            action: choose(LUXURY_ACTIONS, picker),
            environment: choose(CHAOTIC_ENVIRONMENTS, picker),
        }
    }
}

fn choose(options: &[&'static str], picker: &mut dyn Picker) -> &'static str {
    // Out-of-range picks wrap instead of panicking.
    let idx = picker.pick(options.len()) % options.len();
    options[idx]
}
