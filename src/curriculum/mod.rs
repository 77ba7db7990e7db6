mod exercise;
mod groups;

pub use exercise::{Exercise, Form, Key};
pub use groups::FormGroup;

use crate::{Error, Result};
use rand::Rng;
use rand::seq::SliceRandom;

/// Every (key, form) pairing, keys outermost.
pub fn generate(keys: &[Key], forms: &[Form]) -> Vec<Exercise> {
    keys.iter()
        .flat_map(|&key| forms.iter().map(move |&form| Exercise::new(key, form)))
        .collect()
}

pub fn shuffle<R: Rng + ?Sized>(exercises: &mut [Exercise], rng: &mut R) {
    exercises.shuffle(rng);
}

/// Ordered, non-empty list of exercises for one session.
#[derive(Debug, Clone)]
pub struct Curriculum {
    exercises: Vec<Exercise>,
}

impl Curriculum {
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        if exercises.is_empty() {
            return Err(Error::EmptyCurriculum);
        }
        Ok(Self { exercises })
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    // Never empty, kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Exercise {
        self.exercises[index % self.exercises.len()]
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.exercises.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.exercises.len() - 1) % self.exercises.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_is_the_cross_product() {
        let exercises = generate(&[Key::C, Key::D], &[Form::Major, Form::Chromatic]);
        assert_eq!(
            exercises,
            vec![
                Exercise::new(Key::C, Form::Major),
                Exercise::new(Key::C, Form::Chromatic),
                Exercise::new(Key::D, Form::Major),
                Exercise::new(Key::D, Form::Chromatic),
            ]
        );
    }

    #[test]
    fn generate_with_no_keys_is_empty() {
        assert!(generate(&[], &Form::ALL).is_empty());
    }

    #[test]
    fn shuffle_keeps_every_exercise() {
        let mut exercises = generate(&Key::ALL, &Form::ALL);
        let mut rng = StdRng::seed_from_u64(7);
        shuffle(&mut exercises, &mut rng);

        assert_eq!(exercises.len(), 96);
        for key in Key::ALL {
            for form in Form::ALL {
                assert!(exercises.contains(&Exercise::new(key, form)));
            }
        }
    }

    #[test]
    fn empty_curriculum_is_rejected() {
        assert!(matches!(Curriculum::new(vec![]), Err(Error::EmptyCurriculum)));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let curriculum = Curriculum::new(generate(&[Key::C, Key::D, Key::E], &[Form::Major]))
            .expect("non-empty");
        assert_eq!(curriculum.next_index(2), 0);
        assert_eq!(curriculum.prev_index(0), 2);
        assert_eq!(curriculum.prev_index(curriculum.next_index(1)), 1);
    }
}
