use crate::curriculum::{self, Curriculum, Exercise, Form, FormGroup, Key};
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// What to practise and how the session behaves. Loaded from a RON file;
/// every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub keys: Vec<Key>,
    pub forms: Vec<Form>,
    pub form_groups: Vec<FormGroup>,
    /// Appended after the key × form cross product.
    pub extra_exercises: Vec<Exercise>,
    pub grace_period_secs: f64,
    pub tick_volume: f32,
    pub muted: bool,
    /// Substring of the MIDI input port name to connect to.
    pub midi_port: Option<String>,
    pub shuffle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keys: Key::ALL.to_vec(),
            forms: Vec::new(),
            form_groups: vec![FormGroup::Difficult],
            extra_exercises: vec![
                Exercise::new(Key::EFlat, Form::MajorFormula),
                Exercise::new(Key::EFlat, Form::MinorFormula),
                Exercise::new(Key::EFlat, Form::Chromatic),
                Exercise::new(Key::GFlat, Form::MajorArpeggio),
                Exercise::new(Key::EFlat, Form::MinorArpeggio),
            ],
            grace_period_secs: 2.0,
            tick_volume: 0.25,
            muted: false,
            midi_port: None,
            shuffle: true,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let ron_string = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&ron_string)
    }

    pub fn from_ron(source: &str) -> Result<Self> {
        let config: SessionConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.grace_period()?;
        if !(0.0..=1.0).contains(&self.tick_volume) {
            return Err(Error::InvalidConfig(format!(
                "tick_volume must be within 0.0..=1.0, got {}",
                self.tick_volume
            )));
        }
        Ok(())
    }

    /// Explicit forms followed by the group forms, first occurrence wins.
    pub fn selected_forms(&self) -> Vec<Form> {
        let mut forms: Vec<Form> = Vec::new();
        let grouped = self.form_groups.iter().flat_map(|group| group.forms());
        for form in self.forms.iter().copied().chain(grouped) {
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
        forms
    }

    pub fn grace_period(&self) -> Result<Duration> {
        match Duration::try_from_secs_f64(self.grace_period_secs) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(Error::InvalidConfig(format!(
                "grace_period_secs must be a positive number of seconds, got {}",
                self.grace_period_secs
            ))),
        }
    }

    pub fn build_curriculum<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Curriculum> {
        let mut exercises = curriculum::generate(&self.keys, &self.selected_forms());
        exercises.extend(self.extra_exercises.iter().copied());
        if self.shuffle {
            curriculum::shuffle(&mut exercises, rng);
        }
        Curriculum::new(exercises)
    }
}
