use super::Form;
use serde::{Deserialize, Serialize};

/// Named bundles of forms that are usually drilled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormGroup {
    Scales,
    Tonics,
    Sevenths,
    BrokenSevenths,
    SolidSevenths,
    SeventhArpeggios,
    Arpeggios,
    All,
    Difficult,
}

impl FormGroup {
    pub fn forms(self) -> Vec<Form> {
        match self {
            FormGroup::Scales => vec![Form::Major, Form::MinorHarmonic, Form::MinorMelodic],
            FormGroup::Tonics => vec![Form::MajorTonic4, Form::MinorTonic4],
            FormGroup::Sevenths => vec![
                Form::Diminished7Broken,
                Form::Diminished7Solid,
                Form::Dominant7Broken,
                Form::Dominant7Solid,
            ],
            FormGroup::BrokenSevenths => vec![Form::Diminished7Broken, Form::Dominant7Broken],
            FormGroup::SolidSevenths => vec![Form::Diminished7Solid, Form::Dominant7Solid],
            FormGroup::SeventhArpeggios => {
                vec![Form::Diminished7Arpeggio, Form::Dominant7Arpeggio]
            }
            FormGroup::Arpeggios => vec![Form::MajorArpeggio, Form::MinorArpeggio],
            FormGroup::All => [
                FormGroup::Scales,
                FormGroup::Tonics,
                FormGroup::BrokenSevenths,
                FormGroup::SolidSevenths,
                FormGroup::SeventhArpeggios,
                FormGroup::Arpeggios,
            ]
            .into_iter()
            .flat_map(FormGroup::forms)
            .collect(),
            FormGroup::Difficult => [
                FormGroup::Tonics,
                FormGroup::BrokenSevenths,
                FormGroup::SeventhArpeggios,
                FormGroup::Arpeggios,
            ]
            .into_iter()
            .flat_map(FormGroup::forms)
            .collect(),
        }
    }
}
