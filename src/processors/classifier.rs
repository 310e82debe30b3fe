use crate::error::{CompactionError, Result};
use crate::models::{ActivityMetadata, ActivityType, Intensity};
use crate::utils::constants::{REST_TOKEN, RUNNING_TOKEN, STAIR_STEPPER_TOKEN, TREPPE_TOKEN};

/// Derives the activity type from name and raw sport type metadata.
/// Matching is case-sensitive and checked in order: running, stair climbing,
/// rest. An unrecognized activity is an error, never a silent default.
pub struct ActivityClassifier;

impl ActivityClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, metadata: &ActivityMetadata) -> Result<ActivityType> {
        self.classify_name(metadata.id, &metadata.name, &metadata.sport_type)
    }

    pub fn classify_name(&self, id: u64, name: &str, sport_type: &str) -> Result<ActivityType> {
        if name.contains(RUNNING_TOKEN) {
            return Ok(ActivityType::Running {
                intensity: Self::intensity_from_name(name),
            });
        }

        if name.contains(TREPPE_TOKEN)
            || name.contains(STAIR_STEPPER_TOKEN)
            || sport_type == STAIR_STEPPER_TOKEN
        {
            return Ok(ActivityType::Treppe);
        }

        if name.contains(REST_TOKEN) {
            return Ok(ActivityType::Rest);
        }

        Err(CompactionError::UnclassifiedActivity {
            id,
            name: name.to_string(),
        })
    }

    /// Parity of the trailing number in the name: odd selects the lower-paced
    /// variant, even the higher-paced one. No trailing number defaults to Low.
    fn intensity_from_name(name: &str) -> Intensity {
        match name.bytes().rev().find(|b| b.is_ascii_digit()) {
            Some(digit) => {
                if (digit - b'0') % 2 == 1 {
                    Intensity::Low
                } else {
                    Intensity::High
                }
            }
            None => Intensity::Low,
        }
    }
}

impl Default for ActivityClassifier {
    fn default() -> Self {
        Self::new()
    }
}
