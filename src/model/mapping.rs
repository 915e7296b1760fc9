use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a numbered source frame lands in the sprite's animation set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    pub action: String,
    pub index: u32,
}

impl AnimationFrame {
    pub fn new(action: impl Into<String>, index: u32) -> Self {
        Self {
            action: action.into(),
            index,
        }
    }
}

/// One `[[animation_mapping]]` table in the config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MappingEntry {
    pub frame: u32,
    pub action: String,
    pub index: u32,
}

/// Frame number (as found in `Name_<frame>.png`) to action frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MappingEntry>", into = "Vec<MappingEntry>")]
pub struct AnimationMapping {
    frames: BTreeMap<u32, AnimationFrame>,
}

impl Default for AnimationMapping {
    fn default() -> Self {
        Self {
            frames: default_frames(),
        }
    }
}

impl AnimationMapping {
    pub fn empty() -> Self {
        Self {
            frames: BTreeMap::new(),
        }
    }

    pub fn get(&self, frame: u32) -> Option<&AnimationFrame> {
        self.frames.get(&frame)
    }

    pub fn set(&mut self, frame: u32, target: AnimationFrame) {
        self.frames.insert(frame, target);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl TryFrom<Vec<MappingEntry>> for AnimationMapping {
    type Error = String;

    fn try_from(entries: Vec<MappingEntry>) -> Result<Self, Self::Error> {
        let mut mapping = Self::empty();
        for entry in entries {
            if mapping.get(entry.frame).is_some() {
                return Err(format!(
                    "frame {} is mapped more than once in animation_mapping",
                    entry.frame
                ));
            }
            mapping.set(entry.frame, AnimationFrame::new(entry.action, entry.index));
        }
        Ok(mapping)
    }
}

impl From<AnimationMapping> for Vec<MappingEntry> {
    fn from(mapping: AnimationMapping) -> Self {
        mapping
            .frames
            .into_iter()
            .map(|(frame, target)| MappingEntry {
                frame,
                action: target.action,
                index: target.index,
            })
            .collect()
    }
}

fn default_frames() -> BTreeMap<u32, AnimationFrame> {
    let mut map = BTreeMap::new();

    map.insert(0, AnimationFrame::new("Idle", 0));
    map.insert(1, AnimationFrame::new("Idle", 1));
    map.insert(2, AnimationFrame::new("Walk", 0));
    map.insert(3, AnimationFrame::new("Walk", 1));
    map.insert(4, AnimationFrame::new("Run", 0));
    map.insert(5, AnimationFrame::new("Run", 1));
    map.insert(6, AnimationFrame::new("Happy", 0));
    map.insert(7, AnimationFrame::new("Rest", 0));
    map.insert(8, AnimationFrame::new("Attack", 0));
    // back view turn
    map.insert(9, AnimationFrame::new("Turn", 0));

    map
}
