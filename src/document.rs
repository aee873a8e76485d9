use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentGraph;
use crate::spiral::{Spiral, SpiralId};

/// The insertion-ordered spiral collection plus its attachment graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    spirals: Vec<Spiral>,
    attachments: AttachmentGraph,
}

/// Deep copy of the document state, one per committed action.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    spirals: Vec<Spiral>,
    attachments: AttachmentGraph,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spirals(&self) -> &[Spiral] {
        &self.spirals
    }

    pub fn attachments(&self) -> &AttachmentGraph {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut AttachmentGraph {
        &mut self.attachments
    }

    pub fn spiral(&self, id: SpiralId) -> Option<&Spiral> {
        self.spirals.iter().find(|s| s.id == id)
    }

    pub fn spiral_mut(&mut self, id: SpiralId) -> Option<&mut Spiral> {
        self.spirals.iter_mut().find(|s| s.id == id)
    }

    pub fn add_spiral(&mut self, spiral: Spiral) {
        self.spirals.push(spiral);
    }

    /// Swaps in a fully recomputed spiral set. Gestures mutate a copy and
    /// assign it back in one step so readers never see a partial update.
    pub fn replace_spirals(&mut self, spirals: Vec<Spiral>) {
        self.spirals = spirals;
    }

    pub fn len(&self) -> usize {
        self.spirals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spirals.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            spirals: self.spirals.clone(),
            attachments: self.attachments.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.spirals = snapshot.spirals;
        self.attachments = snapshot.attachments;
    }

    pub fn clear(&mut self) {
        self.spirals.clear();
        self.attachments.clear();
    }
}
