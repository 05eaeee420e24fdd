use serde::{Deserialize, Serialize};

pub const NEGATIVE_CONTROL: &str = "HB-44976-b1";
pub const LIVE_DEAD_CONTROL: &str = "live:dead";
pub const UNSTAINED_CONTROL: &str = "unstained";

/// What kind of content a well label stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WellKind {
    TestArticle,
    NegativeControl,
    LiveDeadControl,
    UnstainedControl,
}

impl WellKind {
    pub fn classify(label: &str) -> Self {
        match label {
            NEGATIVE_CONTROL => Self::NegativeControl,
            LIVE_DEAD_CONTROL => Self::LiveDeadControl,
            UNSTAINED_CONTROL => Self::UnstainedControl,
            _ => Self::TestArticle,
        }
    }

    pub fn is_control(self) -> bool {
        self != Self::TestArticle
    }
}

/// The optional viability controls placed after the test articles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSet {
    pub live_dead: bool,
    pub unstained: bool,
}

impl Default for ControlSet {
    fn default() -> Self {
        Self {
            live_dead: true,
            unstained: true,
        }
    }
}

impl ControlSet {
    pub fn none() -> Self {
        Self {
            live_dead: false,
            unstained: false,
        }
    }

    /// Number of replicate groups these controls occupy.
    pub fn count(&self) -> usize {
        usize::from(self.live_dead) + usize::from(self.unstained)
    }

    /// Labels in placement order: live/dead first, then unstained.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut ret = Vec::with_capacity(2);
        if self.live_dead {
            ret.push(LIVE_DEAD_CONTROL);
        }
        if self.unstained {
            ret.push(UNSTAINED_CONTROL);
        }
        ret
    }
}
