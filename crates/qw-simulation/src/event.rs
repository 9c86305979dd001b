use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of simulation event occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimEventKind {
    // Quest lifecycle
    /// The player took on a quest.
    QuestStart,
    /// A quest ended, successfully or not.
    QuestComplete,
    /// A dialogue attached to the current quest played.
    Dialogue,

    // Player state
    /// Experience, gold, level, or another stat changed.
    StatChange,
    /// Standing with a faction changed.
    ReputationChange,
    /// The alignment triple shifted.
    AlignmentChange,
    /// An item entered the inventory.
    ItemGain,
    /// An item left the inventory.
    ItemLoss,
    /// A story flag was set.
    FlagSet,
    /// The player moved.
    LocationChange,
}

impl SimEventKind {
    /// The wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuestStart => "quest_start",
            Self::QuestComplete => "quest_complete",
            Self::Dialogue => "dialogue",
            Self::StatChange => "stat_change",
            Self::ReputationChange => "reputation_change",
            Self::AlignmentChange => "alignment_change",
            Self::ItemGain => "item_gain",
            Self::ItemLoss => "item_loss",
            Self::FlagSet => "flag_set",
            Self::LocationChange => "location_change",
        }
    }
}

impl fmt::Display for SimEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an event should be highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    /// Routine.
    #[default]
    Info,
    /// Noteworthy setback.
    Warning,
    /// A failure.
    Error,
    /// An achievement.
    Success,
}

/// A record of something that happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimEvent {
    /// Sequence number within the run, assigned by the log.
    pub id: u64,
    /// Simulated seconds since the run started.
    pub timestamp_seconds: u64,
    /// The event kind.
    #[serde(rename = "type")]
    pub kind: SimEventKind,
    /// A human-readable description.
    pub description: String,
    /// Structured details.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Display severity.
    #[serde(default)]
    pub severity: EventSeverity,
}

impl SimEvent {
    /// Create an info event at the given simulated time.
    pub fn new(timestamp_seconds: u64, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            timestamp_seconds,
            kind,
            description: description.into(),
            data: serde_json::Value::Null,
            severity: EventSeverity::Info,
        }
    }

    /// Attach structured details.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: EventSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// The append-only event log of one run. Every event is kept.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, numbering it from 1.
    pub fn push(&mut self, mut event: SimEvent) {
        event.id = self.events.len() as u64 + 1;
        self.events.push(event);
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the log, returning the events in order.
    pub fn into_events(self) -> Vec<SimEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_log_numbers_events() {
        let mut log = EventLog::new();
        log.push(SimEvent::new(0, SimEventKind::QuestStart, "start"));
        log.push(SimEvent::new(90, SimEventKind::QuestComplete, "done"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].id, 1);
        assert_eq!(log.events()[1].id, 2);
    }

    #[test]
    fn event_log_keeps_every_event() {
        let mut log = EventLog::new();
        for i in 0..500 {
            log.push(SimEvent::new(i, SimEventKind::StatChange, "xp"));
        }
        assert_eq!(log.len(), 500);
        assert_eq!(log.events()[0].timestamp_seconds, 0);
        assert_eq!(log.events()[499].id, 500);
    }

    #[test]
    fn event_serializes_with_wire_names() {
        let event = SimEvent::new(60, SimEventKind::ItemGain, "found a key")
            .with_severity(EventSeverity::Success)
            .with_data(serde_json::json!({ "item": "key" }));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "item_gain");
        assert_eq!(json["timestampSeconds"], 60);
        assert_eq!(json["severity"], "success");
        assert_eq!(json["data"]["item"], "key");
    }
}
