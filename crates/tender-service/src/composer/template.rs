//! Notification sentence templates.

use serde::{Deserialize, Serialize};

use tender_core::config::console::ConsoleConfig;
use tender_entity::notification::{Direction, TenderAction};

/// Vessel name used when none is configured.
pub const DEFAULT_VESSEL_NAME: &str = "Evrima";

const PIER: &str = "the pier";

/// What the operator picked on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageChoice {
    /// A sentence built from the action/direction buttons.
    Templated {
        /// Selected action, if any.
        action: Option<TenderAction>,
        /// Selected direction, if any.
        direction: Option<Direction>,
        /// Tender label; empty means "A tender".
        #[serde(default)]
        tender: String,
    },
    /// Free text typed by the operator.
    Custom {
        /// The text as typed.
        text: String,
    },
}

/// Builds notification sentences.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    vessel_name: String,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_VESSEL_NAME)
    }
}

impl MessageComposer {
    /// Creates a composer for the given vessel.
    pub fn new(vessel_name: impl Into<String>) -> Self {
        Self {
            vessel_name: vessel_name.into(),
        }
    }

    /// Creates a composer from console configuration.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.vessel_name.clone())
    }

    /// The vessel name used for shipside sentences.
    pub fn vessel_name(&self) -> &str {
        &self.vessel_name
    }

    /// Compose the sentence for a set of form values.
    ///
    /// Custom text wins when it has any non-whitespace content and is returned
    /// untouched. Otherwise both action and direction are required; an empty
    /// string means the form is not ready to send.
    pub fn compose(
        &self,
        action: Option<TenderAction>,
        direction: Option<Direction>,
        tender: &str,
        is_custom: bool,
        custom_text: &str,
    ) -> String {
        if is_custom && !custom_text.trim().is_empty() {
            return custom_text.to_string();
        }
        let (Some(action), Some(direction)) = (action, direction) else {
            return String::new();
        };

        let prefix = if tender.is_empty() {
            "A tender".to_string()
        } else {
            tender.to_string()
        };
        let location = match direction {
            Direction::Shoreside => PIER,
            Direction::Shipside => self.vessel_name.as_str(),
        };
        // Shipside sentences name the vessel directly, without a preposition.
        let at = match direction {
            Direction::Shoreside => Some("at"),
            Direction::Shipside => None,
        };
        let from = match direction {
            Direction::Shoreside => Some("from"),
            Direction::Shipside => None,
        };

        let (verb, preposition, tail) = match action {
            TenderAction::Arrived => ("has arrived", at, ""),
            TenderAction::Departed => ("has departed", from, ""),
            TenderAction::Arriving => ("is arriving", at, " in less than 5 minutes"),
        };

        let mut words = vec![prefix.as_str(), verb];
        words.extend(preposition);
        words.push(location);
        format!("{}{tail}.", words.join(" "))
    }

    /// Compose from a [`MessageChoice`].
    pub fn compose_choice(&self, choice: &MessageChoice) -> String {
        match choice {
            MessageChoice::Templated {
                action,
                direction,
                tender,
            } => self.compose(*action, *direction, tender, false, ""),
            MessageChoice::Custom { text } => self.compose(None, None, "", true, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TenderAction::*;
    use Direction::*;

    fn c() -> MessageComposer {
        MessageComposer::default()
    }

    #[test]
    fn test_full_grid() {
        let cases = [
            (Arrived, Shoreside, "", "A tender has arrived at the pier."),
            (Arrived, Shoreside, "Tender 2", "Tender 2 has arrived at the pier."),
            (Arrived, Shipside, "", "A tender has arrived Evrima."),
            (Arrived, Shipside, "Tender 1", "Tender 1 has arrived Evrima."),
            (Departed, Shoreside, "", "A tender has departed from the pier."),
            (Departed, Shoreside, "Tender 1", "Tender 1 has departed from the pier."),
            (Departed, Shipside, "", "A tender has departed Evrima."),
            (Departed, Shipside, "Tender 1", "Tender 1 has departed Evrima."),
        ];
        for (action, direction, tender, expected) in cases {
            assert_eq!(
                c().compose(Some(action), Some(direction), tender, false, ""),
                expected
            );
        }
    }

    #[test]
    fn test_legacy_arriving() {
        assert_eq!(
            c().compose(Some(Arriving), Some(Shoreside), "Tender 4", false, ""),
            "Tender 4 is arriving at the pier in less than 5 minutes."
        );
        assert_eq!(
            c().compose(Some(Arriving), Some(Shipside), "", false, ""),
            "A tender is arriving Evrima in less than 5 minutes."
        );
    }

    #[test]
    fn test_custom_text_is_verbatim() {
        assert_eq!(c().compose(Some(Arrived), Some(Shipside), "Tender 1", true, " hello "), " hello ");
        // Blank custom text falls through to the template.
        assert_eq!(
            c().compose(Some(Arrived), Some(Shoreside), "", true, "   "),
            "A tender has arrived at the pier."
        );
        assert_eq!(c().compose(None, None, "", true, "  "), "");
    }

    #[test]
    fn test_missing_choice_is_empty() {
        assert_eq!(c().compose(None, Some(Shoreside), "Tender 1", false, ""), "");
        assert_eq!(c().compose(Some(Departed), None, "Tender 1", false, ""), "");
        // Custom text is ignored unless the custom flag is set.
        assert_eq!(c().compose(None, None, "", false, "hello"), "");
    }

    #[test]
    fn test_configured_vessel() {
        let composer = MessageComposer::new("Ilma");
        assert_eq!(
            composer.compose(Some(Departed), Some(Shipside), "Tender 3", false, ""),
            "Tender 3 has departed Ilma."
        );
    }

    #[test]
    fn test_choice_deserializes_and_composes() {
        let choice: MessageChoice = serde_json::from_value(serde_json::json!({
            "kind": "templated",
            "action": "DEPARTED",
            "direction": "SHIPSIDE",
            "tender": "Tender 1"
        }))
        .unwrap();
        assert_eq!(c().compose_choice(&choice), "Tender 1 has departed Evrima.");

        let unknown = serde_json::from_value::<MessageChoice>(serde_json::json!({
            "kind": "templated",
            "action": "DOCKED",
            "direction": "SHIPSIDE"
        }));
        assert!(unknown.is_err());
    }
}
