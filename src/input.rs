// ⌨️ Input Binding - controls → controller
// Each control is subscribed at most once per lifetime

use crate::controller::{Directory, LoadTicket};
use crate::criteria::{FeeFilter, Presence};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Search,
    LifeguardFilter,
    ShowerFilter,
    FeeFilter,
    ResetButton,
    LanguageToggle,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Search,
        Control::LifeguardFilter,
        Control::ShowerFilter,
        Control::FeeFilter,
        Control::ResetButton,
        Control::LanguageToggle,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    SearchChanged(String),
    LifeguardChanged(Presence),
    ShowerChanged(Presence),
    FeeChanged(FeeFilter),
    Reset,
    ToggleLanguage,
}

impl InputEvent {
    pub fn control(&self) -> Control {
        match self {
            InputEvent::SearchChanged(_) => Control::Search,
            InputEvent::LifeguardChanged(_) => Control::LifeguardFilter,
            InputEvent::ShowerChanged(_) => Control::ShowerFilter,
            InputEvent::FeeChanged(_) => Control::FeeFilter,
            InputEvent::Reset => Control::ResetButton,
            InputEvent::ToggleLanguage => Control::LanguageToggle,
        }
    }
}

/// What the caller must do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Ignored,
    Rerender,
    /// Language switched; run this load, then rerender
    Reload(LoadTicket),
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    lifetime: u64,
    bound: Option<u64>,
}

#[derive(Debug, Default)]
pub struct InputBinding {
    slots: HashMap<Control, Slot>,
}

impl InputBinding {
    pub fn new() -> Self {
        InputBinding::default()
    }

    /// Binding with every control subscribed
    pub fn bind_all() -> Self {
        let mut binding = InputBinding::new();
        for control in Control::ALL {
            binding.bind(control);
        }
        binding
    }

    /// Subscribe the control; false if already subscribed in this lifetime
    pub fn bind(&mut self, control: Control) -> bool {
        let slot = self.slots.entry(control).or_default();
        if slot.bound == Some(slot.lifetime) {
            return false;
        }
        slot.bound = Some(slot.lifetime);
        true
    }

    /// The control was recreated; its old subscription is gone
    pub fn regenerate(&mut self, control: Control) {
        let slot = self.slots.entry(control).or_default();
        slot.lifetime += 1;
    }

    pub fn is_bound(&self, control: Control) -> bool {
        self.slots
            .get(&control)
            .is_some_and(|slot| slot.bound == Some(slot.lifetime))
    }

    pub fn handle(&mut self, directory: &mut Directory, event: InputEvent) -> Dispatch {
        let control = event.control();
        if !self.is_bound(control) {
            debug!(?control, "event from unbound control ignored");
            return Dispatch::Ignored;
        }

        match event {
            InputEvent::SearchChanged(term) => directory.criteria_mut().search_term = term,
            InputEvent::LifeguardChanged(value) => directory.criteria_mut().lifeguard = value,
            InputEvent::ShowerChanged(value) => directory.criteria_mut().shower = value,
            InputEvent::FeeChanged(value) => directory.criteria_mut().fee = value,
            InputEvent::Reset => directory.reset_criteria(),
            InputEvent::ToggleLanguage => {
                let ticket = directory.toggle();
                // Relocalization recreates the toggle control
                self.regenerate(Control::LanguageToggle);
                self.bind(Control::LanguageToggle);
                return Dispatch::Reload(ticket);
            }
        }

        Dispatch::Rerender
    }
}
