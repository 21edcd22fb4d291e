//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Application tabs, the TUI rendition of the mobile bottom nav
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AppTab {
    #[default]
    Dashboard,
    Colony,
    Tasks,
    Alerts,
    Family,
    Supply,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // List navigation within the active tab
    NextItem,
    PrevItem,

    // Act on the current selection (open colony, complete task, read alert)
    Activate,
    // Leave the colony detail view
    Back,

    // View preference
    ToggleCompactView,

    // Device pairing (simulated)
    PairSelectedColony,

    // Supply tab
    UseDose,
    OrderRefill,

    // Onboarding
    DismissOnboarding,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_tab: AppTab,
    show_help: bool,
    onboarding_pending: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Onboarding popup swallows everything except quit until dismissed
    if onboarding_pending {
        return match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Enter => Some(UiEvent::DismissOnboarding),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // Tab switching: number keys
    match key.code {
        KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Dashboard)),
        KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::Colony)),
        KeyCode::Char('3') => return Some(UiEvent::SwitchTab(AppTab::Tasks)),
        KeyCode::Char('4') => return Some(UiEvent::SwitchTab(AppTab::Alerts)),
        KeyCode::Char('5') => return Some(UiEvent::SwitchTab(AppTab::Family)),
        KeyCode::Char('6') => return Some(UiEvent::SwitchTab(AppTab::Supply)),
        _ => {}
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('v') => Some(UiEvent::ToggleCompactView),
        KeyCode::Up => Some(UiEvent::PrevItem),
        KeyCode::Down => Some(UiEvent::NextItem),
        KeyCode::Enter => Some(UiEvent::Activate),
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Char('p') if matches!(active_tab, AppTab::Dashboard | AppTab::Colony) => {
            Some(UiEvent::PairSelectedColony)
        }
        KeyCode::Char('d') if active_tab == AppTab::Supply => Some(UiEvent::UseDose),
        KeyCode::Char('r') if active_tab == AppTab::Supply => Some(UiEvent::OrderRefill),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Press;
        key
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let event = key_to_ui_event(press(KeyCode::Char('4')), AppTab::Dashboard, false, false);
        assert!(matches!(event, Some(UiEvent::SwitchTab(AppTab::Alerts))));
    }

    #[test]
    fn test_supply_keys_only_on_supply_tab() {
        let on_supply = key_to_ui_event(press(KeyCode::Char('d')), AppTab::Supply, false, false);
        assert!(matches!(on_supply, Some(UiEvent::UseDose)));

        let elsewhere = key_to_ui_event(press(KeyCode::Char('d')), AppTab::Tasks, false, false);
        assert!(elsewhere.is_none());
    }

    #[test]
    fn test_onboarding_swallows_keys_until_enter() {
        let ignored = key_to_ui_event(press(KeyCode::Char('3')), AppTab::Dashboard, false, true);
        assert!(ignored.is_none());

        let dismiss = key_to_ui_event(press(KeyCode::Enter), AppTab::Dashboard, false, true);
        assert!(matches!(dismiss, Some(UiEvent::DismissOnboarding)));
    }
}
