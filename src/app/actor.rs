//! App actor - message loop processing UI events and device events

use tokio::sync::mpsc;

use crate::app::state::{AppState, UiState};
use crate::app::store::Store;
use crate::messages::{DeviceCommand, DeviceEvent, RenderState, UiEvent};
use crate::storage::{Prefs, PrefsStore};

/// App actor that owns the store and processes UI and device events
pub struct AppActor {
    pub(crate) store: Store,
    pub(crate) ui: UiState,
    pub(crate) prefs_store: PrefsStore,
    pub(crate) device_tx: mpsc::UnboundedSender<DeviceCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        initial: AppState,
        prefs: Prefs,
        prefs_store: PrefsStore,
        device_tx: mpsc::UnboundedSender<DeviceCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            store: Store::new(initial),
            ui: UiState {
                compact_view: prefs.compact_view,
                ..UiState::default()
            },
            prefs_store,
            device_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut device_rx: mpsc::UnboundedReceiver<DeviceEvent>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.device_tx.send(DeviceCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.render_state());
                }
                Some(event) = device_rx.recv() => {
                    self.handle_device_event(event);
                    let _ = self.render_tx.send(self.render_state());
                }
                else => break,
            }
        }
    }

    fn render_state(&self) -> RenderState {
        self.store.state().to_render_state(&self.ui)
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::SwitchTab(tab) => self.switch_tab(tab),

            UiEvent::NextItem => self.next_item(),
            UiEvent::PrevItem => self.prev_item(),
            UiEvent::Activate => self.activate(),
            UiEvent::Back => self.back(),

            UiEvent::ToggleCompactView => self.toggle_compact_view(),

            UiEvent::PairSelectedColony => self.pair_selected_colony(),

            UiEvent::UseDose => self.use_dose(),
            UiEvent::OrderRefill => self.order_refill(),

            UiEvent::DismissOnboarding => self.dismiss_onboarding(),

            UiEvent::ToggleHelp => self.ui.show_help = !self.ui.show_help,
            UiEvent::CloseHelp => self.ui.show_help = false,

            UiEvent::Quit => return true,
        }

        false
    }

    fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Paired { colony_id } => self.finish_pairing(&colony_id),
        }
    }
}
