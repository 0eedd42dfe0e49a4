//! Selection state machine driving which view is shown.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::app::observe::Observed;
use crate::app::view::Screen;
use crate::domain::model::{Pin, Selection};
use crate::infra::opener::OpenPath;

/// Mutation queued for the UI-owned loop.
#[derive(Debug, Clone)]
pub enum SelectionCommand {
    Select(Arc<Pin>),
    Clear,
}

/// Owns the current [`Selection`].
///
/// `select` applies immediately and must be called from the loop that owns the controller.
/// `clear` is never applied in place: it is queued and takes effect on the next
/// [`apply_pending`](Self::apply_pending), after anything queued before it.
pub struct SelectionController {
    selection: Observed<Selection>,
    opener: Arc<dyn OpenPath>,
    tx: Sender<SelectionCommand>,
    rx: Receiver<SelectionCommand>,
}

impl SelectionController {
    pub fn new(opener: Arc<dyn OpenPath>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            selection: Observed::new(Selection::NoSelection),
            opener,
            tx,
            rx,
        }
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.selection.get()
    }

    /// The view the rendering layer should show.
    pub fn screen(&self) -> Screen {
        Screen::for_selection(self.selection.get())
    }

    /// Select `pin`, replacing any prior selection.
    pub fn select(&mut self, pin: Arc<Pin>) {
        tracing::debug!(pin = %pin.id(), path = %pin.path().display(), "select");
        self.selection.set(Selection::Selected(pin));
    }

    /// Queue a reset to [`Selection::NoSelection`].
    pub fn clear(&self) {
        self.clear_handle().clear();
    }

    /// Ask the open-path collaborator to reveal `path`. Selection is untouched.
    pub fn request_open(&self, path: &Path) {
        tracing::debug!(path = %path.display(), "request open");
        self.opener.open_in_browser(path);
    }

    /// Register a callback run after every selection write.
    pub fn on_update(&mut self, listener: impl FnMut(&Selection) + 'static) {
        self.selection.on_update(listener);
    }

    /// Handle for callers that may only reset the selection.
    pub fn clear_handle(&self) -> ClearHandle {
        ClearHandle {
            tx: self.tx.clone(),
        }
    }

    /// Handle for callers outside the owning loop that need to post any mutation.
    pub fn ui_handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
        }
    }

    /// Apply queued commands in submission order. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.rx.try_recv() {
            match command {
                SelectionCommand::Select(pin) => self.select(pin),
                SelectionCommand::Clear => {
                    tracing::debug!("clear");
                    self.selection.set(Selection::NoSelection);
                }
            }
            applied += 1;
        }
        applied
    }
}

/// Cloneable, sendable reset callback.
#[derive(Debug, Clone)]
pub struct ClearHandle {
    tx: Sender<SelectionCommand>,
}

impl ClearHandle {
    pub fn clear(&self) {
        post(&self.tx, SelectionCommand::Clear);
    }
}

/// Posts selection mutations to the owning loop.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: Sender<SelectionCommand>,
}

impl UiHandle {
    pub fn select(&self, pin: Arc<Pin>) {
        post(&self.tx, SelectionCommand::Select(pin));
    }

    pub fn clear(&self) {
        post(&self.tx, SelectionCommand::Clear);
    }
}

fn post(tx: &Sender<SelectionCommand>, command: SelectionCommand) {
    if tx.send(command).is_err() {
        tracing::trace!("selection controller gone; dropping command");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;

    use crate::domain::model::PinId;
    use crate::infra::opener::RecordingOpener;

    fn pin(id: u64, path: &str) -> Arc<Pin> {
        Arc::new(Pin::new(PinId(id), path, None).unwrap())
    }

    fn controller() -> (SelectionController, Arc<RecordingOpener>) {
        let opener = Arc::new(RecordingOpener::new());
        (SelectionController::new(opener.clone()), opener)
    }

    #[test]
    fn starts_without_selection() {
        let (controller, _) = controller();
        assert_eq!(controller.selection(), &Selection::NoSelection);
        assert_eq!(controller.screen(), Screen::PinList);
    }

    #[test]
    fn select_applies_immediately_and_replaces() {
        let (mut controller, _) = controller();
        let a = pin(1, "/tmp/a");
        let b = pin(2, "/tmp/b");

        controller.select(a.clone());
        assert_eq!(controller.selection(), &Selection::Selected(a));

        controller.select(b.clone());
        assert_eq!(controller.selection(), &Selection::Selected(b.clone()));
        assert_eq!(controller.screen(), Screen::Detail(b));
    }

    #[test]
    fn clear_is_deferred_until_pending_work_runs() {
        let (mut controller, _) = controller();
        controller.select(pin(1, "/tmp/a"));

        controller.clear();
        assert!(controller.selection().is_selected());

        assert_eq!(controller.apply_pending(), 1);
        assert_eq!(controller.selection(), &Selection::NoSelection);
    }

    #[test]
    fn clear_twice_from_empty_is_a_no_op() {
        let (mut controller, _) = controller();
        controller.clear();
        controller.apply_pending();
        assert_eq!(controller.selection(), &Selection::NoSelection);
        controller.clear();
        controller.apply_pending();
        assert_eq!(controller.selection(), &Selection::NoSelection);
    }

    #[test]
    fn clear_posted_after_pending_select_wins() {
        let (mut controller, _) = controller();
        let ui = controller.ui_handle();
        let reset = controller.clear_handle();

        ui.select(pin(1, "/tmp/a"));
        thread::spawn(move || reset.clear()).join().unwrap();

        assert_eq!(controller.apply_pending(), 2);
        assert_eq!(controller.selection(), &Selection::NoSelection);
    }

    #[test]
    fn request_open_leaves_selection_alone() {
        let (mut controller, opener) = controller();
        let a = pin(1, "/does/not/exist");
        controller.select(a.clone());

        controller.request_open(a.path());

        assert_eq!(opener.calls(), vec![a.path().to_path_buf()]);
        assert_eq!(controller.selection(), &Selection::Selected(a));
        assert_eq!(controller.apply_pending(), 0);
    }

    #[test]
    fn listeners_fire_after_each_transition() {
        let (mut controller, _) = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        controller.on_update(move |selection| {
            log.borrow_mut().push(selection.pin().map(|pin| pin.id()));
        });

        controller.select(pin(4, "/tmp/d"));
        controller.clear();
        controller.apply_pending();

        assert_eq!(*seen.borrow(), vec![Some(PinId(4)), None]);
    }

    #[test]
    fn handles_outliving_the_controller_are_inert() {
        let (controller, _) = controller();
        let reset = controller.clear_handle();
        drop(controller);
        reset.clear();
    }
}
