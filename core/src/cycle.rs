#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    Start,
    Stop,
    Keep,
}

// Timer exists only while enabled and both the section and the document are visible.
#[derive(Clone, Copy, Debug)]
pub struct CycleGate {
    enabled: bool,
    section_visible: bool,
    document_visible: bool,
    running: bool,
}

impl CycleGate {
    pub fn new(enabled: bool, document_visible: bool) -> Self {
        Self {
            enabled,
            section_visible: true,
            document_visible,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn should_run(&self) -> bool {
        self.enabled && self.section_visible && self.document_visible
    }

    pub fn set_section_visible(&mut self, visible: bool) -> GateAction {
        self.section_visible = visible;
        self.reconcile()
    }

    pub fn set_document_visible(&mut self, visible: bool) -> GateAction {
        self.document_visible = visible;
        self.reconcile()
    }

    pub fn shutdown(&mut self) -> GateAction {
        self.enabled = false;
        self.reconcile()
    }

    pub fn reconcile(&mut self) -> GateAction {
        match (self.should_run(), self.running) {
            (true, false) => {
                self.running = true;
                GateAction::Start
            }
            (false, true) => {
                self.running = false;
                GateAction::Stop
            }
            _ => GateAction::Keep,
        }
    }
}
