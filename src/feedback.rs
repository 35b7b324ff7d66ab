//! The user feedback channel: status line, audible alert and repaint requests

use crate::types::BBox;

/// Sink for everything the engines tell the user
pub trait Feedback {
    /// Show a status-line message
    fn put_msg(&mut self, msg: &str);

    /// Sound the alert that accompanies a failure
    fn beep(&mut self);

    /// Ask the canvas to repaint a region
    fn redisplay(&mut self, _region: BBox) {}
}

/// Records every call, for tests and for hosts that render the log later
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    pub messages: Vec<String>,
    pub beeps: usize,
    pub redisplayed: Vec<BBox>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl Feedback for MessageLog {
    fn put_msg(&mut self, msg: &str) {
        self.messages.push(msg.to_owned());
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }

    fn redisplay(&mut self, region: BBox) {
        self.redisplayed.push(region);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn put_msg(&mut self, _msg: &str) {}

    fn beep(&mut self) {}
}

/// Report a failure: the error's message, then the alert
pub(crate) fn report_failure(feedback: &mut dyn Feedback, err: &dyn std::fmt::Display) {
    feedback.put_msg(&err.to_string());
    feedback.beep();
}
