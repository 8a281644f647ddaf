//! Display collaborator
//!
//! The router hands labelled text frames to whatever renders them and never
//! waits for an acknowledgement.

use tracing::info;

use crate::task_queue::TaskQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    pub header: String,
    pub text: String,
}

impl TextFrame {
    pub fn new(header: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            text: text.into(),
        }
    }
}

/// Fire-and-forget sink for display frames
pub trait DisplaySink {
    fn add_frame(&self, frame: TextFrame);
}

/// Writes frames to the log, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn add_frame(&self, frame: TextFrame) {
        info!(header = %frame.header, "{}", frame.text);
    }
}

/// Queues frames for a separate screen task
impl DisplaySink for TaskQueue<TextFrame> {
    fn add_frame(&self, frame: TextFrame) {
        self.add_element(frame);
    }
}
