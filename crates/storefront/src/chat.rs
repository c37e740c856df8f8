//! Support chat panel.
//!
//! A modal that simulates a live support conversation. Nothing leaves the
//! page: each sent message earns one canned reply after a fixed delay, and
//! the log is gone when the page is.
//!
//! The panel never sleeps. [`ChatPanel::send`] records when the reply is due,
//! and the event loop calls [`ChatPanel::deliver_due`] once that time has
//! passed (see [`ChatPanel::next_reply_at`]). A scheduled reply cannot be
//! cancelled; it is appended whether or not the panel is still open.

use std::collections::VecDeque;
use std::time::Duration;

use askama::Template;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Text of the simulated support reply.
pub const AUTO_REPLY: &str =
    "Thank you for your message! A representative will be with you shortly.";

/// Key that submits the chat input.
pub const SEND_KEY: &str = "Enter";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Typed by the shopper.
    Sent,
    /// The simulated representative.
    Received,
}

impl Direction {
    /// CSS class used on the rendered message.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    /// Speaker label for plain-text output.
    #[must_use]
    pub const fn speaker(self) -> &'static str {
        match self {
            Self::Sent => "you",
            Self::Received => "support",
        }
    }
}

/// One entry in the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub direction: Direction,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(direction: Direction, text: impl Into<String>) -> Self {
        Self {
            direction,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Where a click on the open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed area around the dialog.
    Backdrop,
    /// Inside the dialog itself.
    Content,
}

/// Chat modal state: visibility, the input box, and the message log.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    open: bool,
    input: String,
    log: Vec<ChatMessage>,
    pending: VecDeque<Instant>,
    reply_delay: Duration,
}

impl ChatPanel {
    /// A closed panel with an empty log.
    #[must_use]
    pub const fn new(reply_delay: Duration) -> Self {
        Self {
            open: false,
            input: String::new(),
            log: Vec::new(),
            pending: VecDeque::new(),
            reply_delay,
        }
    }

    /// Whether the modal is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Show the modal.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Handle a click while the modal is showing.
    ///
    /// A click on the backdrop closes the panel. Returns `true` if it did.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if self.open && target == ClickTarget::Backdrop {
            self.open = false;
            return true;
        }
        false
    }

    /// Current contents of the input box.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the contents of the input box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Handle a key press in the input box. Enter sends.
    ///
    /// Returns `true` if a message was sent.
    pub fn key_press(&mut self, key: &str, now: Instant) -> bool {
        key == SEND_KEY && self.send(now)
    }

    /// Send whatever is in the input box.
    ///
    /// Blank input (after trimming) does nothing. Otherwise the trimmed text
    /// is logged as sent, the input is cleared, and a reply is scheduled for
    /// `now + reply_delay`. Returns `true` if a message was sent.
    pub fn send(&mut self, now: Instant) -> bool {
        let text = self.input.trim();
        if text.is_empty() {
            return false;
        }

        self.log.push(ChatMessage::new(Direction::Sent, text));
        self.input.clear();
        self.pending.push_back(now + self.reply_delay);
        tracing::debug!(pending = self.pending.len(), "Chat message sent, reply scheduled");
        true
    }

    /// When the earliest outstanding reply is due.
    #[must_use]
    pub fn next_reply_at(&self) -> Option<Instant> {
        self.pending.front().copied()
    }

    /// Number of replies scheduled but not yet delivered.
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Append every reply whose due time is at or before `now`.
    ///
    /// Returns how many replies were appended.
    pub fn deliver_due(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while self.pending.front().is_some_and(|due| *due <= now) {
            self.pending.pop_front();
            self.log.push(ChatMessage::new(Direction::Received, AUTO_REPLY));
            delivered += 1;
        }
        if delivered > 0 {
            tracing::debug!(delivered, "Chat replies delivered");
        }
        delivered
    }

    /// The message log, oldest first.
    #[must_use]
    pub fn log(&self) -> &[ChatMessage] {
        &self.log
    }
}

// =============================================================================
// Display
// =============================================================================

/// Chat message display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessageView {
    pub css_class: &'static str,
    pub speaker: &'static str,
    pub time: String,
    pub text: String,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            css_class: message.direction.css_class(),
            speaker: message.direction.speaker(),
            time: message.at.format("%H:%M:%S").to_string(),
            text: message.text.clone(),
        }
    }
}

/// A message appended to the chat window.
#[derive(Template)]
#[template(path = "partials/chat_message.html")]
pub struct ChatMessageTemplate<'a> {
    pub message: &'a ChatMessageView,
}

/// A chat line for the terminal.
#[derive(Template)]
#[template(path = "terminal/chat.txt")]
pub struct ChatLineTemplate<'a> {
    pub message: &'a ChatMessageView,
}
