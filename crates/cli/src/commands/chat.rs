//! Chat command.
//!
//! # Usage
//!
//! ```bash
//! parrot chat "Where is my parrot?"
//! ```
//!
//! Opens the panel, sends the message, and waits out the reply delay so the
//! canned answer is printed before the process exits.

use std::io::Write;

use askama::Template;
use parrot_storefront::chat::{ChatLineTemplate, ChatMessageView};
use parrot_storefront::storage::KeyValueStore;
use parrot_storefront::{AppError, Page, PageEvent, Result};
use tokio::time::{Instant, sleep_until};

/// Send one message and print it together with its reply.
///
/// # Errors
///
/// Returns `AppError::BadInput` if the message is blank, or a render or
/// I/O error.
pub async fn send<S: KeyValueStore>(
    page: &mut Page<S>,
    text: &str,
    out: &mut impl Write,
) -> Result<()> {
    let before = page.chat().log().len();

    for event in [
        PageEvent::OpenChat,
        PageEvent::ChatInput(text.to_string()),
        PageEvent::ChatSend,
    ] {
        page.dispatch(event, Instant::now())?;
    }

    if page.chat().log().len() == before {
        return Err(AppError::BadInput("chat message cannot be blank".to_string()));
    }

    while let Some(due) = page.next_wakeup() {
        sleep_until(due).await;
        page.tick(Instant::now());
    }

    for message in page.chat().log().iter().skip(before) {
        let view = ChatMessageView::from(message);
        let line = ChatLineTemplate { message: &view }.render()?;
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use parrot_storefront::PageKind;
    use parrot_storefront::chat::AUTO_REPLY;
    use parrot_storefront::storage::MemoryStore;

    use super::*;

    fn page() -> Page<MemoryStore> {
        Page::with_reply_delay(
            MemoryStore::new(),
            PageKind::Catalog,
            Duration::from_millis(1500),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_waits_for_reply() {
        let mut page = page();
        let mut out = Vec::new();
        let start = Instant::now();

        send(&mut page, "  Where is my parrot?  ", &mut out)
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("you: Where is my parrot?"));
        assert!(lines[1].ends_with(&format!("support: {AUTO_REPLY}")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_message_is_rejected() {
        let mut page = page();
        let mut out = Vec::new();

        let err = send(&mut page, "   ", &mut out).await.unwrap_err();
        assert!(matches!(err, AppError::BadInput(_)));
        assert!(out.is_empty());
        assert_eq!(page.next_wakeup(), None);
    }
}
