use anyhow::{Context, Result};
use arboard::Clipboard;

/// Read/write access to a text clipboard.
pub trait ClipboardProvider {
    fn read_text(&mut self) -> Result<String>;
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
///
/// Opened on first use and kept open afterwards. On Linux, clipboard contents
/// persist only while the owning handle is alive, so the popup keeps what it
/// copies available until it exits. A one-shot clipboard instead blocks each
/// write until another program takes ownership of the selection, for
/// processes that exit right after copying.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
    one_shot: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one_shot() -> Self {
        Self {
            inner: None,
            one_shot: true,
        }
    }

    /// Whether writes block until the selection is taken over.
    pub fn waits_for_new_owner(&self) -> bool {
        self.one_shot && cfg!(target_os = "linux")
    }

    fn handle(&mut self) -> Result<&mut Clipboard> {
        if self.inner.is_none() {
            let clipboard = Clipboard::new().context("Failed to access system clipboard")?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .context("Failed to access system clipboard")
    }
}

impl ClipboardProvider for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        match self.handle()?.get_text() {
            Ok(text) => Ok(text),
            // Nothing (or no text) on the clipboard reads as empty text.
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(e).context("Failed to read text from clipboard"),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        #[cfg(target_os = "linux")]
        if self.one_shot {
            use arboard::SetExtLinux;

            self.handle()?
                .set()
                .wait()
                .text(text.to_owned())
                .context("Failed to copy text to clipboard")?;
            return Ok(());
        }

        self.handle()?
            .set_text(text)
            .context("Failed to copy text to clipboard")?;
        Ok(())
    }
}


#[cfg(test)]
pub mod fake {
    use super::ClipboardProvider;
    use anyhow::{anyhow, Result};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub struct FakeState {
        pub contents: Option<String>,
        pub fail_reads: bool,
        pub writes: Vec<String>,
    }

    /// Clipboard double whose state stays inspectable after it is moved into
    /// a controller.
    #[derive(Debug, Clone, Default)]
    pub struct FakeClipboard {
        pub state: Rc<RefCell<FakeState>>,
    }

    impl FakeClipboard {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_contents(&self, text: &str) {
            self.state.borrow_mut().contents = Some(text.to_string());
        }

        pub fn fail_reads(&self) {
            self.state.borrow_mut().fail_reads = true;
        }

        pub fn contents(&self) -> Option<String> {
            self.state.borrow().contents.clone()
        }

        pub fn writes(&self) -> Vec<String> {
            self.state.borrow().writes.clone()
        }
    }

    impl ClipboardProvider for FakeClipboard {
        fn read_text(&mut self) -> Result<String> {
            let state = self.state.borrow();
            if state.fail_reads {
                return Err(anyhow!("clipboard unavailable"));
            }
            Ok(state.contents.clone().unwrap_or_default())
        }

        fn write_text(&mut self, text: &str) -> Result<()> {
            let mut state = self.state.borrow_mut();
            state.contents = Some(text.to_string());
            state.writes.push(text.to_string());
            Ok(())
        }
    }
}
