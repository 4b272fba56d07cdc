use std::future::{Future, pending};
use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tokio::sync::oneshot;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watches the keyboard for 'q' (or Ctrl-C while in raw mode) during a scan.
///
/// Raw mode is restored when the handle is dropped.
pub struct InputHandle {
    stop: Arc<AtomicBool>,
    rx: Option<oneshot::Receiver<()>>,
    worker: Option<JoinHandle<()>>,
    raw_mode: bool,
}

impl InputHandle {
    pub fn start(disabled: bool) -> Self {
        let stop = Arc::new(AtomicBool::new(false));

        if disabled || !std::io::stdin().is_terminal() {
            return Self { stop, rx: None, worker: None, raw_mode: false };
        }

        if let Err(e) = enable_raw_mode() {
            debug!("keyboard input unavailable: {e}");
            return Self { stop, rx: None, worker: None, raw_mode: false };
        }

        let (tx, rx) = oneshot::channel();
        let stop_flag = stop.clone();
        let worker = thread::spawn(move || watch_keys(stop_flag, tx));

        Self { stop, rx: Some(rx), worker: Some(worker), raw_mode: true }
    }

    pub fn is_watching(&self) -> bool {
        self.raw_mode
    }

    /// Resolves on the first key interrupt or SIGINT, whichever comes first.
    pub fn interrupted(&mut self) -> impl Future<Output = ()> + use<> {
        let key = self.rx.take();
        async move {
            let key_pressed = async {
                match key {
                    Some(rx) => {
                        if rx.await.is_err() {
                            pending::<()>().await
                        }
                    }
                    None => pending::<()>().await,
                }
            };
            let signalled = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    pending::<()>().await
                }
            };

            tokio::select! {
                _ = key_pressed => debug!("interrupted from keyboard"),
                _ = signalled => debug!("interrupted by signal"),
            }
        }
    }
}

fn watch_keys(stop: Arc<AtomicBool>, tx: oneshot::Sender<()>) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => break,
        }

        if let Ok(Event::Key(key_event)) = event::read() {
            let is_q = key_event.code == KeyCode::Char('q');
            let is_ctrl_c = key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL);

            if (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press {
                let _ = tx.send(());
                break;
            }
        }
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}
