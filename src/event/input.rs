use crossbeam_channel::Sender;
use crossterm::event::{self, Event as CtEvent, KeyEventKind};
use std::time::Duration;
use tracing::warn;

use super::Event;

pub fn spawn_input_thread(tx: Sender<Event>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                warn!(error = %e, "terminal input unavailable");
                break;
            }
        }

        let forwarded = match event::read() {
            Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
            Ok(CtEvent::Mouse(mouse)) => Event::Mouse(mouse),
            Ok(CtEvent::Resize(w, h)) => Event::Resize(w, h),
            _ => continue,
        };
        if tx.send(forwarded).is_err() {
            break;
        }
    })
}
