//! Background jobs for blocking network calls.
//!
//! The UI thread never blocks: it spawns a [`Job`], keeps handling input,
//! and polls [`Job::try_take`] each frame. The result is then fed into the
//! `finish`/`complete` half of the matching flow.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

pub struct Job<T> {
    name: String,
    rx: Receiver<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Job<T> {
    pub fn spawn<F>(name: &str, f: F) -> std::io::Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(format!("agridoc-{}", name))
            .spawn(move || {
                // Receiver gone means the screen was closed; drop the result.
                let _ = tx.send(f());
            })?;
        log::debug!("spawned job {}", name);
        Ok(Self { name: name.to_string(), rx, handle: Some(handle) })
    }
}

impl<T> Job<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking poll. Returns the result once, then `None` forever.
    pub fn try_take(&mut self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => {
                self.join();
                Some(value)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                None
            }
        }
    }

    /// Block until the job finishes. `None` if the worker panicked.
    pub fn wait(mut self) -> Option<T> {
        let value = self.rx.recv().ok();
        self.join();
        value
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("job {} panicked", self.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_value() {
        let job = Job::spawn("sum", || 2 + 2).unwrap();
        assert_eq!(job.name(), "sum");
        assert_eq!(job.wait(), Some(4));
    }

    #[test]
    fn test_try_take_yields_once() {
        let mut job = Job::spawn("slow", || {
            thread::sleep(Duration::from_millis(20));
            "done"
        })
        .unwrap();

        let mut got = None;
        for _ in 0..200 {
            if let Some(v) = job.try_take() {
                got = Some(v);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(got, Some("done"));
        assert_eq!(job.try_take(), None);
    }

    #[test]
    fn test_panicking_job_yields_none() {
        let job: Job<u8> = Job::spawn("boom", || panic!("worker failed")).unwrap();
        assert_eq!(job.wait(), None);
    }
}
