//! Thread creation seam.
//!
//! The supervisor never calls `std::thread` directly; it goes through a
//! [`Launcher`]. Production code uses [`ThreadLauncher`]. Tests substitute a
//! launcher that fails partway through to exercise the startup-failure path.

use std::io;
use std::thread::{self, JoinHandle};

/// Boxed body run on a newly created thread.
pub type WorkerBody = Box<dyn FnOnce() + Send + 'static>;

/// Creates named OS threads.
pub trait Launcher: Send + Sync {
    /// Start `body` on a new thread called `name`.
    fn launch(&self, name: String, body: WorkerBody) -> io::Result<JoinHandle<()>>;
}

/// Default launcher backed by [`std::thread::Builder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadLauncher;

impl Launcher for ThreadLauncher {
    fn launch(&self, name: String, body: WorkerBody) -> io::Result<JoinHandle<()>> {
        thread::Builder::new().name(name).spawn(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_launcher_names_thread() {
        let handle = ThreadLauncher
            .launch(
                "Thread 5".to_string(),
                Box::new(|| {
                    assert_eq!(thread::current().name(), Some("Thread 5"));
                }),
            )
            .expect("spawn should succeed");
        handle.join().expect("thread body panicked");
    }
}
