//! Concurrent pixel scheduling.
//!
//! A [`PixelManager`] hands out pixel coordinates in row-major order from a single
//! atomic cursor. Workers claim pixels until the image is exhausted, so every pixel
//! is claimed and written exactly once and no other state is shared.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::{error::ConfigurationError, Color, PixelSink};

/// Progress is logged each time this fraction of the image completes.
const PROGRESS_STEPS: usize = 10;

/// Shared work cursor and completion counter for one render.
pub struct PixelManager {
    cols: u32,
    total: usize,
    next: AtomicUsize,
    completed: AtomicUsize,
}

impl PixelManager {
    /// Create a manager over `cols` x `rows` pixels.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            total: cols as usize * rows as usize,
            next: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Claim the next unclaimed pixel as `(col, row)`, or `None` once all are claimed.
    pub fn next_pixel(&self) -> Option<(u32, u32)> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        if index >= self.total {
            return None;
        }
        let cols = self.cols as usize;
        Some(((index % cols) as u32, (index / cols) as u32))
    }

    /// Record one finished pixel; returns the number finished so far.
    pub fn pixel_done(&self) -> usize {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let step = (self.total / PROGRESS_STEPS).max(1);
        if done % step == 0 {
            log::debug!("{:.0}% ({done}/{})", self.progress(), self.total);
        }
        done
    }

    /// Number of pixels finished.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Percentage of pixels finished.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed() as f64 * 100.0 / self.total as f64
    }

    /// Claim, shade and store pixels until none are left.
    fn work<F>(&self, target: &dyn PixelSink, shade: &F)
    where
        F: Fn(u32, u32) -> Color + Sync,
    {
        while let Some((col, row)) = self.next_pixel() {
            target.set_pixel(col, row, shade(col, row));
            self.pixel_done();
        }
    }
}

/// Fill every pixel of `target` with `shade(col, row)`.
///
/// With `threads == 0` pixels are shaded in row-major order on the calling thread.
/// Otherwise a pool of `threads` workers shares one [`PixelManager`]; this returns
/// once all of them have finished. Returns the number of pixels written.
pub fn render_pixels<F>(
    target: &dyn PixelSink,
    threads: usize,
    shade: F,
) -> Result<usize, ConfigurationError>
where
    F: Fn(u32, u32) -> Color + Sync,
{
    let manager = PixelManager::new(target.width(), target.height());
    let start = Instant::now();

    if threads == 0 {
        manager.work(target, &shade);
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("glint-worker-{i}"))
            .build()?;
        pool.broadcast(|_| manager.work(target, &shade));
    }

    log::info!(
        "Rendered {} pixels in {:?} ({} thread(s))",
        manager.completed(),
        start.elapsed(),
        threads.max(1)
    );
    Ok(manager.completed())
}
