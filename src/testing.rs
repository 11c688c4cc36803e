// Test doubles shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Cursor;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, TimeZone, Utc};
use crate::display::{self, PanelDisplay};
use crate::errors::{DisplayError, FetchError};
use crate::rendering::BackBuffer;
use crate::sources::httpclient::{HttpClient, HttpResponse};
use crate::tracker::clock::Clock;

/// Serves canned responses by exact URL and records every request.
/// Unknown URLs fail as a network error.
pub struct FakeHttp {
    routes: RefCell<HashMap<String, HttpResponse>>,
    calls: RefCell<Vec<String>>
}

impl FakeHttp {
    pub fn new() -> Self {
        Self { routes: RefCell::new(HashMap::new()), calls: RefCell::new(Vec::new()) }
    }

    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.respond_bytes(url, status, body.as_bytes().to_vec());
    }

    pub fn respond_bytes(&self, url: &str, status: u16, body: Vec<u8>) {
        self.routes.borrow_mut().insert(url.to_string(), HttpResponse { status, body });
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|u| u.starts_with(prefix)).count()
    }

    pub fn total_calls(&self) -> usize { self.calls.borrow().len() }
}

impl HttpClient for FakeHttp {
    fn get(&self, url: &str, _accept: &str) -> Result<HttpResponse, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        self.routes.borrow().get(url)
            .cloned()
            .ok_or_else(|| FetchError::Network { url: url.to_string(), reason: "connection refused".to_string() })
    }
}

/// Clock that only moves when told to; sleeping advances it
pub struct ManualClock {
    now: Cell<DateTime<Utc>>
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()) }
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + chrono::Duration::from_std(duration).unwrap());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> { self.now.get() }
    fn sleep(&self, duration: Duration) { self.advance(duration) }
}

#[derive(Default)]
struct Recorded {
    sizes: Vec<(u32, u32)>,
    fail: bool,
    stop_after: Option<(usize, Arc<AtomicBool>)>
}

/// Display that remembers the frames pushed to it. Clones share state.
#[derive(Clone)]
pub struct RecordingDisplay {
    width: u32,
    height: u32,
    recorded: Rc<RefCell<Recorded>>
}

impl RecordingDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, recorded: Rc::new(RefCell::new(Recorded::default())) }
    }

    pub fn frames(&self) -> usize { self.recorded.borrow().sizes.len() }
    pub fn last_size(&self) -> Option<(u32, u32)> { self.recorded.borrow().sizes.last().copied() }
    pub fn fail_pushes(&self) { self.recorded.borrow_mut().fail = true }

    /// Raises `flag` once `frames` frames have been pushed
    pub fn stop_after(&self, frames: usize, flag: Arc<AtomicBool>) {
        self.recorded.borrow_mut().stop_after = Some((frames, flag));
    }
}

impl PanelDisplay for RecordingDisplay {
    fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    fn push(&mut self, frame: &BackBuffer) -> Result<(), DisplayError> {
        display::check_frame(self.dimensions(), frame)?;

        let mut recorded = self.recorded.borrow_mut();
        if recorded.fail {
            return Err(DisplayError::Io(std::io::Error::new(std::io::ErrorKind::Other, "panel busy")));
        }
        recorded.sizes.push(frame.dimensions());

        if let Some((frames, flag)) = &recorded.stop_after {
            if recorded.sizes.len() >= *frames {
                flag.store(true, Ordering::SeqCst);
            }
        }
        Ok(())
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 20, 20, 255]))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
