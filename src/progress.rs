//! Progress reporting for downloads.
//!
//! Workers only ever hold a [`ProgressSink`] handle. The console implementation forwards every
//! call as a [`ProgressEvent`] over a channel to a single render thread, which owns the terminal.
use std::{
    collections::HashMap,
    io::{self, Write},
    thread::{self, JoinHandle},
};

use crossbeam_channel::{bounded, Receiver, Sender};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::error::GrabError;

const BAR_TEMPLATE: &str = "{prefix:.bold.blue} {wide_bar} {percent:>3}% • {bytes}/{total_bytes} • {bytes_per_sec} • {eta}";

/// Receives byte level progress for transfers identified by file name.
pub trait ProgressSink: Clone + Send + Sync + 'static {
    fn begin(&self, task: &str, total: u64);

    /// `bytes` more bytes have arrived for `task`.
    fn advance(&self, task: &str, bytes: u64);

    /// Retire the task, whether it succeeded or not.
    fn complete(&self, task: &str);

    fn println(&self, line: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Begin { task: String, total: u64 },
    Advance { task: String, bytes: u64 },
    Complete { task: String },
    Println(String),
}

/// Transient progress bars on the terminal, one per active transfer.
#[derive(Debug, Clone)]
pub struct ConsoleProgress {
    events: Sender<ProgressEvent>,
}

/// The thread drawing [`ConsoleProgress`] bars.
#[derive(Debug)]
pub struct RenderThread(JoinHandle<()>);

impl ConsoleProgress {
    pub fn start() -> Result<(Self, RenderThread), GrabError> {
        let (events, to_render) = bounded::<ProgressEvent>(1024);

        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());

        let jh = thread::Builder::new()
            .name("Progress Renderer".into())
            .spawn(move || render(to_render, MultiProgress::new(), style, &mut io::stdout()))
            .map_err(|source| GrabError::Spawn {
                name: "progress renderer",
                source,
            })?;

        Ok((Self { events }, RenderThread(jh)))
    }

    fn send(&self, event: ProgressEvent) {
        if self.events.send(event).is_err() {
            log::debug!("Progress renderer has shut down");
        }
    }
}

/// Drive the bars until every sender is gone.
///
/// Lines go above the bars, or straight to `out` when the bars are not being drawn at all.
fn render<W: Write>(
    to_render: Receiver<ProgressEvent>,
    multi: MultiProgress,
    style: ProgressStyle,
    out: &mut W,
) {
    let mut bars: HashMap<String, ProgressBar> = HashMap::new();

    for event in to_render {
        match event {
            ProgressEvent::Begin { task, total } => {
                let bar = multi.add(ProgressBar::new(total));
                bar.set_style(style.clone());
                bar.set_prefix(task.clone());
                bars.insert(task, bar);
            }
            ProgressEvent::Advance { task, bytes } => {
                if let Some(bar) = bars.get(&task) {
                    bar.inc(bytes);
                }
            }
            ProgressEvent::Complete { task } => {
                if let Some(bar) = bars.remove(&task) {
                    bar.finish_and_clear();
                    multi.remove(&bar);
                }
            }
            ProgressEvent::Println(line) => {
                // A hidden target swallows println without an error.
                if multi.is_hidden() || multi.println(&line).is_err() {
                    if let Err(err) = writeln!(out, "{}", line) {
                        log::warn!("Could not print {}: {}", line, err);
                    }
                }
            }
        }
    }

    for (_, bar) in bars.drain() {
        bar.finish_and_clear();
    }
    let _ = multi.clear();
}

impl RenderThread {
    /// Block until every [`ConsoleProgress`] handle is dropped and the display is cleared.
    pub fn wait(self) {
        if self.0.join().is_err() {
            log::error!("Progress renderer panicked");
        }
    }
}

impl ProgressSink for ConsoleProgress {
    fn begin(&self, task: &str, total: u64) {
        self.send(ProgressEvent::Begin {
            task: task.to_owned(),
            total,
        });
    }

    fn advance(&self, task: &str, bytes: u64) {
        self.send(ProgressEvent::Advance {
            task: task.to_owned(),
            bytes,
        });
    }

    fn complete(&self, task: &str) {
        self.send(ProgressEvent::Complete {
            task: task.to_owned(),
        });
    }

    fn println(&self, line: &str) {
        self.send(ProgressEvent::Println(line.to_owned()));
    }
}

/// No bars, just the name of each file as its download starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainProgress;

impl ProgressSink for PlainProgress {
    fn begin(&self, task: &str, _total: u64) {
        println!("{}", task);
    }

    fn advance(&self, _task: &str, _bytes: u64) {}

    fn complete(&self, _task: &str) {}

    fn println(&self, _line: &str) {}
}

/// Passes writes through to `inner` and reports each chunk to a progress sink.
pub struct ProgressWriter<'a, W, P> {
    inner: W,
    task: &'a str,
    progress: &'a P,
}

impl<'a, W: Write, P: ProgressSink> ProgressWriter<'a, W, P> {
    pub fn new(inner: W, task: &'a str, progress: &'a P) -> Self {
        Self {
            inner,
            task,
            progress,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<'a, W: Write, P: ProgressSink> Write for ProgressWriter<'a, W, P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if n > 0 {
            self.progress.advance(self.task, n as u64);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
