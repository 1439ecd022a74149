//! `tracing` subscriber installation for desktop hosts.

use std::io;

use tracing::{Level, Subscriber};
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt};

/// Native fallback writer used by [`init_default`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrMakeWriter;

impl<'a> MakeWriter<'a> for StderrMakeWriter {
    type Writer = io::Stderr;

    fn make_writer(&'a self) -> Self::Writer {
        io::stderr()
    }
}

/// Installs a compact subscriber writing to stderr. Repeat calls are no-ops.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(Level::DEBUG)
        .with_writer(StderrMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

/// Installs a compact subscriber that formats into a host-provided writer.
///
/// Timestamps and ANSI colors are left out since hosts such as the browser console add their own.
/// Returns `false` when a global subscriber was already installed.
pub fn init_with_writer<W>(make_writer: W, max_level: Level) -> bool
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    host_subscriber(make_writer, max_level).try_init().is_ok()
}

fn host_subscriber<W>(
    make_writer: W,
    max_level: Level,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(max_level)
        .with_writer(make_writer)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .finish()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use tracing::{debug, info, info_span};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().expect("capture lock").clone();
            String::from_utf8(bytes)
                .expect("utf-8 log output")
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    #[test]
    fn host_output_is_compact_and_level_filtered() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = host_subscriber(move || writer.clone(), Level::INFO);

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("window", panel = "about");
            let _entered = span.enter();
            info!("opened");
            debug!("hidden below the level");
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("window: opened"), "{}", lines[0]);
        assert!(!lines[0].contains("window{"), "{}", lines[0]);
        assert!(!lines[0].contains('\u{1b}'), "{}", lines[0]);
    }
}
