use std::{
    env,
    io::{self, Write},
    path::Path,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, prelude::*, registry, EnvFilter};

// Writes every buffer to both sinks.
struct Tee<A, B> {
    a: A,
    b: B,
}

impl<A, B> Write for Tee<A, B>
where
    A: Write,
    B: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res_a = self.a.write_all(buf);
        let res_b = self.b.write_all(buf);
        res_a.and(res_b).map(|_| buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()
    }
}

#[derive(Clone)]
struct MakeTee<A, B> {
    make_a: A,
    make_b: B,
}

impl<'a, A, B> MakeWriter<'a> for MakeTee<A, B>
where
    A: MakeWriter<'a>,
    B: MakeWriter<'a>,
{
    type Writer = Tee<A::Writer, B::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        Tee {
            a: self.make_a.make_writer(),
            b: self.make_b.make_writer(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Console,
    File,
    Both,
    Off,
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub output: String,
    pub format: String,
    pub file_path: String,
}

impl LogSettings {
    /// `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT` and `LOG_FILE_PATH`.
    ///
    /// Stdout carries documents, so console logs always go to stderr.
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            output: env::var("LOG_OUTPUT").unwrap_or_else(|_| "console".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "human".to_string()),
            file_path: env::var("LOG_FILE_PATH").unwrap_or_else(|_| "/tmp/yedit.log".to_string()),
        }
    }

    fn output(&self) -> Output {
        match self.output.as_str() {
            "console" => Output::Console,
            "file" => Output::File,
            "both" => Output::Both,
            _ => Output::Off,
        }
    }

    fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Initializes the global tracing subscriber based on environment variables.
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init_subscriber() -> Option<WorkerGuard> {
    init_with(&LogSettings::from_env())
}

pub fn init_with(settings: &LogSettings) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let subscriber = registry().with(env_filter);

    let log_path = Path::new(&settings.file_path);
    let log_dir = log_path.parent().unwrap_or_else(|| Path::new("/tmp"));
    let log_filename = log_path.file_name().unwrap_or("yedit.log".as_ref());

    let mut guard: Option<WorkerGuard> = None;
    let result = match settings.output() {
        Output::Both => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let tee_writer = MakeTee {
                make_a: io::stderr,
                make_b: non_blocking,
            };
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(tee_writer);
            if settings.is_json() {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer.with_ansi(false)).try_init()
            }
        }
        Output::Console => {
            let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
            if settings.is_json() {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer).try_init()
            }
        }
        Output::File => {
            let file_appender = tracing_appender::rolling::daily(log_dir, log_filename);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
            guard = Some(file_guard);

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            if settings.is_json() {
                subscriber.with(fmt_layer.json()).try_init()
            } else {
                subscriber.with(fmt_layer).try_init()
            }
        }
        Output::Off => subscriber.try_init(),
    };

    // A subscriber installed earlier (tests, embedding) stays in charge.
    if result.is_err() {
        return None;
    }
    guard
}
