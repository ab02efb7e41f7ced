/// Log an error with its whole chain of sources, optionally led by a message.
#[macro_export]
macro_rules! tracing_report {
    ($error:expr) => {{
        tracing::error!(err = %snafu::Report::from_error(&$error));
    }};
    ($error:expr, $message:literal) => {{
        tracing::error!(err = %snafu::Report::from_error(&$error), $message);
    }};
    ($error:expr, $message:expr) => {{
        tracing::error!(err = %snafu::Report::from_error(&$error), "{}", $message);
    }};
}
