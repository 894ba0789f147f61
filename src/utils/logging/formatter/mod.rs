//! Compact event format: optional timestamp, outline marker, level tag
//! (omitted for INFO) and the message.

pub mod line_kind;

use chrono::Local;
use console::style;
use std::fmt::{self as std_fmt, Debug};
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};

use line_kind::{level_tag, LineKind};

pub struct CleanFormatter {
    show_timestamps: bool,
    use_color: bool,
}

impl CleanFormatter {
    pub fn new(show_timestamps: bool, use_color: bool) -> Self {
        Self {
            show_timestamps,
            use_color,
        }
    }

    fn format_message(&self, message: &str, level: &Level) -> String {
        let kind = LineKind::classify(message);
        let content = kind.paint(message, self.use_color);

        match level_tag(level, self.use_color) {
            Some(tag) => format!("{} {} {}", kind.marker(), tag, content),
            None => format!("{} {}", kind.marker(), content),
        }
    }
}

impl<S, N> FormatEvent<S, N> for CleanFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std_fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if self.show_timestamps {
            let now = Local::now().format("%H:%M:%S");
            if self.use_color {
                write!(writer, "[{}] ", style(now).dim())?;
            } else {
                write!(writer, "[{}] ", now)?;
            }
        }

        let line = self.format_message(&visitor.render(), event.metadata().level());
        writeln!(writer, "{}", line)
    }
}

/// Collects the `message` field plus any structured `key=value` fields.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn render(&self) -> String {
        if self.fields.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, self.fields.join(", "))
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        let rendered = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push(format!("{}={}", field.name(), rendered));
        }
    }
}
