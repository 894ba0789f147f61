use console::style;
use tracing::Level;

/// Where a log line sits in the per-file outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Batch and per-file headers.
    File,
    /// The decision and what drove it.
    Outcome,
    Detail,
}

impl LineKind {
    pub fn classify(message: &str) -> Self {
        let is_header = message.starts_with("Processing file")
            || message.starts_with("Planning complete")
            || (message.starts_with("Found") && message.contains("media file(s)"));
        if is_header {
            return Self::File;
        }

        let is_outcome = ["Decision:", "Skipping"]
            .iter()
            .any(|head| message.starts_with(head))
            || message.contains("content detected");
        if is_outcome {
            Self::Outcome
        } else {
            Self::Detail
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::File => "▶",
            Self::Outcome => "●",
            Self::Detail => " ",
        }
    }

    pub fn paint(self, message: &str, use_color: bool) -> String {
        if !use_color {
            return message.to_string();
        }

        let styled = style(message);
        match self {
            Self::File => styled.bold().cyan(),
            Self::Outcome => styled.green(),
            Self::Detail => styled.dim(),
        }
        .to_string()
    }
}

/// Fixed-width level tag; INFO is implied and left out.
pub fn level_tag(level: &Level, use_color: bool) -> Option<String> {
    let (tag, styled) = match *level {
        Level::INFO => return None,
        Level::ERROR => ("ERROR", style("ERROR").red().bold()),
        Level::WARN => ("WARN ", style("WARN ").yellow()),
        Level::DEBUG => ("DEBUG", style("DEBUG").blue()),
        Level::TRACE => ("TRACE", style("TRACE").magenta()),
    };

    Some(if use_color {
        styled.to_string()
    } else {
        tag.to_string()
    })
}
