//! Terminal presentation of a result bundle

use colored::Colorize;

use super::PresentationSink;
use crate::pipeline::ResultBundle;

/// Social share links printed after the itinerary
pub const SHARE_LINKS: &[(&str, &str)] = &[
    (
        "Twitter",
        "https://twitter.com/intent/tweet?text=Check%20out%20my%20travel%20itinerary!",
    ),
    ("Facebook", "https://www.facebook.com/sharer/sharer.php?u=your_app_url"),
    (
        "WhatsApp",
        "https://api.whatsapp.com/send?text=Check%20out%20my%20travel%20itinerary!",
    ),
];

/// Prints every section with a colored heading
#[derive(Debug)]
pub struct TerminalPresenter {
    share_links: bool,
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self { share_links: true }
    }
}

impl TerminalPresenter {
    pub fn new(share_links: bool) -> Self {
        Self { share_links }
    }

    pub fn render(&self, bundle: &ResultBundle) -> String {
        let mut out = String::new();
        for section in bundle.sections() {
            out.push_str(&format!("\n{}\n", section.title().bold().cyan()));
            out.push_str(section.body.trim_end());
            out.push('\n');
        }

        if self.share_links {
            out.push_str(&format!("\n{}\n", "Share Your Itinerary".bold().cyan()));
            for (name, url) in SHARE_LINKS {
                out.push_str(&format!("- {}: {}\n", name, url.dimmed()));
            }
        }
        out
    }
}

impl PresentationSink for TerminalPresenter {
    fn present(&self, bundle: &ResultBundle) {
        print!("{}", self.render(bundle));
    }
}
