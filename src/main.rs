// SPDX-License-Identifier: MPL-2.0
use imeditor::app;
use imeditor::config;
use imeditor::editor::Editor;
use imeditor::infrastructure::{NativeDialogs, RasterService};
use imeditor::ui::layout::Size;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `IMEDITOR_LOG=imeditor=debug`.
const LOG_ENV: &str = "IMEDITOR_LOG";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("imeditor=info")),
        )
        .init();

    let config = config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "using default settings");
        config::Config::default()
    });

    let (width, height) = config.window_size();
    let editor = match Editor::new(
        &config,
        Box::new(RasterService::new()),
        Box::new(NativeDialogs::new()),
        Size::new(width, height),
    ) {
        Ok(editor) => editor,
        Err(err) => {
            tracing::error!(%err, "failed to build the editor window");
            std::process::exit(1);
        }
    };

    app::run(editor, &config)
}
