use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use readshelf::interface::menu::DEFAULT_LIBRARY_FILE;

fn main() -> anyhow::Result<()> {
    // ログはstderrへ。メニュー出力(stdout)と混ざらないようにする
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readshelf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let library_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_FILE));

    readshelf::interface::menu::run(library_path)
}
