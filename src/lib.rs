pub mod cli;
pub mod convert;
pub mod emit;
pub mod error;
pub mod identifier;
pub mod joins;
pub mod names;
pub mod pipeline;
pub mod schema;
pub mod table;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use emit::{Artifact, EnumDef, MapDef};
pub use error::{Error, Result};
pub use pipeline::{generate, GenerateOptions};
pub use table::Table;
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};

/// Install the tracing subscriber; `RUST_LOG` overrides the default level
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tab_enumgen=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
