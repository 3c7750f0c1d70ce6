use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;
mod completion;
mod diagnostics;
mod docs;
mod document;
mod folding;
mod formatting;
mod goto_definition;
mod hover;
mod references;
mod rename;
mod symbols;

use backend::ActionflowLanguageServer;

#[tokio::main]
async fn main() {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ACTIONFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting actionflow language server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(ActionflowLanguageServer::new);

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("actionflow language server stopped");
}
