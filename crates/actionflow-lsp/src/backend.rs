use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::info;

use actionflow_semantic::{Compilation, CompilationCache};

use crate::completion::get_completions;
use crate::diagnostics::{get_diagnostics, publish_diagnostics};
use crate::document::DocumentState;
use crate::folding::get_folding_ranges;
use crate::formatting::format_document;
use crate::goto_definition::get_definition;
use crate::hover::get_hover;
use crate::references::find_references;
use crate::rename::{execute_rename, prepare_rename};
use crate::symbols::get_document_symbols;

pub struct ActionflowLanguageServer {
    client: Client,
    documents: Arc<RwLock<HashMap<String, DocumentState>>>,
    cache: Arc<Mutex<CompilationCache>>,
}

impl ActionflowLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            cache: Arc::new(Mutex::new(CompilationCache::with_default_size())),
        }
    }

    async fn update_document(&self, uri: Url, text: String, version: i32) {
        let compilation = self.cache.lock().await.get_or_compile(uri.as_str(), version, &text);
        let diagnostics = get_diagnostics(&compilation);

        {
            let mut documents = self.documents.write().await;
            documents.insert(uri.to_string(), DocumentState::new(text, version));
        }

        publish_diagnostics(&self.client, uri, diagnostics, Some(version)).await;
    }

    /// The compilation of an open document, compiled again only when the
    /// cached one is for an older version.
    async fn compilation(&self, uri: &Url) -> Option<Arc<Compilation>> {
        let documents = self.documents.read().await;
        let document = documents.get(uri.as_str())?;

        let mut cache = self.cache.lock().await;
        Some(cache.get_or_compile(uri.as_str(), document.version, &document.text))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for ActionflowLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        info!("Initializing actionflow language server");

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "actionflow-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["\"".to_string()]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                references_provider: Some(OneOf::Left(true)),
                rename_provider: Some(OneOf::Right(RenameOptions {
                    prepare_provider: Some(true),
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                })),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("actionflow language server initialized");
        self.client
            .log_message(MessageType::INFO, "actionflow LSP ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down actionflow language server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        info!("Document opened: {}", params.text_document.uri);
        self.update_document(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        info!("Document changed: {}", params.text_document.uri);
        if let Some(change) = params.content_changes.into_iter().last() {
            self.update_document(params.text_document.uri, change.text, params.text_document.version)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        info!("Document closed: {}", uri);

        self.documents.write().await.remove(uri.as_str());
        self.cache.lock().await.remove(uri.as_str());

        publish_diagnostics(&self.client, uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;

        if let Some(compilation) = self.compilation(uri).await {
            let position = params.text_document_position.position;
            let completions = get_completions(&compilation, position);
            return Ok(Some(CompletionResponse::Array(completions)));
        }

        Ok(None)
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;

        if let Some(compilation) = self.compilation(uri).await {
            let position = params.text_document_position_params.position;
            return Ok(get_hover(&compilation, position));
        }

        Ok(None)
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        if let Some(compilation) = self.compilation(uri).await
            && let Some(location) = get_definition(&compilation, position, uri)
        {
            return Ok(Some(GotoDefinitionResponse::Scalar(location)));
        }

        Ok(None)
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        if let Some(compilation) = self.compilation(&params.text_document.uri).await {
            let symbols = get_document_symbols(&compilation);
            return Ok(Some(DocumentSymbolResponse::Nested(symbols)));
        }

        Ok(None)
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let include_declaration = params.context.include_declaration;

        if let Some(compilation) = self.compilation(uri).await {
            return Ok(Some(find_references(&compilation, position, include_declaration, uri)));
        }

        Ok(None)
    }

    async fn prepare_rename(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<Option<PrepareRenameResponse>> {
        if let Some(compilation) = self.compilation(&params.text_document.uri).await
            && let Some(range) = prepare_rename(&compilation, params.position)
        {
            return Ok(Some(PrepareRenameResponse::Range(range)));
        }

        Ok(None)
    }

    async fn rename(&self, params: RenameParams) -> Result<Option<WorkspaceEdit>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        if let Some(compilation) = self.compilation(uri).await {
            return Ok(execute_rename(&compilation, position, &params.new_name, uri));
        }

        Ok(None)
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        if let Some(compilation) = self.compilation(&params.text_document.uri).await {
            return Ok(Some(get_folding_ranges(&compilation)));
        }

        Ok(None)
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        if let Some(compilation) = self.compilation(&params.text_document.uri).await {
            return Ok(format_document(&compilation, &params.options));
        }

        Ok(None)
    }
}
