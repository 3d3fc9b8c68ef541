//! NotesClient — single owner of the notes cache, the note form and the
//! analysis results.
//!
//! Every mutation is followed by a full `GET /notes`; the cache only ever
//! reflects what the server last returned. A failed read keeps the
//! previous cache.

use notes_client_types::Note;

use crate::analysis::{AnalysisOutcome, AnalysisStore, build_analysis_prompt, render_result};
use crate::api_client::NotesBackend;
use crate::editor::{Editor, Submission};
use crate::error::{ClientError, ClientResult};

pub struct NotesClient<B: NotesBackend> {
    backend: B,
    notes: Vec<Note>,
    editor: Editor,
    analyses: AnalysisStore,
    last_error: Option<ClientError>,
}

impl<B: NotesBackend> NotesClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            notes: Vec::new(),
            editor: Editor::new(),
            analyses: AnalysisStore::new(),
            last_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Cached notes in server order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, name: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.name == name)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn analyses(&self) -> &AnalysisStore {
        &self.analyses
    }

    /// Rendered analysis for `key`, if any.
    pub fn analysis(&self, key: &str) -> Option<&str> {
        self.analyses.result(key)
    }

    /// Error of the most recent failed operation, cleared when the next
    /// operation starts.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    // ── Collection ──────────────────────────────────

    /// Replace the cache with the server's collection.
    pub async fn refresh(&mut self) -> ClientResult<usize> {
        self.last_error = None;
        self.fetch_notes().await
    }

    pub async fn create(&mut self, name: &str, content: &str) -> ClientResult<()> {
        self.last_error = None;
        self.require_name(name)?;

        let result = self.backend.create_note(name, content).await;
        self.after_write("create", name, result).await
    }

    pub async fn update(&mut self, name: &str, content: &str) -> ClientResult<()> {
        self.last_error = None;
        self.require_name(name)?;

        let result = self.backend.update_note(name, content).await;
        self.after_write("update", name, result).await
    }

    pub async fn delete(&mut self, name: &str) -> ClientResult<()> {
        self.last_error = None;
        self.require_name(name)?;

        let result = self.backend.delete_note(name).await;
        if result.is_ok() && self.editor.editing() == Some(name) {
            self.editor.cancel();
        }
        self.after_write("delete", name, result).await
    }

    async fn fetch_notes(&mut self) -> ClientResult<usize> {
        match self.backend.list_notes().await {
            Ok(notes) => {
                log::debug!("[NOTES] Loaded {} notes", notes.len());
                self.notes = notes;
                Ok(self.notes.len())
            }
            Err(e) => {
                log::error!("[NOTES] Failed to load notes, keeping cached list: {}", e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Refresh after a mutation regardless of its outcome, then report the
    /// mutation's own result.
    async fn after_write(
        &mut self,
        action: &str,
        name: &str,
        result: ClientResult<()>,
    ) -> ClientResult<()> {
        if let Err(e) = &result {
            log::error!("[NOTES] Failed to {} note '{}': {}", action, name, e);
        } else {
            log::info!("[NOTES] {} '{}' ok", action, name);
        }

        // A refresh failure is recorded by fetch_notes; the mutation result wins.
        let _ = self.fetch_notes().await;

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    /// Names are addressing keys; blank ones never reach the server.
    fn require_name(&mut self, name: &str) -> ClientResult<()> {
        if name.trim().is_empty() {
            return self.fail(ClientError::invalid("note name must not be empty"));
        }
        Ok(())
    }

    fn fail<T>(&mut self, err: ClientError) -> ClientResult<T> {
        self.last_error = Some(err.clone());
        Err(err)
    }

    // ── Analysis ────────────────────────────────────

    /// Send `text` through the review template and store the rendered
    /// result under `key`. On failure the slot holds the error placeholder.
    pub async fn analyze(&mut self, text: &str, key: &str) -> ClientResult<String> {
        self.last_error = None;
        let prompt = build_analysis_prompt(text);

        match self.backend.invoke(&prompt).await {
            Ok(result) => {
                let rendered = render_result(&result);
                log::info!("[ANALYSIS] '{}' analyzed ({} chars)", key, rendered.len());
                self.analyses.record(key, text, AnalysisOutcome::Completed(rendered.clone()));
                Ok(rendered)
            }
            Err(e) => {
                log::error!("[ANALYSIS] Failed to analyze '{}': {}", key, e);
                self.analyses.record(key, text, AnalysisOutcome::Failed(e.to_string()));
                self.fail(e)
            }
        }
    }

    /// Analyze a cached note under its own name.
    pub async fn analyze_note(&mut self, name: &str) -> ClientResult<String> {
        let Some(content) = self.note(name).map(|n| n.content.clone()) else {
            return self.fail(ClientError::invalid(format!("no note named '{}'", name)));
        };
        self.analyze(&content, name).await
    }

    /// Repeat the last analysis for `key`. Returns `Ok(false)` without any
    /// request when nothing was analyzed under `key` yet.
    pub async fn reanalyze(&mut self, key: &str) -> ClientResult<bool> {
        let Some(text) = self.analyses.last_source(key).map(str::to_string) else {
            log::debug!("[ANALYSIS] No previous analysis for '{}'", key);
            return Ok(false);
        };
        self.analyze(&text, key).await?;
        Ok(true)
    }

    // ── Note form ───────────────────────────────────

    pub fn begin_edit(&mut self, name: &str) -> ClientResult<()> {
        let Some(note) = self.note(name).cloned() else {
            return self.fail(ClientError::invalid(format!("no note named '{}'", name)));
        };
        self.editor.begin(&note);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    pub fn set_draft_name(&mut self, name: &str) -> ClientResult<()> {
        self.editor.set_name(name).map_err(ClientError::InvalidInput)
    }

    pub fn set_draft_content(&mut self, content: &str) {
        self.editor.set_content(content);
    }

    /// Create or update from the draft. The draft is kept if the server
    /// rejects it.
    pub async fn submit_draft(&mut self) -> ClientResult<()> {
        let submission = match self.editor.submission() {
            Ok(s) => s,
            Err(msg) => return self.fail(ClientError::InvalidInput(msg)),
        };

        match submission {
            Submission::Create { name, content } => self.create(&name, &content).await?,
            Submission::Update { name, content } => self.update(&name, &content).await?,
        }

        self.editor.complete();
        Ok(())
    }
}
