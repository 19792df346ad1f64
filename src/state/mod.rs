use crate::api::{ApiClient, ApiError, ApiResult, EnvConfig};
use crate::comments::{CommentBoard, Language};
use crate::models::{Comment, LoginStatus};
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How a comment fetch lands on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReloadMode {
    /// Page load, page size change, delete-all: rebuild the pagination control.
    Rebuild,
    /// Page click or language switch: keep the control, re-slice only.
    KeepControl,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CycleOutcome {
    /// A newer cycle started; the board was not touched.
    Superseded,
    /// Number of comments in the snapshot that was applied.
    Applied(usize),
    Failed(ApiError),
}

/// Applies a comment response to the board only when `req_id` is still the
/// current render cycle.
pub(crate) fn apply_comments_response(
    board: &mut CommentBoard,
    current_cycle: u64,
    req_id: u64,
    mode: ReloadMode,
    result: ApiResult<Vec<Comment>>,
) -> CycleOutcome {
    if req_id != current_cycle {
        return CycleOutcome::Superseded;
    }
    match result {
        Ok(comments) => {
            let n = comments.len();
            match mode {
                ReloadMode::Rebuild => board.reload(comments),
                ReloadMode::KeepControl => board.refresh(comments),
            }
            CycleOutcome::Applied(n)
        }
        Err(e) => CycleOutcome::Failed(e),
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    pub login_status: RwSignal<Option<LoginStatus>>,
    /// Display name of the signed-in user, resolved through `/nickname`.
    pub welcome_name: RwSignal<Option<String>>,
    pub login_error: RwSignal<Option<String>>,

    /// Comment form target from `/blobstore-upload-url`.
    pub upload_url: RwSignal<Option<String>>,

    pub board: RwSignal<CommentBoard>,
    pub language: RwSignal<Language>,
    pub comments_loading: RwSignal<bool>,
    pub comments_error: RwSignal<Option<String>>,

    /// Render-cycle id. Bumped per comment fetch; responses carrying an
    /// older id are dropped.
    pub comments_request_id: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        log!(
            "[app] api_url={} comments_per_page={}",
            config.api_url,
            config.comments_per_page
        );

        Self {
            api_client: RwSignal::new(ApiClient::from_config(&config)),
            login_status: RwSignal::new(None),
            welcome_name: RwSignal::new(None),
            login_error: RwSignal::new(None),
            upload_url: RwSignal::new(None),
            board: RwSignal::new(CommentBoard::new(config.comments_per_page)),
            language: RwSignal::new(Language::default()),
            comments_loading: RwSignal::new(false),
            comments_error: RwSignal::new(None),
            comments_request_id: RwSignal::new(0),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.login_status
            .get()
            .map(|s| s.is_logged_in)
            .unwrap_or(false)
    }

    /// Starts a new render cycle and fetches the collection in the selected language.
    pub fn load_comments(self, mode: ReloadMode) {
        let req_id = self.begin_cycle();

        let api_client = self.api_client.get_untracked();
        let language = self.language.get_untracked();
        log!("[comments] cycle {req_id}: fetching ({}, {mode:?})", language.code());

        spawn_local(async move {
            let result = api_client.get_comments(language.code()).await;
            self.finish_cycle(req_id, mode, result);
        });
    }

    fn begin_cycle(self) -> u64 {
        let req_id = self.comments_request_id.get_untracked().saturating_add(1);
        self.comments_request_id.set(req_id);
        self.comments_loading.set(true);
        self.comments_error.set(None);
        req_id
    }

    /// Lands a comment response on the board unless a newer cycle started.
    fn finish_cycle(
        self,
        req_id: u64,
        mode: ReloadMode,
        result: ApiResult<Vec<Comment>>,
    ) -> CycleOutcome {
        let current = self.comments_request_id.get_untracked();
        let mut outcome = CycleOutcome::Superseded;
        self.board.maybe_update(|board| {
            outcome = apply_comments_response(board, current, req_id, mode, result);
            matches!(outcome, CycleOutcome::Applied(_))
        });

        match &outcome {
            CycleOutcome::Superseded => {
                log!("[comments] cycle {req_id}: superseded, response dropped");
                // The newer cycle owns the loading flag.
                return outcome;
            }
            CycleOutcome::Applied(n) => log!("[comments] cycle {req_id}: {n} comments"),
            CycleOutcome::Failed(e) => {
                error!("[comments] cycle {req_id}: {:?}: {e}", e.kind);
                self.comments_error.set(Some(e.to_string()));
            }
        }
        self.comments_loading.set(false);
        outcome
    }

    /// Removes the comment remotely, then drops its rendered node. No refetch.
    pub fn delete_comment(self, id: i64) {
        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            match api_client.delete_comment(id).await {
                Ok(()) => self.finish_delete(id),
                Err(e) => {
                    error!("[comments] delete {id}: {e}");
                    self.comments_error.set(Some(e.to_string()));
                }
            }
        });
    }

    /// Drops the rendered node only. No new cycle and no refetch.
    fn finish_delete(self, id: i64) {
        self.board.update(|board| {
            if !board.remove_rendered(id) {
                warn!("[comments] deleted comment {id} was not on screen");
            }
        });
    }

    /// Bulk delete followed by a full refetch and control rebuild.
    pub fn delete_all_comments(self) {
        let api_client = self.api_client.get_untracked();
        self.comments_loading.set(true);
        spawn_local(async move {
            match api_client.delete_all_comments().await {
                Ok(()) => self.board.update(|board| board.clear_deleted()),
                Err(e) => {
                    error!("[comments] delete all: {e}");
                    self.comments_error.set(Some(e.to_string()));
                }
            }
            self.load_comments(ReloadMode::Rebuild);
        });
    }

    pub fn load_login_status(self) {
        let api_client = self.api_client.get_untracked();
        self.login_error.set(None);

        spawn_local(async move {
            let status = match api_client.get_login_status().await {
                Ok(status) => status,
                Err(e) => {
                    error!("[login] {e}");
                    self.login_error.set(Some(e.to_string()));
                    return;
                }
            };

            let user_id = status.user_id.clone().filter(|_| status.is_logged_in);
            self.login_status.set(Some(status));

            if let Some(user_id) = user_id {
                match api_client.get_nickname(&user_id).await {
                    Ok(name) => self.welcome_name.set(Some(name)),
                    Err(e) => warn!("[login] nickname lookup failed: {e}"),
                }
            }
        });
    }

    pub fn load_upload_url(self) {
        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_upload_url().await {
                Ok(url) => self.upload_url.set(Some(url)),
                Err(e) => error!("[comments] upload url: {e}"),
            }
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
