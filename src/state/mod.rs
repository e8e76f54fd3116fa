use crate::config::AdminCredentials;
use crate::generate::TextGenerator;
use crate::media::MediaService;
use crate::store::BlogStore;
use std::sync::Arc;

pub mod session;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub store: Arc<dyn BlogStore>,
    pub media: Arc<dyn MediaService>,
    pub writer: Arc<dyn TextGenerator>,
    pub admin: AdminCredentials,
    pub sessions: session::AdminSessions,
}

impl State {
    pub fn new(
        admin: AdminCredentials,
        store: Arc<dyn BlogStore>,
        media: Arc<dyn MediaService>,
        writer: Arc<dyn TextGenerator>,
    ) -> State {
        State {
            store,
            media,
            writer,
            admin,
            sessions: session::AdminSessions::new(),
        }
    }
}
