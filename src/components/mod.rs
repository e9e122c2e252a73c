mod auth;
mod chat;
mod documents;
mod feedback;
mod home;
mod llm_logs;
mod navbar;
mod pager;
mod privacy;
mod status;

pub use auth::{AuthMode, AuthPage};
pub use chat::ChatPage;
pub use documents::DocumentsPage;
pub use feedback::FeedbackPage;
pub use home::HomePage;
pub use llm_logs::LlmLogsPage;
pub use navbar::Navbar;
pub use pager::Pager;
pub use privacy::PrivacyPage;
pub use status::{ProcessingBanner, StatusBanner};

use std::rc::Rc;

use yew::Reducible;

use crate::controller::{PendingRows, RowEvent};

impl Reducible for PendingRows {
    type Action = RowEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

/// Native confirm dialog. A missing window or a blocked dialog counts as "no".
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
