#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Documents,
    Chat,
    LlmLogs,
    Feedback,
    Privacy,
    NotFound,
}

impl Route {
    /// Links shown in the navbar, in order.
    pub const NAV: [Route; 6] = [
        Route::Home,
        Route::Documents,
        Route::Chat,
        Route::LlmLogs,
        Route::Feedback,
        Route::Privacy,
    ];

    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/documents" => Route::Documents,
            "/ai-chat" => Route::Chat,
            "/llm-logs" => Route::LlmLogs,
            "/feedback" => Route::Feedback,
            "/privacy" => Route::Privacy,
            _ => Route::NotFound,
        }
    }

    pub fn to_path(self) -> &'static str {
        match self {
            Route::Home | Route::NotFound => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Documents => "/documents",
            Route::Chat => "/ai-chat",
            Route::LlmLogs => "/llm-logs",
            Route::Feedback => "/feedback",
            Route::Privacy => "/privacy",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Documents => "Documents",
            Route::Chat => "AI-Chat",
            Route::LlmLogs => "LLM Logs",
            Route::Feedback => "Feedback",
            Route::Privacy => "Privacy",
            Route::NotFound => "Not Found",
        }
    }
}
