use mt_content::action::ActionRegistry;
use mt_content::actions;
use mt_content::app::AppState;
use mt_content::config::Config;
use mt_content::routes::router;
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestServer {
    pub base: String,
    pub client: reqwest::Client,
    pub upload_dir: PathBuf,
    pub tmp_dir: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

pub async fn spawn(vars: &[(&str, &str)], register: impl FnOnce(&mut ActionRegistry)) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let tmp_dir = dir.path().join("tmp");
    std::fs::create_dir(&upload_dir).unwrap();
    std::fs::create_dir(&tmp_dir).unwrap();

    let mut env: HashMap<String, String> = HashMap::from([
        ("UPLOAD_DIR".to_string(), upload_dir.display().to_string()),
        ("UPLOAD_TMP_DIR".to_string(), tmp_dir.display().to_string()),
    ]);
    for (key, value) in vars {
        env.insert(key.to_string(), value.to_string());
    }
    let config = Config::from_map(&env).unwrap();

    let mut registry = ActionRegistry::new();
    actions::register(&mut registry);
    register(&mut registry);
    let app = router(AppState::new(config, registry));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{}", address),
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap(),
        upload_dir,
        tmp_dir,
        _dir: dir,
    }
}

/// `name=value` part of the session cookie set by a response
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
