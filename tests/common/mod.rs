//! Shared fixtures for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;
use tokio::net::TcpListener;
use web_workbench_server::config::ServerConfig;
use web_workbench_server::http::HttpServer;
use web_workbench_server::lifecycle::Shutdown;

pub const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta id="vscode-workbench-web-configuration" data-settings="{{WORKBENCH_WEB_CONFIGURATION}}">
<meta id="vscode-workbench-builtin-extensions" data-settings="{{WORKBENCH_BUILTIN_EXTENSIONS}}">
</head>
<body data-webview="{{WEBVIEW_ENDPOINT}}" data-user="{{REMOTE_USER_DATA_URI}}"></body>
</html>
"#;

pub const CALLBACK_PAGE: &str = "<html><body>You can close this window.</body></html>";

/// A running server over a throwaway application root.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    _root: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// Lay out a minimal repository: template, resources, one web and one native extension.
pub fn populate(root: &Path) {
    write(root, "src/vs/code/browser/workbench/workbench-dev.html", TEMPLATE.as_bytes());
    write(root, "resources/web/callback.html", CALLBACK_PAGE.as_bytes());
    write(root, "resources/win32/code.ico", &[0, 0, 1, 0]);
    write(root, "out/vs/loader.js", b"define();");

    write(root, "extensions/foo/package.json", br#"{"name":"foo","browser":"./bar"}"#);
    write(root, "extensions/foo/bar.js", b"0123456789");
    write(root, "extensions/foo/README.md", b"# foo");
    write(root, "extensions/native/package.json", br#"{"name":"native","main":"./out/main"}"#);
}

/// Start a server on an ephemeral port.
pub async fn start_server() -> TestServer {
    let root = tempfile::tempdir().unwrap();
    populate(root.path());

    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.paths.app_root = root.path().canonicalize().unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.port = addr.port();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        client,
        shutdown,
        _root: root,
    }
}
