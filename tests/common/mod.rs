//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use jinja_hub::config::HostConfig;
use jinja_hub::sites::ConfigStore;
use jinja_hub::{HttpServer, SiteHost};
use tempfile::TempDir;
use tower::ServiceExt;

pub const REGISTRY: &str = r#"{
    "platform": {"name": "Test Hub", "description": "integration tests"},
    "home_site": "_home",
    "sites": {
        "foo": {"name": "Foo Cloud", "enabled": true, "order": 1, "domains": ["foo.example.com"]},
        "bar": {"name": "Bar Cloud", "enabled": true, "order": 2},
        "off": {"name": "Off Cloud", "enabled": false, "domains": ["off.example.com"]},
        "noconf": {"name": "No Config", "enabled": true},
        "nostatic": {"name": "No Static", "enabled": true}
    },
    "domain_mapping": {
        "bar.example.com": "bar",
        "ghost.example.com": "ghost",
        "disabled.example.com": "off"
    }
}"#;

pub const FOO_CONFIG: &str = r#"{
    "title": "Foo Console",
    "pages": {
        "login": {"order": 0, "title": "Sign in"},
        "ecs": {"order": 2, "title": "Instances"},
        "dash": {"order": 1, "title": "Dashboard"}
    }
}"#;

pub const PAGE_TEMPLATE: &str = "{{ site_name }}|{{ base_path }}|{{ config.base_path }}|\
{% if page %}{{ page.title }}{% else %}-{% endif %}|\
{% for p in config.pages_array %}{{ p.key }},{% endfor %}|\
{% for s in all_sites %}{{ s.id }},{% endfor %}|{{ platform.name }}";

pub const HOME_TEMPLATE: &str = "{{ platform.name }}:{% for s in sites %}{{ s.name }}={{ s.info.name }};{% endfor %}";

/// A sites tree on disk that lives as long as the value.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// The standard tree used by most tests.
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture.write("sites.json", REGISTRY);

        fixture.write("foo/config.json", FOO_CONFIG);
        fixture.write("foo/templates/pages/login.html", PAGE_TEMPLATE);
        fixture.write("foo/templates/pages/dash.html", PAGE_TEMPLATE);
        fixture.write("foo/templates/pages/extra.html", PAGE_TEMPLATE);
        fixture.write("foo/static/js/app.js", "console.log('foo');");
        fixture.write("foo/static/css/site.css", "body { color: red; }");

        fixture.write("bar/config.json", r#"{"title": "Bar Console"}"#);
        fixture.write("bar/templates/pages/login.html", PAGE_TEMPLATE);
        fixture.write("bar/static/logo.txt", "bar");

        fixture.write("off/config.json", "{}");
        fixture.write("off/templates/pages/login.html", PAGE_TEMPLATE);
        fixture.write("off/static/app.js", "off");

        fixture.write("noconf/templates/pages/login.html", PAGE_TEMPLATE);

        fixture.write("nostatic/config.json", "{}");
        fixture.write("nostatic/templates/pages/login.html", PAGE_TEMPLATE);

        fixture.write("_home/templates/index.html", HOME_TEMPLATE);
        fixture
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn host(&self) -> SiteHost {
        SiteHost::from_store(ConfigStore::load(self.root(), "sites.json").unwrap())
    }

    pub fn config(&self) -> HostConfig {
        let mut config = HostConfig::default();
        config.sites.root = self.root().to_path_buf();
        config
    }

    pub fn app(&self) -> Router {
        self.app_with(self.config())
    }

    pub fn app_with(&self, config: HostConfig) -> Router {
        HttpServer::new(config, self.host()).into_router()
    }
}

/// Send a GET for `path` with an optional `Host` header.
pub async fn get(app: &Router, host: Option<&str>, path: &str) -> Response<Body> {
    let mut builder = Request::get(path);
    if let Some(host) = host {
        builder = builder.header("host", host);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
