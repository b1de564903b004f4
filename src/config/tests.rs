use std::io::Write;

use super::*;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn isolated_env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

#[test]
fn defaults_are_valid() {
    let settings = Settings::defaults().expect("valid settings");

    assert_eq!(settings.server.addr.port(), 3000);
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert_eq!(settings.logging.format, LogFormat::Compact);
    assert_eq!(settings.site.base_url(), "https://beyond-ui-blog.vercel.app");
    assert_eq!(settings.site.title, "Beyond UI - Modern Blog Platform");
    assert_eq!(settings.search.debounce, Duration::from_millis(300));
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.capacity.get(), 64);
    assert_eq!(settings.cache.ttl, Duration::from_secs(60));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn file_then_env_then_cli() {
    let file = write_config(
        r#"
[server]
port = 4000
host = "0.0.0.0"

[search]
debounce_ms = 500

[cache]
capacity = 8
"#,
    );

    let args = CliArgs::parse_from([
        "beyond-blog",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "serve",
        "--server-port",
        "4200",
    ]);
    let env = isolated_env(&[
        ("BEYOND_BLOG__SERVER__PORT", "4100"),
        ("BEYOND_BLOG__SEARCH__DEBOUNCE_MS", "450"),
    ]);

    let settings = load_with_env(&args, env).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4200);
    assert_eq!(settings.server.addr.ip().to_string(), "0.0.0.0");
    assert_eq!(settings.search.debounce, Duration::from_millis(450));
    assert_eq!(settings.cache.capacity.get(), 8);
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let args = CliArgs::parse_from([
        "beyond-blog",
        "--config-file",
        "/nonexistent/beyond-blog.toml",
    ]);

    let err = load_with_env(&args, isolated_env(&[])).expect_err("file is required");
    assert!(matches!(err, LoadError::Build(_)));
}

#[test]
fn zero_debounce_is_rejected() {
    let mut raw = RawSettings::default();
    raw.search.debounce_ms = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero debounce");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "search.debounce_ms",
            ..
        }
    ));
}

#[test]
fn zero_cache_capacity_is_rejected() {
    let mut raw = RawSettings::default();
    raw.cache.capacity = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero capacity");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "cache.capacity",
            ..
        }
    ));
}

#[test]
fn public_url_must_be_http() {
    let mut raw = RawSettings::default();
    raw.site.public_url = Some("ftp://example.com".to_string());

    let err = Settings::from_raw(raw).expect_err("ftp scheme");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "site.public_url",
            ..
        }
    ));
}

#[test]
fn public_url_trailing_slash_is_normalized() {
    let mut raw = RawSettings::default();
    raw.site.public_url = Some("https://blog.example.com/".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.site.base_url(), "https://blog.example.com");
    assert_eq!(
        settings.site.absolute("/blog/hello"),
        "https://blog.example.com/blog/hello"
    );
    assert_eq!(settings.site.absolute("/"), "https://blog.example.com");
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["beyond-blog"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "beyond-blog",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--search-debounce-ms",
        "150",
        "--cache-enabled",
        "false",
        "--site-public-url",
        "https://blog.example.com",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.search.search_debounce_ms, Some(150));
            assert_eq!(serve.overrides.search.cache_enabled, Some(false));
            assert_eq!(
                serve.overrides.site.site_public_url.as_deref(),
                Some("https://blog.example.com")
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_search_arguments() {
    let args = CliArgs::parse_from(["beyond-blog", "search", "saas", "--json"]);

    match args.command.expect("search command") {
        Command::Search(search) => {
            assert_eq!(search.query.as_deref(), Some("saas"));
            assert!(search.json);
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn search_overrides_apply_to_search_command() {
    let mut raw = RawSettings::default();
    raw.apply_search_overrides(&SearchOverrides {
        search_debounce_ms: Some(50),
        cache_enabled: Some(false),
    });

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.search.debounce, Duration::from_millis(50));
    assert!(!settings.cache.enabled);
}
