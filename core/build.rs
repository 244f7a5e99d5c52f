use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct SiteFile {
    default_lang: String,
    lang_storage_key: String,
    consent_storage_key: String,
    narrow_viewport_px: u32,
    panels: Vec<String>,
    contact_email: String,
    titles: Titles,
    analytics: Analytics,
}

#[derive(Deserialize)]
struct Titles {
    es: String,
    en: String,
}

#[derive(Deserialize)]
struct Analytics {
    measurement_id: String,
    loader_url: String,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=BRACED_SITE_CONFIG");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let config_path = resolve_config_path(workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
        panic!(
            "failed to read site config at {}: {err}",
            config_path.display()
        )
    });

    let site: SiteFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse site config at {}: {err}",
            config_path.display()
        )
    });

    validate(&site, &config_path);

    let mut output = String::new();
    writeln!(
        &mut output,
        "pub const DEFAULT_LANG: &str = {};",
        rust_string(&site.default_lang)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const LANG_STORAGE_KEY: &str = {};",
        rust_string(&site.lang_storage_key)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CONSENT_STORAGE_KEY: &str = {};",
        rust_string(&site.consent_storage_key)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const NARROW_VIEWPORT_PX: f32 = {}.0;",
        site.narrow_viewport_px
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CONTACT_EMAIL: &str = {};",
        rust_string(&site.contact_email)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const TITLE_ES: &str = {};",
        rust_string(&site.titles.es)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const TITLE_EN: &str = {};",
        rust_string(&site.titles.en)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const ANALYTICS_MEASUREMENT_ID: &str = {};",
        rust_string(&site.analytics.measurement_id)
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const ANALYTICS_LOADER_URL: &str = {};",
        rust_string(&site.analytics.loader_url)
    )
    .unwrap();
    writeln!(&mut output).unwrap();
    writeln!(&mut output, "pub const PANEL_KEYWORDS: &[&str] = &[").unwrap();
    for keyword in &site.panels {
        writeln!(&mut output, "    {},", rust_string(keyword)).unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("site_config.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("BRACED_SITE_CONFIG").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("site.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn validate(site: &SiteFile, config_path: &Path) {
    if site.default_lang != "es" && site.default_lang != "en" {
        panic!(
            "default_lang must be \"es\" or \"en\", got '{}' in {}",
            site.default_lang,
            config_path.display()
        );
    }
    for (name, value) in [
        ("lang_storage_key", &site.lang_storage_key),
        ("consent_storage_key", &site.consent_storage_key),
        ("contact_email", &site.contact_email),
        ("titles.es", &site.titles.es),
        ("titles.en", &site.titles.en),
        ("analytics.measurement_id", &site.analytics.measurement_id),
    ] {
        if value.trim().is_empty() {
            panic!("{name} cannot be empty in {}", config_path.display());
        }
    }
    if site.lang_storage_key == site.consent_storage_key {
        panic!(
            "lang_storage_key and consent_storage_key must differ in {}",
            config_path.display()
        );
    }
    if !site.contact_email.contains('@') {
        panic!(
            "contact_email '{}' is not an address in {}",
            site.contact_email,
            config_path.display()
        );
    }
    if !site.analytics.loader_url.starts_with("https://") {
        panic!(
            "analytics.loader_url must be an https URL in {}",
            config_path.display()
        );
    }
    if site.narrow_viewport_px == 0 {
        panic!(
            "narrow_viewport_px must be positive in {}",
            config_path.display()
        );
    }
    if site.panels.is_empty() {
        panic!("panels cannot be empty in {}", config_path.display());
    }

    let mut seen = HashSet::new();
    for keyword in &site.panels {
        if keyword.is_empty() {
            panic!("panel keyword cannot be empty in {}", config_path.display());
        }
        if !keyword
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
        {
            panic!(
                "panel keyword '{}' must use [a-z0-9-] in {}",
                keyword,
                config_path.display()
            );
        }
        if !seen.insert(keyword.clone()) {
            panic!(
                "duplicate panel keyword '{}' in {}",
                keyword,
                config_path.display()
            );
        }
    }
}
